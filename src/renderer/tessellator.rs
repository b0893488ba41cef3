//! `Canvas` that turns drawing calls into a triangle list for the GPU

use glam::{Affine2, Vec2};

use super::canvas::{Canvas, Path};
use super::shapes;
use super::vertex::Vertex;

/// Segments used for a full ellipse
const ELLIPSE_SEGMENTS: u32 = 32;
/// Segments per rounded corner
const CORNER_SEGMENTS: u32 = 6;
/// Lines per quadratic curve
const CURVE_STEPS: u32 = 12;

/// Collects vertices (CSS pixels) for one frame
#[derive(Debug, Clone)]
pub struct Tessellator {
    vertices: Vec<Vertex>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl Canvas for Tessellator {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: [f32; 4]) {
        let outline = [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ];
        self.vertices
            .extend(shapes::convex_fill(&outline, &self.transform, color));
    }

    fn fill_round_rect(&mut self, origin: Vec2, size: Vec2, radius: f32, color: [f32; 4]) {
        let outline = shapes::round_rect_outline(origin, size, radius, CORNER_SEGMENTS);
        self.vertices
            .extend(shapes::convex_fill(&outline, &self.transform, color));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]) {
        let outline = shapes::ellipse_outline(center, radii, rotation, ELLIPSE_SEGMENTS);
        self.vertices
            .extend(shapes::convex_fill(&outline, &self.transform, color));
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: [f32; 4]) {
        for polyline in path.flatten(CURVE_STEPS) {
            self.vertices.extend(shapes::polyline_stroke(
                &polyline,
                width,
                &self.transform,
                color,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_frame;
    use crate::sim::{FallingItem, GameState, InputMode, ItemKind, Viewport};

    #[test]
    fn test_transform_stack() {
        let mut t = Tessellator::new();
        t.save();
        t.translate(Vec2::new(100.0, 50.0));
        t.rotate(std::f32::consts::FRAC_PI_2);
        t.fill_rect(Vec2::ZERO, Vec2::new(10.0, 1.0), [1.0; 4]);
        t.restore();
        t.fill_rect(Vec2::ZERO, Vec2::new(1.0, 1.0), [1.0; 4]);

        // Rotated rect's far corner lands below the pivot on screen
        let rotated = &t.vertices()[..12];
        assert!(
            rotated
                .iter()
                .any(|v| (v.position[0] - 100.0).abs() < 1e-3 && (v.position[1] - 60.0).abs() < 1e-3)
        );
        // Untransformed rect after restore stays at the origin
        let plain = &t.vertices()[12..];
        assert!(plain.iter().all(|v| v.position[0] <= 1.0 && v.position[1] <= 1.0));
    }

    #[test]
    fn test_frame_covers_viewport_and_items() {
        let mut state = GameState::new(1, Viewport::new(400.0, 800.0));
        state.start(InputMode::Keys);
        state.items.push(FallingItem {
            id: 1,
            kind: ItemKind::Hazard,
            pos: Vec2::new(50.0, 60.0),
            size: 30.0,
            speed: 160.0,
            spin: 0.0,
            rotation: 0.7,
        });

        let mut t = Tessellator::new();
        draw_frame(&state, &mut t);
        let n = t.vertices().len();
        assert!(n > 12);
        assert_eq!(n % 3, 0);

        t.clear();
        assert!(t.vertices().is_empty());
    }
}
