//! Drawing vocabulary the frame painter is allowed to use
//!
//! Mirrors the small subset of a 2D canvas API the game needs, so the painter
//! can target the GPU tessellator or a test recorder alike.

use glam::Vec2;

/// A 2D drawing surface in CSS pixels, y pointing down
pub trait Canvas {
    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Rotate subsequent drawing by `angle` radians (clockwise on screen)
    fn rotate(&mut self, angle: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: [f32; 4]);
    fn fill_round_rect(&mut self, origin: Vec2, size: Vec2, radius: f32, color: [f32; 4]);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]);
    fn stroke_path(&mut self, path: &Path, width: f32, color: [f32; 4]);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.fill_ellipse(center, Vec2::splat(radius), 0.0, color);
    }
}

/// One step of a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
}

/// Open path built from move/line/quadratic segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn quad_to(mut self, ctrl: Vec2, to: Vec2) -> Self {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Flatten into polylines, splitting each curve into `curve_steps` lines
    ///
    /// A line or curve with no current point starts a new subpath at its
    /// first point, as a browser canvas does.
    pub fn flatten(&self, curve_steps: u32) -> Vec<Vec<Vec2>> {
        let steps = curve_steps.max(1);
        let mut polylines = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    if current.len() >= 2 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathSegment::LineTo(p) => current.push(p),
                PathSegment::QuadTo { ctrl, to } => {
                    let Some(&from) = current.last() else {
                        current.push(ctrl);
                        current.push(to);
                        continue;
                    };
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        let u = 1.0 - t;
                        current.push(from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t));
                    }
                }
            }
        }
        if current.len() >= 2 {
            polylines.push(current);
        }
        polylines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_lines() {
        let path = Path::new()
            .move_to(Vec2::new(0.0, 0.0))
            .line_to(Vec2::new(0.0, -10.0));
        assert_eq!(
            path.flatten(8),
            vec![vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, -10.0)]]
        );
    }

    #[test]
    fn test_flatten_quad_hits_endpoints() {
        let to = Vec2::new(20.0, -42.0);
        let path = Path::new()
            .move_to(Vec2::new(0.0, -20.0))
            .quad_to(Vec2::new(12.0, -34.0), to);
        let lines = path.flatten(10);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 11);
        assert_eq!(lines[0][0], Vec2::new(0.0, -20.0));
        assert!((lines[0][10] - to).length() < 1e-4);
    }

    #[test]
    fn test_flatten_splits_subpaths_and_drops_lone_points() {
        let path = Path::new()
            .move_to(Vec2::ZERO)
            .move_to(Vec2::ONE)
            .line_to(Vec2::new(2.0, 2.0))
            .move_to(Vec2::new(5.0, 5.0))
            .line_to(Vec2::new(6.0, 6.0));
        let lines = path.flatten(4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0], Vec2::ONE);
    }
}
