//! Shape generation for 2D primitives
//!
//! Outlines are built in local space, then pushed through the canvas
//! transform and triangulated into a triangle list.

use glam::{Affine2, Vec2};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::vertex::Vertex;

/// Points around an ellipse (clockwise on screen)
pub fn ellipse_outline(center: Vec2, radii: Vec2, rotation: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    let rot = Vec2::from_angle(rotation);
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            let local = Vec2::new(radii.x * theta.cos(), radii.y * theta.sin());
            center + rot.rotate(local)
        })
        .collect()
}

/// Points around a rectangle with rounded corners
///
/// The corner radius is limited to half the shorter side.
pub fn round_rect_outline(origin: Vec2, size: Vec2, radius: f32, corner_segments: u32) -> Vec<Vec2> {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    if r == 0.0 {
        return vec![
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ];
    }

    let steps = corner_segments.max(1);
    // (corner center, start angle), walking top-right -> bottom-right -> bottom-left -> top-left
    let corners = [
        (origin + Vec2::new(size.x - r, r), -FRAC_PI_2),
        (origin + Vec2::new(size.x - r, size.y - r), 0.0),
        (origin + Vec2::new(r, size.y - r), FRAC_PI_2),
        (origin + Vec2::new(r, r), PI),
    ];

    let mut points = Vec::with_capacity(corners.len() * (steps as usize + 1));
    for (center, start) in corners {
        for i in 0..=steps {
            let theta = start + (i as f32 / steps as f32) * FRAC_PI_2;
            points.push(center + Vec2::from_angle(theta) * r);
        }
    }
    points
}

/// Triangulate a convex outline as a fan around its centroid
pub fn convex_fill(outline: &[Vec2], transform: &Affine2, color: [f32; 4]) -> Vec<Vertex> {
    if outline.len() < 3 {
        return Vec::new();
    }
    let centroid = outline.iter().copied().sum::<Vec2>() / outline.len() as f32;
    let c = transform.transform_point2(centroid);

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let a = transform.transform_point2(outline[i]);
        let b = transform.transform_point2(outline[(i + 1) % outline.len()]);

        vertices.push(Vertex::new(c.x, c.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Generate vertices for a constant-width polyline (one quad per segment)
pub fn polyline_stroke(
    points: &[Vec2],
    width: f32,
    transform: &Affine2,
    color: [f32; 4],
) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let p1 = transform.transform_point2(pair[0]);
        let p2 = transform.transform_point2(pair[1]);

        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_outline_radii() {
        let pts = ellipse_outline(Vec2::new(10.0, 20.0), Vec2::new(6.0, 3.0), 0.0, 4);
        assert_eq!(pts.len(), 4);
        assert!((pts[0] - Vec2::new(16.0, 20.0)).length() < 1e-4);
        assert!((pts[1] - Vec2::new(10.0, 23.0)).length() < 1e-4);
    }

    #[test]
    fn test_ellipse_rotation_quarter_turn() {
        let pts = ellipse_outline(Vec2::ZERO, Vec2::new(6.0, 3.0), FRAC_PI_2, 4);
        // Major axis now points down the screen
        assert!((pts[0] - Vec2::new(0.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn test_round_rect_stays_inside_bounds() {
        let origin = Vec2::new(5.0, 5.0);
        let size = Vec2::new(110.0, 24.0);
        let pts = round_rect_outline(origin, size, 8.0, 4);
        assert_eq!(pts.len(), 20);
        for p in pts {
            assert!(p.x >= origin.x - 1e-3 && p.x <= origin.x + size.x + 1e-3);
            assert!(p.y >= origin.y - 1e-3 && p.y <= origin.y + size.y + 1e-3);
        }
    }

    #[test]
    fn test_round_rect_zero_radius_is_plain() {
        let pts = round_rect_outline(Vec2::ZERO, Vec2::new(4.0, 2.0), 0.0, 4);
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn test_fill_and_stroke_vertex_counts() {
        let outline = ellipse_outline(Vec2::ZERO, Vec2::ONE, 0.0, 16);
        assert_eq!(convex_fill(&outline, &Affine2::IDENTITY, [1.0; 4]).len(), 48);
        let line = [Vec2::ZERO, Vec2::X, Vec2::ONE];
        assert_eq!(polyline_stroke(&line, 2.0, &Affine2::IDENTITY, [1.0; 4]).len(), 12);
        assert!(polyline_stroke(&line[..1], 2.0, &Affine2::IDENTITY, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_stroke_width() {
        let line = [Vec2::ZERO, Vec2::new(0.0, 10.0)];
        let verts = polyline_stroke(&line, 2.0, &Affine2::IDENTITY, [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|x| (x.abs() - 1.0).abs() < 1e-5));
    }
}
