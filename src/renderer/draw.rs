//! Frame painter: game state in, canvas calls out
//!
//! Reads the state only. Every item is drawn around its own center and
//! rotated by its current rotation.

use glam::Vec2;

use super::canvas::{Canvas, Path};
use super::vertex::colors;
use crate::sim::{FallingItem, GameState, ItemKind};

/// Width of stems and fuses (px)
const LINE_WIDTH: f32 = 2.0;

/// Paint one frame from the current state
pub fn draw_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    canvas.fill_rect(Vec2::ZERO, state.viewport.size(), colors::BACKGROUND);

    let basket = &state.basket;
    let basket_color = basket
        .active_flash(state.clock_ms)
        .unwrap_or(colors::BASKET);
    canvas.fill_round_rect(
        basket.pos,
        basket.size,
        state.tuning.basket_corner_radius,
        basket_color,
    );

    for item in &state.items {
        canvas.save();
        canvas.translate(item.center());
        canvas.rotate(item.rotation);
        match item.kind {
            ItemKind::Fruit => draw_fruit(canvas, item),
            ItemKind::Hazard => draw_hazard(canvas, item),
        }
        canvas.restore();
    }
}

/// Apple: body, shine, leaf, stem
fn draw_fruit<C: Canvas + ?Sized>(canvas: &mut C, item: &FallingItem) {
    let s = item.size;
    canvas.fill_ellipse(
        Vec2::new(0.0, 2.0),
        Vec2::new(s * 0.42, s * 0.36),
        0.0,
        colors::FRUIT_BODY,
    );
    canvas.fill_ellipse(
        Vec2::new(-s * 0.1, -s * 0.02),
        Vec2::new(s * 0.08, s * 0.14),
        0.4,
        colors::FRUIT_SHINE,
    );
    canvas.fill_ellipse(
        Vec2::new(s * 0.12, -s * 0.26),
        Vec2::new(s * 0.14, s * 0.06),
        -0.5,
        colors::FRUIT_LEAF,
    );
    let stem = Path::new()
        .move_to(Vec2::new(0.0, -s * 0.24))
        .line_to(Vec2::new(0.0, -s * 0.34));
    canvas.stroke_path(&stem, LINE_WIDTH, colors::STEM);
}

/// Bomb: body, fuse, spark
fn draw_hazard<C: Canvas + ?Sized>(canvas: &mut C, item: &FallingItem) {
    let s = item.size;
    canvas.fill_circle(Vec2::new(0.0, 4.0), s * 0.38, colors::HAZARD_BODY);
    let fuse = Path::new()
        .move_to(Vec2::new(0.0, -s * 0.2))
        .quad_to(Vec2::new(s * 0.12, -s * 0.34), Vec2::new(s * 0.2, -s * 0.42));
    canvas.stroke_path(&fuse, LINE_WIDTH, colors::STEM);
    canvas.fill_circle(
        Vec2::new(s * 0.22, -s * 0.44),
        s * 0.06,
        colors::HAZARD_SPARK,
    );
}
