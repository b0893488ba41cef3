//! Catch detection
//!
//! Items are tested by a single reference point (horizontal center, bottom
//! edge) against the basket rectangle, whose lower edge is extended by a small
//! tolerance so fast items are not skipped between frames.

use glam::Vec2;

use super::state::{Basket, FallingItem};

/// Axis-aligned rectangle, edges inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Terminal (or not) result for one item this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Overlapped the basket
    Caught,
    /// Dropped out of the playfield without being caught
    Fell,
    /// Still in flight
    Falling,
}

/// Basket rectangle with the lower edge pushed down by `tolerance`
pub fn catch_zone(basket: &Basket, tolerance: f32) -> Rect {
    let mut zone = Rect::from_origin_size(basket.pos, basket.size);
    zone.max.y += tolerance;
    zone
}

/// Decide one item's fate; `floor_y` is where an item's top counts as gone
pub fn resolve(item: &FallingItem, zone: &Rect, floor_y: f32) -> Outcome {
    if zone.contains(item.catch_point()) {
        Outcome::Caught
    } else if item.pos.y > floor_y {
        Outcome::Fell
    } else {
        Outcome::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::ItemKind;

    fn basket_at(x: f32, y: f32) -> Basket {
        let mut basket = Basket::new(&Tuning::default());
        basket.pos = Vec2::new(x, y);
        basket
    }

    /// Item whose catch point sits at (cx, bottom)
    fn item_with_catch_point(cx: f32, bottom: f32) -> FallingItem {
        let size = 30.0;
        FallingItem {
            id: 1,
            kind: ItemKind::Fruit,
            pos: Vec2::new(cx - size / 2.0, bottom - size),
            size,
            speed: 160.0,
            spin: 0.0,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_zone_extends_lower_edge_only() {
        let zone = catch_zone(&basket_at(100.0, 500.0), 6.0);
        assert_eq!(zone.min, Vec2::new(100.0, 500.0));
        assert_eq!(zone.max, Vec2::new(210.0, 530.0));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let zone = catch_zone(&basket_at(100.0, 500.0), 6.0);
        for (cx, bottom) in [(100.0, 500.0), (210.0, 530.0), (155.0, 515.0)] {
            let item = item_with_catch_point(cx, bottom);
            assert_eq!(resolve(&item, &zone, 900.0), Outcome::Caught, "({cx}, {bottom})");
        }
    }

    #[test]
    fn test_just_outside_is_not_caught() {
        let zone = catch_zone(&basket_at(100.0, 500.0), 6.0);
        for (cx, bottom) in [(99.0, 510.0), (211.0, 510.0), (150.0, 499.0), (150.0, 531.0)] {
            let item = item_with_catch_point(cx, bottom);
            assert_eq!(resolve(&item, &zone, 900.0), Outcome::Falling, "({cx}, {bottom})");
        }
    }

    #[test]
    fn test_fell_once_top_passes_floor() {
        let zone = catch_zone(&basket_at(100.0, 500.0), 6.0);
        let mut item = item_with_catch_point(20.0, 0.0);
        item.pos.y = 900.0;
        assert_eq!(resolve(&item, &zone, 900.0), Outcome::Falling);
        item.pos.y = 900.5;
        assert_eq!(resolve(&item, &zone, 900.0), Outcome::Fell);
    }
}
