//! Axis-aligned bounding boxes and contact rules
//!
//! Every entity reports an AABB in arena coordinates (y down). Overlap is
//! strict: boxes that only share an edge do not collide.

use glam::Vec2;

use super::state::NeonColor;
use crate::tuning::CollisionRule;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box enclosing a rectangle rotated by `degrees` around its center
    pub fn from_rotated(center: Vec2, size: Vec2, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let half = Vec2::new(
            size.x * 0.5 * cos + size.y * 0.5 * sin,
            size.x * 0.5 * sin + size.y * 0.5 * cos,
        );
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box enclosing a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, Vec2::splat(radius * 2.0))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Strict overlap test (shared edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// What an overlap means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player passes through unharmed
    Harmless,
    /// Run ends (unless a shield absorbs it)
    Terminal,
}

/// Judge an overlap between the player and an obstacle under `rule`
pub fn judge_contact(rule: CollisionRule, player: NeonColor, obstacle: NeonColor) -> Contact {
    match rule {
        CollisionRule::Dodge => Contact::Terminal,
        CollisionRule::ColorMatch if player == obstacle => Contact::Harmless,
        CollisionRule::ColorMatch => Contact::Terminal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::splat(40.0));
        let b = Aabb::from_center(Vec2::new(30.0, 10.0), Vec2::splat(40.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 20.0));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(50.0, 50.0), Vec2::new(60.0, 60.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rotated_box_grows() {
        let size = Vec2::splat(40.0);
        let flat = Aabb::from_rotated(Vec2::ZERO, size, 0.0);
        let diamond = Aabb::from_rotated(Vec2::ZERO, size, 45.0);
        assert!((flat.width() - 40.0).abs() < 1e-4);
        assert!((diamond.width() - 40.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
    }

    #[test]
    fn test_color_match_rule() {
        let rule = CollisionRule::ColorMatch;
        assert_eq!(judge_contact(rule, NeonColor::Red, NeonColor::Red), Contact::Harmless);
        assert_eq!(judge_contact(rule, NeonColor::Red, NeonColor::Blue), Contact::Terminal);
    }

    #[test]
    fn test_dodge_rule_ignores_color() {
        let rule = CollisionRule::Dodge;
        assert_eq!(judge_contact(rule, NeonColor::Red, NeonColor::Red), Contact::Terminal);
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Aabb::from_center(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::from_center(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_gap_means_no_collision(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
            gap in 0.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(x, y), Vec2::new(x + w, y + h));
            let b = Aabb::new(Vec2::new(x + w + gap, y), Vec2::new(x + 2.0 * w + gap, y + h));
            prop_assert!(!a.intersects(&b));
        }
    }
}
