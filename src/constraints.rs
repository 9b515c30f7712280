//! Constraint enforcement for the shade rectangle and for post placement.
//!
//! Corrections are single deterministic passes. Nothing here searches for a
//! globally optimal layout: each rule rewrites coordinates in a fixed order and
//! the result is whatever that order produces.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Point, Post, ShadeRect};
use crate::units::Scale;

/// Allowed distance between the exact-distance target and a measured spacing,
/// in plan units.
const EXACT_DISTANCE_TOLERANCE: f64 = 1.0;

/// Bounds on the shade rectangle and on post spacing, all in feet.
///
/// The enforcer assumes every `min` is no larger than its `max`; that is not
/// checked.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeConstraints {
    /// Master switch for every rule in this struct.
    pub enabled: bool,
    /// Smallest allowed width.
    pub min_width: f64,
    /// Largest allowed width.
    pub max_width: f64,
    /// Smallest allowed height.
    pub min_height: f64,
    /// Largest allowed height.
    pub max_height: f64,
    /// Smallest allowed distance between any two posts.
    pub min_post_spacing: f64,
    /// Largest allowed distance between any two posts.
    pub max_post_spacing: f64,
    /// Round coordinates to the grid.
    pub snap_to_grid: bool,
    /// Grid pitch.
    pub grid_size: f64,
}

impl Default for ShadeConstraints {
    fn default() -> Self {
        Self {
            enabled: false,
            min_width: 8.0,
            max_width: 30.0,
            min_height: 8.0,
            max_height: 20.0,
            min_post_spacing: 6.0,
            max_post_spacing: 20.0,
            snap_to_grid: false,
            grid_size: 1.0,
        }
    }
}

/// Round `value` to the nearest multiple of `step`, halves rounding up.
fn snap(value: f64, step: f64) -> f64 {
    (value / step + 0.5).floor() * step
}

impl ShadeConstraints {
    /// Grid pitch in plan units when snapping applies.
    fn grid_step(&self, scale: Scale) -> Option<f64> {
        if !self.enabled || !self.snap_to_grid {
            return None;
        }
        let step = scale.plan_units_from_feet(self.grid_size);
        (step.is_finite() && step > 0.0).then_some(step)
    }

    /// Clamp a proposed rectangle into the configured bounds, then snap it.
    ///
    /// Only `width` and `height` are clamped, so the rectangle keeps its
    /// minimum corner. Snapping runs afterwards and may leave an extent up to
    /// half a grid cell past its bound. A disabled set passes the rectangle
    /// through untouched.
    ///
    /// # Examples
    /// ```
    /// use patiox::{Scale, ShadeConstraints, ShadeRect};
    ///
    /// let constraints = ShadeConstraints { enabled: true, ..ShadeConstraints::default() };
    /// let rect = constraints.enforce(ShadeRect::new(10.0, 10.0, 400.0, 50.0), Scale::default());
    /// assert!((rect.width - 300.0).abs() < 1e-9);
    /// assert!((rect.height - 80.0).abs() < 1e-9);
    /// assert_eq!(rect.x, 10.0);
    /// ```
    #[must_use]
    pub fn enforce(&self, proposed: ShadeRect, scale: Scale) -> ShadeRect {
        if !self.enabled {
            return proposed;
        }

        let width_ft = scale.to_feet(proposed.width);
        let height_ft = scale.to_feet(proposed.height);
        let mut rect = proposed;

        if width_ft > self.max_width {
            rect.width = scale.plan_units_from_feet(self.max_width);
        }
        if width_ft < self.min_width {
            rect.width = scale.plan_units_from_feet(self.min_width);
        }
        if height_ft > self.max_height {
            rect.height = scale.plan_units_from_feet(self.max_height);
        }
        if height_ft < self.min_height {
            rect.height = scale.plan_units_from_feet(self.min_height);
        }

        if let Some(step) = self.grid_step(scale) {
            rect = ShadeRect::new(
                snap(rect.x, step),
                snap(rect.y, step),
                snap(rect.width, step),
                snap(rect.height, step),
            );
        }

        if rect != proposed {
            debug!(?proposed, corrected = ?rect, "shade rectangle corrected");
        }
        rect
    }

    /// Round a pointer position to the grid when snapping applies.
    #[must_use]
    pub fn snap_point(&self, p: Point, scale: Scale) -> Point {
        match self.grid_step(scale) {
            Some(step) => Point::new(snap(p.x, step), snap(p.y, step)),
            None => p,
        }
    }

    /// Whether a post at `candidate` keeps the minimum spacing to every post.
    #[must_use]
    pub fn admits(&self, posts: &[Post], candidate: Point, scale: Scale) -> bool {
        if !self.enabled {
            return true;
        }
        posts.iter().all(|post| {
            scale.to_feet(post.position.distance_to(candidate)) >= self.min_post_spacing
        })
    }
}

/// Axis along which aligned posts share a coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentAxis {
    /// Posts share the first post's Y.
    #[default]
    Horizontal,
    /// Posts share the first post's X.
    Vertical,
}

/// Precision placement rules for posts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConstraints {
    /// Precision mode switch; also drives the precision surcharge.
    pub enabled: bool,
    /// Target spacing between consecutive posts in feet. Zero disables it.
    pub exact_distance: f64,
    /// Force every post onto the first post's line.
    pub parallel_alignment: bool,
    /// Which coordinate alignment shares.
    pub alignment_axis: AlignmentAxis,
}

impl Default for PostConstraints {
    fn default() -> Self {
        Self {
            enabled: false,
            exact_distance: 6.0,
            parallel_alignment: false,
            alignment_axis: AlignmentAxis::Horizontal,
        }
    }
}

impl PostConstraints {
    /// Run the exact-distance pass followed by alignment.
    ///
    /// Pairs are visited in sequence order and the later post of each pair is
    /// moved, so a correction propagates down the chain: pair `(1, 2)` is
    /// measured from wherever pair `(0, 1)` left post 1.
    #[must_use]
    pub fn apply(&self, posts: &[Post], scale: Scale) -> Vec<Post> {
        let mut corrected = posts.to_vec();
        if !self.enabled || corrected.len() < 2 {
            return corrected;
        }

        if self.exact_distance > 0.0 {
            let target = scale.plan_units_from_feet(self.exact_distance);
            for i in 1..corrected.len() {
                let anchor = corrected[i - 1].position;
                let current = corrected[i].position;
                let distance = anchor.distance_to(current);
                if (distance - target).abs() > EXACT_DISTANCE_TOLERANCE {
                    let angle = (current.y - anchor.y).atan2(current.x - anchor.x);
                    let relocated = Point::new(
                        anchor.x + target * angle.cos(),
                        anchor.y + target * angle.sin(),
                    );
                    debug!(
                        post = corrected[i].id.0,
                        from = ?current,
                        to = ?relocated,
                        "post moved to exact distance"
                    );
                    corrected[i].position = relocated;
                }
            }
        }

        if self.parallel_alignment {
            let first = corrected[0].position;
            for post in corrected.iter_mut().skip(1) {
                match self.alignment_axis {
                    AlignmentAxis::Horizontal => post.position.y = first.y,
                    AlignmentAxis::Vertical => post.position.x = first.x,
                }
            }
        }

        corrected
    }

    /// Re-place every post at uniform spacing in X order.
    ///
    /// Posts are sorted by X and laid out from the leftmost X. Y is forced to
    /// the leftmost post's Y only for horizontal alignment; otherwise each post
    /// keeps its own Y.
    #[must_use]
    pub fn relayout(&self, posts: &[Post], scale: Scale) -> Vec<Post> {
        if !self.enabled || posts.len() < 2 || self.exact_distance <= 0.0 {
            return posts.to_vec();
        }

        let mut sorted = posts.to_vec();
        sorted.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));

        let spacing = scale.plan_units_from_feet(self.exact_distance);
        let origin = sorted[0].position;
        let align =
            self.parallel_alignment && self.alignment_axis == AlignmentAxis::Horizontal;

        for (index, post) in sorted.iter_mut().enumerate() {
            post.position.x = origin.x + index as f64 * spacing;
            if align {
                post.position.y = origin.y;
            }
        }
        debug!(count = sorted.len(), spacing, "posts re-laid out");
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{point, PostId};
    use pretty_assertions::assert_eq;

    fn posts(points: &[(f64, f64)]) -> Vec<Post> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Post::new(PostId(i as u64), point(x, y)))
            .collect()
    }

    fn enabled() -> ShadeConstraints {
        ShadeConstraints {
            enabled: true,
            ..ShadeConstraints::default()
        }
    }

    fn precision() -> PostConstraints {
        PostConstraints {
            enabled: true,
            exact_distance: 10.0,
            ..PostConstraints::default()
        }
    }

    #[test]
    fn disabled_constraints_pass_rectangle_through() {
        let rect = ShadeRect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(ShadeConstraints::default().enforce(rect, Scale::default()), rect);
    }

    #[test]
    fn clamping_grows_towards_positive_axes() {
        let rect = enabled().enforce(ShadeRect::new(40.0, 60.0, 20.0, 900.0), Scale::default());
        assert_eq!(rect.x, 40.0);
        assert_eq!(rect.y, 60.0);
        assert!((rect.width - 80.0).abs() < 1e-9);
        assert!((rect.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn snapping_follows_clamping() {
        let constraints = ShadeConstraints {
            snap_to_grid: true,
            max_width: 30.55,
            ..enabled()
        };
        let rect = constraints.enforce(ShadeRect::new(14.0, 16.0, 400.0, 123.0), Scale::default());
        assert_eq!(rect, ShadeRect::new(10.0, 20.0, 310.0, 120.0));
    }

    #[test]
    fn snap_rounds_halves_up() {
        assert_eq!(snap(15.0, 10.0), 20.0);
        assert_eq!(snap(-15.0, 10.0), -10.0);
        assert_eq!(snap(14.9, 10.0), 10.0);
    }

    #[test]
    fn zero_grid_skips_snapping() {
        let constraints = ShadeConstraints {
            snap_to_grid: true,
            grid_size: 0.0,
            ..enabled()
        };
        let p = point(12.3, 45.6);
        assert_eq!(constraints.snap_point(p, Scale::default()), p);
    }

    #[test]
    fn spacing_gate_only_applies_when_enabled() {
        let existing = posts(&[(0.0, 0.0)]);
        let near = point(10.0, 0.0);
        assert!(ShadeConstraints::default().admits(&existing, near, Scale::default()));
        assert!(!enabled().admits(&existing, near, Scale::default()));
        assert!(enabled().admits(&existing, point(60.0, 0.0), Scale::default()));
    }

    #[test]
    fn exact_distance_cascades_along_the_chain() {
        let corrected = precision().apply(
            &posts(&[(0.0, 0.0), (50.0, 0.0), (200.0, 0.0)]),
            Scale::default(),
        );
        assert!((corrected[1].position.x - 100.0).abs() < 1e-9);
        assert!((corrected[2].position.x - 200.0).abs() < 1e-9);
        assert!(corrected[2].position.y.abs() < 1e-9);
    }

    #[test]
    fn within_tolerance_is_left_alone() {
        let original = posts(&[(0.0, 0.0), (100.5, 0.0)]);
        let corrected = precision().apply(&original, Scale::default());
        assert_eq!(corrected, original);
    }

    #[test]
    fn vertical_alignment_shares_first_x() {
        let constraints = PostConstraints {
            exact_distance: 0.0,
            parallel_alignment: true,
            alignment_axis: AlignmentAxis::Vertical,
            ..precision()
        };
        let corrected =
            constraints.apply(&posts(&[(5.0, 0.0), (40.0, 80.0), (70.0, 160.0)]), Scale::default());
        assert!(corrected.iter().all(|post| post.position.x == 5.0));
        assert_eq!(corrected[2].position.y, 160.0);
    }

    #[test]
    fn relayout_orders_by_x() {
        let constraints = PostConstraints {
            parallel_alignment: true,
            ..precision()
        };
        let laid_out = constraints.relayout(
            &posts(&[(300.0, 9.0), (20.0, 4.0), (150.0, 7.0)]),
            Scale::default(),
        );
        let ids: Vec<u64> = laid_out.iter().map(|post| post.id.0).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert!((laid_out[2].position.x - 220.0).abs() < 1e-9);
        assert!(laid_out.iter().all(|post| post.position.y == 4.0));
    }

    #[test]
    fn relayout_keeps_y_without_horizontal_alignment() {
        let laid_out =
            precision().relayout(&posts(&[(0.0, 3.0), (10.0, 8.0)]), Scale::default());
        assert_eq!(laid_out[1].position.y, 8.0);
    }

    #[test]
    fn relayout_needs_a_positive_distance() {
        let original = posts(&[(300.0, 9.0), (20.0, 4.0)]);
        for exact_distance in [0.0, -4.0] {
            let constraints = PostConstraints {
                exact_distance,
                ..precision()
            };
            assert_eq!(constraints.relayout(&original, Scale::default()), original);
        }
    }
}
