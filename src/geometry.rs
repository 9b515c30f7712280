//! Fundamental geometric types and measurements for a patio-cover plan.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::units::Scale;

/// Position on the plan measured in plan units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the plan X axis.
    pub x: f64,
    /// Distance along the plan Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Straight-line distance to `other` in plan units.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use patiox::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Opaque identifier of a post within a design.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

/// A support post placed on the plan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier assigned when the post was placed.
    pub id: PostId,
    /// Position in plan units.
    pub position: Point,
}

impl Post {
    /// Create a post at `position`.
    #[must_use]
    pub const fn new(id: PostId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Axis-aligned shade rectangle anchored at its minimum corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadeRect {
    /// Left edge in plan units.
    pub x: f64,
    /// Top edge in plan units.
    pub y: f64,
    /// Extent along X in plan units.
    pub width: f64,
    /// Extent along Y in plan units.
    pub height: f64,
}

impl ShadeRect {
    /// Create a rectangle from its minimum corner and extents.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width in plan units, with a negative extent read as zero.
    #[must_use]
    pub fn clamped_width(&self) -> f64 {
        self.width.max(0.0)
    }

    /// Height in plan units, with a negative extent read as zero.
    #[must_use]
    pub fn clamped_height(&self) -> f64 {
        self.height.max(0.0)
    }

    /// Right edge in plan units.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.clamped_width()
    }

    /// Bottom edge in plan units.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.clamped_height()
    }

    /// How far `p` lies beyond the rectangle, taking the larger of the two axis
    /// components. Zero when the point is within both extents.
    #[must_use]
    pub fn overhang(&self, p: Point) -> f64 {
        let dx = (self.x - p.x).max(p.x - self.right()).max(0.0);
        let dy = (self.y - p.y).max(p.y - self.bottom()).max(0.0);
        dx.max(dy)
    }
}

/// Largest distance in feet from any post to the rectangle's extents.
///
/// Reports zero when fewer than two posts exist or no rectangle is defined.
/// A post inside the rectangle contributes nothing.
///
/// # Examples
/// ```
/// use patiox::{cantilever_span, point, Post, PostId, Scale, ShadeRect};
///
/// let rect = ShadeRect::new(0.0, 0.0, 100.0, 100.0);
/// let posts = [
///     Post::new(PostId(0), point(50.0, 50.0)),
///     Post::new(PostId(1), point(150.0, 20.0)),
/// ];
/// let span = cantilever_span(&posts, Some(&rect), Scale::default());
/// assert!((span - 5.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn cantilever_span(posts: &[Post], shade: Option<&ShadeRect>, scale: Scale) -> f64 {
    let Some(rect) = shade else {
        return 0.0;
    };
    if posts.len() < 2 {
        return 0.0;
    }
    let widest = posts
        .iter()
        .map(|post| rect.overhang(post.position))
        .fold(0.0, f64::max);
    scale.to_feet(widest)
}

/// Covered area of the shade rectangle in square feet, zero when none is
/// defined or either extent is not positive.
#[must_use]
pub fn coverage_area(shade: Option<&ShadeRect>, scale: Scale) -> f64 {
    shade.map_or(0.0, |rect| {
        scale.to_feet(rect.clamped_width()) * scale.to_feet(rect.clamped_height())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(points: &[(f64, f64)]) -> Vec<Post> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Post::new(PostId(i as u64), point(x, y)))
            .collect()
    }

    #[test]
    fn point_to_vector_roundtrip() {
        let p = Point::new(1.0, 2.0);
        let vector: Vector2<f64> = p.into();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), p);
    }

    #[test]
    fn span_is_zero_without_enough_posts() {
        let rect = ShadeRect::new(0.0, 0.0, 10.0, 10.0);
        let single = posts(&[(500.0, 500.0)]);
        assert_eq!(cantilever_span(&single, Some(&rect), Scale::default()), 0.0);
    }

    #[test]
    fn span_is_zero_without_rectangle() {
        let pair = posts(&[(-500.0, 0.0), (500.0, 0.0)]);
        assert_eq!(cantilever_span(&pair, None, Scale::default()), 0.0);
    }

    #[test]
    fn posts_inside_contribute_nothing() {
        let rect = ShadeRect::new(0.0, 0.0, 200.0, 100.0);
        let inside = posts(&[(10.0, 10.0), (190.0, 90.0)]);
        assert_eq!(cantilever_span(&inside, Some(&rect), Scale::default()), 0.0);
    }

    #[test]
    fn span_takes_larger_axis_component() {
        let rect = ShadeRect::new(0.0, 0.0, 100.0, 100.0);
        // 30 units left and 50 units below.
        let pair = posts(&[(50.0, 50.0), (-30.0, 150.0)]);
        let span = cantilever_span(&pair, Some(&rect), Scale::default());
        assert!((span - 5.0).abs() < 1e-9);
    }

    #[test]
    fn area_uses_feet() {
        let rect = ShadeRect::new(5.0, 5.0, 200.0, 150.0);
        let area = coverage_area(Some(&rect), Scale::default());
        assert!((area - 300.0).abs() < 1e-9);
        assert_eq!(coverage_area(None, Scale::default()), 0.0);
    }

    #[test]
    fn negative_extents_cover_nothing() {
        let flipped = ShadeRect::new(0.0, 0.0, -100.0, -100.0);
        let one_side = ShadeRect::new(0.0, 0.0, -100.0, 100.0);
        assert_eq!(coverage_area(Some(&flipped), Scale::default()), 0.0);
        assert_eq!(coverage_area(Some(&one_side), Scale::default()), 0.0);
        assert_eq!(flipped.right(), 0.0);
        assert_eq!(flipped.bottom(), 0.0);
    }

    #[test]
    fn negative_extents_measure_span_from_the_corner() {
        let flipped = ShadeRect::new(0.0, 0.0, -100.0, -100.0);
        let pair = posts(&[(-50.0, -50.0), (-60.0, -60.0)]);
        let span = cantilever_span(&pair, Some(&flipped), Scale::default());
        assert!((span - 6.0).abs() < 1e-9);

        let beside = posts(&[(0.0, 0.0), (30.0, 0.0)]);
        let span = cantilever_span(&beside, Some(&flipped), Scale::default());
        assert!((span - 3.0).abs() < 1e-9);
    }
}
