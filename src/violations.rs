//! Detection of constraint breaches in a design.

use std::fmt;

use crate::constraints::ShadeConstraints;
use crate::geometry::{Post, ShadeRect};
use crate::units::Scale;

/// A single measured value outside its configured bound.
///
/// The [`Display`](fmt::Display) form is the human-readable description shown
/// to the user. Post indices are 1-based.
#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    /// Shade width above the maximum.
    WidthAboveMax {
        /// Measured width in feet.
        width: f64,
        /// Configured maximum in feet.
        max: f64,
    },
    /// Shade width below the minimum.
    WidthBelowMin {
        /// Measured width in feet.
        width: f64,
        /// Configured minimum in feet.
        min: f64,
    },
    /// Shade height above the maximum.
    HeightAboveMax {
        /// Measured height in feet.
        height: f64,
        /// Configured maximum in feet.
        max: f64,
    },
    /// Shade height below the minimum.
    HeightBelowMin {
        /// Measured height in feet.
        height: f64,
        /// Configured minimum in feet.
        min: f64,
    },
    /// Two posts closer than the minimum spacing.
    PostsTooClose {
        /// 1-based index of the earlier post.
        first: usize,
        /// 1-based index of the later post.
        second: usize,
        /// Measured distance in feet.
        distance: f64,
        /// Configured minimum in feet.
        min: f64,
    },
    /// Two posts further apart than the maximum spacing.
    PostsTooFar {
        /// 1-based index of the earlier post.
        first: usize,
        /// 1-based index of the later post.
        second: usize,
        /// Measured distance in feet.
        distance: f64,
        /// Configured maximum in feet.
        max: f64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WidthAboveMax { width, max } => {
                write!(f, "Width {width:.1}ft exceeds maximum {max}ft")
            }
            Violation::WidthBelowMin { width, min } => {
                write!(f, "Width {width:.1}ft below minimum {min}ft")
            }
            Violation::HeightAboveMax { height, max } => {
                write!(f, "Height {height:.1}ft exceeds maximum {max}ft")
            }
            Violation::HeightBelowMin { height, min } => {
                write!(f, "Height {height:.1}ft below minimum {min}ft")
            }
            Violation::PostsTooClose {
                first,
                second,
                distance,
                min,
            } => write!(
                f,
                "Posts {first} and {second} are {distance:.1}ft apart (min: {min}ft)"
            ),
            Violation::PostsTooFar {
                first,
                second,
                distance,
                max,
            } => write!(
                f,
                "Posts {first} and {second} are {distance:.1}ft apart (max: {max}ft)"
            ),
        }
    }
}

/// List every breach of `constraints`, in a fixed order.
///
/// Shade dimensions come first (width max, width min, height max, height min),
/// then each unordered post pair. Nothing is reported while the constraints are
/// disabled or no shade rectangle exists.
#[must_use]
pub fn find_violations(
    posts: &[Post],
    shade: Option<&ShadeRect>,
    constraints: &ShadeConstraints,
    scale: Scale,
) -> Vec<Violation> {
    let Some(rect) = shade else {
        return Vec::new();
    };
    if !constraints.enabled {
        return Vec::new();
    }

    let mut violations = Vec::new();
    let width = scale.to_feet(rect.clamped_width());
    let height = scale.to_feet(rect.clamped_height());

    if width > constraints.max_width {
        violations.push(Violation::WidthAboveMax {
            width,
            max: constraints.max_width,
        });
    }
    if width < constraints.min_width {
        violations.push(Violation::WidthBelowMin {
            width,
            min: constraints.min_width,
        });
    }
    if height > constraints.max_height {
        violations.push(Violation::HeightAboveMax {
            height,
            max: constraints.max_height,
        });
    }
    if height < constraints.min_height {
        violations.push(Violation::HeightBelowMin {
            height,
            min: constraints.min_height,
        });
    }

    for (i, a) in posts.iter().enumerate() {
        for (j, b) in posts.iter().enumerate().skip(i + 1) {
            let distance = scale.to_feet(a.position.distance_to(b.position));
            if distance < constraints.min_post_spacing {
                violations.push(Violation::PostsTooClose {
                    first: i + 1,
                    second: j + 1,
                    distance,
                    min: constraints.min_post_spacing,
                });
            }
            if distance > constraints.max_post_spacing {
                violations.push(Violation::PostsTooFar {
                    first: i + 1,
                    second: j + 1,
                    distance,
                    max: constraints.max_post_spacing,
                });
            }
        }
    }

    violations
}
