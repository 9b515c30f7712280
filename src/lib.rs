#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod config;
mod constraints;
mod cost;
mod design;
mod engine;
mod errors;
mod geometry;
pub mod report;
mod structure;
mod units;
mod violations;

pub use crate::config::EngineConfig;
pub use crate::constraints::{AlignmentAxis, PostConstraints, ShadeConstraints};
pub use crate::cost::{CostBreakdown, CostInputs, CoverType, PriceTable};
pub use crate::design::{Design, EditMode, TiltAngle};
pub use crate::engine::{Engine, Evaluation};
pub use crate::errors::{ConfigError, DesignEditError};
pub use crate::geometry::{cantilever_span, coverage_area, point, Point, Post, PostId, ShadeRect};
pub use crate::structure::{CantileverLimit, CantileverLimits, Classification, PostSize};
pub use crate::units::Scale;
pub use crate::violations::{find_violations, Violation};
