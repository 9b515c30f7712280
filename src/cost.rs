//! Itemized pricing of a design.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::structure::PostSize;

/// Material used for the cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoverType {
    /// Open lattice slats.
    #[default]
    Lattice,
    /// Solid aluminium panels.
    SolidPanel,
}

impl fmt::Display for CoverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverType::Lattice => f.write_str("lattice"),
            CoverType::SolidPanel => f.write_str("solid panel"),
        }
    }
}

/// Unit prices and fixed fees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    /// Price of one 4x4 post.
    pub post_4x4: f64,
    /// Price of one 6x6 post.
    pub post_6x6: f64,
    /// Price of one 8x8 post.
    pub post_8x8: f64,
    /// Lattice cover per square foot.
    pub lattice_per_sq_ft: f64,
    /// Solid panel cover per square foot.
    pub solid_panel_per_sq_ft: f64,
    /// Hardware charged once per design.
    pub hardware_base: f64,
    /// Hardware charged per post.
    pub hardware_per_post: f64,
    /// Installation per square foot.
    pub installation_per_sq_ft: f64,
    /// Engineering review fee.
    pub engineering_fee: f64,
    /// Cantilever span in feet above which engineering is charged.
    pub engineering_threshold_ft: f64,
    /// Design revision charge when any violation exists.
    pub constraint_penalty: f64,
    /// Surcharge while precision placement is on.
    pub precision_fee: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            post_4x4: 150.0,
            post_6x6: 250.0,
            post_8x8: 380.0,
            lattice_per_sq_ft: 12.0,
            solid_panel_per_sq_ft: 18.0,
            hardware_base: 75.0,
            hardware_per_post: 25.0,
            installation_per_sq_ft: 8.0,
            engineering_fee: 500.0,
            engineering_threshold_ft: 10.0,
            constraint_penalty: 200.0,
            precision_fee: 150.0,
        }
    }
}

impl PriceTable {
    /// Price of one post of `size`.
    #[must_use]
    pub fn post_price(&self, size: PostSize) -> f64 {
        match size {
            PostSize::FourByFour => self.post_4x4,
            PostSize::SixBySix => self.post_6x6,
            PostSize::EightByEight => self.post_8x8,
        }
    }

    /// Cover material rate per square foot.
    #[must_use]
    pub fn cover_rate(&self, cover: CoverType) -> f64 {
        match cover {
            CoverType::Lattice => self.lattice_per_sq_ft,
            CoverType::SolidPanel => self.solid_panel_per_sq_ft,
        }
    }

    /// Every entry with its field name, for validation.
    pub(crate) fn entries(&self) -> [(&'static str, f64); 12] {
        [
            ("post_4x4", self.post_4x4),
            ("post_6x6", self.post_6x6),
            ("post_8x8", self.post_8x8),
            ("lattice_per_sq_ft", self.lattice_per_sq_ft),
            ("solid_panel_per_sq_ft", self.solid_panel_per_sq_ft),
            ("hardware_base", self.hardware_base),
            ("hardware_per_post", self.hardware_per_post),
            ("installation_per_sq_ft", self.installation_per_sq_ft),
            ("engineering_fee", self.engineering_fee),
            ("engineering_threshold_ft", self.engineering_threshold_ft),
            ("constraint_penalty", self.constraint_penalty),
            ("precision_fee", self.precision_fee),
        ]
    }
}

/// Everything the price depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostInputs {
    /// Number of posts.
    pub post_count: usize,
    /// Size every post is bought in.
    pub post_size: PostSize,
    /// Covered area in square feet.
    pub area_sq_ft: f64,
    /// Cover material.
    pub cover_type: CoverType,
    /// Cantilever span of the design in feet.
    pub cantilever_span_ft: f64,
    /// Number of reported violations.
    pub violation_count: usize,
    /// Whether precision placement is on.
    pub precision_mode: bool,
}

/// Itemized price. `total` is the sum of the seven line items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Steel posts.
    pub posts: f64,
    /// Cover material.
    pub cover: f64,
    /// Brackets and fasteners.
    pub hardware: f64,
    /// Labour.
    pub installation: f64,
    /// Engineering review.
    pub engineering: f64,
    /// Design revision charge.
    pub constraint_penalty: f64,
    /// Precision placement surcharge.
    pub precision: f64,
    /// Sum of the above.
    pub total: f64,
}

impl CostBreakdown {
    /// Price a design from its measured inputs.
    ///
    /// Every term is additive; a negative area is treated as zero.
    ///
    /// # Examples
    /// ```
    /// use patiox::{CostBreakdown, CostInputs, CoverType, PostSize, PriceTable};
    ///
    /// let costs = CostBreakdown::compose(
    ///     &PriceTable::default(),
    ///     &CostInputs {
    ///         post_count: 4,
    ///         post_size: PostSize::FourByFour,
    ///         area_sq_ft: 100.0,
    ///         cover_type: CoverType::Lattice,
    ///         cantilever_span_ft: 2.0,
    ///         violation_count: 0,
    ///         precision_mode: false,
    ///     },
    /// );
    /// assert_eq!(costs.total, 600.0 + 1200.0 + 175.0 + 800.0);
    /// ```
    #[must_use]
    pub fn compose(prices: &PriceTable, inputs: &CostInputs) -> Self {
        let count = inputs.post_count as f64;
        let area = inputs.area_sq_ft.max(0.0);

        let posts = count * prices.post_price(inputs.post_size);
        let cover = area * prices.cover_rate(inputs.cover_type);
        let hardware = prices.hardware_base + count * prices.hardware_per_post;
        let installation = area * prices.installation_per_sq_ft;
        let engineering = if inputs.cantilever_span_ft > prices.engineering_threshold_ft {
            prices.engineering_fee
        } else {
            0.0
        };
        let constraint_penalty = if inputs.violation_count > 0 {
            prices.constraint_penalty
        } else {
            0.0
        };
        let precision = if inputs.precision_mode {
            prices.precision_fee
        } else {
            0.0
        };

        Self {
            posts,
            cover,
            hardware,
            installation,
            engineering,
            constraint_penalty,
            precision,
            total: posts
                + cover
                + hardware
                + installation
                + engineering
                + constraint_penalty
                + precision,
        }
    }
}
