//! Post sizing from the cantilever span.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete structural class of a steel post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostSize {
    /// Nominal 4x4 post.
    #[serde(rename = "4x4")]
    FourByFour,
    /// Nominal 6x6 post.
    #[serde(rename = "6x6")]
    SixBySix,
    /// Nominal 8x8 post.
    #[serde(rename = "8x8")]
    EightByEight,
}

impl fmt::Display for PostSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PostSize::FourByFour => "4x4",
            PostSize::SixBySix => "6x6",
            PostSize::EightByEight => "8x8",
        };
        f.write_str(label)
    }
}

/// Maximum safe cantilever for one post size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CantileverLimit {
    /// Post size the limit applies to.
    pub size: PostSize,
    /// Largest span in feet the size can carry.
    pub max_span_ft: f64,
}

/// Ordered table of cantilever limits, smallest post first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CantileverLimits(Vec<CantileverLimit>);

impl Default for CantileverLimits {
    fn default() -> Self {
        Self(vec![
            CantileverLimit {
                size: PostSize::FourByFour,
                max_span_ft: 8.0,
            },
            CantileverLimit {
                size: PostSize::SixBySix,
                max_span_ft: 12.0,
            },
            CantileverLimit {
                size: PostSize::EightByEight,
                max_span_ft: 16.0,
            },
        ])
    }
}

/// Outcome of sizing a design's posts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Smallest post that carries the span, or the largest available.
    pub post_size: PostSize,
    /// Whether the span is within the largest post's limit.
    pub safe: bool,
}

impl CantileverLimits {
    /// Build a table from entries ordered by increasing limit.
    #[must_use]
    pub fn new(entries: Vec<CantileverLimit>) -> Self {
        Self(entries)
    }

    /// Entries in lookup order.
    #[must_use]
    pub fn entries(&self) -> &[CantileverLimit] {
        &self.0
    }

    /// Pick the smallest post whose limit is at least `span_ft`.
    ///
    /// Spans beyond every limit map to the last entry and are flagged unsafe.
    /// The table is checked to be non-empty when an [`Engine`](crate::Engine)
    /// is built; an empty table classifies everything as an unsafe 8x8.
    ///
    /// # Examples
    /// ```
    /// use patiox::{CantileverLimits, PostSize};
    ///
    /// let limits = CantileverLimits::default();
    /// let outcome = limits.classify(8.01);
    /// assert_eq!(outcome.post_size, PostSize::SixBySix);
    /// assert!(outcome.safe);
    /// ```
    #[must_use]
    pub fn classify(&self, span_ft: f64) -> Classification {
        if let Some(limit) = self.0.iter().find(|limit| span_ft <= limit.max_span_ft) {
            return Classification {
                post_size: limit.size,
                safe: true,
            };
        }
        Classification {
            post_size: self
                .0
                .last()
                .map_or(PostSize::EightByEight, |limit| limit.size),
            safe: false,
        }
    }
}
