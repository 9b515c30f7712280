//! The engine: every measurement, classification and edit of a design.

use tracing::debug;
use uom::si::f64::{Area, Length};
use uom::si::length::foot;

use crate::config::EngineConfig;
use crate::constraints::{PostConstraints, ShadeConstraints};
use crate::cost::{CostBreakdown, CostInputs, CoverType};
use crate::design::{Design, EditMode, TiltAngle};
use crate::errors::{ConfigError, DesignEditError};
use crate::geometry::{cantilever_span, coverage_area, Point, Post, PostId, ShadeRect};
use crate::structure::{Classification, PostSize};
use crate::units::Scale;
use crate::violations::{find_violations, Violation};

/// Everything derived from a design in one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Cantilever span in feet.
    pub cantilever_span_ft: f64,
    /// Post size and structural verdict.
    pub classification: Classification,
    /// Covered area in square feet.
    pub coverage_area_sq_ft: f64,
    /// Shade rectangle width and height in feet, if drawn.
    pub shade_size_ft: Option<(f64, f64)>,
    /// Constraint breaches, in report order.
    pub violations: Vec<Violation>,
    /// Itemized price.
    pub costs: CostBreakdown,
}

impl Evaluation {
    /// Cantilever span as a typed length.
    #[must_use]
    pub fn cantilever_span(&self) -> Length {
        Length::new::<foot>(self.cantilever_span_ft)
    }

    /// Covered area as a typed area.
    #[must_use]
    pub fn coverage_area(&self) -> Area {
        let side = Length::new::<foot>(1.0);
        side * side * self.coverage_area_sq_ft
    }
}

/// Stateless engine built from an [`EngineConfig`].
///
/// Queries borrow a [`Design`]; actions return a new one and leave the input
/// untouched.
///
/// # Examples
/// ```
/// use patiox::{point, Design, Engine, PostSize, ShadeRect};
///
/// let engine = Engine::default();
/// let mut design = Design::new();
/// for (x, y) in [(0.0, 0.0), (200.0, 0.0)] {
///     design = engine.add_post(&design, point(x, y));
/// }
/// design = engine.set_shade_area(&design, Some(ShadeRect::new(0.0, -50.0, 200.0, 100.0)));
///
/// assert_eq!(engine.cantilever_span(&design), 0.0);
/// assert_eq!(engine.required_post_size(&design), PostSize::FourByFour);
/// assert!((engine.coverage_area(&design) - 200.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    /// Validated configuration.
    config: EngineConfig,
}

impl Engine {
    /// Build an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] produced by [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plan-to-feet scale from the configuration.
    fn scale(&self) -> Scale {
        self.config.scale
    }

    /// Cantilever span of `design` in feet.
    #[must_use]
    pub fn cantilever_span(&self, design: &Design) -> f64 {
        cantilever_span(design.posts(), design.shade_area(), self.scale())
    }

    /// Post size and structural verdict for `design`.
    #[must_use]
    pub fn classify(&self, design: &Design) -> Classification {
        self.config
            .cantilever_limits
            .classify(self.cantilever_span(design))
    }

    /// Smallest post size that carries the design's span.
    #[must_use]
    pub fn required_post_size(&self, design: &Design) -> PostSize {
        self.classify(design).post_size
    }

    /// Whether the span is within the largest post's limit.
    #[must_use]
    pub fn is_structurally_safe(&self, design: &Design) -> bool {
        self.classify(design).safe
    }

    /// Covered area in square feet.
    #[must_use]
    pub fn coverage_area(&self, design: &Design) -> f64 {
        coverage_area(design.shade_area(), self.scale())
    }

    /// Every constraint breach in `design`.
    #[must_use]
    pub fn violations(&self, design: &Design) -> Vec<Violation> {
        find_violations(
            design.posts(),
            design.shade_area(),
            design.constraints(),
            self.scale(),
        )
    }

    /// Itemized price of `design`.
    #[must_use]
    pub fn costs(&self, design: &Design) -> CostBreakdown {
        self.evaluate(design).costs
    }

    /// Measure, classify, check and price `design`.
    #[must_use]
    pub fn evaluate(&self, design: &Design) -> Evaluation {
        let cantilever_span_ft = self.cantilever_span(design);
        let classification = self.config.cantilever_limits.classify(cantilever_span_ft);
        let coverage_area_sq_ft = self.coverage_area(design);
        let violations = self.violations(design);
        let costs = CostBreakdown::compose(
            &self.config.prices,
            &CostInputs {
                post_count: design.posts().len(),
                post_size: classification.post_size,
                area_sq_ft: coverage_area_sq_ft,
                cover_type: design.cover_type(),
                cantilever_span_ft,
                violation_count: violations.len(),
                precision_mode: design.post_constraints().enabled,
            },
        );
        let scale = self.scale();
        Evaluation {
            cantilever_span_ft,
            classification,
            coverage_area_sq_ft,
            shade_size_ft: design
                .shade_area()
                .map(|rect| {
                    (
                        scale.to_feet(rect.clamped_width()),
                        scale.to_feet(rect.clamped_height()),
                    )
                }),
            violations,
            costs,
        }
    }

    /// First post, in sequence order, within the pick radius of `at`.
    #[must_use]
    pub fn post_at<'a>(&self, design: &'a Design, at: Point) -> Option<&'a Post> {
        design
            .posts()
            .iter()
            .find(|post| post.position.distance_to(at) <= self.config.hit_tolerance)
    }

    /// Place a post at `at`.
    ///
    /// The position is snapped first when grid snapping is on. When the shade
    /// constraints are enabled and the post would sit closer than the minimum
    /// spacing to any existing post, the design is returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use patiox::{point, Design, Engine, ShadeConstraints};
    ///
    /// let engine = Engine::default();
    /// let design = Design::new()
    ///     .with_constraints(ShadeConstraints { enabled: true, ..ShadeConstraints::default() });
    /// let design = engine.add_post(&design, point(0.0, 0.0));
    /// let refused = engine.add_post(&design, point(59.0, 0.0));
    /// assert_eq!(refused.posts().len(), 1);
    /// ```
    #[must_use]
    pub fn add_post(&self, design: &Design, at: Point) -> Design {
        let at = design.constraints().snap_point(at, self.scale());
        if !design
            .constraints()
            .admits(design.posts(), at, self.scale())
        {
            debug!(?at, "post refused: closer than minimum spacing");
            return design.clone();
        }

        let mut next = design.clone();
        let id = next.push_post(at);
        let mode = if next.posts().len() >= 2 {
            EditMode::Shade
        } else {
            EditMode::Post
        };
        debug!(post = id.0, ?at, "post placed");
        next.with_mode(mode)
    }

    /// Move post `id` to `to`, then re-run precision placement when enabled.
    ///
    /// Moves snap to the grid like insertions but are not spacing-gated.
    ///
    /// # Errors
    ///
    /// Returns [`DesignEditError::UnknownPost`] when `id` is not in `design`.
    pub fn move_post(
        &self,
        design: &Design,
        id: PostId,
        to: Point,
    ) -> Result<Design, DesignEditError> {
        let to = design.constraints().snap_point(to, self.scale());
        let mut next = design.clone();
        let post = next.post_mut(id).ok_or(DesignEditError::UnknownPost(id))?;
        post.position = to;

        if next.post_constraints().enabled {
            next = self.apply_post_constraints(&next);
        }
        Ok(next)
    }

    /// Remove post `id`. With fewer than two posts left the shade rectangle
    /// is dropped and the mode returns to post placement.
    ///
    /// # Errors
    ///
    /// Returns [`DesignEditError::UnknownPost`] when `id` is not in `design`.
    pub fn remove_post(&self, design: &Design, id: PostId) -> Result<Design, DesignEditError> {
        let mut next = design.clone();
        if !next.take_post(id) {
            return Err(DesignEditError::UnknownPost(id));
        }
        if next.posts().len() < 2 {
            next.set_shade_area(None);
            next = next.with_mode(EditMode::Post);
        }
        Ok(next)
    }

    /// Set or clear the shade rectangle, correcting it against the shade
    /// constraints.
    #[must_use]
    pub fn set_shade_area(&self, design: &Design, proposed: Option<ShadeRect>) -> Design {
        let corrected = proposed.map(|rect| design.constraints().enforce(rect, self.scale()));
        let mut next = design.clone();
        next.set_shade_area(corrected);
        next
    }

    /// Run the exact-distance and alignment pass over the posts.
    #[must_use]
    pub fn apply_post_constraints(&self, design: &Design) -> Design {
        let posts = design.post_constraints().apply(design.posts(), self.scale());
        let mut next = design.clone();
        next.set_posts(posts);
        next
    }

    /// Re-lay every post at uniform spacing in X order.
    #[must_use]
    pub fn constrain_all_posts(&self, design: &Design) -> Design {
        let posts = design
            .post_constraints()
            .relayout(design.posts(), self.scale());
        let mut next = design.clone();
        next.set_posts(posts);
        next
    }

    /// Change the cover material.
    #[must_use]
    pub fn set_cover_type(&self, design: &Design, cover_type: CoverType) -> Design {
        design.clone().with_cover_type(cover_type)
    }

    /// Change the tilt, clamped into `0..=45` degrees.
    #[must_use]
    pub fn set_tilt(&self, design: &Design, degrees: i32) -> Design {
        design.clone().with_tilt(TiltAngle::new(degrees))
    }

    /// Switch the editing mode.
    #[must_use]
    pub fn set_mode(&self, design: &Design, mode: EditMode) -> Design {
        design.clone().with_mode(mode)
    }

    /// Flip between post placement and shade drawing.
    #[must_use]
    pub fn toggle_mode(&self, design: &Design) -> Design {
        design.clone().with_mode(design.mode().toggled())
    }

    /// Replace the shade constraints. The current rectangle is not re-checked.
    #[must_use]
    pub fn set_constraints(&self, design: &Design, constraints: ShadeConstraints) -> Design {
        design.clone().with_constraints(constraints)
    }

    /// Flip the shade constraints on or off.
    #[must_use]
    pub fn toggle_constraints(&self, design: &Design) -> Design {
        let mut constraints = *design.constraints();
        constraints.enabled = !constraints.enabled;
        design.clone().with_constraints(constraints)
    }

    /// Replace the post constraints.
    #[must_use]
    pub fn set_post_constraints(&self, design: &Design, constraints: PostConstraints) -> Design {
        design.clone().with_post_constraints(constraints)
    }

    /// Flip precision placement on or off.
    #[must_use]
    pub fn toggle_post_constraints(&self, design: &Design) -> Design {
        let mut constraints = *design.post_constraints();
        constraints.enabled = !constraints.enabled;
        design.clone().with_post_constraints(constraints)
    }

    /// Drop posts and shade rectangle; settings are kept.
    #[must_use]
    pub fn clear_all(&self, design: &Design) -> Design {
        let mut next = design.clone();
        next.clear_geometry();
        next
    }

    /// Clear the geometry and restore the default cover and tilt.
    #[must_use]
    pub fn reset(&self, design: &Design) -> Design {
        self.clear_all(design)
            .with_cover_type(CoverType::default())
            .with_tilt(TiltAngle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use pretty_assertions::assert_eq;
    use uom::si::area::square_foot;
    use uom::si::length::meter;

    fn two_posts(engine: &Engine) -> Design {
        let design = engine.add_post(&Design::new(), point(0.0, 0.0));
        engine.add_post(&design, point(100.0, 0.0))
    }

    #[test]
    fn second_post_switches_to_shade_mode() {
        let engine = Engine::default();
        let one = engine.add_post(&Design::new(), point(0.0, 0.0));
        assert_eq!(one.mode(), EditMode::Post);
        assert_eq!(two_posts(&engine).mode(), EditMode::Shade);
    }

    #[test]
    fn removing_down_to_one_post_drops_shade() {
        let engine = Engine::default();
        let design = engine.set_shade_area(
            &two_posts(&engine),
            Some(ShadeRect::new(0.0, 0.0, 100.0, 100.0)),
        );
        let id = design.posts()[0].id;
        let design = engine.remove_post(&design, id).expect("post exists");
        assert_eq!(design.posts().len(), 1);
        assert_eq!(design.shade_area(), None);
        assert_eq!(design.mode(), EditMode::Post);
    }

    #[test]
    fn unknown_posts_are_reported() {
        let engine = Engine::default();
        assert_eq!(
            engine.remove_post(&Design::new(), PostId(4)),
            Err(DesignEditError::UnknownPost(PostId(4)))
        );
    }

    #[test]
    fn move_reapplies_precision_placement() {
        let engine = Engine::default();
        let design = engine.set_post_constraints(
            &two_posts(&engine),
            PostConstraints {
                enabled: true,
                exact_distance: 10.0,
                ..PostConstraints::default()
            },
        );
        let id = design.posts()[1].id;
        let moved = engine
            .move_post(&design, id, point(0.0, 40.0))
            .expect("post exists");
        let position = moved.posts()[1].position;
        assert!(position.x.abs() < 1e-9);
        assert!((position.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn move_snaps_to_grid() {
        let engine = Engine::default();
        let design = engine.set_constraints(
            &two_posts(&engine),
            ShadeConstraints {
                enabled: true,
                snap_to_grid: true,
                ..ShadeConstraints::default()
            },
        );
        let id = design.posts()[0].id;
        let moved = engine
            .move_post(&design, id, point(96.0, 3.0))
            .expect("post exists");
        assert_eq!(moved.posts()[0].position, point(100.0, 0.0));
    }

    #[test]
    fn hit_test_uses_tolerance() {
        let engine = Engine::default();
        let design = two_posts(&engine);
        assert_eq!(
            engine.post_at(&design, point(110.0, 5.0)).map(|post| post.id),
            Some(design.posts()[1].id)
        );
        assert!(engine.post_at(&design, point(50.0, 0.0)).is_none());
    }

    #[test]
    fn reset_restores_cover_and_tilt() {
        let engine = Engine::default();
        let design = engine.set_cover_type(&two_posts(&engine), CoverType::SolidPanel);
        let design = engine.set_tilt(&design, 40);
        let design = engine.toggle_constraints(&design);

        let cleared = engine.clear_all(&design);
        assert!(cleared.posts().is_empty());
        assert_eq!(cleared.cover_type(), CoverType::SolidPanel);
        assert_eq!(cleared.tilt().degrees(), 40);

        let reset = engine.reset(&design);
        assert_eq!(reset.cover_type(), CoverType::Lattice);
        assert_eq!(reset.tilt().degrees(), 15);
        assert!(reset.constraints().enabled);
    }

    #[test]
    fn precision_mode_is_charged_without_corrections() {
        let engine = Engine::default();
        let design = engine.toggle_post_constraints(&Design::new());
        assert_eq!(engine.costs(&design).precision, 150.0);
    }

    #[test]
    fn evaluation_exposes_typed_quantities() {
        let engine = Engine::default();
        let design = engine.set_shade_area(
            &two_posts(&engine),
            Some(ShadeRect::new(50.0, 50.0, 100.0, 100.0)),
        );
        let evaluation = engine.evaluate(&design);
        assert!((evaluation.cantilever_span_ft - 5.0).abs() < 1e-9);
        assert!((evaluation.cantilever_span().get::<meter>() - 1.524).abs() < 1e-9);
        assert!((evaluation.coverage_area().get::<square_foot>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_shade_is_priced_as_empty() {
        let engine = Engine::default();
        let design = engine.add_post(&Design::new(), point(-50.0, -50.0));
        let design = engine.add_post(&design, point(-60.0, -60.0));
        for shade in [
            ShadeRect::new(0.0, 0.0, -100.0, -100.0),
            ShadeRect::new(0.0, 0.0, -100.0, 100.0),
        ] {
            let evaluation = engine.evaluate(&engine.set_shade_area(&design, Some(shade)));
            assert_eq!(evaluation.coverage_area_sq_ft, 0.0);
            assert_eq!(evaluation.costs.cover, 0.0);
            assert_eq!(evaluation.costs.installation, 0.0);
            assert_eq!(evaluation.shade_size_ft.map(|(width, _)| width), Some(0.0));
        }
    }

    #[test]
    fn hit_test_includes_the_tolerance_boundary() {
        let engine = Engine::default();
        let design = engine.add_post(&Design::new(), point(0.0, 0.0));
        let edge = EngineConfig::DEFAULT_HIT_TOLERANCE;
        assert!(engine.post_at(&design, point(edge, 0.0)).is_some());
        assert!(engine.post_at(&design, point(edge + 0.01, 0.0)).is_none());
    }

    #[test]
    fn actions_leave_the_input_untouched() {
        let engine = Engine::default();
        let design = two_posts(&engine);
        let snapshot = design.clone();
        let _ = engine.constrain_all_posts(&engine.toggle_post_constraints(&design));
        let _ = engine.add_post(&design, point(500.0, 500.0));
        assert_eq!(design, snapshot);
    }
}
