//! The design being edited: posts, shade rectangle and user settings.

use serde::{Deserialize, Serialize};

use crate::constraints::{PostConstraints, ShadeConstraints};
use crate::cost::CoverType;
use crate::geometry::{Point, Post, PostId, ShadeRect};

/// Cover tilt in whole degrees, held within `0..=45`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct TiltAngle(u8);

impl TiltAngle {
    /// Largest supported tilt.
    pub const MAX_DEGREES: u8 = 45;

    /// Create a tilt, clamping `degrees` into range.
    #[must_use]
    pub fn new(degrees: i32) -> Self {
        Self(degrees.clamp(0, i32::from(Self::MAX_DEGREES)) as u8)
    }

    /// Tilt in degrees.
    #[must_use]
    pub const fn degrees(self) -> u8 {
        self.0
    }
}

impl Default for TiltAngle {
    fn default() -> Self {
        Self(15)
    }
}

impl From<i32> for TiltAngle {
    fn from(degrees: i32) -> Self {
        Self::new(degrees)
    }
}

impl From<TiltAngle> for i32 {
    fn from(tilt: TiltAngle) -> Self {
        i32::from(tilt.0)
    }
}

/// What a pointer press on the plan does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Pressing places posts.
    #[default]
    Post,
    /// Dragging defines the shade rectangle.
    Shade,
}

impl EditMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            EditMode::Post => EditMode::Shade,
            EditMode::Shade => EditMode::Post,
        }
    }
}

/// A complete patio-cover design.
///
/// Designs are values: every [`Engine`](crate::Engine) action takes a design
/// by reference and returns the edited copy. Post order is insertion order
/// and defines which posts are neighbours for spacing and alignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Design {
    /// Posts in insertion order.
    posts: Vec<Post>,
    /// Shade rectangle, once drawn.
    shade_area: Option<ShadeRect>,
    /// Cover material.
    cover_type: CoverType,
    /// Cover tilt.
    tilt: TiltAngle,
    /// Current editing mode.
    mode: EditMode,
    /// Shade size and spacing bounds.
    constraints: ShadeConstraints,
    /// Precision placement rules.
    post_constraints: PostConstraints,
    /// Next identifier to hand out.
    next_id: u64,
}

impl Design {
    /// Create an empty design with default settings.
    ///
    /// # Examples
    /// ```
    /// use patiox::{Design, EditMode};
    ///
    /// let design = Design::new();
    /// assert!(design.posts().is_empty());
    /// assert_eq!(design.mode(), EditMode::Post);
    /// assert_eq!(design.tilt().degrees(), 15);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shade constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: ShadeConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replace the post constraints.
    #[must_use]
    pub fn with_post_constraints(mut self, post_constraints: PostConstraints) -> Self {
        self.post_constraints = post_constraints;
        self
    }

    /// Replace the cover material.
    #[must_use]
    pub fn with_cover_type(mut self, cover_type: CoverType) -> Self {
        self.cover_type = cover_type;
        self
    }

    /// Replace the tilt.
    #[must_use]
    pub fn with_tilt(mut self, tilt: TiltAngle) -> Self {
        self.tilt = tilt;
        self
    }

    /// Replace the editing mode.
    #[must_use]
    pub fn with_mode(mut self, mode: EditMode) -> Self {
        self.mode = mode;
        self
    }

    /// Posts in insertion order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a post by identifier.
    #[must_use]
    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// The shade rectangle, if drawn.
    #[must_use]
    pub fn shade_area(&self) -> Option<&ShadeRect> {
        self.shade_area.as_ref()
    }

    /// Cover material.
    #[must_use]
    pub fn cover_type(&self) -> CoverType {
        self.cover_type
    }

    /// Cover tilt.
    #[must_use]
    pub fn tilt(&self) -> TiltAngle {
        self.tilt
    }

    /// Editing mode.
    #[must_use]
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Shade constraints.
    #[must_use]
    pub fn constraints(&self) -> &ShadeConstraints {
        &self.constraints
    }

    /// Post constraints.
    #[must_use]
    pub fn post_constraints(&self) -> &PostConstraints {
        &self.post_constraints
    }

    /// Append a post at `position` and return its identifier.
    ///
    /// Identifiers never repeat, even for designs read from JSON whose
    /// counter lags behind their posts. Once the counter runs past `u64::MAX`
    /// the lowest free identifier is handed out instead.
    pub(crate) fn push_post(&mut self, position: Point) -> PostId {
        let counter = self.posts.iter().try_fold(self.next_id, |next, post| {
            post.id.0.checked_add(1).map(|after| next.max(after))
        });
        let id = match counter {
            Some(next) => PostId(next),
            None => (0..=u64::MAX)
                .map(PostId)
                .find(|id| self.post(*id).is_none())
                .unwrap_or(PostId(0)),
        };
        self.next_id = id.0.saturating_add(1);
        self.posts.push(Post::new(id, position));
        id
    }

    /// Mutable access to one post.
    pub(crate) fn post_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == id)
    }

    /// Remove a post, reporting whether it existed.
    pub(crate) fn take_post(&mut self, id: PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        self.posts.len() != before
    }

    /// Replace every post.
    pub(crate) fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Replace the shade rectangle.
    pub(crate) fn set_shade_area(&mut self, shade_area: Option<ShadeRect>) {
        self.shade_area = shade_area;
    }

    /// Drop all geometry and return to post placement.
    pub(crate) fn clear_geometry(&mut self) {
        self.posts.clear();
        self.shade_area = None;
        self.mode = EditMode::Post;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn tilt_is_clamped() {
        assert_eq!(TiltAngle::new(-5).degrees(), 0);
        assert_eq!(TiltAngle::new(30).degrees(), 30);
        assert_eq!(TiltAngle::new(90).degrees(), 45);
    }

    #[test]
    fn tilt_deserializes_through_clamp() {
        let tilt: TiltAngle = serde_json::from_str("60").expect("integer tilt");
        assert_eq!(tilt.degrees(), 45);
    }

    #[test]
    fn identifiers_are_never_reused() {
        let mut design = Design::new();
        let a = design.push_post(point(0.0, 0.0));
        let b = design.push_post(point(1.0, 0.0));
        assert!(design.take_post(b));
        let c = design.push_post(point(2.0, 0.0));
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn identifiers_skip_past_loaded_posts() {
        let json = r#"{ "posts": [ { "id": 9, "position": { "x": 0.0, "y": 0.0 } } ] }"#;
        let mut design: Design = serde_json::from_str(json).expect("design parses");
        assert_eq!(design.push_post(point(5.0, 5.0)), PostId(10));
    }

    #[test]
    fn identifiers_survive_an_exhausted_counter() {
        let json = format!(
            r#"{{ "posts": [ {{ "id": {}, "position": {{ "x": 0.0, "y": 0.0 }} }} ] }}"#,
            u64::MAX
        );
        let mut design: Design = serde_json::from_str(&json).expect("design parses");
        let first = design.push_post(point(5.0, 5.0));
        let second = design.push_post(point(9.0, 9.0));
        assert_eq!(first, PostId(0));
        assert_eq!(second, PostId(1));
        assert!(design.post(PostId(u64::MAX)).is_some());
    }

    #[test]
    fn posts_are_found_by_identifier() {
        let mut design = Design::new();
        let id = design.push_post(point(3.0, 4.0));
        assert_eq!(design.post(id).map(|post| post.position), Some(point(3.0, 4.0)));
        assert!(design.post(PostId(id.0 + 1)).is_none());
    }

    #[test]
    fn removing_unknown_post_reports_false() {
        let mut design = Design::new();
        assert!(!design.take_post(PostId(3)));
    }
}
