//! Direction-to-geometry mapping and the phase-style value objects.
//!
//! Each animation applies exactly two style snapshots per node: a start
//! phase committed synchronously and an end phase carrying the
//! transition declaration. Both are computed up front as immutable
//! values, so there is no intermediate mutable style state to reason
//! about.
//!
//! The mapping, mirrored between show and hide:
//!
//! | direction | wrapper sizing | inner anchor   | inner transform |
//! |-----------|----------------|----------------|-----------------|
//! | top       | height         | bottom-left    | `translateY`    |
//! | bottom    | height         | top-left       | `translateY`    |
//! | left      | width          | top-right      | `translateX`    |
//! | right     | width          | top-left       | `translateX`    |
//!
//! Off-screen means translated +100%/-100% along the slide axis toward
//! the edge opposite the reveal direction; resting means translated to
//! zero.

use dom_query::{Element, Size};
use inline_style::{prefixed, px, StyleMap};

use crate::config::Direction;

/// Box metrics and offset snapshot of the target, captured before the
/// wrapper goes in. `position` is the target's scheme at capture time,
/// passed in by the caller because the show path forces the element
/// static before the wrapper styles are derived.
#[derive(Clone, Debug)]
pub(crate) struct BoxSnapshot {
    pub(crate) outer: Size,
    pub(crate) offsets: StyleMap,
    pub(crate) position: String,
}

impl BoxSnapshot {
    pub(crate) fn capture(target: &Element, position: &str) -> Self {
        Self {
            outer: target.outer_size(),
            offsets: target.style_snapshot(&["display", "top", "right", "bottom", "left"]),
            position: position.to_owned(),
        }
    }

    /// Whether the target was absolutely or fixed positioned.
    pub(crate) fn is_positioned(&self) -> bool {
        matches!(self.position.as_str(), "absolute" | "fixed")
    }
}

/// The two style maps one phase applies.
pub(crate) struct PhaseStyles {
    pub(crate) wrapper: StyleMap,
    pub(crate) inner: StyleMap,
}

/// Corner the inner panel is pinned to, opposite the reveal edge.
fn anchor(direction: Direction) -> StyleMap {
    match direction {
        Direction::Top => StyleMap::new().with("bottom", "0").with("left", "0"),
        Direction::Bottom | Direction::Right => {
            StyleMap::new().with("top", "0").with("left", "0")
        }
        Direction::Left => StyleMap::new().with("top", "0").with("right", "0"),
    }
}

/// Transform that parks the inner panel fully outside the wrapper.
fn offscreen_transform(direction: Direction) -> StyleMap {
    match direction {
        Direction::Top => prefixed("transform", "translateY(100%)"),
        Direction::Bottom => prefixed("transform", "translateY(-100%)"),
        Direction::Left => prefixed("transform", "translateX(100%)"),
        Direction::Right => prefixed("transform", "translateX(-100%)"),
    }
}

/// Transform for the revealed position.
fn resting_transform(direction: Direction) -> StyleMap {
    if direction.is_vertical() {
        prefixed("transform", "translateY(0)")
    } else {
        prefixed("transform", "translateX(0)")
    }
}

/// Wrapper sized to zero along the slide axis, full along the other.
fn collapsed_size(direction: Direction, outer: Size) -> StyleMap {
    if direction.is_vertical() {
        StyleMap::new().with("width", px(outer.width)).with("height", "0")
    } else {
        StyleMap::new().with("width", "0").with("height", px(outer.height))
    }
}

/// Wrapper grown to the target's full box along the slide axis.
fn expanded_axis(direction: Direction, outer: Size) -> StyleMap {
    if direction.is_vertical() {
        StyleMap::new().with("height", px(outer.height))
    } else {
        StyleMap::new().with("width", px(outer.width))
    }
}

fn outer_size_map(outer: Size) -> StyleMap {
    StyleMap::new()
        .with("width", px(outer.width))
        .with("height", px(outer.height))
}

/// Start phase of `show`: wrapper collapsed at the target's offsets,
/// inner at full size, anchored and parked off-screen.
pub(crate) fn show_start(direction: Direction, snapshot: &BoxSnapshot) -> PhaseStyles {
    let mut wrapper = snapshot.offsets.clone();
    if snapshot.is_positioned() {
        wrapper.set(direction.as_str(), "auto");
    }
    wrapper.merge(&collapsed_size(direction, snapshot.outer));

    let inner = StyleMap::new()
        .with("margin", "0")
        .with("padding", "0")
        .with("border", "none")
        .merged(&outer_size_map(snapshot.outer))
        .merged(&anchor(direction))
        .merged(&offscreen_transform(direction));

    PhaseStyles { wrapper, inner }
}

/// End phase of `show`: wrapper grown along the slide axis, inner slid
/// to rest, both carrying the transition declaration.
pub(crate) fn show_end(
    direction: Direction,
    snapshot: &BoxSnapshot,
    transition: &str,
) -> PhaseStyles {
    PhaseStyles {
        wrapper: prefixed("transition", transition).merged(&expanded_axis(direction, snapshot.outer)),
        inner: prefixed("transition", transition).merged(&resting_transform(direction)),
    }
}

/// Start phase of `hide`: wrapper pre-sized to the target's current box
/// so insertion causes no visual jump, inner at rest.
pub(crate) fn hide_start(direction: Direction, snapshot: &BoxSnapshot) -> PhaseStyles {
    let mut wrapper = outer_size_map(snapshot.outer).merged(&snapshot.offsets);
    if snapshot.position != "static" {
        wrapper.set("position", snapshot.position.as_str());
    }
    if snapshot.is_positioned() {
        wrapper.set(direction.as_str(), "auto");
    }

    let inner = outer_size_map(snapshot.outer)
        .merged(&anchor(direction))
        .merged(&resting_transform(direction));

    PhaseStyles { wrapper, inner }
}

/// End phase of `hide`: wrapper collapsed along the slide axis, inner
/// slid off-screen, both carrying the transition declaration.
pub(crate) fn hide_end(direction: Direction, transition: &str) -> PhaseStyles {
    let axis = if direction.is_vertical() {
        StyleMap::new().with("height", "0")
    } else {
        StyleMap::new().with("width", "0")
    };
    PhaseStyles {
        wrapper: axis.merged(&prefixed("transition", transition)),
        inner: offscreen_transform(direction).merged(&prefixed("transition", transition)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> BoxSnapshot {
        BoxSnapshot {
            outer: Size {
                width: 200.0,
                height: 80.0,
            },
            offsets: StyleMap::new().with("display", "block"),
            position: "static".to_owned(),
        }
    }

    #[test]
    fn show_start_collapses_the_slide_axis() {
        let top = show_start(Direction::Top, &snapshot());
        assert_eq!(top.wrapper.get("height"), Some("0"));
        assert_eq!(top.wrapper.get("width"), Some("200px"));
        assert_eq!(top.inner.get("bottom"), Some("0"));
        assert_eq!(top.inner.get("transform"), Some("translateY(100%)"));

        let left = show_start(Direction::Left, &snapshot());
        assert_eq!(left.wrapper.get("width"), Some("0"));
        assert_eq!(left.wrapper.get("height"), Some("80px"));
        assert_eq!(left.inner.get("right"), Some("0"));
        assert_eq!(left.inner.get("transform"), Some("translateX(100%)"));
    }

    #[test]
    fn show_end_expands_and_carries_the_transition() {
        let end = show_end(Direction::Bottom, &snapshot(), "250ms ease");
        assert_eq!(end.wrapper.get("height"), Some("80px"));
        assert_eq!(end.wrapper.get("transition"), Some("250ms ease"));
        assert_eq!(end.wrapper.get("-webkit-transition"), Some("250ms ease"));
        assert_eq!(end.inner.get("transform"), Some("translateY(0)"));
    }

    #[test]
    fn hide_phases_mirror_show() {
        let start = hide_start(Direction::Right, &snapshot());
        assert_eq!(start.wrapper.get("width"), Some("200px"));
        assert_eq!(start.inner.get("transform"), Some("translateX(0)"));
        assert_eq!(start.inner.get("left"), Some("0"));

        let end = hide_end(Direction::Right, "100ms linear");
        assert_eq!(end.wrapper.get("width"), Some("0"));
        assert_eq!(end.inner.get("transform"), Some("translateX(-100%)"));
    }

    #[test]
    fn positioned_targets_release_the_slide_edge() {
        let mut fixed = snapshot();
        fixed.position = "fixed".to_owned();
        fixed.offsets.set("top", "12px");

        let start = show_start(Direction::Top, &fixed);
        assert_eq!(start.wrapper.get("top"), Some("auto"));

        let hidden = hide_start(Direction::Top, &fixed);
        assert_eq!(hidden.wrapper.get("top"), Some("auto"));
        assert_eq!(hidden.wrapper.get("position"), Some("fixed"));
    }
}
