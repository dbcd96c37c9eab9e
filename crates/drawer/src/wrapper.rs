//! Wrapper factory — builds the ephemeral wrapper/inner pair that
//! carries one slide animation.

use dom_query::{Document, Element};
use inline_style::{prefixed, StyleMap};

/// Class carried by the outer clipping wrapper.
pub const WRAPPER_CLASS: &str = "w-drawer-wrapper";

/// Class carried by the inner panel that physically slides.
pub const INNER_CLASS: &str = "w-drawer-inner";

/// Reset applied to both nodes under any caller overrides, so the
/// scaffolding never introduces chrome of its own. Callers may still
/// override these properties explicitly.
fn neutrality_floor() -> StyleMap {
    StyleMap::new()
        .with("margin", "0")
        .with("padding", "0")
        .with("border", "none")
        .with("background", "transparent")
}

/// Build a detached wrapper/inner pair in `document`. Merge order per
/// node: base defaults, then the neutrality floor, then the caller's
/// overrides (caller wins).
///
/// The wrapper clips (`overflow: hidden`) and carries a zero 3D
/// translate so engines promote it to its own compositing layer; the
/// inner panel is absolutely positioned and holds the target while it
/// slides.
pub(crate) fn build(
    document: &Document,
    wrapper_overrides: &StyleMap,
    inner_overrides: &StyleMap,
) -> (Element, Element) {
    let wrapper_style = StyleMap::new()
        .with("position", "relative")
        .with("overflow", "hidden")
        .merged(&prefixed("transform", "translateZ(0)"))
        .merged(&neutrality_floor())
        .merged(wrapper_overrides);
    let inner_style = StyleMap::new()
        .with("position", "absolute")
        .merged(&neutrality_floor())
        .merged(inner_overrides);

    let wrapper = document.create_element("div");
    wrapper.add_class(WRAPPER_CLASS);
    wrapper.set_styles(&wrapper_style);

    let inner = document.create_element("div");
    inner.add_class(INNER_CLASS);
    inner.set_styles(&inner_style);

    wrapper.append(&inner);
    (wrapper, inner)
}
