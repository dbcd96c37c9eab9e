//! Reduced computed-style resolution: inline style, then registered class
//! rules, then tag defaults, then property initial values. This is the
//! slice of the cascade the drawer effect actually observes.

use indextree::NodeId;
use inline_style::shorthand::parse_duration_ms;
use inline_style::dasherize;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::document::DocumentInner;

/// Tags rendered as block boxes by default in the reduced model.
static DISPLAY_DEFAULTS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    for tag in [
        "body", "div", "p", "section", "article", "aside", "header", "footer", "nav", "ul", "ol",
        "li", "h1", "h2", "h3", "h4", "h5", "h6",
    ] {
        table.insert(tag, "block");
    }
    table
});

/// Resolve a property for a node. Removed nodes resolve to the empty
/// string.
pub(crate) fn computed_value(inner: &DocumentInner, node: NodeId, property: &str) -> String {
    let name = dasherize(property);
    let Some(data) = inner.node(node) else {
        return String::new();
    };
    if let Some(value) = data.style.get(&name) {
        return value.to_owned();
    }
    let mut from_rules: Option<&str> = None;
    for (class, declarations) in &inner.class_rules {
        if data.classes.iter().any(|candidate| candidate == class) {
            if let Some(value) = declarations.get(&name) {
                from_rules = Some(value);
            }
        }
    }
    if let Some(value) = from_rules {
        return value.to_owned();
    }
    if name == "display" {
        if let Some(display) = DISPLAY_DEFAULTS.get(data.tag.as_str()) {
            return (*display).to_owned();
        }
    }
    initial_value(&name).to_owned()
}

/// Initial values for the properties the drawer reads. Everything else
/// defaults to the empty string.
fn initial_value(name: &str) -> &'static str {
    match name {
        "display" => "inline",
        "position" => "static",
        "float" => "none",
        "box-sizing" => "content-box",
        "margin" | "padding" => "0",
        "border" => "none",
        "background" => "transparent",
        "transform" => "none",
        "width" | "height" | "top" | "right" | "bottom" | "left" => "auto",
        _ => "",
    }
}

/// Effective transition duration for a node in whole milliseconds:
/// `transition-duration` when declared, else the leading time token of
/// the `transition` shorthand, else zero.
pub(crate) fn transition_duration_ms(inner: &DocumentInner, node: NodeId) -> u64 {
    for property in ["transition-duration", "transition", "-webkit-transition"] {
        let value = computed_value(inner, node, property);
        let duration = value.split_whitespace().next().and_then(parse_duration_ms);
        if let Some(milliseconds) = duration {
            return milliseconds;
        }
    }
    0
}
