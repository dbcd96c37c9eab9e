//! Show/hide option application — reflects the target's visible state
//! through classes and inline styles, independent of the sliding
//! animation.

use dom_query::Element;

use crate::config::{DrawerEvent, ShowHideOption};

/// Apply the option branch for `event`: "show" applies `add` and strips
/// `remove`, "hide" the mirror image. Stripping removes only the named
/// style properties, leaving unrelated inline declarations in place.
pub(crate) fn apply(target: &Element, option: &ShowHideOption, event: DrawerEvent) {
    let (applied, stripped) = match event {
        DrawerEvent::Show => (option.add.as_ref(), option.remove.as_ref()),
        DrawerEvent::Hide => (option.remove.as_ref(), option.add.as_ref()),
    };

    if let Some(set) = applied {
        if !set.class.is_empty() {
            target.add_class(&set.class.join(" "));
        }
        if let Some(style) = &set.style {
            target.set_styles(style);
        }
    }

    if let Some(set) = stripped {
        if !set.class.is_empty() {
            target.remove_class(&set.class.join(" "));
        }
        if let Some(style) = &set.style {
            let names: Vec<&str> = style.iter().map(|decl| decl.property.as_str()).collect();
            target.remove_style(&names);
        }
    }
}
