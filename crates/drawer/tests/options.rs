#![allow(clippy::unwrap_used)]

use dom_query::{Document, Element};
use drawer::{Direction, Drawer, DrawerConfig, OptionSet, ShowHideOption};
use inline_style::StyleMap;

fn hidden_target(document: &Document) -> Element {
    document.add_class_rule("hide", StyleMap::new().with("display", "none"));
    let target = document.create_element("div");
    target.add_class("hide");
    target.set_intrinsic_size(120.0, 60.0);
    document.root().append(&target);
    target
}

#[test]
fn show_strips_the_hiding_class() {
    let document = Document::new();
    let target = hidden_target(&document);
    let drawer = Drawer::new(
        DrawerConfig::new(target.clone())
            .with_show_option(ShowHideOption::remove_class("hide")),
    );

    assert!(target.has_class("hide"));
    drawer.show();
    // The class flips at animation start so the target is measurable.
    assert!(!target.has_class("hide"));
    document.advance(300);
    assert!(!target.has_class("hide"));
    assert_eq!(target.computed("display"), "block");
}

#[test]
fn hide_reapplies_the_class_at_completion() {
    let document = Document::new();
    let target = hidden_target(&document);
    let drawer = Drawer::new(
        DrawerConfig::new(target.clone())
            .with_show_option(ShowHideOption::remove_class("hide")),
    );

    drawer.show();
    document.advance(300);
    drawer.hide();
    // The hide branch only lands when the slide finishes.
    assert!(!target.has_class("hide"));
    document.advance(300);
    assert!(target.has_class("hide"));
    assert_eq!(target.computed("display"), "none");
}

#[test]
fn style_options_are_transient_but_class_options_persist() {
    let document = Document::new();
    let target = hidden_target(&document);
    let option = ShowHideOption {
        add: Some(
            OptionSet::of_class("open").with_style(StyleMap::new().with("opacity", "1")),
        ),
        remove: Some(OptionSet::of_class("hide")),
    };
    let drawer = Drawer::new(DrawerConfig::new(target.clone()).with_show_option(option));

    drawer.show();
    assert_eq!(target.style("opacity"), Some("1".to_owned()));
    document.advance(300);

    // Completion restores the snapshotted style attribute verbatim, so
    // inline options vanish while class options stay.
    assert_eq!(target.style("opacity"), None);
    assert!(target.has_class("open"));
    assert!(!target.has_class("hide"));

    drawer.hide();
    document.advance(300);
    assert!(!target.has_class("open"));
    assert!(target.has_class("hide"));
}

#[test]
fn stripping_styles_preserves_unrelated_declarations() {
    let document = Document::new();
    let target = hidden_target(&document);
    target.set_style("color", "red");
    target.set_style("opacity", "0.5");
    let option = ShowHideOption {
        add: None,
        remove: Some(
            OptionSet::of_class("hide").with_style(StyleMap::new().with("opacity", "0.5")),
        ),
    };
    let drawer = Drawer::new(DrawerConfig::new(target.clone()).with_show_option(option));

    drawer.show();
    // "show" strips the remove-set's named properties, nothing else.
    assert_eq!(target.style("opacity"), None);
    assert_eq!(target.style("color"), Some("red".to_owned()));
    document.advance(300);
    // The restore then brings the snapshot back untouched.
    assert_eq!(target.style("opacity"), Some("0.5".to_owned()));
    assert_eq!(target.style("color"), Some("red".to_owned()));
}

#[test]
fn wrapper_chrome_is_visually_neutral() {
    let document = Document::new();
    let target = hidden_target(&document);
    let drawer = Drawer::new(
        DrawerConfig::new(target.clone())
            .with_direction(Direction::Bottom)
            .with_show_option(ShowHideOption::remove_class("hide")),
    );

    drawer.show();
    let wrapper = document.query(".w-drawer-wrapper").unwrap();
    let inner = document.query(".w-drawer-inner").unwrap();

    assert_eq!(wrapper.style("margin"), Some("0".to_owned()));
    assert_eq!(wrapper.style("padding"), Some("0".to_owned()));
    assert_eq!(wrapper.style("border"), Some("none".to_owned()));
    assert_eq!(wrapper.style("background"), Some("transparent".to_owned()));
    assert_eq!(wrapper.style("overflow"), Some("hidden".to_owned()));
    assert_eq!(wrapper.style("-webkit-transform"), Some("translateZ(0)".to_owned()));

    assert_eq!(inner.style("position"), Some("absolute".to_owned()));
    assert_eq!(inner.style("margin"), Some("0".to_owned()));
    assert_eq!(inner.style("background"), Some("transparent".to_owned()));
    assert_eq!(target.parent().unwrap(), inner);

    document.advance(300);
    assert!(document.query(".w-drawer-inner").is_err());
}
