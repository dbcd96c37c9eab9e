//! Drawer UI effect — slide an element open or closed along one of four
//! directions using CSS transitions.
//!
//! A `Drawer` wraps its target in an ephemeral clipping wrapper plus an
//! absolutely positioned inner panel, animates the pair with a single
//! linear CSS transition, then removes the scaffolding and restores the
//! target's markup and inline style exactly as they were before the
//! animation. Visibility itself is driven by the configured show/hide
//! option (typically a class toggle), so the effect composes with
//! whatever styling the page already has.
//!
//! ```
//! use dom_query::Document;
//! use drawer::{Direction, Drawer, DrawerConfig, ShowHideOption};
//! use inline_style::StyleMap;
//!
//! let document = Document::new();
//! document.add_class_rule("hide", StyleMap::new().with("display", "none"));
//!
//! let panel = document.create_element("div");
//! panel.add_class("hide");
//! panel.set_intrinsic_size(320.0, 180.0);
//! document.root().append(&panel);
//!
//! let drawer = Drawer::new(
//!     DrawerConfig::new(panel.clone())
//!         .with_direction(Direction::Left)
//!         .with_show_option(ShowHideOption::remove_class("hide")),
//! );
//! drawer.show();
//! document.advance(300);
//! assert!(!panel.has_class("hide"));
//! ```

#![forbid(unsafe_code)]

mod config;
mod display;
mod geometry;
mod machine;
mod wrapper;

pub use config::{
    ChangeCallback, Direction, DrawerConfig, DrawerEvent, OptionSet, ShowHideOption,
};
pub use machine::{Drawer, DrawerStatus};
pub use wrapper::{INNER_CLASS, WRAPPER_CLASS};
