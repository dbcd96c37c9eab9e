//! Headless rendition of the demo page: a padded block holding a hidden
//! panel, toggled open and closed with the change events logged.
//!
//! Run with `RUST_LOG=debug cargo run --example toggle`.

use dom_query::Document;
use drawer::{Direction, Drawer, DrawerConfig, ShowHideOption};
use inline_style::StyleMap;
use log::info;

fn main() {
    env_logger::init();

    let document = Document::new();
    document.add_class_rule("hide", StyleMap::new().with("display", "none"));

    let block = document.create_element("div");
    block.add_class("block-1");
    block.set_style("padding", "10px 5px");
    document.root().append(&block);

    let panel = document.create_element("div");
    panel.add_class("target hide");
    panel.set_intrinsic_size(320.0, 180.0);
    block.append(&panel);

    let drawer = Drawer::new(
        DrawerConfig::new(panel.clone())
            .with_direction(Direction::Bottom)
            .with_duration_ms(200)
            .with_show_option(ShowHideOption::remove_class("hide"))
            .with_on_change(|event| info!("drawer changed: {}", event.as_str())),
    );

    drawer.toggle();
    document.advance(250);
    info!(
        "panel display after opening: {}",
        panel.computed("display")
    );

    drawer.toggle();
    document.advance(250);
    info!(
        "panel display after closing: {}",
        panel.computed("display")
    );
}
