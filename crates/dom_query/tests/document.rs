#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dom_query::Document;
use inline_style::StyleMap;

fn fixture() -> Document {
    Document::new()
}

#[test]
fn structure_append_and_insert_after() {
    let document = fixture();
    let first = document.create_element("div");
    let second = document.create_element("div");
    first.set_attr("id", "first");
    second.set_attr("id", "second");
    document.root().append(&first);
    second.insert_after(&first);

    let ordered: Vec<Option<String>> = document
        .query_all("div")
        .iter()
        .map(|element| element.attr("id"))
        .collect();
    assert_eq!(
        ordered,
        [Some("first".to_owned()), Some("second".to_owned())]
    );
    assert_eq!(second.parent().unwrap(), document.root());
}

#[test]
fn insert_after_detached_anchor_is_a_no_op() {
    let document = fixture();
    let anchor = document.create_element("div");
    let floating = document.create_element("div");
    floating.insert_after(&anchor);
    assert!(!floating.is_attached());
}

#[test]
fn replace_with_destroys_the_replaced_subtree() {
    let document = fixture();
    let wrapper = document.create_element("div");
    let inner = document.create_element("div");
    let target = document.create_element("div");
    wrapper.add_class("shell");
    inner.add_class("lining");
    document.root().append(&wrapper);
    wrapper.append(&inner);
    inner.append(&target);

    wrapper.replace_with(&target);

    assert!(target.is_attached());
    assert_eq!(target.parent().unwrap(), document.root());
    assert!(document.query(".shell").is_err());
    assert!(document.query(".lining").is_err());
}

#[test]
fn selector_forms_and_scoped_query() {
    let document = fixture();
    let block = document.create_element("section");
    let child = document.create_element("div");
    child.add_class("panel");
    child.set_attr("id", "drawer-panel");
    document.root().append(&block);
    block.append(&child);

    assert_eq!(document.query("#drawer-panel").unwrap(), child);
    assert_eq!(document.query(".panel").unwrap(), child);
    assert_eq!(document.query("section").unwrap(), block);
    assert_eq!(block.query(".panel").unwrap(), child);
    assert!(block.query("nav").is_err());
    assert!(document.query(".missing").is_err());
}

#[test]
fn class_lists_accept_space_delimited_names() {
    let document = fixture();
    let element = document.create_element("div");
    element.add_class("alpha beta");
    assert!(element.has_class("alpha"));
    assert!(element.has_class("beta"));
    element.remove_class("beta gamma");
    assert!(element.has_class("alpha"));
    assert!(!element.has_class("beta"));
    assert_eq!(element.attr("class"), Some("alpha".to_owned()));
}

#[test]
fn computed_resolution_order() {
    let document = fixture();
    document.add_class_rule("hide", StyleMap::new().with("display", "none"));
    document.add_class_rule("hide", StyleMap::new().with("display", "flex"));
    let element = document.create_element("div");
    document.root().append(&element);

    assert_eq!(element.computed("display"), "block");
    element.add_class("hide");
    assert_eq!(element.computed("display"), "flex");
    element.set_style("display", "none");
    assert_eq!(element.computed("display"), "none");

    assert_eq!(element.computed("position"), "static");
    assert_eq!(element.computed("box-sizing"), "content-box");
    assert_eq!(document.create_element("span").computed("display"), "inline");
}

#[test]
fn style_attr_roundtrip_is_canonical() {
    let document = fixture();
    let element = document.create_element("div");
    element.set_style_attr(" width : 10px ; color:red; ");
    assert_eq!(element.style_attr(), "width:10px;color:red;");
    let snapshot = element.style_attr();
    element.set_style("color", "blue");
    element.set_style_attr(&snapshot);
    assert_eq!(element.style_attr(), snapshot);
}

#[test]
fn measurement_honors_box_sizing() {
    let document = fixture();
    let element = document.create_element("div");
    element.set_intrinsic_size(100.0, 40.0);
    element.set_style("padding", "10px 5px");
    element.set_style("border", "2px solid black");

    assert_eq!(element.content_size().width, 100.0);
    assert_eq!(element.outer_size().width, 100.0 + 5.0 + 5.0 + 2.0 + 2.0);
    assert_eq!(element.outer_size().height, 40.0 + 10.0 + 10.0 + 2.0 + 2.0);

    element.set_style("width", "50px");
    assert_eq!(element.content_size().width, 50.0);

    element.set_style("box-sizing", "border-box");
    assert_eq!(element.content_size().width, 50.0 - 5.0 - 5.0 - 2.0 - 2.0);
    assert_eq!(element.outer_size().width, 50.0);
}

#[test]
fn width_and_height_are_flushing_reads() {
    let document = fixture();
    let element = document.create_element("div");
    element.set_intrinsic_size(10.0, 20.0);
    assert_eq!(document.layout_flush_count(), 0);
    assert_eq!(element.width(), 10.0);
    assert_eq!(element.height(), 20.0);
    assert_eq!(document.layout_flush_count(), 2);
}

#[test]
fn deferred_work_runs_before_timers() {
    let document = fixture();
    let order = Rc::new(RefCell::new(Vec::new()));
    let for_timer = Rc::clone(&order);
    let for_defer = Rc::clone(&order);
    document.set_timeout(0, move || for_timer.borrow_mut().push("timer"));
    document.defer(move || for_defer.borrow_mut().push("deferred"));
    document.advance(1);
    assert_eq!(*order.borrow(), ["deferred", "timer"]);
}

#[test]
fn timers_fire_in_due_order_and_observe_the_clock() {
    let document = fixture();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let late_seen = Rc::clone(&seen);
    let late_document = document.clone();
    document.set_timeout(30, move || {
        late_seen.borrow_mut().push(("late", late_document.now_ms()));
    });
    let early_seen = Rc::clone(&seen);
    let early_document = document.clone();
    document.set_timeout(10, move || {
        early_seen
            .borrow_mut()
            .push(("early", early_document.now_ms()));
    });
    document.advance(50);
    assert_eq!(*seen.borrow(), [("early", 10), ("late", 30)]);
    assert_eq!(document.now_ms(), 50);
}

#[test]
fn cleared_timers_never_fire() {
    let document = fixture();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let timer = document.set_timeout(10, move || flag.set(true));
    document.clear_timeout(timer);
    document.advance(20);
    assert!(!fired.get());
}

#[test]
fn animatable_write_with_transition_schedules_transitionend() {
    let document = fixture();
    let element = document.create_element("div");
    document.root().append(&element);
    let count = Rc::new(Cell::new(0));
    let observed = Rc::clone(&count);
    element.on("webkitTransitionEnd transitionend", move || {
        observed.set(observed.get() + 1);
    });

    element.set_styles(
        &StyleMap::new()
            .with("transition", "200ms ease")
            .with("transform", "translateX(100%)"),
    );
    document.advance(199);
    assert_eq!(count.get(), 0);
    document.advance(1);
    assert_eq!(count.get(), 1);
    document.advance(500);
    assert_eq!(count.get(), 1);
}

#[test]
fn latest_animatable_write_wins_the_pending_transition() {
    let document = fixture();
    let element = document.create_element("div");
    document.root().append(&element);
    let count = Rc::new(Cell::new(0));
    let observed = Rc::clone(&count);
    element.on("transitionend", move || observed.set(observed.get() + 1));

    element.set_style("transition", "100ms linear");
    element.set_style("transform", "translateY(-100%)");
    document.advance(50);
    element.set_style("transform", "translateY(0)");
    document.advance(99);
    assert_eq!(count.get(), 0);
    document.advance(1);
    assert_eq!(count.get(), 1);
}

#[test]
fn suppressed_transition_events_are_dropped() {
    let document = fixture();
    document.set_transition_events(false);
    let element = document.create_element("div");
    document.root().append(&element);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    element.on("transitionend", move || flag.set(true));

    element.set_style("transition", "50ms ease");
    element.set_style("width", "10px");
    document.advance(100);
    assert!(!fired.get());
}

#[test]
fn writes_without_transition_do_not_schedule_events() {
    let document = fixture();
    let element = document.create_element("div");
    document.root().append(&element);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    element.on("transitionend", move || flag.set(true));

    element.set_style("width", "10px");
    element.set_style("color", "red");
    document.advance(1000);
    assert!(!fired.get());
}
