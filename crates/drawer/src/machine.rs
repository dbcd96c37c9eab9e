//! The drawer state machine: `show`, `hide`, `toggle` and the
//! completion race between the transition-end event and its fallback
//! timer.

use std::cell::Cell;
use std::rc::Rc;

use dom_query::{Element, TimerId};
use inline_style::{inverse, px, StyleMap};
use log::{debug, trace};

use crate::config::{Direction, DrawerConfig, DrawerEvent, ShowHideOption};
use crate::display;
use crate::geometry::{self, BoxSnapshot};
use crate::wrapper;

/// Margin added to the configured duration for the fallback completion
/// timer. Size-only style changes may never fire `transitionend`, so the
/// timer covers for the event; whichever arrives first wins and disarms
/// the other.
const FALLBACK_MARGIN_MS: u64 = 25;

/// Event names the completion handler listens under.
const TRANSITION_END_EVENTS: &str = "webkitTransitionEnd transitionend";

/// Lifecycle status of a drawer. The machine is always re-enterable:
/// every animation ends back in `Ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerStatus {
    /// Idle; safe to start a new animation.
    Ready,
    /// An animation is in flight; `show`/`hide` calls are ignored.
    Pending,
}

/// A drawer over one target element. See the crate docs for the overall
/// model; construction captures the target's parent once, and the
/// wrapper scaffolding only exists while an animation is in flight.
pub struct Drawer {
    target: Element,
    parent: Option<Element>,
    direction: Direction,
    duration_ms: u64,
    timing_function: String,
    show_option: ShowHideOption,
    on_change: Rc<dyn Fn(DrawerEvent)>,
    status: Rc<Cell<DrawerStatus>>,
}

impl Drawer {
    /// Build a drawer from its configuration.
    #[must_use]
    pub fn new(config: DrawerConfig) -> Self {
        let DrawerConfig {
            target,
            direction,
            duration_ms,
            timing_function,
            show_option,
            on_change,
        } = config;
        Self {
            parent: target.parent(),
            direction,
            duration_ms,
            timing_function,
            show_option,
            on_change: on_change.unwrap_or_else(|| Rc::new(|_event| {})),
            status: Rc::new(Cell::new(DrawerStatus::Ready)),
            target,
        }
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> DrawerStatus {
        self.status.get()
    }

    /// Slide the target open. No-op unless the drawer is `Ready` and the
    /// target's computed `display` is `none`.
    pub fn show(&self) {
        if self.status.get() != DrawerStatus::Ready
            || self.target.computed("display") != "none"
        {
            trace!("show ignored: busy or target already visible");
            return;
        }
        self.status.set(DrawerStatus::Pending);
        debug!("show: sliding open from {}", self.direction.as_str());

        let document = self.target.document();
        let origin_style = self.target.style_attr();
        let target_position = self.target.computed("position");

        // Boot the wrapper invisible and zero-sized; real geometry comes
        // once the target is measurable.
        let mut wrapper_boot = StyleMap::new()
            .with("width", "0")
            .with("height", "0")
            .with("display", "none");
        if matches!(target_position.as_str(), "absolute" | "fixed") {
            wrapper_boot.set("position", target_position.as_str());
        }
        let inner_boot = self.parent_snapshot();

        let (wrapper, inner) = wrapper::build(&document, &wrapper_boot, &inner_boot);
        wrapper.insert_after(&self.target);
        inner.append(&self.target);

        display::apply(&self.target, &self.show_option, DrawerEvent::Show);
        wrapper.remove_style(&["display"]);

        self.freeze_target_box();
        if target_position != "static" {
            self.target.set_style("position", "static");
        }

        let snapshot = BoxSnapshot::capture(&self.target, &target_position);
        let start = geometry::show_start(self.direction, &snapshot);
        wrapper.set_styles(&start.wrapper);
        inner.set_styles(&start.inner);

        self.arm_completion(DrawerEvent::Show, &wrapper, &inner, origin_style);

        // The end phase must land on a later turn than the start phase,
        // or the engine coalesces both writes and never animates.
        let end = geometry::show_end(self.direction, &snapshot, &self.transition_value());
        let end_wrapper = wrapper.clone();
        let end_inner = inner.clone();
        document.defer(move || {
            end_wrapper.set_styles(&end.wrapper);
            end_inner.set_styles(&end.inner);
        });
    }

    /// Slide the target closed. No-op unless the drawer is `Ready` and
    /// the target is currently displayed.
    pub fn hide(&self) {
        if self.status.get() != DrawerStatus::Ready
            || self.target.computed("display") == "none"
        {
            trace!("hide ignored: busy or target already hidden");
            return;
        }
        self.status.set(DrawerStatus::Pending);
        debug!("hide: sliding closed toward {}", self.direction.as_str());

        let origin_style = self.target.style_attr();
        let target_position = self.target.computed("position");

        // Snapshot before any mutation: the wrapper must be pre-sized to
        // the target's current box to avoid an initial jump.
        let snapshot = BoxSnapshot::capture(&self.target, &target_position);
        let start = geometry::hide_start(self.direction, &snapshot);

        let document = self.target.document();
        let (wrapper, inner) = wrapper::build(&document, &start.wrapper, &start.inner);

        let mut target_fix = self.fixed_size_map();
        if target_position != "static" {
            target_fix.set("position", "static");
        }
        self.target.set_styles(&target_fix);

        wrapper.insert_after(&self.target);
        inner.append(&self.target);

        // Forced reflow: without a read between insertion and the end
        // phase, some engines drop the transition entirely.
        let _flush = wrapper.height();

        self.arm_completion(DrawerEvent::Hide, &wrapper, &inner, origin_style);

        let end = geometry::hide_end(self.direction, &self.transition_value());
        wrapper.set_styles(&end.wrapper);
        inner.set_styles(&end.inner);
    }

    /// Delegate to `show` or `hide` based on the target's computed
    /// `display`. Gating happens inside the delegates.
    pub fn toggle(&self) {
        if self.target.computed("display") == "none" {
            self.show();
        } else {
            self.hide();
        }
    }

    /// `"<duration>ms <timing-function>"`, the value both end phases
    /// carry.
    fn transition_value(&self) -> String {
        format!("{}ms {}", self.duration_ms, self.timing_function)
    }

    /// Parent-derived styles for the freshly built inner panel: the
    /// parent's padding/border/box metrics, with a compensating negative
    /// margin so the absolutely positioned panel lines up with the
    /// parent's content box despite its padding.
    fn parent_snapshot(&self) -> StyleMap {
        let Some(parent) = &self.parent else {
            return StyleMap::new();
        };
        let mut snapshot = parent.style_snapshot(&["padding", "border", "width", "height"]);
        if let Some(padding) = snapshot.get("padding").map(str::to_owned) {
            snapshot.set("margin", inverse(&padding));
        }
        snapshot
    }

    /// Pin the target's inline size to its measured box so it cannot
    /// reflow mid-slide. Zero-width block targets are floated for the
    /// measurement so their natural content size is observable.
    fn freeze_target_box(&self) {
        let mut floated = false;
        if self.target.width() <= 0.0
            && self.target.computed("display") == "block"
            && self.target.computed("float") == "none"
        {
            self.target.set_style("float", "left");
            floated = true;
        }
        self.target.set_styles(&self.fixed_size_map());
        if floated {
            self.target.remove_style(&["float"]);
        }
    }

    /// The target's measured box as inline width/height, respecting its
    /// `box-sizing`.
    fn fixed_size_map(&self) -> StyleMap {
        let size = if self.target.computed("box-sizing") == "border-box" {
            self.target.outer_size()
        } else {
            self.target.content_size()
        };
        StyleMap::new()
            .with("width", px(size.width))
            .with("height", px(size.height))
    }

    /// Arm the completion race: a one-shot handler fed by both the
    /// transition-end event on the inner panel and a fallback timer of
    /// duration plus margin. The first trigger wins; the fired flag makes
    /// the loser inert and the event path also cancels the timer.
    fn arm_completion(
        &self,
        event: DrawerEvent,
        wrapper: &Element,
        inner: &Element,
        origin_style: String,
    ) {
        let document = self.target.document();
        let fired = Rc::new(Cell::new(false));
        let fallback: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

        let completion_document = document.clone();
        let completion_target = self.target.clone();
        let completion_wrapper = wrapper.clone();
        let completion_option = self.show_option.clone();
        let completion_status = Rc::clone(&self.status);
        let completion_notify = Rc::clone(&self.on_change);
        let completion_fired = Rc::clone(&fired);
        let completion_fallback = Rc::clone(&fallback);
        let completion: Rc<dyn Fn()> = Rc::new(move || {
            if completion_fired.replace(true) {
                return;
            }
            if let Some(timer) = completion_fallback.take() {
                completion_document.clear_timeout(timer);
            }
            if event == DrawerEvent::Hide {
                display::apply(&completion_target, &completion_option, DrawerEvent::Hide);
            }
            completion_wrapper.replace_with(&completion_target);
            completion_target.set_style_attr(&origin_style);
            completion_status.set(DrawerStatus::Ready);
            debug!("{} complete, status ready", event.as_str());
            completion_notify(event);
        });

        let listener = Rc::clone(&completion);
        inner.on(TRANSITION_END_EVENTS, move || listener());
        let timer_trigger = Rc::clone(&completion);
        let timer = document.set_timeout(self.duration_ms + FALLBACK_MARGIN_MS, move || {
            timer_trigger();
        });
        fallback.set(Some(timer));
    }
}
