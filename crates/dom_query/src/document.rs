//! Document tree, class rules and the cooperative scheduler.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use indextree::{Arena, NodeId};
use inline_style::StyleMap;
use log::trace;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::computed;
use crate::element::Element;

/// Handle to a pending timeout, usable with `Document::clear_timeout`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerId(u64);

/// Inline style properties whose change can start a CSS transition in the
/// reduced model: the transform pair and the two box dimensions.
pub(crate) const ANIMATABLE_PROPERTIES: [&str; 4] =
    ["transform", "-webkit-transform", "width", "height"];

/// One registered event listener: the space-delimited name list it was
/// registered under, and its callback.
pub(crate) struct Listener {
    pub(crate) events: SmallVec<String, 2>,
    pub(crate) callback: Rc<dyn Fn()>,
}

/// Per-node payload stored in the arena.
pub(crate) struct NodeData {
    pub(crate) tag: String,
    pub(crate) attrs: SmallVec<(String, String), 4>,
    pub(crate) classes: SmallVec<String, 4>,
    pub(crate) style: StyleMap,
    pub(crate) intrinsic_width: f32,
    pub(crate) intrinsic_height: f32,
    pub(crate) listeners: Vec<Listener>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: SmallVec::new(),
            classes: SmallVec::new(),
            style: StyleMap::new(),
            intrinsic_width: 0.0,
            intrinsic_height: 0.0,
            listeners: Vec::new(),
        }
    }
}

/// Work scheduled on the simulated clock.
enum TimerTask {
    /// A `set_timeout` callback.
    Callback(Box<dyn FnOnce()>),
    /// Deliver `transitionend` to the node's listeners.
    TransitionEnd(NodeId),
}

pub(crate) struct DocumentInner {
    pub(crate) arena: Arena<NodeData>,
    pub(crate) root: NodeId,
    pub(crate) class_rules: Vec<(String, StyleMap)>,
    clock_ms: u64,
    timer_seq: u64,
    timers: BTreeMap<(u64, u64), TimerTask>,
    deferred: VecDeque<Box<dyn FnOnce()>>,
    pending_transitions: FxHashMap<NodeId, (u64, u64)>,
    transition_events: bool,
    layout_flushes: u64,
}

impl DocumentInner {
    /// Node payload, if the node is still live in the arena.
    pub(crate) fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(|entry| entry.get())
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(|entry| entry.get_mut())
    }

    pub(crate) fn record_layout_flush(&mut self) {
        self.layout_flushes += 1;
    }

    /// Schedule (or reschedule) the node's `transitionend` for
    /// `now + duration`, if its computed transition duration is positive.
    /// At most one delivery is pending per node; the latest write wins.
    pub(crate) fn arm_transition(&mut self, node: NodeId) {
        let duration_ms = computed::transition_duration_ms(self, node);
        if duration_ms == 0 {
            return;
        }
        if let Some(previous) = self.pending_transitions.remove(&node) {
            self.timers.remove(&previous);
        }
        self.timer_seq += 1;
        let key = (self.clock_ms + duration_ms, self.timer_seq);
        self.pending_transitions.insert(node, key);
        self.timers.insert(key, TimerTask::TransitionEnd(node));
        trace!("transition armed on {node}: ends at {}ms", key.0);
    }
}

/// An in-memory document: element tree, minimal class-rule cascade, and
/// the cooperative scheduler the drawer's deferred phases run on.
///
/// Cloning a `Document` (or an `Element`) shares the same underlying
/// state; everything is single-threaded.
#[derive(Clone)]
pub struct Document {
    pub(crate) inner: Rc<RefCell<DocumentInner>>,
}

impl Default for Document {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` root element.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::new("body"));
        Self {
            inner: Rc::new(RefCell::new(DocumentInner {
                arena,
                root,
                class_rules: Vec::new(),
                clock_ms: 0,
                timer_seq: 0,
                timers: BTreeMap::new(),
                deferred: VecDeque::new(),
                pending_transitions: FxHashMap::default(),
                transition_events: true,
                layout_flushes: 0,
            })),
        }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> Element {
        let root = self.inner.borrow().root;
        Element {
            document: self.clone(),
            node: root,
        }
    }

    /// Create a detached element with the given tag name.
    #[must_use]
    pub fn create_element(&self, tag: &str) -> Element {
        let node = self.inner.borrow_mut().arena.new_node(NodeData::new(tag));
        Element {
            document: self.clone(),
            node,
        }
    }

    /// Register a class rule, e.g. `add_class_rule("hide",
    /// StyleMap::new().with("display", "none"))`. Rules participate in
    /// computed-style reads for every element carrying the class; later
    /// registrations win over earlier ones.
    pub fn add_class_rule(&self, class: &str, declarations: StyleMap) {
        self.inner
            .borrow_mut()
            .class_rules
            .push((class.to_owned(), declarations));
    }

    /// Resolve a selector (`#id`, `.class` or a tag name) to the first
    /// matching element in document order.
    ///
    /// # Errors
    ///
    /// Fails when nothing in the document matches the selector.
    pub fn query(&self, selector: &str) -> Result<Element> {
        self.query_all(selector)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no element matches selector `{selector}`"))
    }

    /// All elements matching a selector, in document order.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let parsed = Selector::parse(selector);
        let matches: Vec<NodeId> = {
            let inner = self.inner.borrow();
            inner
                .root
                .descendants(&inner.arena)
                .filter(|node| {
                    inner
                        .node(*node)
                        .is_some_and(|data| parsed.matches(data))
                })
                .collect()
        };
        matches
            .into_iter()
            .map(|node| Element {
                document: self.clone(),
                node,
            })
            .collect()
    }

    /// Current simulated time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().clock_ms
    }

    /// Number of forced layout reads performed so far (see
    /// `Element::width` / `Element::height`).
    #[must_use]
    pub fn layout_flush_count(&self) -> u64 {
        self.inner.borrow().layout_flushes
    }

    /// Whether `transitionend` events are delivered. Turning delivery off
    /// models engines that silently drop the event, leaving only fallback
    /// timers to observe completion.
    pub fn set_transition_events(&self, deliver: bool) {
        self.inner.borrow_mut().transition_events = deliver;
    }

    /// Schedule a callback `delay_ms` from now.
    pub fn set_timeout(&self, delay_ms: u64, callback: impl FnOnce() + 'static) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        inner.timer_seq += 1;
        let seq = inner.timer_seq;
        let due = inner.clock_ms + delay_ms;
        inner
            .timers
            .insert((due, seq), TimerTask::Callback(Box::new(callback)));
        trace!("timer {seq} set for {due}ms");
        TimerId(seq)
    }

    /// Cancel a pending timeout. Clearing an already-fired timer is a
    /// no-op.
    pub fn clear_timeout(&self, timer: TimerId) {
        let mut inner = self.inner.borrow_mut();
        let key = inner
            .timers
            .keys()
            .find(|(_, seq)| *seq == timer.0)
            .copied();
        if let Some(found) = key {
            inner.timers.remove(&found);
            trace!("timer {} cleared", timer.0);
        }
    }

    /// Queue a callback for the next tick. The deferred queue drains
    /// before any due timer runs, so a deferred style write lands on the
    /// turn after the current one, never in it.
    pub fn defer(&self, callback: impl FnOnce() + 'static) {
        self.inner.borrow_mut().deferred.push_back(Box::new(callback));
    }

    /// Drain the deferred queue without advancing the clock.
    pub fn tick(&self) {
        self.run_deferred();
    }

    /// Advance the simulated clock by `delta_ms`, running deferred work
    /// and due timers in order. The clock steps to each timer's due time
    /// as it fires, so callbacks observe consistent `now_ms` values.
    pub fn advance(&self, delta_ms: u64) {
        let deadline = self.inner.borrow().clock_ms + delta_ms;
        loop {
            self.run_deferred();
            let task = self.take_due_task(deadline);
            match task {
                Some(TimerTask::Callback(callback)) => callback(),
                Some(TimerTask::TransitionEnd(node)) => self.deliver_transition_end(node),
                None => break,
            }
        }
        self.inner.borrow_mut().clock_ms = deadline;
        self.run_deferred();
    }

    fn take_due_task(&self, deadline: u64) -> Option<TimerTask> {
        let mut inner = self.inner.borrow_mut();
        let key = inner
            .timers
            .keys()
            .next()
            .copied()
            .filter(|(due, _)| *due <= deadline)?;
        let task = inner.timers.remove(&key);
        inner.clock_ms = key.0;
        if let Some(TimerTask::TransitionEnd(node)) = &task {
            inner.pending_transitions.remove(node);
        }
        task
    }

    fn run_deferred(&self) {
        loop {
            let next = self.inner.borrow_mut().deferred.pop_front();
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    /// Deliver `transitionend` to the node's listeners, unless delivery
    /// is suppressed or the node is gone. Callbacks are collected first
    /// so the document is not borrowed while they run.
    fn deliver_transition_end(&self, node: NodeId) {
        let callbacks: Vec<Rc<dyn Fn()>> = {
            let inner = self.inner.borrow();
            if !inner.transition_events {
                trace!("transition end on {node} suppressed");
                return;
            }
            match inner.node(node) {
                Some(data) => data
                    .listeners
                    .iter()
                    .filter(|listener| {
                        listener.events.iter().any(|name| name == "transitionend")
                    })
                    .map(|listener| Rc::clone(&listener.callback))
                    .collect(),
                None => return,
            }
        };
        trace!("transition end on {node}: {} listener(s)", callbacks.len());
        for callback in callbacks {
            callback();
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        formatter
            .debug_struct("Document")
            .field("clock_ms", &inner.clock_ms)
            .field("nodes", &inner.arena.count())
            .finish_non_exhaustive()
    }
}

/// The three selector forms the collaborator resolves.
enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Self {
        let trimmed = selector.trim();
        if let Some(id) = trimmed.strip_prefix('#') {
            Self::Id(id.to_owned())
        } else if let Some(class) = trimmed.strip_prefix('.') {
            Self::Class(class.to_owned())
        } else {
            Self::Tag(trimmed.to_owned())
        }
    }

    fn matches(&self, data: &NodeData) -> bool {
        match self {
            Self::Id(id) => data
                .attrs
                .iter()
                .any(|(name, value)| name == "id" && value == id),
            Self::Class(class) => data.classes.iter().any(|candidate| candidate == class),
            Self::Tag(tag) => data.tag == *tag,
        }
    }
}
