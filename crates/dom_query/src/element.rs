//! Element handles — style, class, measurement, structure and events.

use std::fmt;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use indextree::NodeId;
use inline_style::shorthand::{border_width_px, parse_px, Edges};
use inline_style::StyleMap;
use smallvec::SmallVec;

use crate::computed::computed_value;
use crate::document::{Document, Listener, ANIMATABLE_PROPERTIES};
use crate::Size;

/// Cheap-to-clone handle to one element of a `Document`.
///
/// All operations are silent no-ops on a node that has been removed from
/// the arena; structural operations additionally no-op when they would be
/// degenerate (inserting after a parentless anchor, self-append).
#[derive(Clone)]
pub struct Element {
    pub(crate) document: Document,
    pub(crate) node: NodeId,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document && self.node == other.node
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Element")
            .field("node", &self.node)
            .field("tag", &self.tag())
            .finish()
    }
}

impl Element {
    /// The owning document.
    #[must_use]
    pub fn document(&self) -> Document {
        self.document.clone()
    }

    /// Tag name this element was created with.
    #[must_use]
    pub fn tag(&self) -> String {
        self.document
            .inner
            .borrow()
            .node(self.node)
            .map(|data| data.tag.clone())
            .unwrap_or_default()
    }

    // ---- computed and inline style ----------------------------------

    /// Computed value of a property: inline style, then registered class
    /// rules (later registrations win), then tag defaults, then the
    /// property's initial value.
    #[must_use]
    pub fn computed(&self, property: &str) -> String {
        computed_value(&self.document.inner.borrow(), self.node, property)
    }

    /// Computed values for several properties at once, skipping the ones
    /// that resolve to nothing.
    #[must_use]
    pub fn style_snapshot(&self, properties: &[&str]) -> StyleMap {
        let inner = self.document.inner.borrow();
        let mut snapshot = StyleMap::new();
        for property in properties {
            let value = computed_value(&inner, self.node, property);
            if !value.is_empty() {
                snapshot.set(property, value);
            }
        }
        snapshot
    }

    /// Inline style value of a property, if set.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.document
            .inner
            .borrow()
            .node(self.node)
            .and_then(|data| data.style.get(property).map(str::to_owned))
    }

    /// Write one inline style property.
    pub fn set_style(&self, property: &str, value: impl Into<String>) {
        self.set_styles(&StyleMap::new().with(property, value));
    }

    /// Write a map of inline style properties. If an animatable property
    /// changes and the element ends up with a positive transition
    /// duration, a `transitionend` delivery is scheduled.
    pub fn set_styles(&self, styles: &StyleMap) {
        let mut inner = self.document.inner.borrow_mut();
        let Some(data) = inner.node_mut(self.node) else {
            return;
        };
        let mut animatable_changed = false;
        for decl in styles {
            if is_animatable(&decl.property)
                && data.style.get(&decl.property) != Some(decl.value.as_str())
            {
                animatable_changed = true;
            }
            data.style.set(&decl.property, decl.value.clone());
        }
        if animatable_changed {
            inner.arm_transition(self.node);
        }
    }

    /// Strip the named properties from the inline style, preserving every
    /// other declaration.
    pub fn remove_style(&self, properties: &[&str]) {
        let mut inner = self.document.inner.borrow_mut();
        let Some(data) = inner.node_mut(self.node) else {
            return;
        };
        let mut animatable_changed = false;
        for property in properties {
            if data.style.remove(property).is_some() && is_animatable(property) {
                animatable_changed = true;
            }
        }
        if animatable_changed {
            inner.arm_transition(self.node);
        }
    }

    /// The whole inline style attribute in its canonical serialization.
    #[must_use]
    pub fn style_attr(&self) -> String {
        self.document
            .inner
            .borrow()
            .node(self.node)
            .map(|data| data.style.to_attr())
            .unwrap_or_default()
    }

    /// Replace the whole inline style attribute, as assigning to
    /// `style="..."` would.
    pub fn set_style_attr(&self, raw: &str) {
        let parsed = StyleMap::parse(raw);
        let mut inner = self.document.inner.borrow_mut();
        let Some(data) = inner.node_mut(self.node) else {
            return;
        };
        let animatable_changed = ANIMATABLE_PROPERTIES
            .iter()
            .any(|property| data.style.get(property) != parsed.get(property));
        data.style = parsed;
        if animatable_changed {
            inner.arm_transition(self.node);
        }
    }

    // ---- classes and attributes -------------------------------------

    /// Add one or more space-delimited class names.
    pub fn add_class(&self, names: &str) {
        let mut inner = self.document.inner.borrow_mut();
        let Some(data) = inner.node_mut(self.node) else {
            return;
        };
        for name in names.split_whitespace() {
            if !data.classes.iter().any(|existing| existing == name) {
                data.classes.push(name.to_owned());
            }
        }
    }

    /// Remove one or more space-delimited class names.
    pub fn remove_class(&self, names: &str) {
        let mut inner = self.document.inner.borrow_mut();
        let Some(data) = inner.node_mut(self.node) else {
            return;
        };
        for name in names.split_whitespace() {
            data.classes.retain(|existing| existing != name);
        }
    }

    /// Whether the element carries the class.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.document
            .inner
            .borrow()
            .node(self.node)
            .is_some_and(|data| data.classes.iter().any(|existing| existing == name))
    }

    /// Read an attribute. `style` and `class` reflect their dedicated
    /// storage; empty values read as `None`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        if name == "style" {
            let serialized = self.style_attr();
            return (!serialized.is_empty()).then_some(serialized);
        }
        let inner = self.document.inner.borrow();
        let data = inner.node(self.node)?;
        if name == "class" {
            let joined = data.classes.join(" ");
            return (!joined.is_empty()).then_some(joined);
        }
        data.attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.clone())
    }

    /// Write an attribute. `style` and `class` route to their dedicated
    /// storage.
    pub fn set_attr(&self, name: &str, value: &str) {
        if name == "style" {
            self.set_style_attr(value);
            return;
        }
        let mut inner = self.document.inner.borrow_mut();
        let Some(data) = inner.node_mut(self.node) else {
            return;
        };
        if name == "class" {
            data.classes = value.split_whitespace().map(str::to_owned).collect();
            return;
        }
        match data
            .attrs
            .iter_mut()
            .find(|(attr_name, _)| attr_name == name)
        {
            Some(entry) => entry.1 = value.to_owned(),
            None => data.attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    // ---- measurement ------------------------------------------------

    /// Assign the intrinsic content size layout would have produced.
    /// Inline `width`/`height` declarations take precedence over it.
    pub fn set_intrinsic_size(&self, width: f32, height: f32) {
        let mut inner = self.document.inner.borrow_mut();
        if let Some(data) = inner.node_mut(self.node) {
            data.intrinsic_width = width;
            data.intrinsic_height = height;
        }
    }

    /// Content-box width. This is a layout-flushing read: engines commit
    /// pending style writes before answering it, and the hide path relies
    /// on performing one between its start and end phase.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.document.inner.borrow_mut().record_layout_flush();
        self.content_size().width
    }

    /// Content-box height. A layout-flushing read, like `width`.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.document.inner.borrow_mut().record_layout_flush();
        self.content_size().height
    }

    /// Content-box size: inline `width`/`height` when declared (adjusted
    /// for `box-sizing: border-box`), intrinsic size otherwise.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let inner = self.document.inner.borrow();
        let Some(data) = inner.node(self.node) else {
            return Size::default();
        };
        let padding = Edges::from_shorthand(&computed_value(&inner, self.node, "padding"));
        let border = border_width_px(&computed_value(&inner, self.node, "border"));
        let border_box = computed_value(&inner, self.node, "box-sizing") == "border-box";
        let resolve = |declared: Option<f32>, intrinsic: f32, edges: f32| {
            declared.map_or(intrinsic, |length| {
                if border_box {
                    (length - edges).max(0.0)
                } else {
                    length
                }
            })
        };
        Size {
            width: resolve(
                data.style.get("width").and_then(parse_px),
                data.intrinsic_width,
                padding.horizontal() + 2.0 * border,
            ),
            height: resolve(
                data.style.get("height").and_then(parse_px),
                data.intrinsic_height,
                padding.vertical() + 2.0 * border,
            ),
        }
    }

    /// Border-box size: content size plus computed padding and border.
    #[must_use]
    pub fn outer_size(&self) -> Size {
        let content = self.content_size();
        let inner = self.document.inner.borrow();
        let padding = Edges::from_shorthand(&computed_value(&inner, self.node, "padding"));
        let border = border_width_px(&computed_value(&inner, self.node, "border"));
        Size {
            width: content.width + padding.horizontal() + 2.0 * border,
            height: content.height + padding.vertical() + 2.0 * border,
        }
    }

    /// Border-box width.
    #[must_use]
    pub fn outer_width(&self) -> f32 {
        self.outer_size().width
    }

    /// Border-box height.
    #[must_use]
    pub fn outer_height(&self) -> f32 {
        self.outer_size().height
    }

    // ---- structure --------------------------------------------------

    /// Parent element, if attached somewhere.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let inner = self.document.inner.borrow();
        let parent = inner
            .arena
            .get(self.node)
            .filter(|entry| !entry.is_removed())
            .and_then(|entry| entry.parent())?;
        Some(Self {
            document: self.document.clone(),
            node: parent,
        })
    }

    /// Whether the element is reachable from the document root.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        let inner = self.document.inner.borrow();
        if inner.node(self.node).is_none() {
            return false;
        }
        self.node
            .ancestors(&inner.arena)
            .any(|ancestor| ancestor == inner.root)
    }

    /// Insert this element as the next sibling of `anchor`. No-op when
    /// the anchor is parentless or gone.
    pub fn insert_after(&self, anchor: &Self) {
        let mut inner = self.document.inner.borrow_mut();
        if inner.node(self.node).is_none() || inner.node(anchor.node).is_none() {
            return;
        }
        let anchored = inner
            .arena
            .get(anchor.node)
            .and_then(|entry| entry.parent())
            .is_some();
        if !anchored || self.node == anchor.node {
            return;
        }
        self.node.detach(&mut inner.arena);
        anchor.node.insert_after(self.node, &mut inner.arena);
    }

    /// Append `child` as this element's last child.
    pub fn append(&self, child: &Self) {
        let mut inner = self.document.inner.borrow_mut();
        if inner.node(self.node).is_none()
            || inner.node(child.node).is_none()
            || self.node == child.node
        {
            return;
        }
        if self.node.ancestors(&inner.arena).any(|ancestor| ancestor == child.node) {
            return;
        }
        child.node.detach(&mut inner.arena);
        self.node.append(child.node, &mut inner.arena);
    }

    /// Detach this element (and its subtree) from its parent, keeping it
    /// alive.
    pub fn detach(&self) {
        let mut inner = self.document.inner.borrow_mut();
        if inner.node(self.node).is_some() {
            self.node.detach(&mut inner.arena);
        }
    }

    /// Replace this element with `replacement` and destroy this
    /// element's subtree, as `replaceWith` does. The replacement is
    /// detached from wherever it currently sits first, so replacing a
    /// wrapper with a descendant is safe.
    pub fn replace_with(&self, replacement: &Self) {
        if *self == *replacement {
            return;
        }
        let mut inner = self.document.inner.borrow_mut();
        if inner.node(self.node).is_none() || inner.node(replacement.node).is_none() {
            return;
        }
        replacement.node.detach(&mut inner.arena);
        let anchored = inner
            .arena
            .get(self.node)
            .and_then(|entry| entry.parent())
            .is_some();
        if anchored {
            self.node.insert_after(replacement.node, &mut inner.arena);
        }
        self.node.remove_subtree(&mut inner.arena);
    }

    /// First descendant matching a selector.
    ///
    /// # Errors
    ///
    /// Fails when no descendant matches.
    pub fn query(&self, selector: &str) -> Result<Self> {
        self.document
            .query_all(selector)
            .into_iter()
            .find(|candidate| {
                candidate != self && {
                    let inner = self.document.inner.borrow();
                    candidate
                        .node
                        .ancestors(&inner.arena)
                        .any(|ancestor| ancestor == self.node)
                }
            })
            .ok_or_else(|| anyhow!("no descendant matches selector `{selector}`"))
    }

    // ---- events -----------------------------------------------------

    /// Register one callback under one or more space-delimited event
    /// names.
    pub fn on(&self, events: &str, callback: impl Fn() + 'static) {
        let names: SmallVec<String, 2> = events.split_whitespace().map(str::to_owned).collect();
        if names.is_empty() {
            return;
        }
        let mut inner = self.document.inner.borrow_mut();
        if let Some(data) = inner.node_mut(self.node) {
            data.listeners.push(Listener {
                events: names,
                callback: Rc::new(callback),
            });
        }
    }
}

fn is_animatable(property: &str) -> bool {
    ANIMATABLE_PROPERTIES.contains(&property)
}
