//! Drawer construction parameters.

use std::rc::Rc;

use dom_query::Element;
use inline_style::StyleMap;

/// Slide direction of the drawer: which edge the content is revealed
/// from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// The direction's CSS offset property name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether the slide axis is vertical (the wrapper animates its
    /// height) rather than horizontal (width).
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// What a completed animation did, delivered to the change callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerEvent {
    Show,
    Hide,
}

impl DrawerEvent {
    /// The literal `"show"` / `"hide"` spelling of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Hide => "hide",
        }
    }
}

/// One half of a `ShowHideOption`: classes and inline styles applied (or
/// stripped) together.
#[derive(Clone, Debug, Default)]
pub struct OptionSet {
    /// Ordered class list, joined with spaces when applied.
    pub class: Vec<String>,
    /// Inline style map applied with the set, and stripped by property
    /// name when the set is removed.
    pub style: Option<StyleMap>,
}

impl OptionSet {
    /// A set holding a single class.
    #[must_use]
    pub fn of_class(name: &str) -> Self {
        Self {
            class: vec![name.to_owned()],
            style: None,
        }
    }

    /// Builder-style class addition.
    #[must_use]
    pub fn with_class(mut self, name: &str) -> Self {
        self.class.push(name.to_owned());
        self
    }

    /// Builder-style style map.
    #[must_use]
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }
}

/// How the target's visible state is expressed, independent of the
/// sliding animation. "show" applies `add` and strips `remove`; "hide"
/// applies `remove` and strips `add`.
///
/// Class changes persist after the animation. Inline-style changes are
/// transient: completion restores the pre-animation style attribute
/// verbatim, so visibility should be driven by classes (or by styles the
/// page re-applies itself).
#[derive(Clone, Debug, Default)]
pub struct ShowHideOption {
    pub add: Option<OptionSet>,
    pub remove: Option<OptionSet>,
}

impl ShowHideOption {
    /// Show by adding a class, hide by removing it.
    #[must_use]
    pub fn add_class(name: &str) -> Self {
        Self {
            add: Some(OptionSet::of_class(name)),
            remove: None,
        }
    }

    /// Show by removing a class, hide by adding it back.
    #[must_use]
    pub fn remove_class(name: &str) -> Self {
        Self {
            add: None,
            remove: Some(OptionSet::of_class(name)),
        }
    }
}

/// Callback invoked with `DrawerEvent::Show` / `DrawerEvent::Hide` after
/// each completed animation.
pub type ChangeCallback = Rc<dyn Fn(DrawerEvent)>;

/// Immutable construction parameters for a `Drawer`.
#[derive(Clone)]
pub struct DrawerConfig {
    /// The element the drawer reveals and conceals.
    pub target: Element,
    /// Slide direction. Defaults to `Direction::Bottom`.
    pub direction: Direction,
    /// Transition duration in milliseconds. Defaults to 250.
    pub duration_ms: u64,
    /// CSS timing function for the transition. Defaults to `"ease"`.
    pub timing_function: String,
    /// Visible-state descriptor applied at the appropriate animation
    /// phase.
    pub show_option: ShowHideOption,
    /// Change notification; defaults to a no-op.
    pub on_change: Option<ChangeCallback>,
}

impl DrawerConfig {
    /// Configuration with the documented defaults.
    #[must_use]
    pub fn new(target: Element) -> Self {
        Self {
            target,
            direction: Direction::default(),
            duration_ms: 250,
            timing_function: "ease".to_owned(),
            show_option: ShowHideOption::default(),
            on_change: None,
        }
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_timing_function(mut self, timing_function: &str) -> Self {
        self.timing_function = timing_function.to_owned();
        self
    }

    #[must_use]
    pub fn with_show_option(mut self, show_option: ShowHideOption) -> Self {
        self.show_option = show_option;
        self
    }

    #[must_use]
    pub fn with_on_change(mut self, on_change: impl Fn(DrawerEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}
