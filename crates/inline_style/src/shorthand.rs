//! Shorthand value resolution — edge lists, pixel lengths and durations.

/// Per-side pixel values resolved from a 1/2/3/4-value edge shorthand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// Resolve an edge shorthand such as `"10px 5px"` into per-side pixel
    /// values following the standard 1/2/3/4-value expansion. Tokens that
    /// are not pixel lengths resolve to zero; an empty or unparseable value
    /// resolves to all-zero edges.
    #[must_use]
    pub fn from_shorthand(value: &str) -> Self {
        let numbers: Vec<f32> = value
            .split_whitespace()
            .map(|token| parse_px(token).unwrap_or(0.0))
            .collect();
        match *numbers.as_slice() {
            [all] => Self {
                top: all,
                right: all,
                bottom: all,
                left: all,
            },
            [vertical, horizontal] => Self {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            },
            [top, horizontal, bottom] => Self {
                top,
                right: horizontal,
                bottom,
                left: horizontal,
            },
            [top, right, bottom, left] => Self {
                top,
                right,
                bottom,
                left,
            },
            _ => Self::default(),
        }
    }

    /// Sum of the left and right edges.
    #[inline]
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    #[inline]
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Parse a pixel length (`"20px"` or a bare number) into pixels.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    let trimmed = value.trim();
    trimmed
        .strip_suffix("px")
        .unwrap_or(trimmed)
        .trim()
        .parse::<f32>()
        .ok()
}

/// Extract the border width in pixels from a `border` shorthand such as
/// `"1px solid red"`. `"none"` and empty values yield zero.
#[must_use]
pub fn border_width_px(value: &str) -> f32 {
    value
        .split_whitespace()
        .next()
        .and_then(parse_px)
        .unwrap_or(0.0)
}

/// Parse a CSS time token (`"250ms"` or `"0.25s"`) into whole
/// milliseconds. Tokens without a time unit yield `None`.
#[must_use]
pub fn parse_duration_ms(token: &str) -> Option<u64> {
    let trimmed = token.trim();
    if let Some(millis) = trimmed.strip_suffix("ms") {
        return millis.parse::<f32>().ok().map(|value| value.max(0.0) as u64);
    }
    if let Some(seconds) = trimmed.strip_suffix('s') {
        return seconds
            .parse::<f32>()
            .ok()
            .map(|value| (value.max(0.0) * 1000.0) as u64);
    }
    None
}
