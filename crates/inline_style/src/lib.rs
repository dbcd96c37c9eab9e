//! Inline style text machinery — ordered declaration maps for `style="..."`
//! attributes, with round-trip-safe parse/serialize and the small value
//! helpers the drawer effect needs (vendor prefixing, sign-flipped
//! shorthands, edge resolution, pixel lengths).
//!
//! A `StyleMap` is an ordered property→value mapping. Ordering matters for
//! two reasons: serializing a parsed attribute must not scramble unrelated
//! declarations some other code wrote, and removing a named subset of
//! properties must leave the remainder byte-stable.

#![forbid(unsafe_code)]

use core::slice;

pub mod shorthand;

pub use shorthand::{parse_duration_ms, parse_px, Edges};

/// A single CSS declaration held by a `StyleMap`.
///
/// Property names are stored in their hyphenated form; values keep their
/// raw text (trimmed of surrounding ASCII whitespace). Values may contain
/// spaces (`"250ms ease"`) but never semicolons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Hyphenated property name, e.g. `margin-top`.
    pub property: String,
    /// Raw declaration value, e.g. `translateX(100%)`.
    pub value: String,
}

/// Ordered inline-style mapping with last-write-wins assignment.
///
/// `StyleMap::parse(&map.to_attr())` equals `map` for any flat map, which
/// is what makes snapshot-and-restore of a style attribute safe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    decls: Vec<Declaration>,
}

impl StyleMap {
    /// Create an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { decls: Vec::new() }
    }

    /// Parse the value of a `style` attribute into an ordered map.
    ///
    /// Splits on semicolons, then on the first colon of each item, trimming
    /// ASCII whitespace around both parts. Items without a colon, or with an
    /// empty property or value, are skipped. Duplicate properties keep their
    /// first position and take the last value.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut map = Self::new();
        for raw_item in input.split(';') {
            let item = raw_item.trim();
            if item.is_empty() {
                continue;
            }
            let Some((raw_property, raw_value)) = item.split_once(':') else {
                continue;
            };
            let property = raw_property.trim();
            let value = raw_value.trim();
            if property.is_empty() || value.is_empty() {
                continue;
            }
            map.set(property, value);
        }
        map
    }

    /// Number of declarations held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether the map holds no declarations.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Assign a property. The name is dasherized, so `marginTop` and
    /// `margin-top` address the same declaration. An existing declaration
    /// keeps its position and takes the new value.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let name = dasherize(property);
        let text = value.into();
        match self.decls.iter_mut().find(|decl| decl.property == name) {
            Some(decl) => decl.value = text,
            None => self.decls.push(Declaration {
                property: name,
                value: text,
            }),
        }
    }

    /// Builder-style `set`, for literal map construction.
    #[inline]
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Look up a property (accepts camel-cased or hyphenated names).
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        let name = dasherize(property);
        self.decls
            .iter()
            .find(|decl| decl.property == name)
            .map(|decl| decl.value.as_str())
    }

    /// Remove a property, returning its value if it was present.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let name = dasherize(property);
        let index = self
            .decls
            .iter()
            .position(|decl| decl.property == name)?;
        Some(self.decls.remove(index).value)
    }

    /// Merge `other` into `self`, left to right: every declaration of
    /// `other` is assigned over this map, so later sources win. This is the
    /// `extend` contract of the collaborator interface.
    pub fn merge(&mut self, other: &Self) {
        for decl in &other.decls {
            self.set(&decl.property, decl.value.clone());
        }
    }

    /// Builder-style `merge`.
    #[inline]
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// Iterate declarations in map order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Render the map as a semicolon-terminated inline-style string, e.g.
    /// `margin-top:0;z-index:1;`.
    #[must_use]
    pub fn to_attr(&self) -> String {
        let mut out = String::new();
        for decl in &self.decls {
            out.push_str(&decl.property);
            out.push(':');
            out.push_str(&decl.value);
            out.push(';');
        }
        out
    }
}

impl<'map> IntoIterator for &'map StyleMap {
    type Item = &'map Declaration;
    type IntoIter = slice::Iter<'map, Declaration>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.decls.iter()
    }
}

/// Convert a camel-cased property name to its hyphenated CSS form.
///
/// `marginTop` becomes `margin-top`; names that are already hyphenated pass
/// through unchanged. Pure and deterministic.
#[must_use]
pub fn dasherize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for character in name.chars() {
        if character.is_ascii_uppercase() {
            out.push('-');
            out.push(character.to_ascii_lowercase());
        } else {
            out.push(character);
        }
    }
    out
}

/// Build a map holding both the unprefixed and the `-webkit-`-prefixed
/// entry for one logical property, used for `transform` and `transition`
/// declarations aimed at older engines.
#[must_use]
pub fn prefixed(property: &str, value: &str) -> StyleMap {
    let name = dasherize(property);
    let webkit = format!("-webkit-{name}");
    StyleMap::new().with(&name, value).with(&webkit, value)
}

/// Sign-flip every numeric token of a CSS shorthand value list.
///
/// `"10px 5px"` becomes `"-10px -5px"`; zero stays zero and non-numeric
/// tokens pass through untouched. Used to compute the compensating negative
/// margin that cancels a parent's padding.
#[must_use]
pub fn inverse(shorthand_value: &str) -> String {
    let flipped: Vec<String> = shorthand_value
        .split_whitespace()
        .map(invert_token)
        .collect();
    flipped.join(" ")
}

fn invert_token(token: &str) -> String {
    let split = token
        .char_indices()
        .find(|(position, character)| {
            !matches!(character, '0'..='9' | '.' | '-' | '+') || (*position > 0 && *character == '-')
        })
        .map_or(token.len(), |(position, _)| position);
    let (number_text, unit) = token.split_at(split);
    let Ok(number) = number_text.parse::<f32>() else {
        return token.to_owned();
    };
    if number.abs() < f32::EPSILON {
        return token.to_owned();
    }
    let negated = -number;
    format!("{negated}{unit}")
}

/// Format a pixel length. Zero renders as a bare `0`.
#[must_use]
pub fn px(value: f32) -> String {
    if value.abs() < f32::EPSILON {
        "0".to_owned()
    } else {
        format!("{value}px")
    }
}
