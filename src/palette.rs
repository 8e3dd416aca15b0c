//! Palette module.
//! Total defaulting functions shared by every view: palette key to color token,
//! normalling code to badge style, and channel group fallback.
//! None of these fail; unknown or missing input maps to a fixed default.

use crate::config::{Channel, Document};

/// Group used for jacks without a channel record or without a group.
pub const DEFAULT_GROUP: &str = "AUX";
/// Normalling code used when neither the channel nor the document sets one.
pub const DEFAULT_NORMALLING: &str = "HN";

/// Display colors known to the stylesheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaletteColor {
    Amber,
    Teal,
    Purple,
    Rose,
    Blue,
    Green,
    #[default]
    Gray,
}

impl PaletteColor {
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Amber => "amber",
            PaletteColor::Teal => "teal",
            PaletteColor::Purple => "purple",
            PaletteColor::Rose => "rose",
            PaletteColor::Blue => "blue",
            PaletteColor::Green => "green",
            PaletteColor::Gray => "gray",
        }
    }

    /// CSS value of the color, e.g. `var(--color-teal)`.
    pub fn css(self) -> String {
        format!("var(--color-{})", self.name())
    }
}

/// Maps a palette key to a color. Unknown or missing keys give gray.
pub fn resolve_color(key: Option<&str>) -> PaletteColor {
    match key {
        Some("amber") => PaletteColor::Amber,
        Some("teal") => PaletteColor::Teal,
        Some("purple") => PaletteColor::Purple,
        Some("rose") => PaletteColor::Rose,
        Some("blue") => PaletteColor::Blue,
        Some("green") => PaletteColor::Green,
        _ => PaletteColor::Gray,
    }
}

/// Color of a group key through `legend.colors`.
pub fn group_color(doc: &Document, group: &str) -> PaletteColor {
    resolve_color(doc.legend.colors.get(group).and_then(|key| key.as_deref()))
}

/// Badge style of a normalling code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalling {
    HalfNormal,
    Thru,
    FullNormal,
    Generic,
}

impl Normalling {
    pub fn badge_class(self) -> &'static str {
        match self {
            Normalling::HalfNormal => "badge-hn",
            Normalling::Thru => "badge-th",
            Normalling::FullNormal => "badge-fn",
            Normalling::Generic => "badge-generic",
        }
    }
}

pub fn resolve_normalling(code: &str) -> Normalling {
    match code {
        "HN" => Normalling::HalfNormal,
        "TH" => Normalling::Thru,
        "FN" => Normalling::FullNormal,
        _ => Normalling::Generic,
    }
}

/// Effective normalling code: channel code, then document default, then HN.
pub fn normalling_code<'a>(channel: Option<&'a Channel>, doc: &'a Document) -> &'a str {
    channel
        .and_then(|c| non_blank(c.normalling.as_deref()))
        .or_else(|| non_blank(doc.meta.normalling_default.as_deref()))
        .unwrap_or(DEFAULT_NORMALLING)
}

/// Effective group key of a channel.
pub fn group_key(channel: Option<&Channel>) -> &str {
    channel
        .and_then(|c| non_blank(c.group.as_deref()))
        .unwrap_or(DEFAULT_GROUP)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
