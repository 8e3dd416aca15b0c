//! Table module.
//! One row per channel record in document order, each carrying a precomputed
//! lower-cased search key that the filter consumes. Keys are rebuilt with the
//! rows on every render pass.

use crate::config::{Channel, Document, Side};
use crate::markup::escape_html;
use crate::palette::{self, PaletteColor};

const HOVER_SEPARATOR: &str = " · ";

/// Position of a row in document order.
pub type RowId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelRow {
    pub id: RowId,
    /// `None` when the record has no channel number.
    pub channel: Option<u32>,
    pub group: String,
    pub color: PaletteColor,
    pub normalling: String,
    pub a_short: String,
    pub b_short: String,
    pub hover: String,
    pub search_key: String,
    pub visibility: Visibility,
}

/// All populated text fields of a channel, space-joined and lower-cased.
pub fn search_key(channel: &Channel) -> String {
    let tips = channel.tooltips.as_ref();
    let ch = channel.ch.map(|n| n.to_string());
    [
        ch.as_deref(),
        channel.group.as_deref(),
        channel.normalling.as_deref(),
        channel.a_short.as_deref(),
        channel.a_full.as_deref(),
        channel.b_short.as_deref(),
        channel.b_full.as_deref(),
        tips.and_then(|t| t.a.as_deref()),
        tips.and_then(|t| t.b.as_deref()),
    ]
    .into_iter()
    .flatten()
    .filter(|field| !field.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

fn hover_cell(channel: &Channel) -> String {
    let a = channel.tooltip(Side::A).unwrap_or("");
    let b = channel.tooltip(Side::B).unwrap_or("");
    if !a.is_empty() && !b.is_empty() {
        format!("{a}{HOVER_SEPARATOR}{b}")
    } else {
        format!("{a}{b}")
    }
}

pub fn build_rows(doc: &Document) -> Vec<ChannelRow> {
    let rows: Vec<ChannelRow> = doc
        .channels
        .iter()
        .enumerate()
        .map(|(id, channel)| {
            let group = palette::group_key(Some(channel));
            ChannelRow {
                id,
                channel: channel.ch,
                group: group.to_string(),
                color: palette::group_color(doc, group),
                normalling: palette::normalling_code(Some(channel), doc).to_string(),
                a_short: channel.a_short.clone().unwrap_or_default(),
                b_short: channel.b_short.clone().unwrap_or_default(),
                hover: hover_cell(channel),
                search_key: search_key(channel),
                visibility: Visibility::Shown,
            }
        })
        .collect();

    log::debug!("Channel table: {} rows", rows.len());
    rows
}

impl ChannelRow {
    fn channel_label(&self) -> String {
        self.channel.map(|n| n.to_string()).unwrap_or_default()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub fn to_html(&self) -> String {
        let hidden = if self.is_visible() { "" } else { " hidden" };
        format!(
            r#"<tr data-search="{key}"{hidden}><td><span class="badge text-bg-secondary">{ch}</span></td><td><span class="legend-dot" style="background:{color}"></span> {group}</td><td><span class="badge {badge}">{norm}</span></td><td><code>{a}</code></td><td><code>{b}</code></td><td class="text-secondary small">{hover}</td></tr>"#,
            key = escape_html(&self.search_key),
            ch = self.channel_label(),
            color = self.color.css(),
            group = escape_html(&self.group),
            badge = palette::resolve_normalling(&self.normalling).badge_class(),
            norm = escape_html(&self.normalling),
            a = escape_html(&self.a_short),
            b = escape_html(&self.b_short),
            hover = escape_html(&self.hover),
        )
    }

    /// Single-line terminal form of the row.
    pub fn to_text(&self) -> String {
        let mut line = format!(
            "{:>3}  {:<6} {:<3} {:<12} {:<12}",
            self.channel_label(),
            self.group,
            self.normalling,
            self.a_short,
            self.b_short
        );
        if !self.hover.is_empty() {
            line.push_str("  ");
            line.push_str(&self.hover);
        }
        line
    }
}
