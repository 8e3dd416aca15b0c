//! Front panel module.
//! Lays out the two physical jack strips. Strip position `i` is always
//! channel `i + 1`; the channel record for that number, when present,
//! decorates the jack with its normalling, group and side-specific hover text.
//! The strip's label sequence bounds iteration, so strips A and B may differ
//! in length and neither depends on the length of `channels`.

use std::collections::HashMap;

use crate::config::{Channel, Document, Side};
use crate::markup::escape_html;
use crate::palette::{self, PaletteColor};

const TITLE_SEPARATOR: &str = " — ";

/// One rendered jack of a strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jack {
    pub channel: u32,
    pub normalling: String,
    pub group: String,
    pub color: PaletteColor,
    /// Front-panel label, unescaped.
    pub label: String,
    /// Hover text, unescaped.
    pub title: String,
}

impl Jack {
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="jack" data-bs-toggle="tooltip" data-bs-title="{title}"><span class="ch">{ch}</span><span class="norm {badge}">{norm}</span><span class="group-dot g-{group}" style="background:{color}"></span><div>{label}</div></div>"#,
            title = escape_html(&self.title),
            ch = self.channel,
            badge = palette::resolve_normalling(&self.normalling).badge_class(),
            norm = escape_html(&self.normalling),
            group = escape_html(&self.group),
            color = self.color.css(),
            label = escape_html(&self.label),
        )
    }
}

/// Joins the side's full label and hover descriptor, skipping blank halves.
pub fn jack_title(channel: Option<&Channel>, side: Side) -> String {
    let Some(channel) = channel else {
        return String::new();
    };
    [channel.full_label(side), channel.tooltip(side)]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}

/// Builds one strip against a channel lookup built once per render pass.
pub fn build_strip(doc: &Document, index: &HashMap<u32, &Channel>, side: Side) -> Vec<Jack> {
    let jacks: Vec<Jack> = doc
        .strip_labels(side)
        .iter()
        .zip(1u32..)
        .map(|(label, ch)| {
            let channel = index.get(&ch).copied();
            let group = palette::group_key(channel);
            Jack {
                channel: ch,
                normalling: palette::normalling_code(channel, doc).to_string(),
                group: group.to_string(),
                color: palette::group_color(doc, group),
                label: label.clone().unwrap_or_default(),
                title: jack_title(channel, side),
            }
        })
        .collect();

    log::debug!("Strip {:?}: {} jacks", side, jacks.len());
    jacks
}
