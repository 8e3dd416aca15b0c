//! Legend module.
//! Group legend (color swatch, key, label), normalling legend (badge,
//! description) and the free-text notes.

use crate::config::Document;
use crate::markup::escape_html;
use crate::palette::{resolve_color, resolve_normalling};

/// Row order of the legend lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendOrder {
    /// Key order as written in the document.
    #[default]
    Document,
    /// Sorted by key.
    Sorted,
}

fn ordered<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Option<String>)>,
    order: LegendOrder,
) -> Vec<(&'a str, &'a str)> {
    let mut rows: Vec<(&str, &str)> = entries
        .map(|(k, v)| (k.as_str(), v.as_deref().unwrap_or("")))
        .collect();
    if order == LegendOrder::Sorted {
        rows.sort_by(|a, b| a.0.cmp(b.0));
    }
    rows
}

/// One `<div>` per entry of `legend.groups`.
pub fn render_groups(doc: &Document, order: LegendOrder) -> Vec<String> {
    ordered(doc.legend.groups.iter(), order)
        .into_iter()
        .map(|(key, label)| {
            let color = resolve_color(doc.legend.colors.get(key).and_then(|c| c.as_deref()));
            format!(
                r#"<div><span class="legend-dot" style="background:{}"></span> <strong>{}</strong> <span class="text-secondary">{}</span></div>"#,
                color.css(),
                escape_html(key),
                escape_html(label)
            )
        })
        .collect()
}

/// One `<div>` per entry of `legend.normalling`.
pub fn render_normalling(doc: &Document, order: LegendOrder) -> Vec<String> {
    ordered(doc.legend.normalling.iter(), order)
        .into_iter()
        .map(|(code, text)| {
            format!(
                r#"<div><span class="badge {}">{}</span> <span class="text-secondary">{}</span></div>"#,
                resolve_normalling(code).badge_class(),
                escape_html(code),
                escape_html(text)
            )
        })
        .collect()
}

pub fn render_notes(doc: &Document) -> String {
    escape_html(doc.meta.notes.as_deref().unwrap_or(""))
}
