//! Summary line: "name · device · rows · N channels".

use crate::config::Document;

const DEFAULT_NAME: &str = "Patchbay";
const DEFAULT_ROWS: &str = "top/bottom";

/// Builds the summary line from `meta` and `rows`. Plain text, not markup.
pub fn render_summary(doc: &Document) -> String {
    let name = doc.meta.name.as_deref().unwrap_or(DEFAULT_NAME);
    let device = doc.meta.device.as_deref().unwrap_or("");
    let rows = match &doc.rows {
        Some(rows) => format!(
            "{} / {}",
            rows.a.as_deref().unwrap_or("top"),
            rows.b.as_deref().unwrap_or("bottom")
        ),
        None => DEFAULT_ROWS.to_string(),
    };
    let total = doc
        .meta
        .channels_total
        .map(|n| n.to_string())
        .unwrap_or_default();

    format!("{name} · {device} · {rows} · {total} channels")
}
