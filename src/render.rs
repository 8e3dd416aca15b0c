//! Render pass.
//! Drives every view from one borrowed document in a fixed order
//! (summary, legend, front panel, table), then wires the filter and hands
//! the hover targets to the tooltip host. Each pass rebuilds all view state.

use crate::config::{Document, Side};
use crate::filter::RowFilter;
use crate::front_panel::{self, Jack};
use crate::legend::{self, LegendOrder};
use crate::markup::escape_html;
use crate::meta;
use crate::table::{self, ChannelRow};
use crate::tooltip::{TOOLTIP_SELECTOR, TooltipHost};

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub legend_order: LegendOrder,
}

/// All view regions produced by one pass.
#[derive(Debug)]
pub struct RenderedViews {
    pub summary: String,
    pub legend_groups: Vec<String>,
    pub legend_normalling: Vec<String>,
    pub notes: String,
    pub strip_a: Vec<Jack>,
    pub strip_b: Vec<Jack>,
    pub rows: Vec<ChannelRow>,
    filter: RowFilter,
    query: String,
    tooltip_script: Option<String>,
}

pub fn render_all(doc: &Document, options: RenderOptions, host: &mut dyn TooltipHost) -> RenderedViews {
    let summary = meta::render_summary(doc);
    let legend_groups = legend::render_groups(doc, options.legend_order);
    let legend_normalling = legend::render_normalling(doc, options.legend_order);
    let notes = legend::render_notes(doc);

    let index = doc.channel_index();
    let strip_a = front_panel::build_strip(doc, &index, Side::A);
    let strip_b = front_panel::build_strip(doc, &index, Side::B);
    let longest = strip_a.len().max(strip_b.len());
    let unplaced = doc
        .channels
        .iter()
        .filter(|c| c.ch.is_none_or(|n| n == 0 || n as usize > longest))
        .count();
    if unplaced > 0 {
        log::warn!("{} channels have no front-panel position", unplaced);
    }

    let rows = table::build_rows(doc);
    let filter = RowFilter::wire(&rows);

    host.activate(TOOLTIP_SELECTOR, strip_a.len() + strip_b.len());
    let tooltip_script = host.page_script();

    log::info!(
        "Rendered {} legend groups, {}+{} jacks, {} table rows",
        legend_groups.len(),
        strip_a.len(),
        strip_b.len(),
        rows.len()
    );

    RenderedViews {
        summary,
        legend_groups,
        legend_normalling,
        notes,
        strip_a,
        strip_b,
        rows,
        filter,
        query: String::new(),
        tooltip_script,
    }
}

impl RenderedViews {
    /// Handles a change of the query field.
    pub fn set_query(&mut self, query: &str) {
        for (id, visibility) in self.filter.apply(query) {
            if let Some(row) = self.rows.get_mut(id) {
                row.visibility = visibility;
            }
        }
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ChannelRow> {
        self.rows.iter().filter(|r| r.is_visible())
    }

    /// Assembles the HTML page with all named regions.
    pub fn to_page(&self) -> String {
        let join = |parts: Vec<String>| parts.join("\n");
        let script = self
            .tooltip_script
            .as_ref()
            .map(|s| format!("<script>{s}</script>\n"))
            .unwrap_or_default();
        let filter_script = format!("<script>{}</script>\n", self.filter.page_script());

        format!(
            r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
<link rel="stylesheet" href="patchbay.css">
</head>
<body class="container py-3">
<p id="meta" class="text-secondary">{summary}</p>
<section class="legend">
<div id="legend-groups">
{groups}
</div>
<div id="legend-norm">
{norm}
</div>
<p id="legend-notes" class="small">{notes}</p>
</section>
<section class="front-panel">
<div id="stripA" class="strip">
{strip_a}
</div>
<div id="stripB" class="strip">
{strip_b}
</div>
</section>
<input id="filter" class="form-control" type="search" placeholder="Filter channels" value="{query}">
<table class="table table-sm">
<thead><tr><th>Ch</th><th>Group</th><th>Norm</th><th>A</th><th>B</th><th>Notes</th></tr></thead>
<tbody id="channels-body">
{rows}
</tbody>
</table>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
{script}{filter_script}</body>
</html>
"#,
            title = escape_html(&self.summary),
            summary = escape_html(&self.summary),
            groups = self.legend_groups.join("\n"),
            norm = self.legend_normalling.join("\n"),
            notes = self.notes,
            strip_a = join(self.strip_a.iter().map(Jack::to_html).collect()),
            strip_b = join(self.strip_b.iter().map(Jack::to_html).collect()),
            query = escape_html(&self.query),
            rows = join(self.rows.iter().map(ChannelRow::to_html).collect()),
        )
    }

    /// Visible rows as terminal lines.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.summary);
        for row in self.visible_rows() {
            out.push_str(&row.to_text());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_document;
    use crate::palette::PaletteColor;
    use crate::tooltip::BootstrapTooltips;

    const SCENARIO: &str = r#"{
        "legend": {"groups": {"SRC": "Sources"}, "colors": {"SRC": "amber"}, "normalling": {"HN": "Half-normal"}},
        "channels": [{"ch": 1, "group": "SRC", "normalling": "HN", "a_short": "IN", "b_short": "OUT"}],
        "front_panel_labels": {"stripA": ["Input 1"], "stripB": ["Output 1"]}
    }"#;

    fn render(json: &str) -> RenderedViews {
        let doc = parse_document(json).unwrap();
        render_all(&doc, RenderOptions::default(), &mut BootstrapTooltips::default())
    }

    #[test]
    fn test_scenario_views() {
        let views = render(SCENARIO);
        assert_eq!(views.strip_a.len(), 1);
        let jack = &views.strip_a[0];
        assert_eq!(jack.channel, 1);
        assert_eq!(jack.label, "Input 1");
        assert_eq!(jack.normalling, "HN");
        assert_eq!(jack.group, "SRC");
        assert_eq!(jack.color, PaletteColor::Amber);
        assert_eq!(views.strip_b[0].label, "Output 1");

        assert_eq!(views.rows.len(), 1);
        assert_eq!(views.rows[0].search_key, "1 src hn in out");
        assert_eq!(views.legend_groups.len(), 1);
        assert_eq!(views.legend_normalling.len(), 1);
    }

    #[test]
    fn test_scenario_query_cycle() {
        let mut views = render(SCENARIO);
        views.set_query("out");
        assert_eq!(views.visible_rows().count(), 1);
        views.set_query("zzz");
        assert_eq!(views.visible_rows().count(), 0);
        assert_eq!(views.rows.len(), 1);
        views.set_query("");
        assert_eq!(views.visible_rows().count(), 1);
    }

    #[test]
    fn test_clearing_query_restores_order() {
        let mut views = render(r#"{"channels": [{"ch": 4, "a_short": "X"}, {"ch": 2, "a_short": "Y"}, {"ch": 7, "a_short": "X2"}]}"#);
        views.set_query("x");
        let visible: Vec<Option<u32>> = views.visible_rows().map(|r| r.channel).collect();
        assert_eq!(visible, [Some(4), Some(7)]);
        views.set_query("");
        let visible: Vec<Option<u32>> = views.visible_rows().map(|r| r.channel).collect();
        assert_eq!(visible, [Some(4), Some(2), Some(7)]);
    }

    #[test]
    fn test_page_contains_regions() {
        let mut views = render(SCENARIO);
        views.set_query("zzz");
        let page = views.to_page();
        for id in ["meta", "legend-groups", "legend-norm", "legend-notes", "stripA", "stripB", "channels-body", "filter"] {
            assert!(page.contains(&format!(r#"id="{id}""#)), "missing region {id}");
        }
        assert!(page.contains(r#"value="zzz""#));
        assert!(page.contains(" hidden>"));
        assert!(page.contains("bootstrap.Tooltip"));
    }

    #[test]
    fn test_page_wires_query_listener() {
        let page = render(SCENARIO).to_page();
        let tooltip_at = page.find("bootstrap.Tooltip").unwrap();
        let listener_at = page.find(r#"addEventListener("input""#).unwrap();
        assert!(listener_at > tooltip_at);
        assert!(page.contains("dataset.search"));
        assert!(page[listener_at..].contains("</script>\n</body>"));
    }

    #[test]
    fn test_malformed_records_still_render() {
        let views = render(
            r#"{
                "legend": {"groups": {"SRC": null}},
                "channels": [{"group": "SRC", "a_short": "LOOSE"}, {"ch": 1, "a_short": "IN"}],
                "front_panel_labels": {"stripA": [null, "Input 2"]}
            }"#,
        );
        assert_eq!(views.rows.len(), 2);
        assert_eq!(views.rows[0].channel, None);
        assert_eq!(views.strip_a.len(), 2);
        assert_eq!(views.strip_a[0].label, "");
        assert_eq!(views.strip_a[0].group, "AUX");
        assert_eq!(views.legend_groups.len(), 1);
    }

    #[test]
    fn test_empty_document_renders() {
        let views = render("{}");
        assert!(views.strip_a.is_empty());
        assert!(views.rows.is_empty());
        assert!(views.to_page().contains("Patchbay ·  · top/bottom ·  channels"));
        assert_eq!(views.to_text(), "Patchbay ·  · top/bottom ·  channels\n");
    }

    #[test]
    fn test_rerender_rewires_filter() {
        let doc = parse_document(SCENARIO).unwrap();
        let mut host = BootstrapTooltips::default();
        let mut first = render_all(&doc, RenderOptions::default(), &mut host);
        first.set_query("zzz");
        let second = render_all(&doc, RenderOptions::default(), &mut host);
        assert_eq!(second.visible_rows().count(), 1);
        assert_eq!(second.query(), "");
    }
}
