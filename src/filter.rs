//! Live substring filter over the channel table.
//! Holds an immutable snapshot of (row id, search key) pairs taken when the
//! filter is wired; a rebuilt table needs a freshly wired filter.

use crate::table::{ChannelRow, RowId, Visibility};

/// Browser side of the same filter: rows are captured once, then every
/// input event trims and lower-cases the query and toggles `hidden`
/// against each row's `data-search` key.
const PAGE_SCRIPT: &str = r##"(() => {
  const input = document.getElementById("filter");
  const rows = Array.from(document.querySelectorAll("#channels-body tr"));
  input.addEventListener("input", () => {
    const q = input.value.trim().toLowerCase();
    rows.forEach((tr) => {
      tr.hidden = !(tr.dataset.search || "").includes(q);
    });
  });
})();"##;

#[derive(Debug)]
pub struct RowFilter {
    snapshot: Vec<(RowId, String)>,
}

impl RowFilter {
    pub fn wire(rows: &[ChannelRow]) -> Self {
        Self {
            snapshot: rows.iter().map(|r| (r.id, r.search_key.clone())).collect(),
        }
    }

    /// Listener for the page's query field, embedded by the page shell.
    pub fn page_script(&self) -> &'static str {
        PAGE_SCRIPT
    }

    /// Visibility of every wired row for `query`, in wiring order.
    /// An empty (or all-whitespace) query shows every row.
    pub fn apply(&self, query: &str) -> Vec<(RowId, Visibility)> {
        let needle = query.trim().to_lowercase();
        let result: Vec<(RowId, Visibility)> = self
            .snapshot
            .iter()
            .map(|(id, key)| {
                let visibility = if key.contains(&needle) {
                    Visibility::Shown
                } else {
                    Visibility::Hidden
                };
                (*id, visibility)
            })
            .collect();

        log::debug!(
            "Filter {:?}: {}/{} rows shown",
            needle,
            result.iter().filter(|(_, v)| *v == Visibility::Shown).count(),
            result.len()
        );
        result
    }
}
