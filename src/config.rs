//! Config module.
//! Loads the patch-bay document (patchbay.json) and defines its serde model.
//! Every field is optional and `null` is accepted wherever a string is;
//! missing sections deserialize to empty values so renderers can fall back
//! instead of failing.
//! Legend maps keep the key order written in the file.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub rows: Option<RowLabels>,
    #[serde(default)]
    pub legend: Legend,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub front_panel_labels: FrontPanelLabels,
}

#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub normalling_default: Option<String>,
    #[serde(default)]
    pub channels_total: Option<u64>,
}

/// Labels for the two physical rows of jacks.
#[derive(Debug, Default, Deserialize)]
pub struct RowLabels {
    #[serde(default, rename = "A")]
    pub a: Option<String>,
    #[serde(default, rename = "B")]
    pub b: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Legend {
    /// group key -> human label
    #[serde(default)]
    pub groups: IndexMap<String, Option<String>>,
    /// group key -> palette key
    #[serde(default)]
    pub colors: IndexMap<String, Option<String>>,
    /// normalling code -> description
    #[serde(default)]
    pub normalling: IndexMap<String, Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FrontPanelLabels {
    #[serde(default, rename = "stripA")]
    pub strip_a: Vec<Option<String>>,
    #[serde(default, rename = "stripB")]
    pub strip_b: Vec<Option<String>>,
}

/// One numbered patch point with an "a" and a "b" side.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub ch: Option<u32>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub normalling: Option<String>,
    #[serde(default)]
    pub a_short: Option<String>,
    #[serde(default)]
    pub a_full: Option<String>,
    #[serde(default)]
    pub b_short: Option<String>,
    #[serde(default)]
    pub b_full: Option<String>,
    #[serde(default)]
    pub tooltips: Option<Tooltips>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Tooltips {
    #[serde(default)]
    pub a: Option<String>,
    #[serde(default)]
    pub b: Option<String>,
}

/// Which side of a channel a strip shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Channel {
    pub fn full_label(&self, side: Side) -> Option<&str> {
        match side {
            Side::A => self.a_full.as_deref(),
            Side::B => self.b_full.as_deref(),
        }
    }

    pub fn tooltip(&self, side: Side) -> Option<&str> {
        let tips = self.tooltips.as_ref()?;
        match side {
            Side::A => tips.a.as_deref(),
            Side::B => tips.b.as_deref(),
        }
    }
}

impl Document {
    /// Builds the channel-number lookup shared by the front panel.
    /// On duplicate numbers the last record wins; records without a number
    /// are left out.
    pub fn channel_index(&self) -> HashMap<u32, &Channel> {
        let mut index = HashMap::with_capacity(self.channels.len());
        for (position, channel) in self.channels.iter().enumerate() {
            let Some(ch) = channel.ch else {
                log::warn!("Channel record {} has no channel number, not placed on the front panel", position);
                continue;
            };
            if index.insert(ch, channel).is_some() {
                log::warn!("Duplicate channel number {} in document, last record wins", ch);
            }
        }
        index
    }

    pub fn strip_labels(&self, side: Side) -> &[Option<String>] {
        match side {
            Side::A => &self.front_panel_labels.strip_a,
            Side::B => &self.front_panel_labels.strip_b,
        }
    }
}

/// Parses a document from JSON text.
pub fn parse_document(json: &str) -> Result<Document> {
    serde_json::from_str(json).context("Failed to parse patchbay document")
}

/// Reads and parses the document at `path`.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read patchbay document: {}", path.display()))?;

    let document = parse_document(&content)
        .with_context(|| format!("Invalid patchbay document: {}", path.display()))?;

    log::debug!(
        "Loaded {} channels, strips {}/{} from {}",
        document.channels.len(),
        document.front_panel_labels.strip_a.len(),
        document.front_panel_labels.strip_b.len(),
        path.display()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let doc = parse_document("{}").unwrap();
        assert!(doc.meta.name.is_none());
        assert!(doc.rows.is_none());
        assert!(doc.legend.groups.is_empty());
        assert!(doc.channels.is_empty());
        assert!(doc.front_panel_labels.strip_a.is_empty());
    }

    #[test]
    fn test_legend_keeps_document_order() {
        let doc = parse_document(r#"{"legend": {"groups": {"SRC": "Sources", "AUX": "Aux", "FX": "Effects"}}}"#)
            .unwrap();
        let keys: Vec<&str> = doc.legend.groups.keys().map(String::as_str).collect();
        assert_eq!(keys, ["SRC", "AUX", "FX"]);
    }

    #[test]
    fn test_field_renames() {
        let doc = parse_document(
            r#"{
                "rows": {"A": "Sends", "B": "Returns"},
                "front_panel_labels": {"stripA": ["In 1"], "stripB": ["Out 1", "Out 2"]},
                "channels": [{"ch": 3, "tooltips": {"b": "line level"}}]
            }"#,
        )
        .unwrap();
        let rows = doc.rows.as_ref().unwrap();
        assert_eq!(rows.a.as_deref(), Some("Sends"));
        assert_eq!(rows.b.as_deref(), Some("Returns"));
        assert_eq!(doc.strip_labels(Side::A), [Some("In 1".to_string())]);
        assert_eq!(doc.strip_labels(Side::B).len(), 2);
        assert_eq!(doc.channels[0].tooltip(Side::B), Some("line level"));
        assert_eq!(doc.channels[0].tooltip(Side::A), None);
    }

    #[test]
    fn test_channel_index_last_record_wins() {
        let doc = parse_document(r#"{"channels": [{"ch": 1, "group": "SRC"}, {"ch": 1, "group": "FX"}]}"#)
            .unwrap();
        let index = doc.channel_index();
        assert_eq!(index.len(), 1);
        assert_eq!(index[&1].group.as_deref(), Some("FX"));
    }

    #[test]
    fn test_channel_without_number_loads() {
        let doc = parse_document(r#"{"channels": [{"group": "SRC", "a_short": "IN"}, {"ch": 2}]}"#).unwrap();
        assert_eq!(doc.channels.len(), 2);
        assert_eq!(doc.channels[0].ch, None);
        let index = doc.channel_index();
        assert_eq!(index.len(), 1);
        assert!(index.contains_key(&2));
    }

    #[test]
    fn test_null_strip_label_loads() {
        let doc = parse_document(r#"{"front_panel_labels": {"stripA": ["In 1", null, "In 3"]}}"#).unwrap();
        assert_eq!(doc.strip_labels(Side::A).len(), 3);
        assert_eq!(doc.strip_labels(Side::A)[1], None);
    }

    #[test]
    fn test_null_legend_values_load() {
        let doc = parse_document(
            r#"{"legend": {"groups": {"SRC": null}, "colors": {"SRC": null}, "normalling": {"HN": null}}}"#,
        )
        .unwrap();
        assert_eq!(doc.legend.groups.get("SRC"), Some(&None));
        assert_eq!(doc.legend.colors.get("SRC"), Some(&None));
        assert_eq!(doc.legend.normalling.len(), 1);
    }

    #[test]
    fn test_load_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"meta": {{"name": "Rack", "channels_total": 48}}}}"#).unwrap();
        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.meta.name.as_deref(), Some("Rack"));
        assert_eq!(doc.meta.channels_total, Some(48));
    }

    #[test]
    fn test_load_document_reports_path() {
        let err = load_document(Path::new("does/not/exist.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("does/not/exist.json"));
    }

    #[test]
    fn test_bundled_sample_parses() {
        let doc = parse_document(include_str!("../data/patchbay.json")).unwrap();
        assert_eq!(doc.channels.len(), 6);
        assert_eq!(doc.strip_labels(Side::A).len(), 6);
        assert_eq!(doc.legend.normalling.len(), 3);
    }

    #[test]
    fn test_load_document_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_document(file.path()).is_err());
    }
}
