//! Hover text collaborator.
//! Renderers mark elements with `data-bs-toggle="tooltip"` and an escaped
//! `data-bs-title`; a host widget library shows the text on interaction.

/// Attribute selector of every element carrying hover text.
pub const TOOLTIP_SELECTOR: &str = "[data-bs-toggle='tooltip']";

pub trait TooltipHost {
    /// Called once per render pass after all regions are populated.
    fn activate(&mut self, selector: &str, targets: usize);

    /// Script the page shell should embed, if any.
    fn page_script(&self) -> Option<String>;
}

/// Bootstrap 5 delegated tooltips.
#[derive(Debug, Default)]
pub struct BootstrapTooltips {
    selector: Option<String>,
}

impl TooltipHost for BootstrapTooltips {
    fn activate(&mut self, selector: &str, targets: usize) {
        log::debug!("Activating tooltips on {} targets ({})", targets, selector);
        self.selector = Some(selector.to_string());
    }

    fn page_script(&self) -> Option<String> {
        let selector = self.selector.as_ref()?;
        Some(format!(
            r#"new bootstrap.Tooltip(document.body, {{ selector: "{selector}", container: "body", boundary: "window" }});"#
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_script_before_activation() {
        assert!(BootstrapTooltips::default().page_script().is_none());
    }

    #[test]
    fn test_script_after_activation() {
        let mut host = BootstrapTooltips::default();
        host.activate(TOOLTIP_SELECTOR, 4);
        let script = host.page_script().unwrap();
        assert!(script.contains("new bootstrap.Tooltip(document.body"));
        assert!(script.contains(TOOLTIP_SELECTOR));
    }
}
