//! Read the page-injected [`WidgetConfig`].

use crate::dom::document;
use pos_core::config::{TableDescriptor, WidgetConfig, CONFIG_ELEMENT_ID};

/// Parse the JSON held by `#pos-widget-config`.
///
/// A page without the element gets the empty default configuration.
pub fn read_page_config() -> anyhow::Result<WidgetConfig> {
    let doc = document()?;
    let Some(el) = doc.get_element_by_id(CONFIG_ELEMENT_ID) else {
        log::info!("No #{} element; using default widget config", CONFIG_ELEMENT_ID);
        return Ok(WidgetConfig::default());
    };
    let json = el.text_content().unwrap_or_default();
    if json.trim().is_empty() {
        return Ok(WidgetConfig::default());
    }
    Ok(WidgetConfig::from_json(&json)?)
}

/// Descriptors for every `<table>` carrying the legacy marker attributes.
///
/// Tables without an id are skipped: their persisted state would have no
/// stable key.
pub fn discover_marked_tables() -> Vec<TableDescriptor> {
    let selector = r#"table[data-sortable="true"], table[data-toggleable="true"], table[data-bulkable="true"]"#;
    crate::dom::document_query_all(selector)
        .into_iter()
        .filter_map(|table| {
            let id = table.id();
            if id.is_empty() {
                log::warn!("Skipping marked table without an id");
                return None;
            }
            match TableDescriptor::from_marker_attributes(&id, |name| table.get_attribute(name)) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            }
        })
        .collect()
}
