//! Initialization configuration passed once by the page.
//!
//! The server renders a `<script type="application/json" id="pos-widget-config">`
//! element; the browser layer reads its text and hands it to
//! [`WidgetConfig::from_json`]. Tables are enhanced only when listed here
//! with an explicit `storage_id`, so persisted state never depends on class
//! names or positional ids.

use crate::bulk::BulkActionSpec;
use crate::chart::DailySales;
use crate::error::ConfigError;
use crate::selection::DEFAULT_ROW_KEY_ATTRIBUTE;
use crate::store::{columns_key, sort_key};
use crate::theme::{DEFAULT_DARK_CLASS, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// DOM id of the JSON script element holding the configuration.
pub const CONFIG_ELEMENT_ID: &str = "pos-widget-config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Series for the 7-day sparkline.
    pub seven_day_sales: Vec<DailySales>,
    /// Transaction counts keyed by full weekday name.
    pub sales_by_day: HashMap<String, f64>,
    /// Period-over-period sales change, in percent.
    pub sales_change_percent: Option<f64>,
    /// Target for the sales counter animation. Falls back to the element text.
    pub sales_count: Option<i64>,
    pub theme: ThemeConfig,
    pub tables: Vec<TableDescriptor>,
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub class_name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            class_name: DEFAULT_DARK_CLASS.to_string(),
        }
    }
}

/// Which behaviours to compose onto one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// DOM id of the `<table>` element.
    pub element_id: String,
    /// Caller-chosen unique id used to namespace persisted state.
    pub storage_id: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub toggleable: bool,
    #[serde(default)]
    pub bulk: Option<BulkConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkConfig {
    #[serde(default)]
    pub actions: Vec<BulkActionSpec>,
    /// Row attribute carrying a stable row identifier.
    #[serde(default = "default_row_key_attribute")]
    pub row_key_attribute: String,
}

fn default_row_key_attribute() -> String {
    DEFAULT_ROW_KEY_ATTRIBUTE.to_string()
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            row_key_attribute: default_row_key_attribute(),
        }
    }
}

impl TableDescriptor {
    pub fn new(element_id: impl Into<String>, storage_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            storage_id: storage_id.into(),
            sortable: false,
            toggleable: false,
            bulk: None,
        }
    }

    pub fn sort_storage_key(&self) -> String {
        sort_key(&self.storage_id)
    }

    pub fn columns_storage_key(&self) -> String {
        columns_key(&self.storage_id)
    }

    /// Build a descriptor from the legacy marker attributes
    /// (`data-sortable`, `data-toggleable`, `data-bulkable`, `data-actions`).
    ///
    /// `attribute` looks up an attribute on the table element. The table's
    /// DOM id doubles as its storage id, so it must be unique on the page.
    pub fn from_marker_attributes<F>(element_id: &str, attribute: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| attribute(name).as_deref() == Some("true");

        let bulk = if flag("data-bulkable") {
            let actions = match attribute("data-actions") {
                Some(raw) if !raw.trim().is_empty() => {
                    serde_json::from_str(&raw).map_err(|source| ConfigError::Actions {
                        table: element_id.to_string(),
                        source,
                    })?
                }
                _ => Vec::new(),
            };
            Some(BulkConfig {
                actions,
                ..BulkConfig::default()
            })
        } else {
            None
        };

        Ok(Self {
            element_id: element_id.to_string(),
            storage_id: element_id.to_string(),
            sortable: flag("data-sortable"),
            toggleable: flag("data-toggleable"),
            bulk,
        })
    }

    /// Whether any behaviour is requested at all.
    pub fn has_behaviours(&self) -> bool {
        self.sortable || self.toggleable || self.bulk.is_some()
    }
}
