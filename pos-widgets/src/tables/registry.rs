//! Compose table behaviours from explicit descriptors.

use super::{BulkSelect, ColumnToggle, TableSorter};
use crate::dom::document;
use crate::storage::LocalStorage;
use pos_core::bulk::{BulkAction, BulkActions, BulkCallback};
use pos_core::config::{BulkConfig, TableDescriptor};
use std::collections::HashMap;
use std::rc::Rc;

/// Behaviours attached to one table.
pub struct EnhancedTable {
    pub descriptor: TableDescriptor,
    pub sorter: Option<Rc<TableSorter>>,
    pub columns: Option<Rc<ColumnToggle>>,
    pub bulk: Option<Rc<BulkSelect>>,
}

/// Holds registered bulk-action callbacks and the tables enhanced so far.
pub struct TableRegistry {
    store: LocalStorage,
    callbacks: HashMap<String, BulkCallback<BulkSelect>>,
    enhanced: Vec<EnhancedTable>,
}

impl TableRegistry {
    pub fn new(store: LocalStorage) -> Self {
        Self {
            store,
            callbacks: HashMap::new(),
            enhanced: Vec::new(),
        }
    }

    /// Register the callback run for action `id` on any bulk-enabled table.
    pub fn register_action<F>(&mut self, id: impl Into<String>, callback: F)
    where
        F: Fn(&[String], &BulkSelect) + 'static,
    {
        self.callbacks.insert(id.into(), Rc::new(callback));
    }

    /// Attach the behaviours `descriptor` asks for.
    ///
    /// Bulk selection goes first so its checkbox column exists before the
    /// column toggle counts data columns.
    pub fn enhance(&mut self, descriptor: &TableDescriptor) -> anyhow::Result<()> {
        let table = document()?
            .get_element_by_id(&descriptor.element_id)
            .ok_or_else(|| anyhow::anyhow!("no table with id '{}'", descriptor.element_id))?;

        let bulk = match &descriptor.bulk {
            Some(config) => Some(BulkSelect::attach(
                table.clone(),
                self.actions_for(config),
                &config.row_key_attribute,
            )?),
            None => None,
        };
        let sorter = if descriptor.sortable {
            Some(TableSorter::attach(
                table.clone(),
                descriptor.sort_storage_key(),
                self.store.clone(),
            )?)
        } else {
            None
        };
        let columns = if descriptor.toggleable {
            Some(ColumnToggle::attach(
                table,
                descriptor.columns_storage_key(),
                self.store.clone(),
            )?)
        } else {
            None
        };

        log::info!(
            "Enhanced table '{}' (sort: {}, columns: {}, bulk: {})",
            descriptor.element_id,
            sorter.is_some(),
            columns.is_some(),
            bulk.is_some()
        );
        self.enhanced.push(EnhancedTable {
            descriptor: descriptor.clone(),
            sorter,
            columns,
            bulk,
        });
        Ok(())
    }

    /// Enhance every descriptor, logging and skipping tables that fail or
    /// ask for nothing.
    pub fn enhance_all(&mut self, descriptors: &[TableDescriptor]) {
        for descriptor in descriptors {
            if !descriptor.has_behaviours() {
                log::debug!("Table '{}' requests no behaviours", descriptor.element_id);
                continue;
            }
            if let Err(e) = self.enhance(descriptor) {
                log::error!("Failed to enhance table '{}': {}", descriptor.element_id, e);
            }
        }
    }

    pub fn tables(&self) -> &[EnhancedTable] {
        &self.enhanced
    }

    fn actions_for(&self, config: &BulkConfig) -> BulkActions<BulkSelect> {
        let actions = config
            .actions
            .iter()
            .map(|spec| {
                let callback = match self.callbacks.get(&spec.id) {
                    Some(callback) => callback.clone(),
                    None => {
                        log::warn!("Bulk action '{}' has no registered callback", spec.id);
                        let id = spec.id.clone();
                        let noop: BulkCallback<BulkSelect> =
                            Rc::new(move |selected: &[String], _: &BulkSelect| {
                                log::warn!(
                                    "Ignoring '{}' on {} rows: no callback registered",
                                    id,
                                    selected.len()
                                );
                            });
                        noop
                    }
                };
                BulkAction::from_spec(spec, callback)
            })
            .collect();
        BulkActions::new(actions)
    }
}
