//! Bulk actions: page-declared `{id, label}` pairs bound to callbacks.
//!
//! `C` is the context handed back to a callback alongside the selected ids.
//! In the browser that is the table's bulk selection engine, so a callback
//! can clear the selection or touch the DOM after it runs.

use crate::error::BulkActionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Serializable half of a bulk action, as declared by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionSpec {
    pub id: String,
    pub label: String,
}

pub type BulkCallback<C> = Rc<dyn Fn(&[String], &C)>;

/// An action the user can apply to the selected rows.
pub struct BulkAction<C> {
    pub id: String,
    pub label: String,
    callback: BulkCallback<C>,
}

impl<C> BulkAction<C> {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        callback: impl Fn(&[String], &C) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            callback: Rc::new(callback),
        }
    }

    pub fn from_spec(spec: &BulkActionSpec, callback: BulkCallback<C>) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            callback,
        }
    }

    pub fn invoke(&self, selected: &[String], context: &C) {
        (self.callback)(selected, context);
    }
}

impl<C> Clone for BulkAction<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<C> fmt::Debug for BulkAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The ordered list of actions registered for one table.
pub struct BulkActions<C> {
    actions: Vec<BulkAction<C>>,
}

impl<C> Default for BulkActions<C> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<C> BulkActions<C> {
    pub fn new(actions: Vec<BulkAction<C>>) -> Self {
        Self { actions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BulkAction<C>> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&BulkAction<C>> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Validate a request and pick the action to run.
    ///
    /// `chosen` is the selector's current value; empty means the placeholder
    /// option is still selected.
    pub fn resolve(
        &self,
        chosen: &str,
        selected: &[String],
    ) -> Result<&BulkAction<C>, BulkActionError> {
        if chosen.is_empty() {
            return Err(BulkActionError::NoActionSelected);
        }
        if selected.is_empty() {
            return Err(BulkActionError::NoRowsSelected);
        }
        self.find(chosen)
            .ok_or_else(|| BulkActionError::UnknownAction(chosen.to_string()))
    }

    /// Resolve and invoke in one step.
    pub fn run(&self, chosen: &str, selected: &[String], context: &C) -> Result<(), BulkActionError> {
        let action = self.resolve(chosen, selected)?;
        log::info!(
            "Running bulk action '{}' on {} row(s)",
            action.id,
            selected.len()
        );
        action.invoke(selected, context);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    fn actions() -> BulkActions<Recorder> {
        BulkActions::new(vec![
            BulkAction::new("export", "Export CSV", |ids: &[String], ctx: &Recorder| {
                ctx.calls
                    .borrow_mut()
                    .push(("export".to_string(), ids.to_vec()));
            }),
            BulkAction::new("void", "Void sales", |ids: &[String], ctx: &Recorder| {
                ctx.calls.borrow_mut().push(("void".to_string(), ids.to_vec()));
            }),
        ])
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn placeholder_choice_is_rejected() {
        let ctx = Recorder::default();
        let err = actions().run("", &ids(&["1"]), &ctx).unwrap_err();
        assert_eq!(err, BulkActionError::NoActionSelected);
        assert!(err.is_user_facing());
        assert!(ctx.calls.borrow().is_empty());
    }

    #[test]
    fn empty_selection_is_rejected() {
        let ctx = Recorder::default();
        let err = actions().run("export", &[], &ctx).unwrap_err();
        assert_eq!(err, BulkActionError::NoRowsSelected);
        assert!(ctx.calls.borrow().is_empty());
    }

    #[test]
    fn unknown_action_is_not_user_facing() {
        let ctx = Recorder::default();
        let err = actions().run("archive", &ids(&["1"]), &ctx).unwrap_err();
        assert_eq!(err, BulkActionError::UnknownAction("archive".to_string()));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn matching_callback_receives_selection_in_order() {
        let ctx = Recorder::default();
        actions().run("void", &ids(&["7", "3"]), &ctx).unwrap();
        assert_eq!(
            *ctx.calls.borrow(),
            vec![("void".to_string(), ids(&["7", "3"]))]
        );
    }

    #[test]
    fn spec_parses_from_data_attribute_json() {
        let specs: Vec<BulkActionSpec> =
            serde_json::from_str(r#"[{"id":"export","label":"Export CSV"}]"#).unwrap();
        let noop: BulkCallback<Recorder> = Rc::new(|_: &[String], _: &Recorder| {});
        let action = BulkAction::from_spec(&specs[0], noop);
        assert_eq!(action.id, "export");
        assert_eq!(action.label, "Export CSV");
    }
}
