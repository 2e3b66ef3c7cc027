//! Click interpretation for the transaction list container
//!
//! Two entry points produce the same `Action`:
//! - `ActionResolver::resolve` inspects marker classes on the clicked
//!   element and, for transaction removal only, on its immediate parent
//! - `Action::from_tag` maps an explicit `(data-action, payload)` pair

use ledgerview_config::ViewConfig;
use std::collections::HashMap;

use crate::types::TransactionId;

pub const TAG_REMOVE_ACCOUNT: &str = "remove-account";
pub const TAG_REMOVE_TRANSACTION: &str = "remove-transaction";

/// Workflow requested by a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RemoveAccount,
    RemoveTransaction(TransactionId),
}

impl Action {
    pub fn from_tag(kind: &str, payload: Option<&str>) -> Option<Action> {
        match kind {
            TAG_REMOVE_ACCOUNT => Some(Action::RemoveAccount),
            TAG_REMOVE_TRANSACTION => payload
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| Action::RemoveTransaction(TransactionId::new(id))),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Action::RemoveAccount => TAG_REMOVE_ACCOUNT,
            Action::RemoveTransaction(_) => TAG_REMOVE_TRANSACTION,
        }
    }
}

/// What the host knows about a clicked element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,
    pub parent: Option<Box<ClickTarget>>,
}

impl ClickTarget {
    /// Element with the given `class` attribute value
    pub fn new(class_attr: &str) -> Self {
        Self {
            classes: class_attr.split_whitespace().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_parent(mut self, parent: ClickTarget) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Marker-class based classifier
#[derive(Debug, Clone)]
pub struct ActionResolver {
    remove_account_class: String,
    remove_transaction_class: String,
    id_attribute: String,
}

impl Default for ActionResolver {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl ActionResolver {
    pub fn from_config(view: &ViewConfig) -> Self {
        Self {
            remove_account_class: view.remove_account_class.clone(),
            remove_transaction_class: view.remove_transaction_class.clone(),
            id_attribute: view.id_attribute.clone(),
        }
    }

    /// Precedence: account marker on the target, transaction marker on the
    /// target, transaction marker on the parent. Account removal never
    /// looks at the parent.
    pub fn resolve(&self, target: &ClickTarget) -> Option<Action> {
        if target.has_class(&self.remove_account_class) {
            return Some(Action::RemoveAccount);
        }

        if target.has_class(&self.remove_transaction_class) {
            return self.transaction_action(target);
        }

        match target.parent.as_deref() {
            Some(parent) if parent.has_class(&self.remove_transaction_class) => {
                self.transaction_action(parent)
            }
            _ => None,
        }
    }

    fn transaction_action(&self, element: &ClickTarget) -> Option<Action> {
        let action = Action::from_tag(TAG_REMOVE_TRANSACTION, element.attribute(&self.id_attribute));
        if action.is_none() {
            log::debug!("remove control without {} ignored", self.id_attribute);
        }
        action
    }
}
