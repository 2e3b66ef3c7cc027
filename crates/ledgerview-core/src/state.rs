//! The controller's memory of which account is displayed

use std::collections::HashSet;

use crate::models::OpenOptions;
use crate::types::{AccountId, TransactionId};

/// Snapshot taken when a request is issued; the response may only render
/// while the state still carries the same generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct ViewState {
    options: OpenOptions,
    generation: u64,
    removing_account: Option<AccountId>,
    removing_transactions: HashSet<TransactionId>,
    /// Transactions removed from the displayed account; reset when the account changes
    removed_transactions: HashSet<TransactionId>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.options.account_id.as_ref()
    }

    pub fn options(&self) -> &OpenOptions {
        &self.options
    }

    /// Display `options` and invalidate every outstanding ticket
    pub fn open(&mut self, options: OpenOptions) -> Ticket {
        if options.account_id != self.options.account_id {
            self.removed_transactions.clear();
        }
        self.options = options;
        self.bump()
    }

    /// Forget the account and invalidate every outstanding ticket
    pub fn clear(&mut self) -> Ticket {
        self.options = OpenOptions::default();
        self.removed_transactions.clear();
        self.bump()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation == ticket.0
    }

    /// False if a removal of this account is already in flight
    pub fn begin_account_removal(&mut self, id: &AccountId) -> bool {
        if self.removing_account.as_ref() == Some(id) {
            return false;
        }
        self.removing_account = Some(id.clone());
        true
    }

    pub fn finish_account_removal(&mut self, id: &AccountId) {
        if self.removing_account.as_ref() == Some(id) {
            self.removing_account = None;
        }
    }

    /// False if a removal of this transaction is already in flight
    pub fn begin_transaction_removal(&mut self, id: &TransactionId) -> bool {
        self.removing_transactions.insert(id.clone())
    }

    /// Ends the in-flight entry; a successful removal is remembered
    pub fn finish_transaction_removal(&mut self, id: &TransactionId, removed: bool) {
        self.removing_transactions.remove(id);
        if removed {
            self.removed_transactions.insert(id.clone());
        }
    }

    pub fn is_transaction_removed(&self, id: &TransactionId) -> bool {
        self.removed_transactions.contains(id)
    }

    fn bump(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_clear() {
        let mut state = ViewState::new();
        assert!(state.account_id().is_none());

        state.open(OpenOptions::account("1"));
        assert_eq!(state.account_id(), Some(&AccountId::new("1")));

        state.clear();
        assert!(state.account_id().is_none());
        assert!(state.options().is_empty());
    }

    #[test]
    fn test_tickets_go_stale() {
        let mut state = ViewState::new();
        let first = state.open(OpenOptions::account("1"));
        assert!(state.is_current(first));

        let second = state.open(OpenOptions::account("1"));
        assert!(!state.is_current(first));
        assert!(state.is_current(second));

        state.clear();
        assert!(!state.is_current(second));
    }

    #[test]
    fn test_removal_bookkeeping() {
        let mut state = ViewState::new();
        let account = AccountId::new("1");
        assert!(state.begin_account_removal(&account));
        assert!(!state.begin_account_removal(&account));
        state.finish_account_removal(&account);
        assert!(state.begin_account_removal(&account));

        let tx = TransactionId::new("9");
        assert!(state.begin_transaction_removal(&tx));
        assert!(!state.begin_transaction_removal(&tx));
        assert!(state.begin_transaction_removal(&TransactionId::new("10")));
        state.finish_transaction_removal(&tx, false);
        assert!(state.begin_transaction_removal(&tx));
    }

    #[test]
    fn test_removed_transactions_survive_refresh_only() {
        let mut state = ViewState::new();
        let tx = TransactionId::new("9");
        state.open(OpenOptions::account("1"));
        state.begin_transaction_removal(&tx);
        state.finish_transaction_removal(&tx, true);
        assert!(state.is_transaction_removed(&tx));

        // reopening the same account keeps the record
        state.open(OpenOptions::account("1"));
        assert!(state.is_transaction_removed(&tx));

        state.open(OpenOptions::account("2"));
        assert!(!state.is_transaction_removed(&tx));

        state.finish_transaction_removal(&tx, true);
        state.clear();
        assert!(!state.is_transaction_removed(&tx));
    }
}
