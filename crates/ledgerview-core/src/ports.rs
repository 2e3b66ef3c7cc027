//! Collaborators the controller talks to
//!
//! - `AccountGateway`: asynchronous account/transaction service
//! - `ConfirmationPort`: yes/no prompt, blocking or not
//! - `RefreshBus`: re-synchronizes sibling widgets after a mutation
//! - `ViewSurface`: the root container the list renders into

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::{AccountSummary, GatewayResponse, TransactionRecord};
use crate::types::{AccountId, TransactionId, UserId};

/// Gateway reference type
pub type GatewayRef = Arc<dyn AccountGateway>;

/// Account and transaction service
///
/// Transport failures must be folded into a `success: false` response.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn get_account(&self, id: &AccountId) -> GatewayResponse<AccountSummary>;

    /// Transactions of one account, in display order
    async fn list_transactions(&self, account_id: &AccountId) -> GatewayResponse<Vec<TransactionRecord>>;

    async fn remove_account(&self, id: &AccountId) -> GatewayResponse<()>;

    async fn remove_transaction(&self, id: &TransactionId) -> GatewayResponse<()>;

    /// Accounts owned by a user (account pickers, balance widget)
    async fn list_accounts(&self, user_id: &UserId) -> GatewayResponse<Vec<AccountSummary>>;
}

/// Yes/no prompt shown before destructive actions
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt the same way; for headless hosts
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub bool);

#[async_trait]
impl ConfirmationPort for FixedConfirmation {
    async fn confirm(&self, message: &str) -> bool {
        log::debug!("auto-answering {:?} with {}", message, self.0);
        self.0
    }
}

/// Application-wide notifier for widgets outside the transaction list
pub trait RefreshBus: Send + Sync {
    /// Account list and balances must re-fetch
    fn notify_accounts_changed(&self);
    /// Account pickers in the creation forms must re-fetch
    fn notify_forms_changed(&self);
}

/// The root container: a title element plus a content region for rows
pub trait ViewSurface: Send + Sync {
    /// Whether the container exists in the host document
    fn is_mounted(&self) -> bool {
        true
    }

    fn set_title(&self, text: &str);

    /// Replace the whole content region
    fn set_content(&self, markup: &str);
}

/// Snapshot of what a `MemorySurface` currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub title: String,
    pub content: String,
    /// Number of `set_title`/`set_content` calls so far
    pub writes: usize,
}

/// In-memory surface; hosts render from it, tests assert on it
#[derive(Debug, Default)]
pub struct MemorySurface {
    inner: Mutex<SurfaceSnapshot>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface pre-filled with some content, as a host page would be
    pub fn with_content(title: &str, content: &str) -> Self {
        Self {
            inner: Mutex::new(SurfaceSnapshot {
                title: title.to_string(),
                content: content.to_string(),
                writes: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ViewSurface for MemorySurface {
    fn set_title(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.title = text.to_string();
        inner.writes += 1;
    }

    fn set_content(&self, markup: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.content = markup.to_string();
        inner.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_records_writes() {
        let surface = MemorySurface::with_content("Old", "<div>row</div>");
        assert_eq!(surface.snapshot().writes, 0);

        surface.set_title("Cash");
        surface.set_content("");
        let snapshot = surface.snapshot();
        assert_eq!(snapshot.title, "Cash");
        assert_eq!(snapshot.content, "");
        assert_eq!(snapshot.writes, 2);
        assert!(surface.is_mounted());
    }
}
