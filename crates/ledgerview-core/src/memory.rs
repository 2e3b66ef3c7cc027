//! Fixture-backed gateway kept entirely in memory

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{AccountSummary, GatewayResponse, TransactionRecord};
use crate::ports::AccountGateway;
use crate::types::{AccountId, TransactionId, UserId};

/// One account with its transactions, as stored in a fixture file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureAccount {
    pub id: AccountId,
    pub name: String,
    /// Owner; accounts without one are visible to every user
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// Top-level fixture document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFixture {
    #[serde(default)]
    pub accounts: Vec<FixtureAccount>,
}

#[derive(Debug, Default)]
pub struct MemoryGateway {
    accounts: RwLock<Vec<FixtureAccount>>,
}

impl MemoryGateway {
    pub fn new(fixture: LedgerFixture) -> Self {
        Self {
            accounts: RwLock::new(fixture.accounts),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let fixture: LedgerFixture = serde_json::from_str(content)?;
        Ok(Self::new(fixture))
    }

    pub fn account_count(&self) -> usize {
        self.read().len()
    }

    pub fn transaction_count(&self, account_id: &AccountId) -> Option<usize> {
        self.read()
            .iter()
            .find(|a| &a.id == account_id)
            .map(|a| a.transactions.len())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<FixtureAccount>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<FixtureAccount>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountGateway for MemoryGateway {
    async fn get_account(&self, id: &AccountId) -> GatewayResponse<AccountSummary> {
        match self.read().iter().find(|a| &a.id == id) {
            Some(account) => GatewayResponse::ok(AccountSummary {
                id: account.id.clone(),
                name: account.name.clone(),
            }),
            None => GatewayResponse::failure(format!("Account not found: {}", id)),
        }
    }

    async fn list_transactions(&self, account_id: &AccountId) -> GatewayResponse<Vec<TransactionRecord>> {
        match self.read().iter().find(|a| &a.id == account_id) {
            Some(account) => GatewayResponse::ok(account.transactions.clone()),
            None => GatewayResponse::failure(format!("Account not found: {}", account_id)),
        }
    }

    async fn remove_account(&self, id: &AccountId) -> GatewayResponse<()> {
        let mut accounts = self.write();
        let before = accounts.len();
        accounts.retain(|a| &a.id != id);
        if accounts.len() < before {
            log::debug!("removed account {}", id);
            GatewayResponse::ack()
        } else {
            GatewayResponse::failure(format!("Account not found: {}", id))
        }
    }

    async fn remove_transaction(&self, id: &TransactionId) -> GatewayResponse<()> {
        let mut accounts = self.write();
        for account in accounts.iter_mut() {
            if let Some(pos) = account.transactions.iter().position(|t| &t.id == id) {
                account.transactions.remove(pos);
                log::debug!("removed transaction {} from account {}", id, account.id);
                return GatewayResponse::ack();
            }
        }
        GatewayResponse::failure(format!("Transaction not found: {}", id))
    }

    async fn list_accounts(&self, user_id: &UserId) -> GatewayResponse<Vec<AccountSummary>> {
        let accounts = self
            .read()
            .iter()
            .filter(|a| a.user_id.as_ref().map_or(true, |owner| owner == user_id))
            .map(|a| AccountSummary {
                id: a.id.clone(),
                name: a.name.clone(),
            })
            .collect();
        GatewayResponse::ok(accounts)
    }
}
