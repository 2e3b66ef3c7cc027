//! Transaction list view controller
//!
//! Owns the `ViewState`, loads the open account's name and transactions
//! concurrently, renders them into its `ViewSurface` and runs the two
//! confirmation-guarded removal workflows.
//!
//! Every load is issued with a `Ticket`; a response whose ticket is no
//! longer current (a newer `open` or a `clear` happened meanwhile) is
//! dropped instead of rendered.

use ledgerview_config::{Config, PromptConfig};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::actions::{Action, ActionResolver, ClickTarget};
use crate::error::{
    DefaultErrorLogger, DeletionTarget, ErrorContext, ErrorLogger, FailureCause, LoadTarget,
    ViewError, ViewResult,
};
use crate::format::Formatter;
use crate::models::OpenOptions;
use crate::ports::{ConfirmationPort, GatewayRef, RefreshBus, ViewSurface};
use crate::state::{Ticket, ViewState};
use crate::types::{AccountId, TransactionId};

/// Result of one of the two loads issued by `open`
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No account was requested
    Skipped,
    Rendered,
    /// The view moved on before the response arrived
    Stale,
    Failed(ViewError),
}

/// What `open`/`refresh` did
#[derive(Debug, Clone, PartialEq)]
pub struct OpenReport {
    pub title: LoadOutcome,
    pub rows: LoadOutcome,
}

impl OpenReport {
    fn skipped() -> Self {
        Self {
            title: LoadOutcome::Skipped,
            rows: LoadOutcome::Skipped,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.title == LoadOutcome::Skipped && self.rows == LoadOutcome::Skipped
    }

    /// Load errors surfaced by this open, title first
    pub fn errors(&self) -> Vec<&ViewError> {
        [&self.title, &self.rows]
            .into_iter()
            .filter_map(|outcome| match outcome {
                LoadOutcome::Failed(error) => Some(error),
                _ => None,
            })
            .collect()
    }
}

/// Successful end states of a removal workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The user answered no
    Declined,
    /// No account is open
    NothingOpen,
    /// A different account was opened while the prompt was up
    Superseded,
    /// The same item is already being removed
    AlreadyPending,
    /// The transaction was already removed from the displayed account
    AlreadyRemoved,
}

/// What a click inside the container led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Handled { action: Action, removal: Removal },
}

pub struct TransactionListController {
    surface: Arc<dyn ViewSurface>,
    gateway: GatewayRef,
    confirmation: Arc<dyn ConfirmationPort>,
    bus: Arc<dyn RefreshBus>,
    logger: Arc<dyn ErrorLogger>,
    formatter: Formatter,
    resolver: ActionResolver,
    placeholder_title: String,
    prompts: PromptConfig,
    state: Mutex<ViewState>,
}

impl std::fmt::Debug for TransactionListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionListController")
            .field("state", &*self.lock_state())
            .field("placeholder_title", &self.placeholder_title)
            .finish_non_exhaustive()
    }
}

impl TransactionListController {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::default()
    }

    /// Account currently displayed, if any
    pub fn current_account(&self) -> Option<AccountId> {
        self.lock_state().account_id().cloned()
    }

    /// Display an account; empty options leave the view untouched
    pub async fn open(&self, options: OpenOptions) -> OpenReport {
        let Some(account_id) = options.account_id.clone() else {
            log::debug!("open called without an account; nothing to do");
            return OpenReport::skipped();
        };

        let ticket = {
            let mut state = self.lock_state();
            let ticket = state.open(options);
            self.surface.set_content("");
            ticket
        };
        log::debug!("opening account {}", account_id);

        let (title, rows) = tokio::join!(
            self.load_title(&account_id, ticket),
            self.load_rows(&account_id, ticket),
        );
        OpenReport { title, rows }
    }

    /// Re-open whatever is currently displayed
    pub async fn refresh(&self) -> OpenReport {
        let options = self.lock_state().options().clone();
        if options.is_empty() {
            return OpenReport::skipped();
        }
        self.open(options).await
    }

    /// Empty list, placeholder title, no account
    pub fn clear(&self) {
        let mut state = self.lock_state();
        self.clear_locked(&mut state);
    }

    /// Interpret a click inside the container
    pub async fn handle_click(&self, target: &ClickTarget) -> ViewResult<ClickOutcome> {
        match self.resolver.resolve(target) {
            Some(action) => self.dispatch(action).await,
            None => Ok(ClickOutcome::Ignored),
        }
    }

    /// Run the workflow for an already classified action
    pub async fn dispatch(&self, action: Action) -> ViewResult<ClickOutcome> {
        let removal = match &action {
            Action::RemoveAccount => self.remove_account().await?,
            Action::RemoveTransaction(id) => self.remove_transaction(id).await?,
        };
        Ok(ClickOutcome::Handled { action, removal })
    }

    /// Delete the open account after confirmation
    ///
    /// The view is cleared and sibling widgets notified only once the
    /// service confirms the removal.
    pub async fn remove_account(&self) -> ViewResult<Removal> {
        let Some(account_id) = self.current_account() else {
            log::debug!("remove account clicked with no account open");
            return Ok(Removal::NothingOpen);
        };

        if !self.confirmation.confirm(&self.prompts.remove_account).await {
            log::debug!("removal of account {} declined", account_id);
            return Ok(Removal::Declined);
        }

        {
            let mut state = self.lock_state();
            if state.account_id() != Some(&account_id) {
                self.logger.log_warning(
                    "account changed while the prompt was open",
                    &ErrorContext::new("remove_account").with_account(&account_id),
                );
                return Ok(Removal::Superseded);
            }
            if !state.begin_account_removal(&account_id) {
                return Ok(Removal::AlreadyPending);
            }
        }

        let result = self.gateway.remove_account(&account_id).await.into_ack();

        {
            let mut state = self.lock_state();
            state.finish_account_removal(&account_id);
            if result.is_ok() && state.account_id() == Some(&account_id) {
                self.clear_locked(&mut state);
            }
        }

        match result {
            Ok(()) => {
                log::info!("account {} removed", account_id);
                self.bus.notify_accounts_changed();
                self.bus.notify_forms_changed();
                Ok(Removal::Removed)
            }
            Err(cause) => Err(self.deletion_failed(
                DeletionTarget::Account(account_id.clone()),
                cause,
                ErrorContext::new("remove_account").with_account(&account_id),
            )),
        }
    }

    /// Delete one transaction after confirmation, then reload
    pub async fn remove_transaction(&self, id: &TransactionId) -> ViewResult<Removal> {
        if self.lock_state().is_transaction_removed(id) {
            log::debug!("transaction {} was already removed", id);
            return Ok(Removal::AlreadyRemoved);
        }

        if !self.confirmation.confirm(&self.prompts.remove_transaction).await {
            log::debug!("removal of transaction {} declined", id);
            return Ok(Removal::Declined);
        }

        if !self.lock_state().begin_transaction_removal(id) {
            log::debug!("transaction {} is already being removed", id);
            return Ok(Removal::AlreadyPending);
        }

        let result = self.gateway.remove_transaction(id).await.into_ack();
        self.lock_state().finish_transaction_removal(id, result.is_ok());

        match result {
            Ok(()) => {
                log::info!("transaction {} removed", id);
                self.bus.notify_accounts_changed();
                self.bus.notify_forms_changed();
                self.refresh().await;
                Ok(Removal::Removed)
            }
            Err(cause) => {
                let mut context = ErrorContext::new("remove_transaction").with_transaction(id);
                context.account_id = self.current_account();
                Err(self.deletion_failed(DeletionTarget::Transaction(id.clone()), cause, context))
            }
        }
    }

    async fn load_title(&self, account_id: &AccountId, ticket: Ticket) -> LoadOutcome {
        match self.gateway.get_account(account_id).await.into_result() {
            Ok(account) => self.render_if_current(ticket, |surface| surface.set_title(&account.name)),
            Err(cause) => self.load_failed(LoadTarget::AccountName, account_id, cause, ticket),
        }
    }

    async fn load_rows(&self, account_id: &AccountId, ticket: Ticket) -> LoadOutcome {
        match self.gateway.list_transactions(account_id).await.into_result() {
            Ok(records) => {
                let markup = self.formatter.render_rows(&records);
                self.render_if_current(ticket, |surface| surface.set_content(&markup))
            }
            Err(cause) => self.load_failed(LoadTarget::Transactions, account_id, cause, ticket),
        }
    }

    fn render_if_current(&self, ticket: Ticket, render: impl FnOnce(&dyn ViewSurface)) -> LoadOutcome {
        let state = self.lock_state();
        if !state.is_current(ticket) {
            log::debug!("discarding stale response");
            return LoadOutcome::Stale;
        }
        render(self.surface.as_ref());
        LoadOutcome::Rendered
    }

    fn load_failed(
        &self,
        target: LoadTarget,
        account_id: &AccountId,
        cause: FailureCause,
        ticket: Ticket,
    ) -> LoadOutcome {
        let context = ErrorContext::new(format!("load {}", target)).with_account(account_id);
        if !self.lock_state().is_current(ticket) {
            self.logger.log_warning("stale request failed", &context);
            return LoadOutcome::Stale;
        }
        let error = ViewError::Load {
            target,
            account_id: account_id.clone(),
            cause,
        };
        self.logger.log_error(&error, &context);
        LoadOutcome::Failed(error)
    }

    fn deletion_failed(&self, target: DeletionTarget, cause: FailureCause, context: ErrorContext) -> ViewError {
        let error = ViewError::Deletion { target, cause };
        self.logger.log_error(&error, &context);
        error
    }

    fn clear_locked(&self, state: &mut ViewState) {
        state.clear();
        self.surface.set_content("");
        self.surface.set_title(&self.placeholder_title);
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wires a controller to its collaborators
#[derive(Default)]
pub struct ControllerBuilder {
    root: Option<Arc<dyn ViewSurface>>,
    gateway: Option<GatewayRef>,
    confirmation: Option<Arc<dyn ConfirmationPort>>,
    bus: Option<Arc<dyn RefreshBus>>,
    logger: Option<Arc<dyn ErrorLogger>>,
    config: Config,
}

impl ControllerBuilder {
    pub fn root(mut self, surface: Arc<dyn ViewSurface>) -> Self {
        self.root = Some(surface);
        self
    }

    pub fn gateway(mut self, gateway: GatewayRef) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn confirmation(mut self, confirmation: Arc<dyn ConfirmationPort>) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    pub fn refresh_bus(mut self, bus: Arc<dyn RefreshBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ViewResult<TransactionListController> {
        let surface = self
            .root
            .ok_or_else(|| ViewError::initialization("root container is missing"))?;
        if !surface.is_mounted() {
            return Err(ViewError::initialization("root container is not mounted"));
        }
        let gateway = self
            .gateway
            .ok_or_else(|| ViewError::initialization("no account gateway configured"))?;
        let confirmation = self
            .confirmation
            .ok_or_else(|| ViewError::initialization("no confirmation port configured"))?;
        let bus = self
            .bus
            .ok_or_else(|| ViewError::initialization("no refresh bus configured"))?;
        self.config
            .validate()
            .map_err(|e| ViewError::initialization(e.to_string()))?;

        Ok(TransactionListController {
            surface,
            gateway,
            confirmation,
            bus,
            logger: self.logger.unwrap_or_else(|| Arc::new(DefaultErrorLogger)),
            formatter: Formatter::from_config(&self.config),
            resolver: ActionResolver::from_config(&self.config.view),
            placeholder_title: self.config.view.placeholder_title.clone(),
            prompts: self.config.prompts.clone(),
            state: Mutex::new(ViewState::new()),
        })
    }
}

// ==================== Tests ====================
