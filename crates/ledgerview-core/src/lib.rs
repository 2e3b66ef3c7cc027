//! Transaction list view layer
//!
//! The `TransactionListController` shows one account's transactions,
//! runs account/transaction removal behind a confirmation prompt and keeps
//! sibling widgets in sync through a `RefreshBus`. Everything it talks to
//! is a port (see `ports`), so hosts can be a browser, a terminal or a test.

pub mod actions;
pub mod controller;
pub mod error;
pub mod format;
pub mod memory;
pub mod models;
pub mod ports;
pub mod state;
pub mod types;

pub use actions::{Action, ActionResolver, ClickTarget};
pub use controller::{
    ClickOutcome, ControllerBuilder, LoadOutcome, OpenReport, Removal, TransactionListController,
};
pub use error::{
    DefaultErrorLogger, DeletionTarget, ErrorCode, ErrorContext, ErrorDetails, ErrorLogger,
    ErrorSeverity, FailureCause, LoadTarget, ViewError, ViewResult,
};
pub use format::Formatter;
pub use memory::{FixtureAccount, LedgerFixture, MemoryGateway};
pub use models::{AccountSummary, GatewayResponse, OpenOptions, RenderedRow, TransactionRecord};
pub use ports::{
    AccountGateway, ConfirmationPort, FixedConfirmation, GatewayRef, MemorySurface, RefreshBus,
    SurfaceSnapshot, ViewSurface,
};
pub use state::ViewState;
pub use types::{AccountId, TransactionId, TransactionKind, UserId};
