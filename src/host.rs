//! Terminal host: adapters that stand in for the browser page

use async_trait::async_trait;
use ledgerview_core::{
    ConfirmationPort, GatewayRef, MemorySurface, RefreshBus, UserId, ViewSurface,
};
use ledgerview_utils::escape_html;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Line reader shared by the command loop and the confirmation prompt
pub type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn stdin_lines() -> SharedInput {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Reads the next line from the shared input
pub async fn read_line(input: &SharedInput) -> std::io::Result<Option<String>> {
    input.lock().await.next_line().await
}

/// Asks on stdout, answers from stdin; anything but y/yes is a no
pub struct StdinConfirmation {
    input: SharedInput,
}

impl StdinConfirmation {
    pub fn new(input: SharedInput) -> Self {
        Self { input }
    }
}

#[async_trait]
impl ConfirmationPort for StdinConfirmation {
    async fn confirm(&self, message: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        let prompt = format!("{} [y/N] ", message);
        if stdout.write_all(prompt.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            return false;
        }
        match read_line(&self.input).await {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                log::warn!("failed to read confirmation: {}", e);
                false
            }
        }
    }
}

/// The transaction list container, printed on demand
#[derive(Default)]
pub struct TerminalSurface {
    inner: MemorySurface,
}

impl TerminalSurface {
    pub fn render(&self) -> String {
        let snapshot = self.inner.snapshot();
        let content = if snapshot.content.is_empty() {
            "(no transactions)".to_string()
        } else {
            snapshot.content
        };
        format!("=== {} ===\n{}", snapshot.title, content)
    }
}

impl ViewSurface for TerminalSurface {
    fn set_title(&self, text: &str) {
        log::debug!("title <- {:?}", text);
        self.inner.set_title(text);
    }

    fn set_content(&self, markup: &str) {
        log::debug!("content <- {} bytes", markup.len());
        self.inner.set_content(markup);
    }
}

/// Marks sibling widgets dirty; the command loop redraws them
#[derive(Default)]
pub struct WidgetBus {
    accounts_dirty: AtomicBool,
    forms_dirty: AtomicBool,
}

impl WidgetBus {
    pub fn take_accounts_dirty(&self) -> bool {
        self.accounts_dirty.swap(false, Ordering::SeqCst)
    }

    pub fn take_forms_dirty(&self) -> bool {
        self.forms_dirty.swap(false, Ordering::SeqCst)
    }
}

impl RefreshBus for WidgetBus {
    fn notify_accounts_changed(&self) {
        self.accounts_dirty.store(true, Ordering::SeqCst);
    }

    fn notify_forms_changed(&self) {
        self.forms_dirty.store(true, Ordering::SeqCst);
    }
}

/// Account list shown beside the transaction list
pub async fn render_accounts_widget(gateway: &GatewayRef, user: &UserId) -> String {
    match gateway.list_accounts(user).await.into_result() {
        Ok(accounts) if accounts.is_empty() => "Accounts: (none)".to_string(),
        Ok(accounts) => {
            let names: Vec<String> = accounts
                .iter()
                .map(|a| format!("[{}] {}", a.id, a.name))
                .collect();
            format!("Accounts: {}", names.join(", "))
        }
        Err(cause) => format!("Accounts: unavailable ({})", cause),
    }
}

/// Account picker of the income/expense creation forms
pub async fn render_account_options(gateway: &GatewayRef, user: &UserId) -> String {
    match gateway.list_accounts(user).await.into_result() {
        Ok(accounts) => accounts
            .iter()
            .map(|a| {
                format!(
                    r#"<option value="{}">{}</option>"#,
                    escape_html(a.id.as_str()),
                    escape_html(&a.name)
                )
            })
            .collect::<Vec<_>>()
            .join(""),
        Err(cause) => {
            log::warn!("account picker not refreshed: {}", cause);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerview_core::MemoryGateway;

    fn gateway() -> GatewayRef {
        Arc::new(MemoryGateway::from_json(include_str!("../fixtures/demo.json")).unwrap())
    }

    #[test]
    fn test_widget_bus_flags() {
        let bus = WidgetBus::default();
        assert!(!bus.take_accounts_dirty());
        bus.notify_accounts_changed();
        bus.notify_forms_changed();
        assert!(bus.take_accounts_dirty());
        assert!(!bus.take_accounts_dirty());
        assert!(bus.take_forms_dirty());
    }

    #[test]
    fn test_terminal_surface_render() {
        let surface = TerminalSurface::default();
        surface.set_title("Cash");
        assert_eq!(surface.render(), "=== Cash ===\n(no transactions)");
    }

    #[tokio::test]
    async fn test_accounts_widget() {
        let text = render_accounts_widget(&gateway(), &UserId::new("demo")).await;
        assert_eq!(text, "Accounts: [1] Cash, [2] Savings, [3] Travel fund");
    }

    #[tokio::test]
    async fn test_account_options() {
        let options = render_account_options(&gateway(), &UserId::new("demo")).await;
        assert!(options.starts_with(r#"<option value="1">Cash</option>"#));
        assert_eq!(options.matches("<option").count(), 3);
    }
}
