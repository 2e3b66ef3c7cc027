//! Ledgerview main entry point
//!
//! Runs the transaction list view in a terminal against a JSON fixture.

mod host;

use anyhow::Context;
use clap::{Parser, Subcommand};
use host::{SharedInput, StdinConfirmation, TerminalSurface, WidgetBus};
use ledgerview_config::{Config, ViewConfig};
use ledgerview_core::{
    ClickOutcome, ClickTarget, ConfirmationPort, GatewayRef, MemoryGateway, OpenOptions,
    TransactionListController, UserId,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.json");

#[derive(Parser, Debug)]
#[command(name = "ledgerview")]
#[command(version = "0.1.0")]
#[command(about = "Transaction list view for a personal finance tracker", long_about = None)]
struct Args {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON fixture with accounts and transactions
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// User whose accounts are listed
    #[arg(short, long, default_value = "demo")]
    user: String,

    /// Account to open on start
    #[arg(short, long)]
    open: Option<String>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// One line typed at the prompt
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display an account
    Open { account_id: String },
    /// Reload the displayed account
    Refresh,
    /// Close the displayed account
    Clear,
    /// Click the "remove account" control
    RemoveAccount,
    /// Click the trash icon of a transaction
    Remove { transaction_id: String },
    /// Print the account list
    Accounts,
    /// Print the transaction list
    Show,
    Quit,
}

/// The "remove account" control as configured
fn remove_account_target(view: &ViewConfig) -> ClickTarget {
    ClickTarget::new(&format!("btn btn-danger {}", view.remove_account_class))
}

/// The trash icon nested in a transaction's remove button
fn remove_transaction_target(view: &ViewConfig, transaction_id: &str) -> ClickTarget {
    ClickTarget::new("fa fa-trash").with_parent(
        ClickTarget::new(&format!("btn btn-danger {}", view.remove_transaction_class))
            .with_attribute(&view.id_attribute, transaction_id),
    )
}

struct App {
    controller: TransactionListController,
    surface: Arc<TerminalSurface>,
    bus: Arc<WidgetBus>,
    gateway: GatewayRef,
    view: ViewConfig,
    user: UserId,
}

impl App {
    fn new(
        config: Config,
        gateway: GatewayRef,
        confirmation: Arc<dyn ConfirmationPort>,
        user: UserId,
    ) -> anyhow::Result<Self> {
        let surface = Arc::new(TerminalSurface::default());
        let bus = Arc::new(WidgetBus::default());
        let view = config.view.clone();
        let controller = TransactionListController::builder()
            .root(surface.clone())
            .gateway(gateway.clone())
            .confirmation(confirmation)
            .refresh_bus(bus.clone())
            .config(config)
            .build()
            .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

        Ok(Self {
            controller,
            surface,
            bus,
            gateway,
            view,
            user,
        })
    }

    /// Returns false when the session should end
    async fn run(&self, command: Command) -> bool {
        match command {
            Command::Open { account_id } => {
                let report = self.controller.open(OpenOptions::account(account_id)).await;
                for error in report.errors() {
                    eprintln!("{}", error.to_details());
                }
                println!("{}", self.surface.render());
            }
            Command::Refresh => {
                let report = self.controller.refresh().await;
                if report.is_skipped() {
                    println!("No account open.");
                }
                for error in report.errors() {
                    eprintln!("{}", error.to_details());
                }
                println!("{}", self.surface.render());
            }
            Command::Clear => {
                self.controller.clear();
                println!("{}", self.surface.render());
            }
            Command::RemoveAccount => {
                self.click(remove_account_target(&self.view)).await;
            }
            Command::Remove { transaction_id } => {
                self.click(remove_transaction_target(&self.view, &transaction_id)).await;
            }
            Command::Accounts => {
                println!("{}", host::render_accounts_widget(&self.gateway, &self.user).await);
            }
            Command::Show => println!("{}", self.surface.render()),
            Command::Quit => return false,
        }
        self.redraw_siblings().await;
        true
    }

    async fn click(&self, target: ClickTarget) {
        match self.controller.handle_click(&target).await {
            Ok(ClickOutcome::Handled { action, removal }) => {
                println!("{}: {:?}", action.tag(), removal);
                println!("{}", self.surface.render());
            }
            Ok(ClickOutcome::Ignored) => println!("Nothing to do."),
            Err(error) => eprintln!("{}", error.to_details()),
        }
    }

    async fn redraw_siblings(&self) {
        if self.bus.take_accounts_dirty() {
            println!("{}", host::render_accounts_widget(&self.gateway, &self.user).await);
        }
        if self.bus.take_forms_dirty() {
            let options = host::render_account_options(&self.gateway, &self.user).await;
            log::info!("account pickers refreshed: {}", options);
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path.clone()).map_err(|e| {
            anyhow::anyhow!("failed to load configuration from {}: {}", path.display(), e.to_details())
        }),
        None => Ok(Config::default()),
    }
}

fn load_gateway(path: Option<PathBuf>) -> anyhow::Result<MemoryGateway> {
    let content = match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?,
        None => DEMO_FIXTURE.to_string(),
    };
    MemoryGateway::from_json(&content).context("invalid fixture")
}

async fn session(args: Args, config: Config, input: SharedInput) -> anyhow::Result<()> {
    let gateway: GatewayRef = Arc::new(load_gateway(args.fixture)?);
    log::info!("fixture loaded");

    let app = App::new(
        config,
        gateway,
        Arc::new(StdinConfirmation::new(input.clone())),
        UserId::new(args.user),
    )?;

    app.run(Command::Accounts).await;
    if let Some(account_id) = args.open {
        app.run(Command::Open { account_id }).await;
    }

    println!("Commands: open <id>, refresh, clear, remove-account, remove <id>, accounts, show, quit");
    while let Some(line) = host::read_line(&input).await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        match CommandLine::try_parse_from(words) {
            Ok(parsed) => {
                if !app.run(parsed.command).await {
                    break;
                }
            }
            Err(e) => eprintln!("{}", e.render()),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(args.config.clone())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.to_lowercase()),
    )
    .init();
    log::info!("language={}, currency={}", config.locale.language, config.currency.symbol);

    let rt = Runtime::new()?;
    rt.block_on(async { session(args, config, host::stdin_lines()).await })
}
