pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{HoldingService, PortfolioService, PriceProvider};
use crate::providers::SimulatedPriceProvider;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    List,
    Show { symbol: String },
    Create { symbol: String, quantity: u32 },
    Update { symbol: String, quantity: u32 },
    Delete { symbol: String },
    Buy { symbol: String, quantity: u32 },
    Sell { symbol: String, quantity: u32 },
    Investment { symbol: String },
    Ranked,
    TotalValue,
    AveragePrice,
    Summary,
    Highest,
    Price { symbol: String },
}

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub json: bool,
    pub price_overrides: Vec<(String, f64)>,
}

/// Services wired for one process run.
#[derive(Clone)]
pub struct App {
    pub holdings: HoldingService,
    pub portfolio: PortfolioService,
    pub prices: Arc<dyn PriceProvider>,
}

impl App {
    /// Opens the configured store and creates the price source, then applies
    /// any price overrides.
    pub async fn init(config: &AppConfig, price_overrides: &[(String, f64)]) -> Result<Self> {
        let store = store::open_store(config)?;
        let prices: Arc<dyn PriceProvider> = Arc::new(SimulatedPriceProvider::new(&config.pricing));

        for (symbol, price) in price_overrides {
            prices
                .update_price(symbol, *price)
                .await
                .with_context(|| format!("Failed to apply price override for {symbol}"))?;
        }

        Ok(Self {
            holdings: HoldingService::new(Arc::clone(&store), Arc::clone(&prices)),
            portfolio: PortfolioService::new(store, Arc::clone(&prices)),
            prices,
        })
    }
}

/// Runs `command` against `app` and returns the rendered output.
pub async fn execute(app: &App, command: AppCommand, json: bool) -> Result<String> {
    debug!("Executing {command:?}");
    match command {
        AppCommand::List => cli::holdings::list(app, json).await,
        AppCommand::Show { symbol } => cli::holdings::show(app, &symbol, json).await,
        AppCommand::Create { symbol, quantity } => {
            cli::holdings::create(app, &symbol, quantity, json).await
        }
        AppCommand::Update { symbol, quantity } => {
            cli::holdings::update(app, &symbol, quantity, json).await
        }
        AppCommand::Delete { symbol } => cli::holdings::delete(app, &symbol, json).await,
        AppCommand::Buy { symbol, quantity } => {
            cli::holdings::buy(app, &symbol, quantity, json).await
        }
        AppCommand::Sell { symbol, quantity } => {
            cli::holdings::sell(app, &symbol, quantity, json).await
        }
        AppCommand::Investment { symbol } => cli::holdings::investment(app, &symbol, json).await,
        AppCommand::Ranked => cli::portfolio::ranked(app, json).await,
        AppCommand::TotalValue => cli::portfolio::total_value(app, json).await,
        AppCommand::AveragePrice => cli::portfolio::average_price(app, json).await,
        AppCommand::Summary => cli::portfolio::summary(app, json).await,
        AppCommand::Highest => cli::portfolio::highest(app, json).await,
        AppCommand::Price { symbol } => cli::portfolio::price(app, &symbol, json).await,
    }
}

pub async fn run_command(command: AppCommand, options: &RunOptions) -> Result<()> {
    info!("Stockfolio starting...");

    let config = match options.config_path.as_deref() {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let app = App::init(&config, &options.price_overrides).await?;
    let output = execute(&app, command, options.json).await?;
    println!("{output}");
    Ok(())
}
