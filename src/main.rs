use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use stockfolio::cli::validate::{parse_price_override, parse_symbol};
use stockfolio::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Override a price for this run, e.g. --price AAPL=175.5
    #[arg(long = "price", value_name = "SYMBOL=PRICE", global = true, value_parser = parse_price_override)]
    prices: Vec<(String, f64)>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List all holdings
    List,
    /// Show a single holding
    Show {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
    },
    /// Add a new holding
    Create {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Replace the quantity of a holding
    Update {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a holding
    Delete {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
    },
    /// Buy shares, creating the holding if needed
    Buy {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Sell shares, removing the holding when none remain
    Sell {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Current value of a single holding
    Investment {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
    },
    /// List holdings by descending value
    Ranked,
    /// Display total portfolio value
    TotalValue,
    /// Display average price per share
    AveragePrice,
    /// Display portfolio summary
    Summary,
    /// Display the highest-value holding
    Highest,
    /// Display the current price of a symbol
    Price {
        #[arg(value_parser = parse_symbol)]
        symbol: String,
    },
}

impl From<Commands> for stockfolio::AppCommand {
    fn from(cmd: Commands) -> stockfolio::AppCommand {
        use stockfolio::AppCommand;
        match cmd {
            Commands::List => AppCommand::List,
            Commands::Show { symbol } => AppCommand::Show { symbol },
            Commands::Create { symbol, quantity } => AppCommand::Create { symbol, quantity },
            Commands::Update { symbol, quantity } => AppCommand::Update { symbol, quantity },
            Commands::Delete { symbol } => AppCommand::Delete { symbol },
            Commands::Buy { symbol, quantity } => AppCommand::Buy { symbol, quantity },
            Commands::Sell { symbol, quantity } => AppCommand::Sell { symbol, quantity },
            Commands::Investment { symbol } => AppCommand::Investment { symbol },
            Commands::Ranked => AppCommand::Ranked,
            Commands::TotalValue => AppCommand::TotalValue,
            Commands::AveragePrice => AppCommand::AveragePrice,
            Commands::Summary => AppCommand::Summary,
            Commands::Highest => AppCommand::Highest,
            Commands::Price { symbol } => AppCommand::Price { symbol },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = stockfolio::RunOptions {
        config_path: cli.config_path,
        json: cli.json,
        price_overrides: cli.prices,
    };

    let result = match cli.command {
        Some(Commands::Setup) => stockfolio::cli::setup::setup(),
        Some(cmd) => stockfolio::run_command(cmd.into(), &options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
