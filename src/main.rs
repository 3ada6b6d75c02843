//! Cart Store CLI

use std::{io, path::PathBuf, process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use thiserror::Error;

use cart_store::{
    config::CartConfig,
    errors::CartError,
    items::{CartItem, ProductInfo},
    observability::{self, LoggingConfig, ObservabilityError},
    provider::CartProvider,
    storage::FileStore,
    summary::{self, SummaryError},
};

#[derive(Debug, Parser)]
#[command(name = "cart-store", about = "Local shopping cart", long_about = None)]
struct Cli {
    /// Directory the cart is persisted in
    #[arg(long, env = "CART_DATA_DIR", default_value = ".cart", global = true)]
    data_dir: PathBuf,

    /// Currency used to display prices
    #[arg(long, env = "CART_CURRENCY", default_value = "USD", global = true)]
    currency: String,

    #[command(flatten)]
    cart: CartConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add a product, or increment it if already in the cart
    Add(AddArgs),

    /// Increase a product's quantity by one
    Increment {
        /// Product id
        id: String,
    },

    /// Decrease a product's quantity by one
    Decrement {
        /// Product id
        id: String,
    },

    /// Remove every item
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    #[arg(long)]
    id: String,

    /// Display name
    #[arg(long)]
    title: String,

    /// Display image reference
    #[arg(long, default_value = "")]
    image_url: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,
}

impl From<AddArgs> for ProductInfo {
    fn from(args: AddArgs) -> Self {
        ProductInfo::new(args.id, args.title, args.image_url, args.price)
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Observability(#[from] ObservabilityError),
}

#[tokio::main]
pub async fn main() {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(cli_error) = run(cli).await {
        #[expect(
            clippy::print_stderr,
            clippy::exit,
            reason = "errors are reported on stderr with a non-zero exit status"
        )]
        {
            eprintln!("{cli_error}");
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    observability::init_subscriber(&cli.logging)?;

    let currency = summary::find_currency(&cli.currency)?;
    let storage = Arc::new(FileStore::new(cli.data_dir));

    let mut provider = CartProvider::new(storage, cli.cart);
    provider.mount().await?;

    let result = apply(&provider, cli.command).await;

    provider.unmount().await;

    summary::write_to(io::stdout().lock(), &result?, currency)?;

    Ok(())
}

async fn apply(provider: &CartProvider, command: Commands) -> Result<Vec<CartItem>, CartError> {
    let cart = provider.cart()?;

    match command {
        Commands::Show => Ok(cart.products()),
        Commands::Add(args) => cart.add_to_cart(args.into()).await,
        Commands::Increment { id } => cart.increment(id).await,
        Commands::Decrement { id } => cart.decrement(id).await,
        Commands::Clear => cart.clear().await,
    }
}
