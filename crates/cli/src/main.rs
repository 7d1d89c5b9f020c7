//! Hoodie Store CLI - browse, shop and manage orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! hoodie-cli products list --category Premium --sort price-low
//!
//! # Fill the cart and check out
//! hoodie-cli auth login -e nadia@example.ma -p secret
//! hoodie-cli cart add 1 --size M --color Noir --quantity 2
//! hoodie-cli checkout --name Nadia --email nadia@example.ma --phone "+212 600 000000" \
//!     --address "12 Rue Atlas" --city Rabat
//!
//! # Manage orders as an admin
//! hoodie-cli auth login -e admin@hoodies.com -p admin123
//! hoodie-cli orders status <order-id> shipped
//! hoodie-cli admin stats
//! ```
//!
//! # Commands
//!
//! - `products` - List and inspect catalog products
//! - `cart` - Edit the cart
//! - `auth` - Sign in, register, sign out
//! - `checkout` - Place an order from the cart
//! - `orders` - List orders, change status, contact customers
//! - `admin` - Dashboard figures and admin accounts
//!
//! State lives under `HOODIE_DATA_DIR` (or `--data-dir`) and carries over
//! between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use hoodie_store_storefront::config::StoreConfig;
use hoodie_store_storefront::state::Storefront;

mod commands;

const DEFAULT_LOG_FILTER: &str = "hoodie_store_storefront=info,hoodie_cli=info";

#[derive(Parser)]
#[command(name = "hoodie-cli")]
#[command(author, version, about = "Hoodie Store command-line storefront")]
struct Cli {
    /// Directory holding cart, session and orders (overrides `HOODIE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in and out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Place an order from the cart
    Checkout(commands::orders::CheckoutArgs),
    /// List and manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Admin dashboard and accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only show this category (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`featured`, `price-low`, `price-high`, `name`)
        #[arg(short, long, default_value = "featured")]
        sort: String,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product variant
    Add {
        /// Product ID
        id: String,
        #[arg(short, long)]
        size: String,
        #[arg(short, long)]
        color: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,
        #[arg(short, long)]
        size: String,
        #[arg(short, long)]
        color: String,
    },
    /// Set a line's quantity (zero or less removes it)
    Set {
        /// Product ID
        id: String,
        #[arg(short, long)]
        size: String,
        #[arg(short, long)]
        color: String,
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show the cart and its totals
    Show,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create a customer account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders (every order for admins)
    List,
    /// Change an order's status (admin)
    Status {
        /// Order ID
        id: String,
        /// New status (`pending`, `confirmed`, `shipped`, `delivered`)
        status: String,
    },
    /// Print a WhatsApp link to contact an order's customer (admin)
    Contact {
        /// Order ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show dashboard figures
    Stats,
    /// Create an admin account (password mode only)
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let mut store = Storefront::open(config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { category, sort } => {
                commands::products::list(&store, category.as_deref(), &sort)?;
            }
            ProductsAction::Show { id } => commands::products::show(&store, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                size,
                color,
                quantity,
            } => commands::cart::add(&mut store, &id, &size, &color, quantity)?,
            CartAction::Remove { id, size, color } => {
                commands::cart::remove(&mut store, &id, &size, &color);
            }
            CartAction::Set {
                id,
                size,
                color,
                quantity,
            } => commands::cart::set(&mut store, &id, &size, &color, quantity)?,
            CartAction::Clear => commands::cart::clear(&mut store),
            CartAction::Show => commands::cart::show(&store),
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut store, &email, &password)?;
            }
            AuthAction::Register {
                email,
                password,
                name,
            } => commands::auth::register(&mut store, &email, &password, &name)?,
            AuthAction::Logout => commands::auth::logout(&mut store),
            AuthAction::Whoami => commands::auth::whoami(&store),
        },
        Commands::Checkout(args) => commands::orders::checkout(&mut store, args)?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&store)?,
            OrdersAction::Status { id, status } => {
                commands::orders::set_status(&mut store, &id, &status)?;
            }
            OrdersAction::Contact { id } => commands::orders::contact(&store, &id)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Stats => commands::admin::stats(&store)?,
            AdminAction::Create {
                email,
                name,
                password,
            } => commands::admin::create(&store, &email, &name, &SecretString::from(password))?,
        },
    }
    Ok(())
}
