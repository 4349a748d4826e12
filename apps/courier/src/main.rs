use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{ApiClient, OrdersViewModel, Session, SessionManager};
use shared::{
    domain::{Driver, OrderAction, OrderTab},
    protocol::{LoginRequest, SignupRequest},
};
use storage::SqliteKeyValueStore;

mod config;

#[derive(Parser, Debug)]
#[command(name = "courier", about = "Delivery driver client for the courier API")]
struct Args {
    /// Remote API base URL; overrides courier.toml and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Local session database; plain paths and sqlite URLs both work.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a driver account.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        address: String,
    },
    /// Log in and persist the session.
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Show the restored session.
    Whoami,
    /// List orders, optionally filtered by tab (all|accepted|started|completed).
    Orders {
        #[arg(long, default_value = "all")]
        tab: String,
    },
    /// Run a status transition (accept|pickup|deliver|reject) on one order.
    Act { order_id: String, action: String },
    /// Earnings summary over delivered orders.
    Earnings,
    /// Clear the persisted session.
    Logout,
}

fn require_token(session: &Session) -> Result<String> {
    session
        .token
        .clone()
        .ok_or_else(|| anyhow!("not logged in; run `courier login` first"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let settings = config::load_settings();
    let api_base_url = args.api_url.unwrap_or(settings.api_base_url);
    let database_url =
        config::normalize_database_url(&args.database_url.unwrap_or(settings.database_url));

    let store = Arc::new(SqliteKeyValueStore::open(&database_url).await?);
    let sessions = SessionManager::new(store);
    let session = sessions.initialize().await;
    let api = ApiClient::new(api_base_url);

    match args.command {
        Command::Signup {
            name,
            email,
            phone,
            password,
            address,
        } => {
            api.signup(&SignupRequest {
                name,
                email,
                phone,
                password,
                address,
            })
            .await?;
            println!("Account created. Please log in.");
        }
        Command::Login { phone, password } => {
            let response = api
                .login(&LoginRequest {
                    phone: phone.clone(),
                    password,
                })
                .await?;
            // The login endpoint only hands back a token; the profile starts
            // sparse and can be filled in later via update_driver.
            sessions
                .login(
                    response.token,
                    Driver {
                        id: String::new(),
                        name: String::new(),
                        email: String::new(),
                        phone: phone.clone(),
                        address: String::new(),
                    },
                )
                .await?;
            println!("Logged in as {phone}.");
        }
        Command::Whoami => {
            if session.is_authenticated() {
                let phone = session
                    .driver
                    .as_ref()
                    .map(|driver| driver.phone.clone())
                    .unwrap_or_default();
                println!("Logged in as {phone}.");
            } else {
                println!("Not logged in.");
            }
        }
        Command::Orders { tab } => {
            let token = require_token(&session)?;
            let tab: OrderTab = tab.parse()?;
            let vm = OrdersViewModel::new(api);
            let orders = vm.filtered(&token, tab).await?;
            if orders.is_empty() {
                println!("No orders found");
            }
            for order in orders {
                let actions: Vec<&str> = order
                    .delivery_status
                    .legal_actions()
                    .iter()
                    .map(|action| action.path_segment())
                    .collect();
                println!(
                    "{}  {}  {} | {}, {} | total {} | actions: {}",
                    order.id,
                    order.delivery_status.as_str(),
                    order.shopkeeper.shopname,
                    order.delivery_address.city,
                    order.delivery_address.state,
                    order.total_price,
                    if actions.is_empty() {
                        "none".to_string()
                    } else {
                        actions.join(", ")
                    }
                );
            }
        }
        Command::Act { order_id, action } => {
            let token = require_token(&session)?;
            let action: OrderAction = action.parse()?;
            let vm = OrdersViewModel::new(api);
            let refreshed = vm.run_action(&token, &order_id, action).await?;
            match refreshed.iter().find(|order| order.id == order_id) {
                Some(order) => {
                    println!("{} is now {}", order.id, order.delivery_status.as_str())
                }
                None => println!("Action applied; order {order_id} no longer listed"),
            }
        }
        Command::Earnings => {
            let token = require_token(&session)?;
            let vm = OrdersViewModel::new(api);
            let summary = vm.earnings(&token).await?;
            println!(
                "Today:      {} ({} deliveries)",
                summary.today, summary.today_deliveries
            );
            println!(
                "This month: {} ({} deliveries)",
                summary.month, summary.month_deliveries
            );
            println!(
                "Total:      {} ({} deliveries)",
                summary.total, summary.total_deliveries
            );
        }
        Command::Logout => {
            sessions.logout().await?;
            println!("Logged out.");
        }
    }

    Ok(())
}
