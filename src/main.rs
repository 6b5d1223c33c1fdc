use chrono::{Datelike, Local};
use clap::{Args, CommandFactory, Parser, Subcommand};
use regex::Regex;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use minimart::catalog::{self, CatalogItem};
use minimart::config::{load_settings, setup_config_wizard, AppSettings};
use minimart::error::{AppError, Result};
use minimart::model::{CustomerInfo, DeliveryInfo, DeliveryMethod, Quantity};
use minimart::order::Session;
use minimart::output::{self, open_and_reveal};
use minimart::{form, report};

// ==========================================
// Structs & Enums
// ==========================================

#[derive(Parser)]
#[command(name = "minimart", about = "MiniMart counter: pick items, place the order, print the receipt")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu with prices
    Menu,
    /// Take an order interactively
    Order,
    /// Place an order in one go from the command line
    Place(PlaceArgs),
    /// Configure the receipt output directory
    Config,
}

#[derive(Args)]
struct PlaceArgs {
    /// Customer name
    #[arg(long, default_value = "")]
    name: String,
    /// Deliver to the customer's address (adds the delivery charge)
    #[arg(long)]
    home: bool,
    /// Cell phone number, required for home delivery
    #[arg(long)]
    phone: Option<String>,
    /// Delivery address, required for home delivery
    #[arg(long)]
    address: Option<String>,
    /// Item and quantity, e.g. "Cold Drink=2". Repeat for more items
    #[arg(long = "item", value_name = "NAME=QTY", value_parser = parse_item_spec)]
    items: Vec<ItemSpec>,
    /// Print the receipt as JSON
    #[arg(long)]
    json: bool,
    /// Write the Typst source only, skip PDF compilation
    #[arg(long)]
    no_pdf: bool,
}

#[derive(Debug, Clone)]
struct ItemSpec {
    item: &'static CatalogItem,
    quantity: Quantity,
}

// ==========================================
// Main Function
// ==========================================

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help().ok();
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => {
            println!("Cancelled");
            ExitCode::SUCCESS
        }
        Err(AppError::Validation(v)) => {
            report::print_validation(v);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Menu => {
            report::print_menu();
            report::print_footer();
        }
        Commands::Order => form::run_session(&load_settings()?)?,
        Commands::Place(args) => place_order(&load_settings()?, args)?,
        Commands::Config => {
            setup_config_wizard()?;
        }
    }
    Ok(())
}

// ==========================================
// One-shot Orders
// ==========================================

fn session_from_args(args: &PlaceArgs) -> Result<Session> {
    let mut session = Session::new();
    session.customer = CustomerInfo::new(args.name.clone());
    session.delivery = if args.home {
        DeliveryInfo {
            method: DeliveryMethod::HomeDelivery,
            phone: args.phone.clone(),
            address: args.address.clone(),
        }
    } else {
        DeliveryInfo::pickup()
    };
    // later specs for the same item win
    for spec in &args.items {
        session.draft.set_quantity(spec.item.name, spec.quantity)?;
    }
    Ok(session)
}

fn place_order(settings: &AppSettings, args: PlaceArgs) -> Result<()> {
    let mut session = session_from_args(&args)?;
    session.confirm()?;

    let now = Local::now().naive_local();
    let receipt = session.receipt(now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        report::print_order(&session);
        println!("✅ {}", report::ORDER_PLACED);
        if !args.no_pdf {
            println!("\n🔨 Compiling PDF...");
        }
    }

    let saved = output::save_receipt(settings, &receipt, now.year(), !args.no_pdf)?;
    if args.json {
        return Ok(());
    }
    match saved.pdf {
        Some(pdf) => {
            println!("✅ PDF Generated: {:?}", pdf);
            if settings.open_after_render {
                open_and_reveal(&pdf);
            }
        }
        None => println!("✅ Receipt source written: {:?}", saved.source),
    }
    Ok(())
}

fn parse_item_spec(raw: &str) -> std::result::Result<ItemSpec, String> {
    let re = Regex::new(r"^\s*(.+?)\s*[=:]\s*(\d+)\s*$").map_err(|e| e.to_string())?;
    let caps = re
        .captures(raw)
        .ok_or_else(|| format!("expected NAME=QTY, got '{}'", raw))?;

    let item = catalog::find_loose(&caps[1]).map_err(|e| e.to_string())?;
    let qty: u32 = caps[2].parse().map_err(|_| format!("invalid quantity '{}'", &caps[2]))?;
    let quantity = Quantity::try_from(qty).map_err(|e| e.to_string())?;
    Ok(ItemSpec { item, quantity })
}
