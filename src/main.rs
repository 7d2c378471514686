//! SokoDigital storefront CLI
//!
//! Drives the commerce core against a store backend: inspect and edit the
//! cart, and run a full checkout from the terminal. Useful for exercising a
//! staging backend end to end.

use std::process;

use clap::{Args, Parser, Subcommand};
use sokodigital::{
    config::StoreConfig,
    context::AppContext,
    domain::{
        checkout::{PaymentSubmission, ShippingInfo},
        payments::Msisdn,
    },
    money,
};

#[derive(Debug, Parser)]
#[command(name = "sokodigital", about = "SokoDigital storefront CLI", long_about = None)]
struct Cli {
    /// Base URL of the store backend
    #[arg(long, env = "SOKO_BASE_URL")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect or edit the cart
    Cart(CartCommand),
    /// Run the checkout flow
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add(AddArgs),
    /// Remove a cart line
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier
    product_id: String,

    /// Number of units
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Cart line identifier
    item_id: String,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Mobile-money number for the payment prompt, e.g. 254712345678
    #[arg(long)]
    phone: String,

    /// Recipient's full name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long, default_value = "Nairobi")]
    city: String,

    /// State or province
    #[arg(long, default_value = "Nairobi County")]
    state: String,

    /// Postal code
    #[arg(long, default_value = "00100")]
    postal_code: String,

    /// Country
    #[arg(long, default_value = "Kenya")]
    country: String,

    /// Fail outright when the payment gateway is unreachable instead of
    /// acknowledging in demo mode
    #[arg(long)]
    no_demo_fallback: bool,
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = StoreConfig::new(&cli.base_url);

    match cli.command {
        Commands::Cart(CartCommand { command }) => {
            let context = build_context(config)?;

            match command {
                CartSubcommand::Show => show_cart(&context).await,
                CartSubcommand::Add(args) => add_to_cart(&context, &args).await,
                CartSubcommand::Remove(args) => remove_from_cart(&context, &args).await,
            }
        }
        Commands::Checkout(args) => {
            let mut config = config;
            config.demo_payment_fallback = !args.no_demo_fallback;

            run_checkout(&build_context(config)?, &args).await
        }
    }
}

fn build_context(config: StoreConfig) -> Result<AppContext, String> {
    AppContext::from_config(config)
        .map_err(|error| format!("failed to set up the store client: {error}"))
}

async fn show_cart(context: &AppContext) -> Result<(), String> {
    let mut cart = context.cart();
    cart.load().await;

    if cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        println!(
            "{}  {} × {}  {}",
            item.id,
            item.title,
            item.quantity,
            money::format_kes(item.line_total()),
        );
    }

    println!(
        "{} items, subtotal {}",
        cart.item_count(),
        money::format_kes(cart.subtotal()),
    );

    Ok(())
}

async fn add_to_cart(context: &AppContext, args: &AddArgs) -> Result<(), String> {
    let mut cart = context.cart();
    cart.load().await;

    cart.add(&args.product_id, args.quantity)
        .await
        .map_err(|error| error.to_string())?;

    println!("added {} × {}", args.quantity, args.product_id);

    show_cart(context).await
}

async fn remove_from_cart(context: &AppContext, args: &RemoveArgs) -> Result<(), String> {
    let mut cart = context.cart();
    cart.load().await;

    cart.remove(&args.item_id)
        .await
        .map_err(|error| error.to_string())?;

    println!("removed {}", args.item_id);

    Ok(())
}

async fn run_checkout(context: &AppContext, args: &CheckoutArgs) -> Result<(), String> {
    let phone: Msisdn = args.phone.parse().map_err(|error| format!("{error}"))?;

    let session = context
        .auth
        .session()
        .await
        .unwrap_or_else(|_| sokodigital::auth::Session::anonymous());

    if !session.authenticated {
        return Err("please log in to the store before checking out".to_string());
    }

    let mut cart = context.cart();
    cart.load().await;

    if cart.is_empty() {
        return Err("your cart is empty; add something before checking out".to_string());
    }

    let mut flow = context.checkout();

    let totals = flow.totals(&cart);
    println!("subtotal {}", money::format_kes(totals.subtotal));
    println!("shipping {}", money::format_kes(totals.shipping_fee));
    println!("tax      {}", money::format_kes(totals.tax));
    println!("total    {}", money::format_kes(totals.total));

    flow.submit_shipping(
        &cart,
        ShippingInfo {
            full_name: args.name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            address: args.address.clone(),
            city: args.city.clone(),
            state: args.state.clone(),
            postal_code: args.postal_code.clone(),
            country: args.country.clone(),
        },
    )
    .map_err(|error| error.to_string())?;

    match flow.submit_payment(&mut cart, &phone).await {
        Ok(PaymentSubmission::Completed(confirmation)) => {
            println!("order placed: {}", confirmation.order_reference);
            println!("a confirmation will be sent to {}", confirmation.email);

            if confirmation.demo_mode {
                println!("payment gateway unreachable; acknowledged in demo mode");
            }

            Ok(())
        }
        Ok(PaymentSubmission::AlreadyInFlight) => {
            Err("a submission is already in flight".to_string())
        }
        Err(error) if error.is_login_required() => {
            Err("please log in to the store before checking out".to_string())
        }
        Err(error) => Err(error.to_string()),
    }
}
