//! Comptoir storefront CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use comptoir::{
    fixtures,
    menu::{Category, ItemId, MenuItem},
    orders::{OrderStatus, PaymentMethod, order_total_minor},
    promotions::{Promotion, PromotionId, PromotionScope},
};
use comptoir_app::{
    assistant::{Assistant, HttpChatBackend},
    context::AppContext,
    dashboard::AdminDashboard,
    domain::{
        menu::models::NewMenuItem,
        orders::models::{Order, OrderId},
        promotions::models::NewPromotion,
    },
    receipt::{Receipt, format_dzd},
    rest::RestClient,
    tracking::OrderTracker,
};
use tabled::{Table, Tabled, settings::Style};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "comptoir", about = "Comptoir storefront CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage the menu catalog
    Menu(MenuCommand),

    /// Manage promotions
    Promo(PromoCommand),

    /// Inspect and manage live orders
    Orders(OrdersCommand),

    /// Track one order by id
    Track(TrackArgs),

    /// Ask the ordering assistant a question about the menu
    Chat(ChatArgs),

    /// Render a receipt from the bundled fixtures, offline
    Demo,
}

#[derive(Debug, Args)]
struct StoreArgs {
    /// Hosted store base URL
    #[arg(long, env = "COMPTOIR_STORE_URL")]
    store_url: String,

    /// Hosted store API key
    #[arg(long, env = "COMPTOIR_STORE_KEY")]
    store_key: String,
}

impl StoreArgs {
    fn context(&self) -> AppContext {
        AppContext::from_rest(RestClient::new(
            self.store_url.clone(),
            self.store_key.clone(),
        ))
    }
}

#[derive(Debug, Args)]
struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// List the catalog
    List(StoreArgs),

    /// Add a catalog item
    Add(AddMenuItemArgs),

    /// Overwrite a catalog item
    Update(UpdateMenuItemArgs),

    /// Delete a catalog item
    Delete(DeleteMenuItemArgs),
}

#[derive(Debug, Args)]
struct AddMenuItemArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Base price in minor units (centimes)
    #[arg(long)]
    price_minor: u64,

    #[arg(long)]
    category: Category,

    #[arg(long, default_value = "")]
    image_url: String,

    /// Optional free-text promotion label
    #[arg(long)]
    promotion: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateMenuItemArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    id: ItemId,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    price_minor: u64,

    #[arg(long)]
    category: Category,

    #[arg(long, default_value = "")]
    image_url: String,

    #[arg(long)]
    promotion: Option<String>,
}

#[derive(Debug, Args)]
struct DeleteMenuItemArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    id: ItemId,
}

#[derive(Debug, Args)]
struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    /// List promotions
    List(StoreArgs),

    /// Add a promotion (starts active)
    Add(AddPromotionArgs),

    /// Overwrite a promotion, including the active flag
    Update(UpdatePromotionArgs),

    /// Delete a promotion
    Delete(DeletePromotionArgs),
}

#[derive(Debug, Args)]
struct AddPromotionArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Whole percentage between 1 and 100
    #[arg(long)]
    discount: u8,

    /// A category name, or "all"
    #[arg(long, value_parser = parse_scope)]
    category: PromotionScope,
}

#[derive(Debug, Args)]
struct UpdatePromotionArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    id: PromotionId,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    discount: u8,

    #[arg(long, value_parser = parse_scope)]
    category: PromotionScope,

    /// Whether the promotion runs
    #[arg(long)]
    active: bool,
}

#[derive(Debug, Args)]
struct DeletePromotionArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    id: PromotionId,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List all orders, newest first
    Live(LiveOrdersArgs),

    /// Move an order to a new status
    Status(SetStatusArgs),
}

#[derive(Debug, Args)]
struct LiveOrdersArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Keep the view mounted and reprint on every refresh
    #[arg(long)]
    watch: bool,
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[arg(long)]
    id: OrderId,

    /// pending, preparing, ready, delivered or cancelled
    #[arg(long)]
    status: OrderStatus,
}

#[derive(Debug, Args)]
struct TrackArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Order id as printed on the receipt
    id: String,
}

#[derive(Debug, Args)]
struct ChatArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Conversational API key
    #[arg(long, env = "COMPTOIR_CHAT_KEY")]
    chat_key: String,

    /// The question to ask
    message: String,
}

fn parse_scope(raw: &str) -> Result<PromotionScope, String> {
    if raw == "all" {
        return Ok(PromotionScope::All);
    }

    raw.parse::<Category>()
        .map(PromotionScope::Category)
        .map_err(|error| error.to_string())
}

fn scope_label(scope: PromotionScope) -> &'static str {
    match scope {
        PromotionScope::All => "all",
        PromotionScope::Category(category) => category.as_str(),
    }
}

#[derive(Debug, Tabled)]
struct MenuRow {
    #[tabled(rename = "Id")]
    id: u64,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Category")]
    category: &'static str,

    #[tabled(rename = "Price")]
    price: String,

    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Debug, Tabled)]
struct PromotionRow {
    #[tabled(rename = "Id")]
    id: u64,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Discount")]
    discount: String,

    #[tabled(rename = "Scope")]
    scope: &'static str,

    #[tabled(rename = "Active")]
    active: bool,
}

#[derive(Debug, Tabled)]
struct OrderRow {
    #[tabled(rename = "Id")]
    id: u64,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Customer")]
    customer: String,

    #[tabled(rename = "Total")]
    total: String,

    #[tabled(rename = "Placed")]
    placed: String,
}

fn render_menu(items: &[MenuItem]) -> String {
    let rows: Vec<MenuRow> = items
        .iter()
        .map(|item| MenuRow {
            id: item.id.into_raw(),
            name: item.name.clone(),
            category: item.category.as_str(),
            price: format_dzd(item.price_minor),
            label: item.promotion.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    table.to_string()
}

fn render_promotions(promotions: &[Promotion]) -> String {
    let rows: Vec<PromotionRow> = promotions
        .iter()
        .map(|promotion| PromotionRow {
            id: promotion.id.into_raw(),
            name: promotion.name.clone(),
            discount: format!("{}%", promotion.discount_percentage),
            scope: scope_label(promotion.applicable_category),
            active: promotion.is_active,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    table.to_string()
}

fn render_orders(orders: &[Order]) -> String {
    let rows: Vec<OrderRow> = orders
        .iter()
        .map(|order| OrderRow {
            id: order.id.into_raw(),
            status: order.status.to_string(),
            customer: order.customer_name.clone(),
            total: format_dzd(order.total_minor),
            placed: order.created_at.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    table.to_string()
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Menu(MenuCommand { command }) => run_menu(command).await,
        Commands::Promo(PromoCommand { command }) => run_promo(command).await,
        Commands::Orders(OrdersCommand { command }) => run_orders(command).await,
        Commands::Track(args) => run_track(args).await,
        Commands::Chat(args) => run_chat(args).await,
        Commands::Demo => run_demo(),
    }
}

async fn run_menu(command: MenuSubcommand) -> Result<(), String> {
    match command {
        MenuSubcommand::List(store) => {
            let ctx = store.context();
            let items = ctx
                .menu
                .list_items()
                .await
                .map_err(|error| format!("failed to list the menu: {error}"))?;

            println!("{}", render_menu(&items));
        }
        MenuSubcommand::Add(args) => {
            let ctx = args.store.context();
            let created = ctx
                .menu
                .create_item(NewMenuItem {
                    name: args.name,
                    description: args.description,
                    price_minor: args.price_minor,
                    category: args.category,
                    image_url: args.image_url,
                    promotion: args.promotion,
                })
                .await
                .map_err(|error| format!("failed to add the menu item: {error}"))?;

            println!("created menu item #{}", created.id);
        }
        MenuSubcommand::Update(args) => {
            let ctx = args.store.context();
            let updated = ctx
                .menu
                .update_item(MenuItem {
                    id: args.id,
                    name: args.name,
                    description: args.description,
                    price_minor: args.price_minor,
                    category: args.category,
                    image_url: args.image_url,
                    promotion: args.promotion,
                })
                .await
                .map_err(|error| format!("failed to update the menu item: {error}"))?;

            println!("updated menu item #{}", updated.id);
        }
        MenuSubcommand::Delete(args) => {
            let ctx = args.store.context();

            ctx.menu
                .delete_item(args.id)
                .await
                .map_err(|error| format!("failed to delete the menu item: {error}"))?;

            println!("deleted menu item #{}", args.id);
        }
    }

    Ok(())
}

async fn run_promo(command: PromoSubcommand) -> Result<(), String> {
    match command {
        PromoSubcommand::List(store) => {
            let ctx = store.context();
            let promotions = ctx
                .promotions
                .list_promotions()
                .await
                .map_err(|error| format!("failed to list promotions: {error}"))?;

            println!("{}", render_promotions(&promotions));
        }
        PromoSubcommand::Add(args) => {
            let ctx = args.store.context();
            let created = ctx
                .promotions
                .create_promotion(NewPromotion {
                    name: args.name,
                    description: args.description,
                    discount_percentage: args.discount,
                    applicable_category: args.category,
                })
                .await
                .map_err(|error| format!("failed to add the promotion: {error}"))?;

            println!("created promotion #{}", created.id);
        }
        PromoSubcommand::Update(args) => {
            let ctx = args.store.context();
            let updated = ctx
                .promotions
                .update_promotion(Promotion {
                    id: args.id,
                    name: args.name,
                    description: args.description,
                    discount_percentage: args.discount,
                    applicable_category: args.category,
                    is_active: args.active,
                })
                .await
                .map_err(|error| format!("failed to update the promotion: {error}"))?;

            println!("updated promotion #{}", updated.id);
        }
        PromoSubcommand::Delete(args) => {
            let ctx = args.store.context();

            ctx.promotions
                .delete_promotion(args.id)
                .await
                .map_err(|error| format!("failed to delete the promotion: {error}"))?;

            println!("deleted promotion #{}", args.id);
        }
    }

    Ok(())
}

async fn run_orders(command: OrdersSubcommand) -> Result<(), String> {
    match command {
        OrdersSubcommand::Live(args) => {
            let ctx = args.store.context();

            if args.watch {
                let (sender, mut receiver) = watch::channel(Vec::new());

                tokio::spawn(AdminDashboard::new().run(ctx, sender));

                while receiver.changed().await.is_ok() {
                    let orders = receiver.borrow_and_update().clone();

                    println!("{}", render_orders(&orders));
                }
            } else {
                let mut dashboard = AdminDashboard::new();

                dashboard
                    .refresh(&ctx)
                    .await
                    .map_err(|error| format!("failed to fetch live orders: {error}"))?;

                println!("{}", render_orders(dashboard.orders()));
            }
        }
        OrdersSubcommand::Status(args) => {
            let ctx = args.store.context();
            let mut dashboard = AdminDashboard::new();

            let updated = dashboard
                .set_status(&ctx, args.id, args.status)
                .await
                .map_err(|error| format!("failed to update the order: {error}"))?;

            println!("order #{} is now {}", updated.id, updated.status);
        }
    }

    Ok(())
}

async fn run_track(args: TrackArgs) -> Result<(), String> {
    let ctx = args.store.context();
    let mut tracker = OrderTracker::new();

    let tracked = tracker
        .lookup(&ctx, &args.id)
        .await
        .map_err(|error| format!("failed to look up the order: {error}"))?;

    match tracked {
        Some(tracked) => {
            println!("{}", Receipt::new(tracked.order.clone()).render());
            println!(
                "Status: {}  (estimated preparation ~ {} min)",
                tracked.order.status, tracked.estimated_prep_minutes
            );
        }
        None => println!("Order not found."),
    }

    Ok(())
}

async fn run_chat(args: ChatArgs) -> Result<(), String> {
    let ctx = args.store.context();
    let menu = ctx
        .menu
        .list_items()
        .await
        .map_err(|error| format!("failed to load the menu: {error}"))?;

    let backend = Arc::new(HttpChatBackend::new(args.chat_key));
    let mut assistant = Assistant::new(backend);

    let reply = assistant.ask(&menu, &args.message).await;

    println!("{reply}");

    Ok(())
}

fn run_demo() -> Result<(), String> {
    let menu = fixtures::sample_menu();
    let promotions: Vec<_> =
        comptoir::promotions::active_promotions(&fixtures::sample_promotions())
            .cloned()
            .collect();

    let mut cart = comptoir::cart::Cart::new();

    for item in menu.iter().take(3) {
        cart.apply(comptoir::cart::CartAction::AddItem {
            item: item.clone(),
            price_minor: comptoir::pricing::effective_price_minor(item, &promotions),
        });
    }

    let items = cart.items().to_vec();
    let total_minor = order_total_minor(&items);

    let order = Order {
        id: OrderId::from_raw(1),
        items,
        total_minor,
        status: OrderStatus::Pending,
        customer_name: "Demo Customer".to_string(),
        customer_phone: "05 55 00 00 00".to_string(),
        payment_method: PaymentMethod::Card,
        created_at: jiff::Timestamp::now(),
    };

    println!("{}", Receipt::new(order).render());

    Ok(())
}
