//! # Kirana POS Counter
//!
//! Command-line counter for the Kirana POS billing client.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Counter Binary                                  │
//! │                                                                         │
//! │  Operator ───► clap CLI ───► commands ───► kirana-core (billing)        │
//! │                                  │                                      │
//! │                                  └───────► kirana-api ───► HTTP (8000)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kirana_api::{ApiClient, ApiConfig};
use kirana_core::ProductInput;

use kirana_counter::commands::{self, HistoryView, SaleOutcome};
use kirana_counter::{ApiError, AppConfig, CatalogState, SessionState};

/// Kirana POS counter: billing, catalog and sales history.
#[derive(Debug, Parser)]
#[command(name = "counter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the product catalog.
    Products {
        /// Filter by code or name (case-insensitive substring).
        #[arg(long)]
        search: Option<String>,
    },

    /// Manage the product catalog.
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Build and submit a bill.
    Sell {
        /// Customer name printed on the bill (required to submit).
        #[arg(long)]
        customer: String,

        /// Customer phone number (display-only).
        #[arg(long, default_value = "")]
        phone: String,

        /// Bill line as CODE:QTY[:DISCOUNT[:RATE]]; repeatable.
        #[arg(long = "line", required = true)]
        lines: Vec<String>,
    },

    /// Show the sales history report.
    History {
        /// Show everything ever recorded.
        #[arg(long, conflicts_with_all = ["start", "end"])]
        all: bool,

        /// Range start, YYYY-MM-DD.
        #[arg(long, default_value = "")]
        start: String,

        /// Range end, YYYY-MM-DD.
        #[arg(long, default_value = "")]
        end: String,
    },
}

#[derive(Debug, Subcommand)]
enum ProductAction {
    /// Create a product.
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        cost_price: f64,
        #[arg(long)]
        sell_price: f64,
        /// GST percentage; the collaborator defaults to 5 when omitted.
        #[arg(long, default_value_t = 5.0)]
        gst_percent: f64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
    },

    /// Update a product by its server id.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        cost_price: f64,
        #[arg(long)]
        sell_price: f64,
        #[arg(long, default_value_t = 5.0)]
        gst_percent: f64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
    },

    /// Delete a product by its server id.
    Remove {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = AppConfig::from_env();
    let client = ApiClient::new(ApiConfig::new(config.api_url.as_str()))?;
    let catalog = CatalogState::new();
    let session = SessionState::new();

    info!(api_url = %client.base_url(), "counter starting");

    match cli.command {
        Command::Products { search } => {
            let products =
                commands::list_products(&client, &catalog, search.as_deref()).await;
            if products.is_empty() {
                println!("No products.");
                return Ok(());
            }
            println!(
                "{:<6} {:<12} {:<28} {:>10} {:>10} {:>6} {:>7}",
                "ID", "Code", "Name", "Cost", "Rate", "GST%", "Stock"
            );
            for p in products {
                println!(
                    "{:<6} {:<12} {:<28} {:>10} {:>10} {:>6.1} {:>7}",
                    p.id,
                    p.code,
                    p.name,
                    config.format_amount(p.cost_price),
                    config.format_amount(p.sell_price),
                    p.gst_percent,
                    p.stock
                );
            }
        }

        Command::Product { action } => match action {
            ProductAction::Add {
                code,
                name,
                cost_price,
                sell_price,
                gst_percent,
                stock,
            } => {
                let input = ProductInput {
                    code,
                    name,
                    cost_price,
                    sell_price,
                    gst_percent,
                    stock,
                };
                let created = commands::add_product(&client, &catalog, &input).await?;
                println!("Created product {} (id {})", created.code, created.id);
            }
            ProductAction::Update {
                id,
                code,
                name,
                cost_price,
                sell_price,
                gst_percent,
                stock,
            } => {
                let input = ProductInput {
                    code,
                    name,
                    cost_price,
                    sell_price,
                    gst_percent,
                    stock,
                };
                let updated = commands::update_product(&client, &catalog, id, &input).await?;
                println!("Updated product {} (id {})", updated.code, updated.id);
            }
            ProductAction::Remove { id } => {
                commands::delete_product(&client, &catalog, id).await?;
                println!("Deleted product id {id}");
            }
        },

        Command::Sell {
            customer,
            phone,
            lines,
        } => {
            // Bill entry needs a catalog snapshot for stock and rates.
            catalog.reload(&client).await;

            session.with_session_mut(|s| {
                s.set_customer_name(customer);
                s.set_phone_number(phone);
            });

            for spec in &lines {
                let (code, qty, discount, rate) = commands::parse_line_spec(spec)?;
                let view =
                    commands::add_to_cart(&catalog, &session, &code, qty, discount, rate)?;
                // A repeated code merges into its existing line, so look
                // the affected line up rather than taking the last one.
                if let Some(line) = view.lines.iter().find(|l| l.product_code == code) {
                    println!(
                        "  {} × {} @ {} = {}",
                        line.name,
                        line.qty,
                        config.format_amount(line.price),
                        config.format_amount(line.line_total)
                    );
                }
            }

            let preview = commands::bill_preview(&session);
            println!(
                "Bill for {}: {} line(s), grand total {}",
                preview.customer_name,
                preview.lines.len(),
                config.format_amount(preview.totals.grand_total)
            );

            let outcome = commands::submit_sale(&client, &catalog, &session, &config).await?;
            print_sale_outcome(&config, &outcome);
        }

        Command::History { all, start, end } => {
            let view = if all {
                commands::load_all(&client).await?
            } else {
                commands::load_range(&client, &start, &end).await?
            };
            print_history(&config, &view);
        }
    }

    Ok(())
}

fn print_sale_outcome(config: &AppConfig, outcome: &SaleOutcome) {
    let bill = &outcome.bill;
    let confirmation = &outcome.confirmation;

    println!();
    println!("Sale recorded (server sale id {})", confirmation.sale_id);
    println!("Bill No: {}   Customer: {}", bill.bill_number, bill.customer_name);
    println!("Subtotal:    {}", config.format_amount(confirmation.subtotal));
    println!(
        "Discount:    {}",
        config.format_amount(confirmation.discount_total)
    );
    println!("GST:         {}", config.format_amount(confirmation.total_gst));
    println!(
        "Grand Total: {}",
        config.format_amount(confirmation.grand_total)
    );
    match &outcome.receipt_path {
        Some(path) => println!("Receipt: {}", path.display()),
        None => println!("Receipt could not be written (sale is recorded)."),
    }
}

fn print_history(config: &AppConfig, view: &HistoryView) {
    match view {
        HistoryView::NotLoaded => println!("No query executed."),
        HistoryView::Empty { summary } => {
            println!("No sales in the selected range.");
            println!(
                "Totals — revenue: {}, GST: {}, profit: {}",
                config.format_amount(summary.total_revenue),
                config.format_amount(summary.total_gst),
                config.format_amount(summary.total_profit)
            );
        }
        HistoryView::Loaded { sales, summary } => {
            println!(
                "{:<17} {:>6} {:<28} {:>4} {:>10} {:>6} {:>10} {:>10}",
                "Date", "Sale", "Product", "Qty", "Rate", "Disc%", "Total", "Profit"
            );
            for row in sales {
                println!(
                    "{:<17} {:>6} {:<28} {:>4} {:>10} {:>6.1} {:>10} {:>10}",
                    row.date,
                    row.sale_id,
                    row.product,
                    row.qty,
                    config.format_amount(row.sell_price),
                    row.discount_percent,
                    config.format_amount(row.line_total),
                    config.format_amount(row.profit)
                );
            }
            println!();
            println!(
                "Totals — cost: {}, revenue: {}, GST: {}, profit: {}",
                config.format_amount(summary.total_cost),
                config.format_amount(summary.total_revenue),
                config.format_amount(summary.total_gst),
                config.format_amount(summary.total_profit)
            );
        }
    }
}
