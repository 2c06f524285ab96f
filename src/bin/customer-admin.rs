//! Customer Administration CLI
//!
//! Maintenance commands run directly against the customer database, without
//! going through the HTTP API.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use uuid::Uuid;

use customer_service::{
    database::{DatabaseConfig, DatabasePool, PgCustomerStore},
    models::{ListCustomersQuery, DEFAULT_PAGE_LIMIT},
    service::CustomerService,
};

/// Customer administration CLI
#[derive(Parser)]
#[command(name = "customer-admin", about = "Customer administration CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// List customers, newest first
    List(ListArgs),
    /// Show one customer
    Get(IdArgs),
    /// Delete a customer
    Delete(IdArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Customers per page (max 100)
    #[arg(short, long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: u32,
}

#[derive(Args)]
struct IdArgs {
    /// Customer ID
    id: Uuid,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    // Only the database settings are needed here
    let db_config = DatabaseConfig::from_env()?;
    let database_pool = db_config.create_pool().await?;

    if let Commands::Migrate = cli.command {
        return migrate(&database_pool).await;
    }

    let store = Arc::new(PgCustomerStore::new(database_pool));
    let service = CustomerService::new(store);

    match cli.command {
        Commands::Migrate => {}
        Commands::List(args) => list_customers(&service, args).await?,
        Commands::Get(args) => get_customer(&service, args).await?,
        Commands::Delete(args) => delete_customer(&service, args).await?,
    }

    Ok(())
}

async fn migrate(pool: &DatabasePool) -> Result<(), Box<dyn std::error::Error>> {
    println!("Applying migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    println!("Migrations up to date.");
    Ok(())
}

async fn list_customers(
    service: &CustomerService,
    args: ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = service
        .list_customers(ListCustomersQuery {
            page: Some(args.page),
            limit: Some(args.limit),
        })
        .await?;

    if page.items.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<30} {:<32} {:<16} {:<17}",
        "ID", "Name", "Email", "Phone", "Created"
    );
    println!("{}", "-".repeat(137));

    for customer in &page.items {
        println!(
            "{:<38} {:<30} {:<32} {:<16} {:<17}",
            customer.id,
            truncate_string(&customer.full_name, 29),
            truncate_string(&customer.email, 31),
            customer.phone,
            customer.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!();
    println!(
        "Page {} of {} ({} customers total)",
        page.page,
        page.total_pages.max(1),
        page.total
    );

    Ok(())
}

async fn get_customer(
    service: &CustomerService,
    args: IdArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let customer = service.get_customer(args.id).await?;

    println!("ID:        {}", customer.id);
    println!("Name:      {}", customer.full_name);
    println!("Email:     {}", customer.email);
    println!("Phone:     {}", customer.phone);
    println!(
        "Address:   {}",
        customer.address.as_deref().unwrap_or("-")
    );
    println!("Created:   {}", customer.created_at);
    println!("Updated:   {}", customer.updated_at);

    Ok(())
}

async fn delete_customer(
    service: &CustomerService,
    args: IdArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = service.delete_customer(args.id).await?;
    println!("{}: {}", args.id, response.message);
    Ok(())
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
