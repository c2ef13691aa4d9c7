//! Read-only administrative listing of dealerships and vehicles.
//!
//! Renders records using the declarative admin table, including the
//! registration number that the HTTP API never returns.
//!
//! ```text
//! inventory-admin --database-url postgres://localhost/concessionnaire dealerships --search paris
//! inventory-admin vehicles 1 --category moto
//! ```

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use concessionnaire_api::domain::admin_table::{
    AdminTable, dealership_matches, dealership_row, vehicle_matches, vehicle_row,
};
use concessionnaire_api::domain::ports::{DealershipRepository, FixtureDealershipRepository};
use concessionnaire_api::domain::{AdminRecord, DealershipId, VehicleCategory};
use concessionnaire_api::outbound::persistence::{DbPool, DieselDealershipRepository, PoolConfig};

#[derive(Debug, Parser)]
#[command(name = "inventory-admin", about = "List dealership inventory")]
struct Cli {
    /// PostgreSQL URL. Without it the built-in fixture inventory is listed.
    #[arg(long, env = "CONCESSIONNAIRE_DATABASE_URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List dealerships.
    Dealerships {
        /// Exact dealership name.
        #[arg(long)]
        name: Option<String>,
        /// Case-insensitive match on name or registration number.
        #[arg(long)]
        search: Option<String>,
    },
    /// List the vehicles of one dealership.
    Vehicles {
        dealership: i32,
        #[arg(long)]
        category: Option<VehicleCategory>,
        /// Case-insensitive match on make or dealership name.
        #[arg(long)]
        search: Option<String>,
    },
}

fn render(table: &AdminTable, rows: &[Vec<String>]) -> String {
    let mut out = table.columns.join("\t");
    for row in rows {
        out.push('\n');
        out.push_str(&row.join("\t"));
    }
    out
}

async fn run(repo: &impl DealershipRepository, command: Command) -> Result<String> {
    match command {
        Command::Dealerships { name, search } => {
            let rows: Vec<Vec<String>> = repo
                .list_dealerships()
                .await?
                .iter()
                .filter(|d| name.as_deref().is_none_or(|n| d.name().as_ref() == n))
                .filter(|d| search.as_deref().is_none_or(|t| dealership_matches(d, t)))
                .map(dealership_row)
                .collect();
            Ok(render(AdminRecord::Dealership.table(), &rows))
        }
        Command::Vehicles {
            dealership,
            category,
            search,
        } => {
            let id = DealershipId::new(dealership);
            let owner = repo
                .find_dealership(id)
                .await?
                .ok_or_else(|| eyre!("dealership {id} not found"))?;
            let rows: Vec<Vec<String>> = repo
                .list_vehicles(id)
                .await?
                .iter()
                .filter(|v| category.is_none_or(|c| v.category() == c))
                .filter(|v| {
                    search
                        .as_deref()
                        .is_none_or(|t| vehicle_matches(v, owner.name(), t))
                })
                .map(|v| vehicle_row(v, owner.name()))
                .collect();
            Ok(render(AdminRecord::Vehicle.table(), &rows))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let output = match cli.database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(1)).await?;
            run(&DieselDealershipRepository::new(pool), cli.command).await?
        }
        None => {
            info!("no database URL given; listing fixture inventory");
            run(&FixtureDealershipRepository::seeded(), cli.command).await?
        }
    };
    println!("{output}");
    Ok(())
}
