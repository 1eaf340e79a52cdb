//! Top-level argument parsing, mirroring `gat-cli`'s `Cli`/`Commands` split:
//! one enum variant per subcommand, each carrying only the flags that
//! subcommand needs.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "procure", about = "Procurement decision pipeline CLI", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed an in-memory demo catalog and print what was created.
    Seed {
        #[arg(long, default_value_t = 10)]
        products: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Seed a catalog and run the full acquisition -> forecast -> inventory
    /// -> allocation chain, printing the resulting decision summary.
    Recommend {
        #[arg(long, default_value_t = 10)]
        products: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Restrict to these SKUs instead of the first `products` by insertion order.
        #[arg(long, value_delimiter = ',')]
        skus: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        sources: Vec<String>,
        #[arg(long, default_value_t = false)]
        use_p90: bool,
        #[arg(long)]
        max_suppliers_per_product: Option<u32>,
        #[arg(long)]
        horizon_periods: Option<u32>,
    },
    /// Seed a catalog and run only the demand forecast stage.
    Forecast {
        #[arg(long, default_value_t = 10)]
        products: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        horizon: Option<u32>,
    },
    /// Seed a catalog, forecast it, then compute inventory policies.
    Inventory {
        #[arg(long, default_value_t = 10)]
        products: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        horizon: Option<u32>,
        #[arg(long, default_value_t = 52)]
        periods_per_year: u32,
    },
    /// Seed a catalog, forecast and policy it, then solve the allocation MILP.
    Optimize {
        #[arg(long, default_value_t = 10)]
        products: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        horizon: Option<u32>,
        #[arg(long, default_value_t = false)]
        use_p90: bool,
        #[arg(long, default_value_t = 2)]
        max_suppliers_per_product: u32,
    },
}
