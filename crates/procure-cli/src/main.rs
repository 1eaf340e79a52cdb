mod app;
mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match cli.command {
        Commands::Seed { products, seed } => commands::seed::run(products, seed),
        Commands::Recommend {
            products,
            seed,
            skus,
            sources,
            use_p90,
            max_suppliers_per_product,
            horizon_periods,
        } => commands::recommend::run(
            products,
            seed,
            skus,
            sources,
            use_p90,
            max_suppliers_per_product,
            horizon_periods,
        ),
        Commands::Forecast { products, seed, horizon } => commands::forecast::run(products, seed, horizon),
        Commands::Inventory {
            products,
            seed,
            horizon,
            periods_per_year,
        } => commands::inventory::run(products, seed, horizon, periods_per_year),
        Commands::Optimize {
            products,
            seed,
            horizon,
            use_p90,
            max_suppliers_per_product,
        } => commands::optimize::run(products, seed, horizon, use_p90, max_suppliers_per_product),
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "command failed");
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}
