//! `rma-calc`: command-line entry point for the RMA cost calculator
//!
//! Loads an item catalog (CSV or `.xlsx`), evaluates every RMA type for one
//! item and prints a ranked table (or JSON). Logs go to stderr; set
//! `RUST_LOG` to see catalog loading details.

mod output;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rma_calculator_core_rs::{
    get_cost_config_schema, get_rma_schema, CategoryFilter, CostConfig, CostOverrides,
    ItemCatalog, QuantityPolicy, RmaCalculator,
};

#[derive(Debug, Parser)]
#[command(name = "rma-calc", version, about = "RMA cost calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog items with price and standard cost
    Items {
        /// Item catalog, CSV or .xlsx (columns: Item, RegPrice, StdCost, ...)
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Evaluate every RMA type for one item
    Quote(QuoteArgs),
    /// Print the formula schema as JSON
    Schema {
        /// Document cost config fields instead of formulas
        #[arg(long)]
        config_fields: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Zero shipping, QC 5, admin 20
    Default,
    /// Warehouse shipping constants, QC 10.50
    Warehouse,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// Item catalog, CSV or .xlsx (first sheet)
    #[arg(long)]
    catalog: PathBuf,

    /// Item identifier (exact match)
    #[arg(long)]
    item: String,

    /// Quantity (fractional allowed unless --integral)
    #[arg(long, default_value = "1")]
    qty: Decimal,

    /// Only accept whole-unit quantities
    #[arg(long)]
    integral: bool,

    /// Base cost constants
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// JSON file of cost overrides, e.g. {"qc_cost": 10.5}
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: OverrideArgs,

    /// all, credit, replacement, repair or other
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Order rows by ascending cost instead of catalog order
    #[arg(long)]
    sort: bool,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Individual cost overrides; these win over --config values
#[derive(Debug, Args)]
struct OverrideArgs {
    #[arg(long)]
    outbound_shipping: Option<Decimal>,
    #[arg(long)]
    return_shipping: Option<Decimal>,
    #[arg(long)]
    replacement_shipping: Option<Decimal>,
    #[arg(long)]
    qc_cost: Option<Decimal>,
    #[arg(long)]
    admin_cost: Option<Decimal>,
    #[arg(long)]
    repair_material: Option<Decimal>,
    #[arg(long)]
    repair_labor: Option<Decimal>,
}

impl From<&OverrideArgs> for CostOverrides {
    fn from(args: &OverrideArgs) -> Self {
        CostOverrides {
            outbound_shipping: args.outbound_shipping,
            return_shipping: args.return_shipping,
            replacement_shipping: args.replacement_shipping,
            qc_cost: args.qc_cost,
            admin_cost: args.admin_cost,
            repair_material: args.repair_material,
            repair_labor: args.repair_labor,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Items { catalog } => {
            let catalog = load_catalog(&catalog)?;
            print!("{}", output::render_items(&catalog));
        }
        Command::Quote(args) => quote(&args)?,
        Command::Schema { config_fields } => {
            if config_fields {
                println!("{}", get_cost_config_schema());
            } else {
                println!("{}", get_rma_schema());
            }
        }
    }
    Ok(())
}

fn load_catalog(path: &Path) -> Result<ItemCatalog> {
    ItemCatalog::from_path(path)
        .with_context(|| format!("loading item catalog from '{}'", path.display()))
}

fn load_overrides(path: &Path) -> Result<CostOverrides> {
    let file = File::open(path)
        .with_context(|| format!("opening cost config '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing cost config '{}'", path.display()))
}

fn quote(args: &QuoteArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;

    let base = match args.preset {
        Preset::Default => CostConfig::default(),
        Preset::Warehouse => CostConfig::warehouse_preset(),
    };
    let policy = if args.integral {
        QuantityPolicy::Integral
    } else {
        QuantityPolicy::default()
    };

    let file_overrides = match &args.config {
        Some(path) => load_overrides(path)?,
        None => CostOverrides::default(),
    };
    let overrides = file_overrides.merge(&CostOverrides::from(&args.overrides));
    debug!(?overrides, "resolved cost overrides");

    let calculator = RmaCalculator::new(catalog)
        .with_config(base)
        .with_quantity_policy(policy);
    let quote = calculator
        .quote(&args.item, args.qty, &overrides)
        .with_context(|| format!("quoting item '{}'", args.item))?;

    let view = quote.view(args.category);
    if args.json {
        println!("{}", output::render_json(&quote, &view, args.sort)?);
    } else {
        print!("{}", output::render_table(&quote, &view, args.sort));
    }
    Ok(())
}
