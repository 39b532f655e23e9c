//! SalesDash CLI — the dashboard's numbers without the terminal UI.
//!
//! Commands:
//! - `summary` — headline metrics and sales by region for a selection
//! - `options` — values accepted by `--region` and `--category`
//! - `series` — one chart series as CSV
//! - `forecast` — daily sales forecast as CSV
//! - `evaluate` — holdout accuracy of the forecast model
//! - `export` — filtered order table as CSV, JSON or Parquet

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use salesdash_core::data::load_cached;
use salesdash_core::export;
use salesdash_core::filter::{selector_options, FilterField};
use salesdash_core::format::{format_count, format_money};
use salesdash_core::{CleanedTable, DashboardConfig, DashboardView, FilterSelection, ForecastGate};
use salesdash_forecast::{
    evaluate_holdout, run_gated, ForecastHorizon, ForecastModel, ForecastOutcome,
    SeasonalTrendModel, INSUFFICIENT_DATA_MESSAGE,
};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Parser)]
#[command(name = "salesdash", about = "SalesDash CLI — sales metrics and forecasts")]
struct Cli {
    /// Config file. Defaults to ./salesdash.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Orders CSV, overriding `data_path` from the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// `--region` / `--category`, both defaulting to "All".
#[derive(clap::Args, Debug, Clone)]
struct SelectionArgs {
    /// Region to keep, or "All".
    #[arg(long, default_value = "All")]
    region: String,

    /// Category to keep, or "All".
    #[arg(long, default_value = "All")]
    category: String,
}

impl SelectionArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection::new(self.region.as_str(), self.category.as_str())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Total sales, profit and orders plus sales by region.
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the region and category selector values.
    Options,
    /// Write one chart series as CSV.
    Series {
        #[arg(long, value_enum)]
        kind: SeriesKind,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Forecast daily sales and write the result as CSV.
    Forecast {
        /// Days past the last order date, 30-365. Defaults to the config value.
        #[arg(long)]
        horizon: Option<u32>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Score the forecast model on the most recent days of history.
    Evaluate {
        /// Days held out. Defaults to the config value.
        #[arg(long)]
        holdout: Option<usize>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Write the filtered order table.
    Export {
        #[arg(long, value_enum)]
        format: ExportFormat,

        #[arg(long)]
        output: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeriesKind {
    /// Daily sales (date,sales)
    Time,
    /// Sales per region (region,sales)
    Region,
    /// One point per order (discount,profit)
    Scatter,
    /// Sales per calendar month (year,month,sales)
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
    Parquet,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = DashboardConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let table = load_cached(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    match cli.command {
        Commands::Summary { selection, json } => run_summary(&table, &config, &selection, json),
        Commands::Options => run_options(&table),
        Commands::Series {
            kind,
            selection,
            output,
        } => run_series(&table, &config, kind, &selection, output.as_deref()),
        Commands::Forecast {
            horizon,
            selection,
            output,
        } => run_forecast_cmd(&table, &config, horizon, &selection, output.as_deref()),
        Commands::Evaluate { holdout, selection } => {
            run_evaluate(&table, &config, holdout, &selection)
        }
        Commands::Export {
            format,
            output,
            selection,
        } => run_export(&table, &config, format, &output, &selection),
    }
}

fn view_for(table: &CleanedTable, config: &DashboardConfig, args: &SelectionArgs) -> DashboardView {
    DashboardView::compute(table, &args.selection(), config.forecast.min_distinct_dates)
}

/// Write to `output`, or stdout when absent.
fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn run_summary(
    table: &CleanedTable,
    config: &DashboardConfig,
    args: &SelectionArgs,
    json: bool,
) -> Result<()> {
    let view = view_for(table, config, args);

    if json {
        println!("{}", export::summary_json(&view)?);
        return Ok(());
    }

    let m = &view.metrics;
    println!("Region: {}  Category: {}", view.selection.region, view.selection.category);
    println!();
    println!("{:<14} {:>16}", "Total Sales", format_money(m.total_sales));
    println!("{:<14} {:>16}", "Total Profit", format_money(m.total_profit));
    println!("{:<14} {:>16}", "Total Orders", format_count(m.order_count));

    if let (Some((first, _)), Some((last, _))) =
        (view.sales_over_time.first(), view.sales_over_time.last())
    {
        println!(
            "{:<14} {:>16}",
            "Dates",
            format!("{first} to {last} ({})", view.sales_over_time.len())
        );
    }

    if !view.sales_by_region.is_empty() {
        println!();
        println!("{:<14} {:>16}", "Region", "Sales");
        println!("{}", "-".repeat(31));
        for (region, sales) in &view.sales_by_region {
            println!("{:<14} {:>16}", region, format_money(*sales));
        }
    }

    let stats = table.stats();
    println!();
    println!(
        "{} rows read, {} dropped during cleaning",
        format_count(stats.rows_read),
        format_count(stats.rows_dropped)
    );
    if let Some((first, last)) = table.date_range() {
        println!("Dataset covers {first} to {last}");
    }
    Ok(())
}

fn run_options(table: &CleanedTable) -> Result<()> {
    for field in [FilterField::Region, FilterField::Category] {
        println!("{}:", field.label());
        for option in selector_options(table, field) {
            println!("  {option}");
        }
    }
    Ok(())
}

fn run_series(
    table: &CleanedTable,
    config: &DashboardConfig,
    kind: SeriesKind,
    args: &SelectionArgs,
    output: Option<&Path>,
) -> Result<()> {
    let view = view_for(table, config, args);
    let csv = match kind {
        SeriesKind::Time => export::time_series_csv(&view.sales_over_time)?,
        SeriesKind::Region => export::region_csv(&view.sales_by_region)?,
        SeriesKind::Scatter => export::scatter_csv(&view.discount_profit)?,
        SeriesKind::Monthly => export::monthly_csv(&view.sales_by_month)?,
    };
    emit(output, &csv)
}

fn run_forecast_cmd(
    table: &CleanedTable,
    config: &DashboardConfig,
    horizon: Option<u32>,
    args: &SelectionArgs,
    output: Option<&Path>,
) -> Result<()> {
    let horizon = match horizon {
        Some(days) => ForecastHorizon::try_new(days)?,
        None => ForecastHorizon::new(config.forecast.default_horizon),
    };
    let view = view_for(table, config, args);
    let mut model = SeasonalTrendModel::new();

    match run_gated(&view.forecast_gate, horizon, &mut model)? {
        ForecastOutcome::Forecast(forecast) => emit(output, &forecast.to_csv()?),
        ForecastOutcome::Skipped {
            distinct_dates,
            required,
        } => {
            eprintln!("{INSUFFICIENT_DATA_MESSAGE}");
            eprintln!("({distinct_dates} distinct dates, {required} required)");
            Ok(())
        }
    }
}

fn run_evaluate(
    table: &CleanedTable,
    config: &DashboardConfig,
    holdout: Option<usize>,
    args: &SelectionArgs,
) -> Result<()> {
    let holdout = holdout.unwrap_or(config.forecast.holdout_days);
    let view = view_for(table, config, args);
    let series = match &view.forecast_gate {
        ForecastGate::Ready(input) => &input.rows,
        ForecastGate::InsufficientData { .. } => {
            eprintln!("{INSUFFICIENT_DATA_MESSAGE}");
            return Ok(());
        }
    };

    let mut model = SeasonalTrendModel::new();
    let metrics = evaluate_holdout(&mut model, series, holdout)
        .with_context(|| format!("evaluating with a {holdout}-day holdout"))?;

    println!("Model:   {}", model.name());
    println!("Holdout: {} days", metrics.holdout);
    println!("MAE:     {}", format_money(metrics.mae));
    println!("RMSE:    {}", format_money(metrics.rmse));
    match metrics.mape {
        Some(mape) => println!("MAPE:    {mape:.2}%"),
        None => println!("MAPE:    n/a (all actuals zero)"),
    }

    if let Some((slope, weekday)) = model.components() {
        println!();
        println!("Trend:   {} per day", format_money(slope));
        for (name, effect) in WEEKDAYS.iter().zip(weekday) {
            println!("  {name}  {:>12}", format_money(effect));
        }
    }
    Ok(())
}

fn run_export(
    table: &CleanedTable,
    config: &DashboardConfig,
    format: ExportFormat,
    output: &Path,
    args: &SelectionArgs,
) -> Result<()> {
    let view = view_for(table, config, args);
    match format {
        ExportFormat::Csv => emit(Some(output), &export::records_csv(&view.filtered)?)?,
        ExportFormat::Json => emit(Some(output), &export::records_json(&view.filtered)?)?,
        ExportFormat::Parquet => {
            export::write_parquet(&view.filtered, output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), rows = view.filtered.len(), "parquet written");
        }
    }
    println!(
        "Exported {} orders to {}",
        format_count(view.filtered.len()),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn selection_defaults_to_all() {
        let cli = Cli::try_parse_from(["salesdash", "summary"]).unwrap();
        match cli.command {
            Commands::Summary { selection, json } => {
                assert_eq!(selection.selection(), FilterSelection::all());
                assert!(!json);
            }
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "salesdash",
            "series",
            "--kind",
            "monthly",
            "--region",
            "East",
            "--data",
            "orders.csv",
        ])
        .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("orders.csv")));
        match cli.command {
            Commands::Series { kind, selection, .. } => {
                assert_eq!(kind, SeriesKind::Monthly);
                assert_eq!(selection.region, "East");
            }
            _ => panic!("expected series"),
        }
    }

    #[test]
    fn export_requires_format_and_output() {
        assert!(Cli::try_parse_from(["salesdash", "export", "--format", "csv"]).is_err());
        assert!(Cli::try_parse_from(["salesdash", "export", "--format", "xml", "--output", "x"])
            .is_err());
    }
}
