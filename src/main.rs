use anyhow::{Context, Result};
use barchart::csv_reader::{self, SeriesColumns};
use barchart::palette::ColorPalette;
use barchart::{aggregate, compile_layout, report, LayoutConfig};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "barchart")]
#[command(about = "Lay out a grouped bar chart from CSV data", long_about = None)]
struct Args {
    #[arg(help = "CSV file to read (reads stdin when omitted)")]
    input: Option<PathBuf>,

    #[arg(short = 'l', long = "label", default_value = "label", help = "Label column (name or 0-based index)")]
    label_column: String,

    #[arg(
        short = 'v',
        long = "value",
        default_value = "value",
        help = "Value column; repeat to read one series per column"
    )]
    value_columns: Vec<String>,

    #[arg(short = 's', long = "series", help = "Column naming the series of each row")]
    series_column: Option<String>,

    #[arg(short = 'c', long = "color", help = "Column holding each series' color")]
    color_column: Option<String>,

    #[arg(long = "bar-width", default_value = "0.8", help = "Fraction of each label slot covered by bars")]
    bar_width: f64,

    #[arg(long = "axis-label", help = "Caption for the value axis (defaults to the value column header)")]
    axis_label: Option<String>,

    #[arg(short = 'f', long = "format", value_enum, default_value = "table", help = "Output format")]
    format: OutputFormat,

    #[arg(long = "verbose", help = "Log pipeline details to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let csv_data = match &args.input {
        Some(path) => csv_reader::read_csv_from_path(path)?,
        None => csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")?,
    };

    let columns = SeriesColumns {
        label: csv_reader::parse_column_selector(&args.label_column),
        values: args
            .value_columns
            .iter()
            .map(|v| csv_reader::parse_column_selector(v))
            .collect(),
        series: args.series_column.as_deref().map(csv_reader::parse_column_selector),
        color: args.color_column.as_deref().map(csv_reader::parse_column_selector),
    };

    let series = csv_reader::build_series(&csv_data, &columns, &ColorPalette::category10())
        .context("Failed to build series")?;

    let model = aggregate(&series).context("Failed to aggregate series")?;

    // Wide input has one value column per series, so no single header fits the axis
    let axis_label = match (&args.axis_label, columns.values.as_slice()) {
        (Some(label), _) => Some(label.clone()),
        (None, [value]) => Some(csv_reader::resolve_column(&csv_data, value)?.1),
        (None, _) => None,
    };

    let config = LayoutConfig {
        bar_width: args.bar_width,
        axis_label,
    };
    let scene = compile_layout(&model, &config).context("Failed to compile layout")?;

    let output = match args.format {
        OutputFormat::Table => report::to_table(&scene),
        OutputFormat::Json => report::to_json(&model, &scene)?,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output.as_bytes())
        .context("Failed to write output to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
