use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stagechart::{ChartSession, ColorStyle, LayoutOverrides};

#[derive(Parser, Debug)]
#[command(name = "stagechart", version)]
struct Cli {
    /// Log more (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a stage document as a PNG chart.
    Render(RenderArgs),
    /// Print what was detected in a stage document.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input stage document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Layout overrides JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tempo list (`time :: bpm` per line).
    #[arg(long)]
    tempo: Option<PathBuf>,

    /// Measure lengths (`measure :: beats` per line).
    #[arg(long)]
    measures: Option<PathBuf>,

    /// Column lengths (`column :: beats` per line).
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Note palette: pink, blue, orange or black.
    #[arg(long)]
    style: Option<ColorStyle>,

    /// Mirror lanes left to right; `--mirror=false` turns off a config file's mirror.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    mirror: Option<bool>,

    /// Constant tempo used when no tempo list is given.
    #[arg(long)]
    bpm: Option<f64>,

    /// Column height in beats.
    #[arg(long)]
    beats_per_column: Option<f64>,

    /// Pickup beats before the first full measure.
    #[arg(long)]
    upbeat: Option<f64>,

    /// Chart start in seconds (detected from the document by default).
    #[arg(long)]
    start: Option<f64>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input stage document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn overrides_from_args(args: &RenderArgs) -> anyhow::Result<LayoutOverrides> {
    let mut overrides = match &args.config {
        Some(path) => LayoutOverrides::from_json_str(&read_text(path, "layout config")?)
            .with_context(|| format!("parse layout config '{}'", path.display()))?,
        None => LayoutOverrides::default(),
    };

    if let Some(path) = &args.tempo {
        let mut tempo = overrides.tempo.take().unwrap_or_default();
        tempo.extend(stagechart::parse_tempo_lines(&read_text(path, "tempo list")?));
        tempo.sort_by(|a, b| a.time.total_cmp(&b.time));
        overrides.tempo = Some(tempo);
    }
    if let Some(path) = &args.measures {
        let mut measures = overrides.measures.take().unwrap_or_default();
        measures.extend(stagechart::parse_measure_lines(&read_text(
            path,
            "measure list",
        )?));
        overrides.measures = Some(measures);
    }
    if let Some(path) = &args.columns {
        let mut columns = overrides.columns.take().unwrap_or_default();
        columns.extend(stagechart::parse_column_lines(&read_text(
            path,
            "column list",
        )?));
        overrides.columns = Some(columns);
    }

    let flags = LayoutOverrides {
        start: args.start,
        base_bpm: args.bpm,
        upbeat: args.upbeat,
        beats_per_column: args.beats_per_column,
        style: args.style,
        mirror: args.mirror,
        ..LayoutOverrides::default()
    };
    Ok(overrides.merged(flags))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = ChartSession::open(&args.in_path)?;
    let overrides = overrides_from_args(&args)?;
    let page = session
        .render(&overrides)
        .with_context(|| format!("render '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    page.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let session = ChartSession::open(&args.in_path)?;
    let doc = session.document()?;
    println!("start: {}", doc.detect_start());
    println!("end: {}", doc.end_time());
    println!("events: {}", doc.events().len());
    match doc.info().max_combo {
        Some(combo) => println!("max combo: {combo}"),
        None => println!("max combo: unknown"),
    }
    Ok(())
}
