use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use erdflow::highlight::Trigger;
use erdflow::layout::{LayoutEngine, LayoutSettings};
use erdflow::measure::TextMetrics;
use erdflow::schema::Schema;
use erdflow::session::DiagramSession;
use erdflow::svg::SvgRenderer;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Json,
}

/// Lay out an ER diagram from schema JSON
#[derive(Debug, Parser)]
#[command(name = "erdflow", version)]
struct Cli {
    /// Schema JSON with `tables` and `relations`
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "svg")]
    format: Format,

    /// Table to render as hovered
    #[arg(long)]
    hover: Option<String>,

    /// Table to render as selected
    #[arg(long)]
    select: Option<String>,

    /// Layout settings JSON; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("ERDFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("erdflow=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            LayoutSettings::from_json(&source)?
        }
        None => LayoutSettings::default(),
    };

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let schema = Schema::from_json(&input)?;

    let mut session = DiagramSession::new(LayoutEngine::new(settings), TextMetrics::default());
    session.load(&schema);
    session.set_trigger(Trigger {
        active: cli.select,
        hover: cli.hover,
    });

    info!(
        tables = session.nodes().len(),
        relations = session.edges().len(),
        components = session.layout().components.len(),
        "layout complete"
    );

    let rendered = match cli.format {
        Format::Svg => SvgRenderer::default().render(session.nodes(), session.edges()),
        Format::Json => serde_json::to_string_pretty(&session.snapshot())?,
    };

    match cli.output {
        Some(path) => fs::write(&path, &rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
