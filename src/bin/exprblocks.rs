use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "exprblocks", version)]
struct Cli {
    /// Configuration JSON; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the block tree of an expression as JSON.
    Layout(ExprArgs),
    /// List every block with its structural address.
    Addresses(ExprArgs),
    /// Replace the sub-expression of one block and print the new expression.
    Transform(TransformArgs),
    /// Draw an expression as SVG or PNG.
    Render(RenderArgs),
    /// Feed recorded pointer events through a session and print the result as JSON.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct ExprArgs {
    /// Expression text.
    #[arg(long = "expr")]
    expression: String,
}

#[derive(Parser, Debug)]
struct TransformArgs {
    /// Expression text.
    #[arg(long = "expr")]
    expression: String,

    /// Block id (as listed by `addresses`) whose sub-expression is replaced.
    #[arg(long)]
    block: u32,

    /// Replacement expression.
    #[arg(long = "replace")]
    replacement: String,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Expression text.
    #[arg(long = "expr")]
    expression: String,

    /// Output path; `.png` rasterizes, anything else is written as SVG.
    #[arg(long)]
    out: PathBuf,

    /// Raster scale (PNG only).
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Empty space around the block.
    #[arg(long, default_value_t = 8.0)]
    margin: f64,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Script JSON: `{ "expressions": [...], "events": [...] }`.
    #[arg(long)]
    script: PathBuf,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ReplayScript {
    #[serde(default)]
    expressions: Vec<exprblocks::PlacedExpression>,
    events: Vec<exprblocks::PointerEvent>,
}

#[derive(serde::Serialize, Debug)]
struct ReplayReport {
    outcomes: Vec<exprblocks::DropOutcome>,
    expressions: Vec<PlacedEntry>,
}

#[derive(serde::Serialize, Debug)]
struct PlacedEntry {
    id: exprblocks::PlacedId,
    expression: String,
    origin: exprblocks::Point,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => exprblocks::BlocksConfig::from_path(path)?,
        None => exprblocks::BlocksConfig::default(),
    };
    match cli.cmd {
        Command::Layout(args) => cmd_layout(&config, args),
        Command::Addresses(args) => cmd_addresses(&config, args),
        Command::Transform(args) => cmd_transform(&config, args),
        Command::Render(args) => cmd_render(&config, args),
        Command::Replay(args) => cmd_replay(config, args),
    }
}

fn cmd_layout(config: &exprblocks::BlocksConfig, args: ExprArgs) -> anyhow::Result<()> {
    let mut engine = exprblocks::LayoutEngine::from_config(config)?;
    let tree = engine.layout(&args.expression)?;
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

fn cmd_addresses(config: &exprblocks::BlocksConfig, args: ExprArgs) -> anyhow::Result<()> {
    let mut engine = exprblocks::LayoutEngine::from_config(config)?;
    let tree = engine.layout(&args.expression)?;
    for block in tree.iter() {
        let kind = if block.is_leaf() { "leaf" } else { "branch" };
        println!(
            "{}\t{kind}\t{}\t{}",
            block.id.0, block.result_type, block.address
        );
    }
    Ok(())
}

fn cmd_transform(config: &exprblocks::BlocksConfig, args: TransformArgs) -> anyhow::Result<()> {
    let mut engine = exprblocks::LayoutEngine::from_config(config)?;
    let tree = engine.layout(&args.expression)?;
    let block = tree
        .get(exprblocks::BlockId(args.block))
        .with_context(|| format!("no block {} in '{}'", args.block, args.expression))?;
    let out = exprblocks::transform(&args.expression, &block.address, &args.replacement)?;
    println!("{out}");
    Ok(())
}

fn cmd_render(config: &exprblocks::BlocksConfig, args: RenderArgs) -> anyhow::Result<()> {
    let mut engine = exprblocks::LayoutEngine::from_config(config)?;
    let tree = engine.layout(&args.expression)?;
    let svg = exprblocks::to_svg(&exprblocks::tree_scene(
        &tree,
        &config.geometry,
        args.margin,
    ));

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    if is_png(&args.out) {
        let png = exprblocks::svg_to_png(&svg, args.scale)?;
        std::fs::write(&args.out, png)
            .with_context(|| format!("write png '{}'", args.out.display()))?;
    } else {
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_replay(config: exprblocks::BlocksConfig, args: ReplayArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let script: ReplayScript = serde_json::from_str(&raw)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;

    let mut session = exprblocks::Session::new(config)?;
    for placed in script.expressions {
        session.add_expression(placed.expression, placed.origin)?;
    }
    let mut outcomes = Vec::new();
    for event in script.events {
        if let Some(outcome) = session.dispatch(event)? {
            outcomes.push(outcome);
        }
    }

    let report = ReplayReport {
        outcomes,
        expressions: session
            .expressions()
            .iter()
            .map(|(id, p)| PlacedEntry {
                id,
                expression: p.expression.clone(),
                origin: p.origin,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
