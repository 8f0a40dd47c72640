use std::{env, fs};

use anyhow::{anyhow, bail, Context, Result};
use mybento::config::load_or_default;
use mybento::model::{Block, LayoutType, Profile};
use mybento::plan::{PlanOptions, RenderPlan};
use mybento::render::build_profile_html;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

fn main() -> Result<()> {
    init_logging();
    let args = CliArgs::parse()?;
    let config = load_or_default()?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read profile document {}", args.input))?;
    let document: ProfileDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed profile document {}", args.input))?;

    let layout = match args.layout.as_deref() {
        Some(tag) => tag.parse::<LayoutType>()?,
        None => document
            .profile
            .layout_or(config.rendering.default_layout)
            .with_context(|| format!("Profile @{} has an invalid layout", document.profile.username))?,
    };
    tracing::debug!(layout = %layout, blocks = document.blocks.len(), "rendering profile");

    let plan = RenderPlan::build(&document.blocks, &PlanOptions::from_config(layout, &config));
    match args.format {
        OutputFormat::Json => println!("{}", plan.to_json()?),
        OutputFormat::Html => print!("{}", build_profile_html(&document.profile, &plan)),
    }
    Ok(())
}

#[derive(Deserialize)]
struct ProfileDocument {
    profile: Profile,
    #[serde(default)]
    blocks: Vec<Block>,
}

enum OutputFormat {
    Json,
    Html,
}

struct CliArgs {
    input: String,
    layout: Option<String>,
    format: OutputFormat,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut input = None;
        let mut layout = None;
        let mut format = OutputFormat::Json;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => {
                    let value = args.next().context("Expected a file path after --input")?;
                    input = Some(value);
                }
                "--layout" => {
                    let value = args
                        .next()
                        .context("Expected list, grid or bento after --layout")?;
                    layout = Some(value);
                }
                "--format" => {
                    let value = args.next().context("Expected json or html after --format")?;
                    format = match value.as_str() {
                        "json" => OutputFormat::Json,
                        "html" => OutputFormat::Html,
                        other => bail!("Unknown format '{other}'; expected json or html"),
                    };
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        let input = input.context("Missing --input <profile.json>. Run with --help for usage.")?;
        Ok(Self {
            input,
            layout,
            format,
        })
    }
}

fn print_usage() {
    println!("MyBento profile renderer");
    println!("Builds the render plan for a profile document and prints it.");
    println!("Usage: cargo run --bin render_profile -- --input <profile.json> [options]");
    println!("Options:");
    println!("  --input <path>         JSON document with `profile` and `blocks`");
    println!("  --layout <tag>         Override the layout");
    println!("  --format <json|html>   Output format (default: json)");
    println!("Layouts:");
    for layout in LayoutType::ALL {
        let info = layout.info();
        println!("  {:<8} {} ({})", layout.as_str(), info.name, info.description);
    }
    println!("Set MYBENTO_LOG=debug for diagnostics on stderr.");
}

fn init_logging() {
    let level = env::var("MYBENTO_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
