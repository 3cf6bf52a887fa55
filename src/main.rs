use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scenegen::script::{DEFAULT_QUALITY, DEFAULT_SCENE_CLASS, DEFAULT_SCRIPT_NAME};
use scenegen::{AppConfig, InvocationParams, JobStatus, Quality, RunOptions, SceneLauncher};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenegen", version)]
#[command(about = "Generate a Manim scene script from JSON and render it", long_about = None)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Scene description JSON
    #[arg(long, value_name = "PATH", required = true)]
    input: Option<PathBuf>,

    /// Media directory passed to the renderer
    #[arg(long, value_name = "DIR", required = true)]
    outdir: Option<PathBuf>,

    /// Name of the generated scene class
    #[arg(long, default_value = DEFAULT_SCENE_CLASS)]
    scene_class: String,

    /// File name of the generated script, written next to the input
    #[arg(long, default_value = DEFAULT_SCRIPT_NAME)]
    script_name: String,

    /// Render quality: low, medium or high (anything else renders as low)
    #[arg(long, default_value = DEFAULT_QUALITY)]
    quality: String,

    /// Write the script and print the command without starting the renderer
    #[arg(long)]
    dry_run: bool,

    /// Also copy the renderer's output into this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report progress and rendered videos of a job
    Status {
        /// Media directory the job renders into
        #[arg(value_name = "OUTDIR")]
        outdir: PathBuf,

        /// Renderer log written with --log
        #[arg(long, value_name = "PATH")]
        log: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(Commands::Status { outdir, log, json }) = cli.command {
        let status = JobStatus::collect(&outdir, log.as_deref())?;
        if json {
            println!("{}", serde_json::to_string_pretty(&status)?);
        } else {
            print!("{}", status.summarize());
        }
        return Ok(());
    }

    let config = AppConfig::load().context("Failed to load configuration")?;

    // clap enforces both flags whenever no subcommand is given
    let input = cli.input.context("--input is required")?;
    let outdir = cli.outdir.context("--outdir is required")?;

    let params = InvocationParams {
        input,
        outdir,
        scene_class: cli.scene_class,
        script_name: cli.script_name,
        quality: Quality::from_name_lenient(&cli.quality),
    };
    let options = RunOptions {
        dry_run: cli.dry_run,
        log: cli.log,
    };

    let launcher = SceneLauncher::from_config(&config)?;
    launcher.run(&params, &options)?;

    Ok(())
}
