//! gamekit CLI - Project scaffolding for game templates

use anyhow::Result;
use clap::{Parser, Subcommand};
use gamekit_core::tui::CreateArgs;
use gamekit_core::ProductConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// gamekit product configuration
#[derive(Clone)]
pub struct GamekitConfig;

impl ProductConfig for GamekitConfig {
    fn name(&self) -> &'static str {
        "gamekit"
    }

    fn display_name(&self) -> &'static str {
        "gamekit"
    }

    fn template_dir_env(&self) -> &'static str {
        "GAMEKIT_TEMPLATE_DIR"
    }

    fn template_url_env(&self) -> &'static str {
        "GAMEKIT_TEMPLATE_URL"
    }

    fn next_steps(&self, project_dir: &Path, seed: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(project_dir) {
            steps.push(format!("cd {}", project_dir.display()));
        }

        // Step 2: Start from the seeded screen
        steps.push(format!("Open {} to start writing game logic", seed.display()));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "gamekit")]
#[command(about = "CLI for scaffolding game projects from templates")]
#[command(version)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new game project
    Create(CliCreateArgs),
    /// Build zip files for all templates in the template directory (for development use)
    BuildZips(BuildZipsArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory holding template.yaml and the template zips
    #[arg(long = "template-dir", conflicts_with = "template_url")]
    pub template_dir: Option<PathBuf>,

    /// Remote base URL holding template.yaml and the template zips
    #[arg(long = "template-url")]
    pub template_url: Option<String>,

    /// Template id to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Package id, e.g. com.example.mygame
    #[arg(short, long)]
    pub package: Option<String>,

    /// Directory the project folder is created in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template_url: args.template_url,
            template: args.template,
            name: args.name,
            package: args.package,
            directory: args.directory,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BuildZipsArgs {
    /// Local directory containing templates to build zips from (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    let config = GamekitConfig;

    // Handle subcommands
    match args.command {
        Some(Command::BuildZips(build_args)) => {
            gamekit_core::templates::build_zips(&config, build_args.template_dir.as_deref())?;
            Ok(())
        }
        command => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = match command {
                Some(Command::Create(create_args)) => create_args.into(),
                _ => CreateArgs::default(),
            };
            let result = gamekit_core::run(&config, create_args).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
