use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod cli;
mod config;
mod error;
mod locator;
mod mirror;
mod util;
mod validator;

#[derive(Parser)]
#[command(name = "skillpack", version)]
#[command(about = "Install and validate packaged agent skill bundles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the skill bundle into .claude/skills/
    Install {
        /// Install into the current project instead of the home directory
        #[arg(short = 'p', long)]
        project: bool,

        /// Overwrite an existing installation
        #[arg(short = 'f', long)]
        force: bool,

        /// Path to config file (defaults to ./skillpack.toml or ~/.config/skillpack/config.toml)
        #[arg(long)]
        config: Option<String>,
    },

    /// Validate the bundle structure, manifest, and package descriptor
    Validate {
        /// Bundle root (defaults to ./<skill-name>)
        #[arg(long)]
        bundle: Option<String>,

        /// Path to config file
        #[arg(long)]
        config: Option<String>,
    },

    /// Run the package self-test checks
    Test {
        /// Package root (defaults to the current directory)
        #[arg(long)]
        package_root: Option<String>,

        /// Path to config file
        #[arg(long)]
        config: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Initialize logging; human-facing output stays on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Install {
            project,
            force,
            config,
        } => {
            cli::install::run(project, force, config)?;
        }
        Commands::Validate { bundle, config } => {
            cli::validate::run(bundle, config)?;
        }
        Commands::Test {
            package_root,
            config,
        } => {
            cli::selftest::run(package_root, config)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
