mod agent_commands;
mod apply_commands;
mod config_commands;

use std::path::{Path, PathBuf};

use {
    clap::{Parser, Subcommand},
    loom_config::LoomConfig,
    loom_skills::FsSkillDiscoverer,
    tracing::{debug, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "loom", about = "Loom — built-in agent registration for multi-agent hosts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to use instead of searching the project and user config directories.
    #[arg(long, global = true, env = "LOOM_CONFIG")]
    config: Option<PathBuf>,

    /// Project root: searched for `loom.*`, `.loom/skills/` and plan files.
    #[arg(long, global = true, env = "LOOM_PROJECT_DIR")]
    project_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register built-in agents and commands, then print the composed config.
    Compose {
        /// Write to this file instead of stdout (format from the extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Stdout format: json, toml or yaml.
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// List agents in the composed config with their capabilities.
    Agents,
    /// List the skill catalog: discovered skills, then built-in ones.
    Skills,
    /// Validate the composed config, including the delegation rule.
    Validate {
        /// Show informational diagnostics in addition to errors and warnings.
        #[arg(long)]
        verbose: bool,
    },
    /// Hand `plan-<request>.md` to the exec agent.
    Apply {
        /// Plan name; resolves to `plan-<request>.md`.
        request: String,
        /// Directory holding plan files (defaults to the project dir).
        #[arg(long)]
        plan_dir: Option<PathBuf>,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Shared inputs resolved from the global flags.
pub(crate) struct Workspace {
    pub project_dir: PathBuf,
    pub config_path: Option<PathBuf>,
}

impl Workspace {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let project_dir = match &cli.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let config_path = cli
            .config
            .clone()
            .or_else(|| loom_config::find_config_file(&project_dir));
        Ok(Self {
            project_dir,
            config_path,
        })
    }

    /// Load the host config. Defaults apply only when no config file exists;
    /// a file that fails to parse is an error.
    pub fn load_config(&self) -> anyhow::Result<LoomConfig> {
        match &self.config_path {
            Some(path) => Ok(loom_config::load_config(path)?),
            None => Ok(LoomConfig::default()),
        }
    }

    pub fn discoverer(&self) -> FsSkillDiscoverer {
        FsSkillDiscoverer::new(FsSkillDiscoverer::default_paths(&self.project_dir))
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    let workspace = Workspace::from_cli(&cli)?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        project_dir = %workspace.project_dir.display(),
        config = ?workspace.config_path,
        "loom starting"
    );

    match cli.command {
        Commands::Compose { output, format } => {
            let mut config = workspace.load_config()?;
            agent_commands::compose(&workspace, &mut config).await?;
            match output {
                Some(path) => {
                    loom_config::write_config(&config, &path)?;
                    info!(path = %path.display(), "composed config written");
                },
                None => println!("{}", loom_config::render_config(&config, &format)?),
            }
            Ok(())
        },
        Commands::Agents => {
            let mut config = workspace.load_config()?;
            agent_commands::list_agents(&workspace, &mut config).await
        },
        Commands::Skills => handle_skills(&workspace).await,
        Commands::Validate { verbose } => config_commands::check(&workspace, verbose).await,
        Commands::Apply { request, plan_dir } => {
            let dir = plan_dir.unwrap_or_else(|| workspace.project_dir().to_path_buf());
            apply_commands::handle_apply(&dir, &request).await
        },
    }
}

async fn handle_skills(workspace: &Workspace) -> anyhow::Result<()> {
    let skills = loom_agents::skill_catalog(&workspace.discoverer()).await;
    if skills.is_empty() {
        println!("No skills found.");
        return Ok(());
    }
    for skill in &skills {
        println!(
            "  {} — {} [{}, {:?}]",
            skill.name,
            skill.description.as_deref().unwrap_or("(no description)"),
            skill.location,
            skill.provenance,
        );
        println!("      {}", skill.path);
    }
    Ok(())
}
