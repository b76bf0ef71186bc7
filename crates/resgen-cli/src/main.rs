mod inspect;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use resgen_core::config::{self, CONFIG_FILE_NAME, ResgenConfig};
use resgen_core::roots::{self, ResourceRoot};
use resgen_core::{EmitterRegistry, Generator};
use resgen_java::JavaProvider;
use resgen_kotlin::KotlinProvider;

use crate::inspect::SummaryProvider;

#[derive(Parser)]
#[command(name = "resgen", about = "Resource constant generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate resource types for a project
    Generate {
        /// Project directory containing `src/<source-set>/resources`
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Resource root to generate instead of discovered ones (repeatable)
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,

        /// Emitter to use, overriding the config file
        #[arg(short, long)]
        emitter: Option<String>,

        /// Output directory, overriding the config file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the types and constants a resource root would produce
    Inspect {
        /// Resource root to inspect
        #[arg(short, long)]
        root: PathBuf,

        /// Module name, defaults to the root's parent directory name
        #[arg(short, long)]
        module: Option<String>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new resgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            project,
            roots,
            emitter,
            output,
        } => cmd_generate(&project, roots, emitter, output),

        Commands::Inspect {
            root,
            module,
            format,
        } => cmd_inspect(root, module, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "resgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the config file from the given directory.
fn try_load_config(dir: &Path) -> Result<Option<ResgenConfig>> {
    Ok(config::load_config(&dir.join(CONFIG_FILE_NAME))?)
}

fn builtin_registry() -> EmitterRegistry {
    let mut registry = EmitterRegistry::new();
    registry.register(Box::new(JavaProvider));
    registry.register(Box::new(KotlinProvider));
    registry
}

fn cmd_generate(
    project: &Path,
    root_args: Vec<PathBuf>,
    emitter: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut file_config = try_load_config(project)?.unwrap_or_default();
    if let Some(emitter) = emitter {
        file_config.emitter = emitter;
    }
    if let Some(output) = output {
        file_config.output = output;
    }
    file_config.output = project.join(&file_config.output);

    let roots: Vec<ResourceRoot> = if !root_args.is_empty() {
        root_args.into_iter().map(ResourceRoot::new).collect()
    } else if !file_config.roots.is_empty() {
        file_config.resource_roots(project)
    } else {
        roots::discover(project)
            .with_context(|| format!("failed to discover resources in {}", project.display()))?
    };

    let config = file_config.into_generator_config()?;
    let registry = builtin_registry();
    let provider = registry.get(config.emitter()).with_context(|| {
        format!(
            "available emitters: {}",
            registry.ids().collect::<Vec<_>>().join(", ")
        )
    })?;

    log::debug!("resource roots: {roots:?}");
    if roots.is_empty() {
        eprintln!("No resource roots found in {}", project.display());
        return Ok(());
    }

    eprintln!(
        "Generating {} → {}",
        provider.id(),
        config.output_dir().display()
    );
    let report = Generator::new(&config, provider).run(&roots);

    for path in &report.generated {
        eprintln!("  wrote {}", path.display());
    }
    for root in &report.skipped {
        eprintln!("  skipped {} (missing, empty or excluded)", root.path.display());
    }
    for failure in &report.failures {
        eprintln!("  failed {}: {}", failure.root.path.display(), failure.error);
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} resource roots failed",
            report.failures.len(),
            roots.len()
        );
    }

    eprintln!("Generated {} files", report.generated.len());
    Ok(())
}

fn cmd_inspect(root: PathBuf, module: Option<String>, format: InspectFormat) -> Result<()> {
    let config = try_load_config(Path::new("."))?
        .unwrap_or_default()
        .into_generator_config()?;

    let root = match module {
        Some(module) => ResourceRoot::with_module(root, module),
        None => ResourceRoot::new(root),
    };

    let Some(file) = Generator::new(&config, &SummaryProvider).render(&root)? else {
        eprintln!("{} has no resources", root.path.display());
        return Ok(());
    };

    match format {
        InspectFormat::Yaml => {
            let summary: serde_json::Value = serde_json::from_str(&file.content)?;
            print!("{}", serde_yaml_ng::to_string(&summary)?);
        }
        InspectFormat::Json => println!("{}", file.content),
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
