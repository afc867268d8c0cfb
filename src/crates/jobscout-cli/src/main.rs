//! # jobscout
//!
//! Command-line interface over the jobscout task library. Persisted
//! settings provide the model configuration; flags override it for one
//! invocation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobscout_core::{classify, SearchFilters};
use jobscout_llm::{catalog, GlobalSettings, Provider};
use jobscout_store::SettingsStore;
use jobscout_tasks::{generate_job_dork, Assistant, TaskError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "AI-assisted job search from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Override the configured provider for this invocation
    #[arg(long, global = true)]
    provider: Option<Provider>,

    /// Override the configured model for this invocation
    #[arg(long, global = true)]
    model: Option<String>,

    /// Override the configured API key for this invocation
    #[arg(long, global = true, env = "JOBSCOUT_API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the models a provider offers
    Models {
        /// Provider to query (defaults to the configured one)
        name: Option<Provider>,
    },

    /// Search the live web for job postings
    Search {
        /// Search query
        query: String,

        /// Restrict to locations (repeatable)
        #[arg(short, long)]
        location: Vec<String>,
    },

    /// Extract a job posting's details from its URL
    Extract {
        /// Posting URL
        url: String,
    },

    /// Build a deterministic job-board dork for a known job
    Dork {
        /// Job title, quoted exactly
        title: String,

        /// Company name, quoted exactly
        company: String,
    },

    /// Generate a job-search query from a resume file
    Query {
        /// Path to a plain-text resume
        resume: std::path::PathBuf,

        /// Produce a search-engine dork instead of a plain query
        #[arg(long)]
        dork: bool,
    },

    /// Generate a tailored resume document from a resume file
    Tailor {
        /// Path to a plain-text resume
        resume: std::path::PathBuf,

        /// Output format: latex or html
        #[arg(short, long, default_value = "latex")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = SettingsStore::new().load().await;
    apply_overrides(&mut settings, &cli);

    match cli.command {
        Commands::Models { name } => {
            let config = settings.effective(None);
            let provider = name.unwrap_or(config.provider);
            let models =
                catalog::list_models(provider, &config.api_key, config.base_url.as_deref()).await;

            if models.is_empty() {
                println!("No models listed for {}.", provider);
                return Ok(());
            }
            for model in models {
                let free = match model.is_free {
                    Some(true) => " [free]",
                    _ => "",
                };
                let vision = if model.supports_vision { " [vision]" } else { "" };
                println!("{}{}{}", model.id, free, vision);
            }
        }

        Commands::Search { query, location } => {
            let assistant = Assistant::new(settings);
            let filters = SearchFilters {
                locations: location,
                ..SearchFilters::default()
            };
            let jobs = assistant
                .search_jobs(&query, &filters)
                .await
                .map_err(surface)?;
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }

        Commands::Extract { url } => {
            let assistant = Assistant::new(settings);
            let job = assistant.extract_job(&url).await.map_err(surface)?;
            println!("{}", serde_json::to_string_pretty(&job)?);
        }

        Commands::Dork { title, company } => {
            println!("{}", generate_job_dork(&title, &company));
        }

        Commands::Query { resume, dork } => {
            let content = std::fs::read_to_string(&resume)
                .with_context(|| format!("reading {}", resume.display()))?;
            let assistant = Assistant::new(settings);
            let query = if dork {
                assistant.dork_query_from_resume(&content).await
            } else {
                assistant.search_query_from_resume(&content).await
            }
            .map_err(surface)?;
            println!("{query}");
        }

        Commands::Tailor { resume, format } => {
            let content = std::fs::read_to_string(&resume)
                .with_context(|| format!("reading {}", resume.display()))?;
            let name = resume
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "resume".to_string());
            let record = jobscout_core::Resume::new(name, content);

            let assistant = Assistant::new(settings);
            let document = match format.as_str() {
                "latex" => assistant.latex_resume(&record, None).await.map_err(surface)?,
                "html" => assistant.html_resume(&record, None).await.map_err(surface)?,
                other => anyhow::bail!("unknown format '{other}' (expected latex or html)"),
            };
            println!("{document}");
        }
    }

    Ok(())
}

/// Turn a task failure into the message shown to the user: the
/// classified kind's advice first, the raw cause behind it.
fn surface(error: TaskError) -> anyhow::Error {
    let raw = error.to_string();
    let kind = classify(&raw);
    anyhow::anyhow!("{} ({raw})", kind.user_message())
}

/// Fold one-shot flag overrides into the loaded settings. Flags change
/// the defaults only; stored per-task overrides are left alone unless a
/// provider or model flag is present, in which case they are cleared so
/// the flags win everywhere.
fn apply_overrides(settings: &mut GlobalSettings, cli: &Cli) {
    if cli.provider.is_some() || cli.model.is_some() {
        settings.overrides.clear();
    }
    if let Some(provider) = cli.provider {
        settings.defaults.provider = provider;
        settings.defaults.base_url = None;
    }
    if let Some(model) = &cli.model {
        settings.defaults.model = model.clone();
    }
    if let Some(api_key) = &cli.api_key {
        settings.defaults.api_key = api_key.clone();
        for config in settings.overrides.values_mut() {
            config.api_key = api_key.clone();
        }
    }
}
