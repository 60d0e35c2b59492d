use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wgstatus::{export, render, Settings, StatusClient};

#[derive(Parser, Debug)]
#[command(name = "wgstatus")]
#[command(about = "World of Tanks server status from wgstatus.com")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Status API endpoint (overrides settings)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides settings)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Fail on any malformed record instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Show the servers of the cluster at this index
    #[arg(long, conflicts_with = "export")]
    cluster: Option<usize>,

    /// Also print the XVM ranking group
    #[arg(long)]
    ranking: bool,

    /// Export the snapshot to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if self.strict {
            settings.strict = true;
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    init_logging(&settings.log_level);

    let client = StatusClient::new(settings.transport()?).with_policy(settings.policy());

    let rt = tokio::runtime::Runtime::new()?;
    let snapshot = match rt.block_on(client.collect()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Status poll failed: {}", e);
            println!("{}", render::failure());
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(path) = &args.export {
        export::write(path, &snapshot)?;
        println!("Exported status snapshot to: {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let text = match args.cluster {
        Some(index) => match snapshot.cluster(index) {
            Some(cluster) => render::cluster_detail(cluster),
            None => {
                eprintln!("{}", render::cluster_not_found(index, snapshot.len()));
                return Ok(ExitCode::FAILURE);
            }
        },
        None => render::overview(&snapshot),
    };
    println!("{}", text);

    if args.ranking {
        match snapshot.ranking_group() {
            Some(group) => println!("\n{}", render::ranking(group)),
            None => println!("\n{}", wgstatus_types::UNAVAILABLE),
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr so stdout carries only the rendered status.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
