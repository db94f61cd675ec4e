mod api;
mod audit;
mod config;
mod config_wizard;
mod credentials;
mod error;
mod instances;
mod models;
mod report;
mod updates;

use anyhow::Result;
use api::SplunkClient;
use audit::AuditSummary;
use clap::{Parser, Subcommand};
use config::Config;
use credentials::Credentials;
use instances::InstanceSource;
use secrecy::SecretString;
use simplelog::*;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "splunk-app-audit")]
#[command(
    about = "Report installed Splunk apps that have updates available",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Audit a single instance, e.g. https://splunk-instance:8089
    #[arg(long, conflicts_with = "instances_file")]
    instance: Option<String>,

    /// Audit every instance listed in a file, one URL per line
    #[arg(short = 'f', long)]
    instances_file: Option<PathBuf>,

    /// Splunk username (prompted for when not given)
    #[arg(short, long)]
    username: Option<String>,

    /// Verify TLS certificates on the management port
    #[arg(long)]
    verify_tls: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    #[arg(long, default_value = "splunk_app_audit.log")]
    log_file: PathBuf,

    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn source(&self) -> Option<InstanceSource> {
        if let Some(instance) = &self.instance {
            return Some(InstanceSource::Single(instance.clone()));
        }
        self.instances_file.clone().map(InstanceSource::File)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if self.verify_tls {
            config.verify_tls = true;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configuration wizard
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config) = args.command {
        config_wizard::run()?;
        return Ok(());
    }

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = WriteLogger::init(
        level,
        simplelog::Config::default(),
        File::create(&args.log_file)?,
    );
    log::info!("Application started");

    dotenv::dotenv().ok();
    let mut config = Config::load()?;
    args.apply(&mut config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let password = std::env::var("SPLUNK_PASSWORD").ok().map(SecretString::from);
    check_instances(args.source(), &config, password, &mut input, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Resolves the instances, collects credentials and audits each instance.
/// Returns `None` when there was nothing to audit, before any request is made.
async fn check_instances<R: BufRead, W: Write>(
    source: Option<InstanceSource>,
    config: &Config,
    password: Option<SecretString>,
    input: &mut R,
    out: &mut W,
) -> Result<Option<AuditSummary>> {
    let source = match source {
        Some(source) => Some(source),
        None => instances::prompt_source(input, out)?,
    };
    let instances = match &source {
        Some(source) => instances::resolve(source, out)?,
        None => Vec::new(),
    };

    if instances.is_empty() {
        log::warn!("No instances to audit");
        report::no_instances(out)?;
        return Ok(None);
    }

    let credentials = Credentials::collect(input, out, config.username.clone(), password)?;

    log::info!(
        "Auditing {} instance(s) as {} (verify_tls={}, timeout={:?})",
        instances.len(),
        credentials.username,
        config.verify_tls,
        config.timeout()
    );
    let client = SplunkClient::new(credentials, config.verify_tls, config.timeout())?;
    let summary = audit::run(&client, &instances, out).await?;

    log::info!(
        "Checked {} instance(s): {} failed, {} update(s) available",
        summary.instances,
        summary.failed,
        summary.updates
    );
    report::summary(out, summary.instances, summary.failed, summary.updates)?;
    Ok(Some(summary))
}
