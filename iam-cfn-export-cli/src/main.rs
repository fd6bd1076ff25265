use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use iam_cfn_export_core::{AwsOptions, ExportService, NamingMode, ResourceKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Render IAM groups, customer-managed policies or roles of an AWS account as a
/// CloudFormation template on standard output.
#[derive(Parser, Debug)]
#[command(name = "iam-cfn-export", version, about, long_about = None)]
struct Cli {
    /// Resource kind to export
    #[arg(value_enum)]
    kind: KindArg,

    /// How template logical ids and managed policy names are derived
    #[arg(long, value_enum, default_value_t = NamingArg::Sanitized)]
    naming: NamingArg,

    /// Seed for the random managed policy name suffixes (reproducible output)
    #[arg(long)]
    seed: Option<u64>,

    /// AWS region, overriding the default configuration chain
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Named AWS profile to load credentials and configuration from
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Groups,
    Policies,
    Roles,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Groups => Self::Groups,
            KindArg::Policies => Self::Policies,
            KindArg::Roles => Self::Roles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NamingArg {
    /// Key resources by their IAM names
    Plain,
    /// Alphanumeric logical ids and randomly suffixed policy names
    Sanitized,
}

impl From<NamingArg> for NamingMode {
    fn from(naming: NamingArg) -> Self {
        match naming {
            NamingArg::Plain => Self::Plain,
            NamingArg::Sanitized => Self::Sanitized,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let options = AwsOptions {
        region: cli.region,
        profile: cli.profile,
    };
    let service = ExportService::new(&options)
        .await
        .context("Failed to initialize IAM client")?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let kind = ResourceKind::from(cli.kind);
    // Render into memory first so a failure never leaves a partial template on stdout.
    let mut template = Vec::new();
    service
        .export_template(kind, cli.naming.into(), &mut rng, &mut template)
        .await
        .with_context(|| format!("Failed to export IAM {kind}"))?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&template)
        .and_then(|()| stdout.flush())
        .context("Failed to write template to stdout")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("{cli:?}");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
