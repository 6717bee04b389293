use clap::{Parser, Subcommand};
use serde::Serialize;

use cloudscope::domain::AwsCredentials;
use cloudscope::infrastructure::logging::{init_logging, LoggingConfig};
use cloudscope::{build_engine, AppConfig};

#[derive(Parser)]
#[command(name = "cloudscope", about = "Region-aware AWS cost attribution")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the enabled-by-default regions for the account
    Regions,
    /// Evict the cached region set for the account
    InvalidateRegions,
    /// Attribute costs per service over the trailing window
    Costs {
        /// Pin a single Cost Explorer service name (cached per bucket)
        #[arg(long)]
        service: Option<String>,
    },
    /// List EC2 instances across the enabled regions, with costs
    Instances,
    /// List EBS volumes across the enabled regions, with costs
    Volumes,
    /// List reserved EC2 capacity across the enabled regions
    Reserved,
    /// List S3 buckets with regions and costs
    Buckets,
    /// List objects in one bucket
    Objects {
        #[arg(long)]
        bucket: String,
        /// Region the bucket lives in
        #[arg(long)]
        region: String,
    },
}

fn credentials_from_env() -> anyhow::Result<AwsCredentials> {
    let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
        .map_err(|_| anyhow::anyhow!("AWS_ACCESS_KEY_ID environment variable is required"))?;
    let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
        .map_err(|_| anyhow::anyhow!("AWS_SECRET_ACCESS_KEY environment variable is required"))?;
    let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    Ok(AwsCredentials::new(access_key_id, secret_access_key, region))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_default();

    init_logging(&LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    let engine = build_engine(&config);
    let credentials = credentials_from_env()?;

    match cli.command {
        Command::Regions => {
            let regions = engine.regions.fetch_regions(&credentials).await?;
            print_json(&regions)?;
        }
        Command::InvalidateRegions => {
            let existed = engine.regions.invalidate(&credentials).await?;
            print_json(&serde_json::json!({ "evicted": existed }))?;
        }
        Command::Costs { service } => match service {
            Some(service) => {
                let summaries = engine.costs.service_cost(&credentials, &service).await?;
                print_json(&summaries)?;
            }
            None => {
                let summaries = engine.costs.all_service_costs(&credentials).await?;
                print_json(&summaries)?;
            }
        },
        Command::Instances => {
            let instances = engine.ec2.list_instances(&credentials).await?;
            print_json(&instances)?;
        }
        Command::Volumes => {
            let volumes = engine.ec2.list_volumes(&credentials).await?;
            print_json(&volumes)?;
        }
        Command::Reserved => {
            let reservations = engine.ec2.list_reserved_capacity(&credentials).await?;
            print_json(&reservations)?;
        }
        Command::Buckets => {
            let inventory = engine.s3.list_buckets(&credentials).await?;
            print_json(&inventory)?;
        }
        Command::Objects { bucket, region } => {
            let inventory = engine.s3.list_objects(&credentials, &bucket, &region).await?;
            print_json(&inventory)?;
        }
    }

    Ok(())
}
