use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "smoke-cli")]
#[command(about = "Management CLI for the smoke-test runner", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check runner liveness
    Health,
    /// Start a smoke-test run against a target
    Trigger {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "https")]
        proto: String,
        #[arg(long, default_value = "443")]
        port: String,
        /// Run length, e.g. "30s" or "5m"
        #[arg(long)]
        duration: String,
        #[arg(long)]
        threads: Option<u32>,
        /// Dataset of paths to poll
        #[arg(long)]
        service: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Trigger {
            host,
            proto,
            port,
            duration,
            threads,
            service,
        } => {
            let mut query = vec![
                ("HOST", host),
                ("PROTO", proto),
                ("PORT", port),
                ("DURATION", duration),
            ];
            if let Some(threads) = threads {
                query.push(("THREADS", threads.to_string()));
            }
            if let Some(service) = service {
                query.push(("SERVICE", service));
            }

            let res = client
                .post(format!("{}/smoke-test", cli.url))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: runner returned status {}", status);
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", body),
    }
    Ok(())
}
