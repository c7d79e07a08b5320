use clap::{Parser, Subcommand};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use vigil_core::StatusReport;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Query a running vigil status service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "VIGIL_URL", default_value = "http://127.0.0.1:2114")]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregated health of one or more components
    Health {
        #[arg(short, long = "plugin", required = true)]
        plugins: Vec<String>,
    },
    /// Aggregated readiness of one or more components
    Ready {
        #[arg(short, long = "plugin", required = true)]
        plugins: Vec<String>,
    },
    /// Status of a single component through the side-channel
    Status { name: String },
    /// Readiness of a single component through the side-channel
    Readiness { name: String },
}

#[derive(Debug, Deserialize)]
struct RpcReply {
    name: String,
    report: Option<StatusReport>,
}

impl Commands {
    /// Path and query pairs for the request this command makes.
    fn request(&self) -> (String, Vec<(&'static str, String)>) {
        match self {
            Commands::Health { plugins } => ("/health".to_string(), plugin_pairs(plugins)),
            Commands::Ready { plugins } => ("/ready".to_string(), plugin_pairs(plugins)),
            Commands::Status { name } => (format!("/rpc/status/{name}"), Vec::new()),
            Commands::Readiness { name } => (format!("/rpc/ready/{name}"), Vec::new()),
        }
    }

    fn is_single(&self) -> bool {
        matches!(self, Commands::Status { .. } | Commands::Readiness { .. })
    }
}

fn plugin_pairs(plugins: &[String]) -> Vec<(&'static str, String)> {
    plugins.iter().map(|p| ("plugin", p.clone())).collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (path, query) = cli.command.request();
    let url = format!("{}{}", cli.url.trim_end_matches('/'), path);

    let response = Client::new().get(&url).query(&query).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if cli.command.is_single() && status == StatusCode::OK {
        let reply: RpcReply = serde_json::from_str(&body)?;
        match reply.report {
            Some(report) => {
                println!("{:<20} {}", reply.name, report.code);
                for (key, value) in &report.metadata {
                    println!("  {key}: {value}");
                }
            }
            None => println!("{:<20} unavailable", reply.name),
        }
    } else {
        if !body.is_empty() {
            println!("{}", body.trim_end());
        }
        println!("HTTP {}", status.as_u16());
    }

    if status != StatusCode::OK {
        std::process::exit(1);
    }
    Ok(())
}
