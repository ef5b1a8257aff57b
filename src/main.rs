use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde_json::{json, Value};
use srcq::{A2sClient, A2sClientBuilder};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum QueryKind {
    Info,
    Players,
    Rules,
    All,
}

#[derive(Parser)]
#[command(name = "srcq")]
#[command(about = "Query Source and GoldSrc game servers")]
struct Args {
    /// Server addresses as host[:port]
    #[arg(required = true)]
    addresses: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = QueryKind::Info)]
    query: QueryKind,

    #[arg(short, long, default_value_t = 3000, help = "Per-datagram timeout in ms")]
    timeout_ms: u64,
}

async fn query(client: &A2sClient, address: &str, kind: QueryKind) -> Result<Value> {
    let mut out = json!({ "Address": address });

    if matches!(kind, QueryKind::Info | QueryKind::All) {
        out["Info"] = serde_json::to_value(client.query_server_info(address).await)?;
    }
    if matches!(kind, QueryKind::Players | QueryKind::All) {
        out["Players"] = serde_json::to_value(client.query_server_players(address).await)?;
    }
    if matches!(kind, QueryKind::Rules | QueryKind::All) {
        out["Rules"] = serde_json::to_value(client.query_server_rules(address).await)?;
    }

    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = A2sClientBuilder::default()
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .build()?;

    debug!("Querying {} servers", args.addresses.len());
    let results = futures::future::join_all(
        args.addresses
            .iter()
            .map(|address| query(&client, address, args.query)),
    )
    .await;

    for result in results {
        println!("{}", serde_json::to_string_pretty(&result?)?);
    }

    Ok(())
}
