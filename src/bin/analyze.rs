use anyhow::{Result, bail};
use seolens::{Analyzer, Config, InMemoryReportStore};
use std::sync::Arc;
use uuid::Uuid;

/// Run one analysis from the command line and print the report as JSON.
///
/// Usage: `analyze <url>` or `analyze --text <file>`.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env()?;
    let analyzer = Analyzer::new(config, Arc::new(InMemoryReportStore::new()));
    let user_id = Uuid::new_v4();

    let result = match args.as_slice() {
        [flag, path] if flag == "--text" => {
            let content = std::fs::read_to_string(path)?;
            analyzer.analyze_pasted_content(&content, user_id).await
        }
        [url] => analyzer.analyze_url(url, user_id).await,
        _ => bail!("usage: analyze <url> | analyze --text <file>"),
    };

    match result {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(err) => bail!("{}", err.user_message()),
    }
}
