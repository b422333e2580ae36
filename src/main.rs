//! ferry - Read-only Jira issue importer.
//!
//! Loads configuration, fetches matching issues from Jira and prints each
//! converted issue as one JSON object per line on stdout. Logs go to stderr.

use std::io::{BufWriter, Write};

use anyhow::Context;
use ferry_config::Config;
use ferry_config::auth::resolve_token;
use ferry_jira::{
    ConnectionConfig, Converter, ConverterConfig, FetchOptions, IssueState, JiraClient,
};
use ferry_protocol::Issue;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load().context("failed to load configuration")?;
    config.apply_env();
    config.validate().context("invalid configuration")?;

    let token = resolve_token(config.api_token.as_deref()).context(
        "no Jira token configured; set api_token, FERRY_JIRA_TOKEN or JIRA_API_TOKEN",
    )?;

    let client = JiraClient::new(ConnectionConfig {
        url: config.jira_url.clone().unwrap_or_default(),
        project: config.project.clone(),
        username: config.username.clone(),
        api_token: SecretString::from(token),
    })?;

    let options = FetchOptions {
        jql: config.jql.clone().unwrap_or_default(),
        state: config.state().parse::<IssueState>()?,
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling import");
            on_interrupt.cancel();
        }
    });

    let raw = client.search_issues(&options, &cancel).await?;
    info!(count = raw.len(), "fetched issues");

    let converter = Converter::new(ConverterConfig {
        prefix: config.prefix.clone(),
        ..ConverterConfig::new(client.base_url())
    });
    let issues = converter.convert(&raw)?;

    print_issues(&issues)?;
    info!(count = issues.len(), "import complete");
    Ok(())
}

/// Writes one JSON object per issue to stdout.
fn print_issues(issues: &[Issue]) -> anyhow::Result<()> {
    let mut out = BufWriter::new(std::io::stdout().lock());
    for issue in issues {
        serde_json::to_writer(&mut out, issue)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
