//! Serve command: the message loop on stdin/stdout

use anyhow::{Context, Result};
use labelhost::{serve, Host};
use tokio::io::BufReader;

use crate::cli::ServeArgs;

pub async fn run(args: &ServeArgs) -> Result<()> {
    let config = args.config();
    log::info!(
        "Serving with font '{}', assets at {}",
        config.fonts.family,
        config.asset_base_url
    );

    let (host, outbound) = Host::new(config).context("Invalid host configuration")?;
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    serve(host, outbound, stdin, stdout)
        .await
        .context("Message loop failed")?;
    Ok(())
}
