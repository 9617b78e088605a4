use crate::config;
use crate::error::Result;
use crate::types::SiteInfo;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::Client;
use std::time::Duration;

// Metadata documents are small; an endpoint slower than this is down.
const METADATA_TIMEOUT: u64 = 10;

/// Shared HTTP client for the metadata phase.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(config::user_agent("reqwest"))
        .timeout(Duration::from_secs(METADATA_TIMEOUT))
        .build()?)
}

/// Fetch and decode one endpoint's metadata document. Non-2xx responses
/// count as failures, same as network errors.
pub async fn site_info(client: &Client, url: &str) -> Result<SiteInfo> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json::<SiteInfo>().await?)
}

/// Load every endpoint in order, printing one line per endpoint. A failing
/// endpoint is reported and skipped; it never aborts the run.
pub async fn load_sites(client: &Client, endpoints: &[String]) -> Vec<SiteInfo> {
    // Draw to stdout so the per-endpoint lines land in the same stream as
    // the rest of the report.
    let pb = ProgressBar::with_draw_target(
        Some(endpoints.len() as u64),
        ProgressDrawTarget::stdout(),
    );
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("|| "),
    );
    pb.set_message("Loading mirror lists...");

    let mut sites = Vec::new();
    for url in endpoints {
        match site_info(client, url).await {
            Ok(info) => {
                pb.println(format!("Loaded {} : {}", info.site.abbr, info.site.url));
                sites.push(info);
            }
            Err(e) => pb.println(format!("! Failed to load {}: {}", url, e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    sites
}
