use crate::error::Result;
use crate::types::{ProbeOptions, ProbeReading};
use async_trait::async_trait;

/// SpeedProber: one timed download attempt against one candidate URL.
///
/// The production implementation shells out to curl. Keeping the probe
/// behind a trait lets the candidate loop be exercised without a network.
#[async_trait]
pub trait SpeedProber: Sync + Send {
    async fn probe(&self, url: &str, opts: &ProbeOptions) -> Result<ProbeReading>;
}
