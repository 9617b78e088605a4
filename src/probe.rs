use crate::config;
use crate::error::{MirrorError, Result};
use crate::traits::SpeedProber;
use crate::types::{AddressFamily, ProbeOptions, ProbeReading};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

// The payload is thrown away; only the measured rate matters.
fn dev_null() -> &'static str {
    if cfg!(windows) {
        "NUL"
    } else {
        "/dev/null"
    }
}

/// Speed probe backed by the system curl binary.
#[derive(Debug)]
pub struct CurlProber {
    program: PathBuf,
    version: String,
}

impl CurlProber {
    /// Locate curl and print its version banner. This must succeed before
    /// any network work starts; a missing binary aborts the whole run.
    pub async fn detect() -> Result<Self> {
        Self::detect_at(Path::new("curl")).await
    }

    #[cfg(test)]
    pub async fn detect_at_path(program: &Path) -> Result<Self> {
        Self::detect_at(program).await
    }

    async fn detect_at(program: &Path) -> Result<Self> {
        let output = Command::new(program)
            .arg("--version")
            .output()
            .await
            .map_err(MirrorError::CurlMissing)?;

        let banner = String::from_utf8_lossy(&output.stdout);
        println!("{}", banner.trim_end());

        // Second token of the banner, e.g. "curl 8.5.0 (x86_64-pc-linux-gnu) ..."
        let version = banner
            .split_whitespace()
            .nth(1)
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            program: program.to_path_buf(),
            version,
        })
    }
}

#[async_trait]
impl SpeedProber for CurlProber {
    async fn probe(&self, url: &str, opts: &ProbeOptions) -> Result<ProbeReading> {
        // -q: ignore .curlrc, -s: silent; a trailing 4/6 pins the address family
        let mut flags = String::from("-qs");
        match opts.family {
            AddressFamily::V4 => flags.push('4'),
            AddressFamily::V6 => flags.push('6'),
            AddressFamily::Any => {}
        }

        let ua = config::user_agent(&format!("curl/{}", self.version));
        let output = Command::new(&self.program)
            .arg(&flags)
            .args(["-o", dev_null(), "-w", "%{http_code} %{speed_download}"])
            .arg(format!("-m{}", opts.time_secs))
            .args(["-A", &ua])
            .arg(url)
            .output()
            .await?;

        // curl exiting nonzero is normal here: running into the -m budget
        // mid-transfer is how a successful probe usually ends. Only the
        // write-out on stdout decides the outcome.
        parse_reading(String::from_utf8_lossy(&output.stdout).trim())
    }
}

/// Parse the `-w "%{http_code} %{speed_download}"` write-out. Older curl
/// prints the rate with decimals, newer without; both forms are accepted.
fn parse_reading(raw: &str) -> Result<ProbeReading> {
    let mut parts = raw.split_whitespace();
    let code = parts.next().and_then(|t| t.parse::<u32>().ok());
    let speed = parts.next().and_then(|t| t.parse::<f64>().ok());

    match (code, speed) {
        (Some(code), Some(speed)) => Ok(ProbeReading { code, speed }),
        _ => Err(MirrorError::ProbeOutput(raw.to_string())),
    }
}
