use serde::Deserialize;

/// Metadata document served by one endpoint: the site identity plus the
/// ordered list of sub-mirrors it exposes.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteInfo {
    pub site: Site,
    pub mirrors: Vec<SubMirror>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub abbr: String, // e.g. "TUNA"
    pub url: String,  // base URL, e.g. "https://mirrors.tuna.tsinghua.edu.cn"
    /// Site-declared path to a known large file. Probed before anything
    /// derived from the reference-file catalog.
    pub big: Option<String>,
}

/// One component mirror under a site, tagged by the upstream project it
/// carries (the cname).
#[derive(Debug, Clone, Deserialize)]
pub struct SubMirror {
    pub cname: String,
    pub url: String,
}

/// Outcome of a single probe: HTTP-equivalent status code and the measured
/// transfer rate in bytes/sec.
#[derive(Debug, Clone, Copy)]
pub struct ProbeReading {
    pub code: u32,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Any,
    V4,
    V6,
}

/// Options shared by every probe in a run.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOptions {
    pub family: AddressFamily,
    pub time_secs: u64,
}
