use directories::ProjectDirs;
use std::fs;
use std::sync::OnceLock;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROJECT_URL: &str = "https://github.com/mirrorbench/mirrorbench";

// Include the JSON file at compile time
const ENDPOINTS_JSON: &str = include_str!("../assets/endpoints.json");

// Global cache for the parsed endpoint list
static ENDPOINTS_CACHE: OnceLock<Vec<String>> = OnceLock::new();

/// Large reference files used to benchmark every site that mirrors the
/// project. One entry per upstream project; candidates are produced in
/// table order.
pub const REFERENCE_FILES: &[(&str, &str)] = &[
    ("centos", "/7/isos/x86_64/CentOS-7-x86_64-Everything-2009.iso"),
    ("centos-vault", "/6.0/isos/x86_64/CentOS-6.0-x86_64-LiveDVD.iso"),
    (
        "opensuse",
        "/distribution/leap/15.5/iso/openSUSE-Leap-15.5-DVD-x86_64-Media.iso",
    ),
    ("ubuntu-releases", "/22.04/ubuntu-22.04.3-desktop-amd64.iso"),
    (
        "debian-cd",
        "/current/amd64/iso-bd/debian-edu-12.1.0-amd64-BD-1.iso",
    ),
    (
        "kali-images",
        "/kali-2023.2/kali-linux-2023.2-live-amd64.iso",
    ),
    ("CTAN", "/systems/texlive/Images/texlive.iso"),
    ("blackarch", "/iso/blackarch-linux-full-2023.04.01-x86_64.iso"),
    ("archlinux", "/iso/latest/archlinux-x86_64.iso"),
    ("ubuntu", "/indices/md5sums.gz"),
    ("debian", "/ls-lR.gz"),
];

/// User-Agent for outbound requests. `via` names the transport doing the
/// actual transfer, e.g. "reqwest" or "curl/8.5.0".
pub fn user_agent(via: &str) -> String {
    format!("mirrorbench/{} (+{}) {}", VERSION, PROJECT_URL, via)
}

/// Retrieve the metadata endpoint list.
/// Strategy:
/// 1. Try to load from User Config (~/.config/mirrorbench/endpoints.json)
/// 2. Fallback to built-in assets/endpoints.json
pub fn endpoints() -> &'static [String] {
    ENDPOINTS_CACHE.get_or_init(|| {
        // 1. Try local config
        if let Some(proj_dirs) = ProjectDirs::from("", "", "mirrorbench") {
            let config_path = proj_dirs.config_dir().join("endpoints.json");
            if config_path.exists() {
                if let Ok(content) = fs::read_to_string(&config_path) {
                    if let Ok(parsed) = serde_json::from_str(&content) {
                        println!("Loaded endpoints from local config: {:?}", config_path);
                        return parsed;
                    }
                }
            }
        }

        // 2. Fallback
        serde_json::from_str(ENDPOINTS_JSON)
            .expect("Failed to parse assets/endpoints.json. This is a compile-time error.")
    })
}
