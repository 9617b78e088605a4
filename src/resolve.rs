use crate::config;
use crate::types::SiteInfo;

/// Assemble the ordered candidate list for one site.
///
/// The site's own big-file override comes first. After that, every catalog
/// entry is matched against the sub-mirror list by exact cname, catalog
/// table order outer, sub-mirror list order inner, and each match
/// contributes the sub-mirror base URL joined with the reference path.
pub fn candidate_uris(info: &SiteInfo) -> Vec<String> {
    let mut uris = Vec::new();

    if let Some(ref big) = info.site.big {
        uris.push(big.clone());
    }

    for (project, path) in config::REFERENCE_FILES {
        for mirror in &info.mirrors {
            if mirror.cname == *project {
                uris.push(format!("{}{}", mirror.url, path));
            }
        }
    }

    uris
}

/// Sub-mirror URLs may be absolute or relative to the site base; only the
/// relative ones get the base prepended.
pub fn resolve_target(base: &str, uri: &str) -> String {
    if uri.starts_with("http") {
        uri.to_string()
    } else {
        format!("{}{}", base, uri)
    }
}
