mod config;
mod error;
mod fetch;
mod probe;
mod resolve;
mod traits;
mod types;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use traits::SpeedProber;
use types::{AddressFamily, ProbeOptions, SiteInfo};

const TIME_CHOICES: [u64; 5] = [3, 5, 10, 30, 60];

#[derive(Parser)]
#[command(name = "mirrorbench")]
#[command(version)]
#[command(about = "Rank mirror sites by measured download speed", long_about = None)]
struct Cli {
    /// IPv4 only when speed testing
    #[arg(short = '4', long = "ipv4", conflicts_with = "ipv6")]
    ipv4: bool,

    /// IPv6 only when speed testing
    #[arg(short = '6', long = "ipv6")]
    ipv6: bool,

    /// Duration of a speed test for one mirror, in seconds
    #[arg(short, long, default_value_t = 5, value_parser = parse_time)]
    time: u64,
}

fn parse_time(raw: &str) -> Result<u64, String> {
    let secs: u64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if TIME_CHOICES.contains(&secs) {
        Ok(secs)
    } else {
        Err(format!("must be one of {:?}", TIME_CHOICES))
    }
}

impl Cli {
    fn probe_options(&self) -> ProbeOptions {
        let family = if self.ipv4 {
            AddressFamily::V4
        } else if self.ipv6 {
            AddressFamily::V6
        } else {
            AddressFamily::Any
        };
        ProbeOptions {
            family,
            time_secs: self.time,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = cli.probe_options();

    // curl is the probing mechanism; without it there is nothing to measure.
    let prober = match probe::CurlProber::detect().await {
        Ok(p) => p,
        Err(e) => {
            println!("{}", e);
            std::process::exit(255);
        }
    };

    let client = fetch::build_client()?;
    let sites = fetch::load_sites(&client, config::endpoints()).await;

    println!(); // one empty line to separate metadata and speedtest

    let results = run_speed_tests(&prober, &sites, &opts).await;

    println!(); // one empty line to separate speedtest and result

    print_ranking(results);

    Ok(())
}

/// Probe each site's candidates in order, keeping the first successful
/// reading. A site with no candidates at all is skipped and never ranked;
/// a site whose every candidate fails stays ranked at zero.
async fn run_speed_tests(
    prober: &dyn SpeedProber,
    sites: &[SiteInfo],
    opts: &ProbeOptions,
) -> Vec<(String, f64)> {
    let mut results: Vec<(String, f64)> = Vec::new();

    for info in sites {
        let uris = resolve::candidate_uris(info);
        if uris.is_empty() {
            println!(
                "! No big file found for {} {}",
                info.site.abbr, info.site.url
            );
            continue;
        }

        results.push((info.site.abbr.clone(), 0.0));
        for uri in uris {
            let target = resolve::resolve_target(&info.site.url, &uri);
            print!("Speed testing {} {} ... ", info.site.abbr, target);
            let _ = std::io::stdout().flush();

            match prober.probe(&target, opts).await {
                Ok(reading) if reading.code == 200 => {
                    println!("{}", utils::human_readable_speed(reading.speed));
                    if let Some(entry) = results.last_mut() {
                        entry.1 = reading.speed;
                    }
                    break;
                }
                Ok(reading) => {
                    println!(
                        "HTTP Code {} Speed {}",
                        reading.code,
                        utils::human_readable_speed(reading.speed)
                    );
                }
                Err(e) => println!("! Probe failed: {}", e),
            }
        }
    }

    results
}

fn print_ranking(results: Vec<(String, f64)>) {
    println!("RANK\t\tABBR\t\tSPEED");
    for (rank, (abbr, speed)) in utils::rank_speeds(results).into_iter().enumerate() {
        println!(
            "{:02}:\t\t{}\t\t{}",
            rank,
            abbr,
            utils::human_readable_speed(speed)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MirrorError, Result as MirrorResult};
    use crate::types::{ProbeReading, Site, SubMirror};
    use std::sync::Mutex;

    /// Scripted prober: hands out one canned response per call and records
    /// the URLs it was asked to probe.
    struct StubProber {
        responses: Mutex<Vec<MirrorResult<ProbeReading>>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubProber {
        fn new(responses: Vec<MirrorResult<ProbeReading>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl SpeedProber for StubProber {
        async fn probe(&self, url: &str, _opts: &ProbeOptions) -> MirrorResult<ProbeReading> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn site(abbr: &str, big: Option<&str>, mirrors: &[(&str, &str)]) -> SiteInfo {
        SiteInfo {
            site: Site {
                abbr: abbr.to_string(),
                url: "https://example.edu".to_string(),
                big: big.map(|b| b.to_string()),
            },
            mirrors: mirrors
                .iter()
                .map(|(cname, url)| SubMirror {
                    cname: cname.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }

    fn opts() -> ProbeOptions {
        ProbeOptions {
            family: AddressFamily::Any,
            time_secs: 3,
        }
    }

    fn reading(code: u32, speed: f64) -> MirrorResult<ProbeReading> {
        Ok(ProbeReading { code, speed })
    }

    #[tokio::test]
    async fn test_first_success_stops_candidate_loop() {
        let info = site(
            "TEST",
            None,
            &[("archlinux", "/archlinux"), ("debian", "/debian")],
        );
        // archlinux candidate 404s, debian candidate succeeds
        let prober = StubProber::new(vec![reading(404, 0.0), reading(200, 1024.0)]);

        let results = run_speed_tests(&prober, &[info], &opts()).await;
        assert_eq!(results, vec![("TEST".to_string(), 1024.0)]);

        let calls = prober.calls();
        assert_eq!(
            calls,
            vec![
                "https://example.edu/archlinux/iso/latest/archlinux-x86_64.iso".to_string(),
                "https://example.edu/debian/ls-lR.gz".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_big_override_is_probed_before_catalog() {
        let info = site(
            "TEST",
            Some("/custom/file.iso"),
            &[("archlinux", "/archlinux")],
        );
        let prober = StubProber::new(vec![reading(200, 2.0)]);

        let results = run_speed_tests(&prober, &[info], &opts()).await;
        assert_eq!(results, vec![("TEST".to_string(), 2.0)]);
        // the override satisfied the site, the archlinux candidate was never tried
        assert_eq!(
            prober.calls(),
            vec!["https://example.edu/custom/file.iso".to_string()]
        );
    }

    #[tokio::test]
    async fn test_all_failures_leave_site_ranked_at_zero() {
        let info = site("TEST", None, &[("debian", "/debian")]);
        let prober = StubProber::new(vec![reading(503, 42.0)]);

        let results = run_speed_tests(&prober, &[info], &opts()).await;
        assert_eq!(results, vec![("TEST".to_string(), 0.0)]);
    }

    #[tokio::test]
    async fn test_site_without_candidates_is_absent() {
        let info = site("TEST", None, &[("haiku", "/haiku")]);
        let prober = StubProber::new(vec![]);

        let results = run_speed_tests(&prober, &[info], &opts()).await;
        assert!(results.is_empty());
        assert!(prober.calls().is_empty());
    }

    #[tokio::test]
    async fn test_probe_error_advances_to_next_candidate() {
        let info = site(
            "TEST",
            None,
            &[("archlinux", "/archlinux"), ("debian", "/debian")],
        );
        let prober = StubProber::new(vec![
            Err(MirrorError::ProbeOutput("halted".to_string())),
            reading(200, 7.0),
        ]);

        let results = run_speed_tests(&prober, &[info], &opts()).await;
        assert_eq!(results, vec![("TEST".to_string(), 7.0)]);
    }

    #[test]
    fn test_time_flag_only_accepts_fixed_choices() {
        assert_eq!(parse_time("5"), Ok(5));
        assert_eq!(parse_time("60"), Ok(60));
        assert!(parse_time("7").is_err());
        assert!(parse_time("abc").is_err());
    }

    #[test]
    fn test_family_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["mirrorbench", "-4", "-6"]).is_err());

        let cli = Cli::try_parse_from(["mirrorbench", "-6", "-t", "30"]).unwrap();
        let opts = cli.probe_options();
        assert_eq!(opts.family, AddressFamily::V6);
        assert_eq!(opts.time_secs, 30);

        let default = Cli::try_parse_from(["mirrorbench"]).unwrap();
        assert_eq!(default.probe_options().time_secs, 5);
        assert_eq!(default.probe_options().family, AddressFamily::Any);
    }
}
