/// Format a transfer rate in bytes/sec with binary-prefix units, two
/// decimal places. The value is divided down while it exceeds 1024 and a
/// larger unit exists, so anything past TiB/s stays in TiB/s.
pub fn human_readable_speed(speed: f64) -> String {
    const SCALE: [&str; 5] = ["B/s", "KiB/s", "MiB/s", "GiB/s", "TiB/s"];
    let mut speed = speed;
    let mut unit = 0;
    while speed > 1024.0 && unit < SCALE.len() - 1 {
        speed /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", speed, SCALE[unit])
}

/// Sort (abbr, rate) entries by rate descending. `sort_by` is stable, so
/// equal rates keep their insertion order.
pub fn rank_speeds(mut entries: Vec<(String, f64)>) -> Vec<(String, f64)> {
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
}
