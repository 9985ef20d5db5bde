//! Crash dumps for internal failures.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use sam_eval::FatalReport;

/// `ERROR<hex>.TXT` with a random suffix.
pub fn crash_file_name(rng: &mut impl Rng) -> String {
    format!("ERROR{:X}.TXT", rng.gen_range(0xffff_u64..0xffff_ffff))
}

/// The error, its causes, then the variable tables.
pub fn render_crash_log(report: &FatalReport) -> String {
    let mut log = String::new();
    let _ = writeln!(log, "{}", report.error);
    let _ = writeln!(log, "{:?}", report.error);
    log.push_str("DATA DUMP:\n");
    log.push_str(&report.dump);
    log
}

/// Write the crash log into `dir` and return its path.
pub fn write_crash_dump(dir: &Path, report: &FatalReport) -> io::Result<PathBuf> {
    let path = dir.join(crash_file_name(&mut rand::thread_rng()));
    fs::write(&path, render_crash_log(report))?;
    tracing::debug!(path = %path.display(), "wrote crash dump");
    Ok(path)
}
