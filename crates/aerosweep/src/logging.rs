//! Log setup: a size-capped file in the data directory plus stderr

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "aerosweep.log";

const ROTATE_ABOVE: u64 = 5 * 1024 * 1024;
const RETAIN: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- earlier sweep log entries dropped ---\n";

/// Cut `path` down to roughly its last `retain` bytes once it exceeds
/// `limit`, starting at a line boundary. Returns whether it was cut.
fn trim_log(path: &Path, limit: u64, retain: u64) -> io::Result<bool> {
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    if len <= limit {
        return Ok(false);
    }

    let mut tail = Vec::with_capacity(retain as usize);
    {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(retain)))?;
        file.read_to_end(&mut tail)?;
    }
    let start = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |newline| newline + 1);

    let mut file = File::create(path)?;
    file.write_all(ROTATION_MARKER)?;
    file.write_all(&tail[start..])?;
    Ok(true)
}

fn default_filter(level: &str) -> String {
    format!("aerosweep={level},aerosweep_core={level}")
}

/// Install the global subscriber.
///
/// Everything goes to `{data_dir}/aerosweep.log` without ANSI codes; the same
/// events are echoed to stderr in compact form so per-point progress is
/// visible. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(err) = trim_log(&log_path, ROTATE_ABOVE, RETAIN) {
        eprintln!("warning: could not trim {}: {err}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .compact()
                .with_target(false)
                .without_time(),
        )
        .init();

    tracing::info!(log = %log_path.display(), "logging initialized");
    Ok(())
}
