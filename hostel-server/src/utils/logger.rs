//! Logging Infrastructure
//!
//! Console logging plus, when a log directory is configured:
//! - `app.YYYY-MM-DD.log`: application logs, rotated daily, kept 14 days
//! - `security.YYYY-MM-DD.log`: `security` target only (auth failures), kept 90 days

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const APP_LOG_RETENTION: usize = 14;
const SECURITY_LOG_RETENTION: usize = 90;

/// `RUST_LOG` when set, otherwise `level` for this crate and the HTTP layer
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hostel_server={level},shared={level},tower_http={level},sqlx=warn"
        ))
    })
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - Optional directory for daily rotating log files
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// hostel_server::init_logger("debug", false, None)?;
///
/// // Production setup (console + files)
/// hostel_server::init_logger("info", true, Some("/var/log/hostel"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let console_layer: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter(level))
            .boxed()
    };

    let mut layers = vec![console_layer];
    if let Some(dir) = log_dir {
        layers.extend(file_layers(Path::new(dir), level)?);
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

fn file_layers(log_dir: &Path, level: &str) -> anyhow::Result<Vec<BoxedLayer>> {
    std::fs::create_dir_all(log_dir)?;

    let app_log = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("app")
        .filename_suffix("log")
        .max_log_files(APP_LOG_RETENTION)
        .build(log_dir)?;
    let app_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(app_log)
        .with_filter(filter_fn(|meta| meta.target() != "security"))
        .with_filter(env_filter(level))
        .boxed();

    let security_log = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("security")
        .filename_suffix("log")
        .max_log_files(SECURITY_LOG_RETENTION)
        .build(log_dir)?;
    let security_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(security_log)
        .with_filter(filter_fn(|meta| meta.target() == "security"))
        .boxed();

    Ok(vec![app_layer, security_layer])
}
