use tracing_subscriber::EnvFilter;

use crate::stderr_buffer::BufferedStderr;

/// Install the global tracing subscriber.
///
/// `verbose` turns on debug output for this crate; otherwise `RUST_LOG`
/// decides, defaulting to warnings only. Output goes through the stderr
/// buffer so the dashboard can hold it while it owns the terminal.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("serc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(|| BufferedStderr)
        .try_init();
}
