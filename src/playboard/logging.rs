//! Logging bootstrap.
//!
//! Library code only emits `tracing` events. A UI client calls [`init_logging`] once
//! to print them; the binary writes them to stderr so they never mix with board
//! output on stdout.
//!
//! The filter comes from `$PLAYBOARD_LOG` (standard `EnvFilter` directives). Without
//! it only warnings are shown, or debug output with `--verbose`.

use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "PLAYBOARD_LOG";

static LOGGING: OnceCell<()> = OnceCell::new();

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "playboard=debug"
    } else {
        "playboard=warn"
    }
}

/// Installs the global subscriber. Calls after the first are no-ops.
pub fn init_logging(verbose: bool) {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        // another subscriber may already be installed (tests, embedding apps)
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    });
}
