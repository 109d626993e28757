pub mod build_info;

use std::sync::Once;

use cashbook_core::Clock;
use chrono::{DateTime, Utc};

static TRACING_INIT: Once = Once::new();

/// Default filter directive used when `RUST_LOG` does not mention cashbook.
pub const DEFAULT_LOG_DIRECTIVE: &str = "cashbook=info";

/// Initializes the global tracing subscriber, logging to stderr so script
/// output on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_LOG_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Wall-clock time source used by the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
