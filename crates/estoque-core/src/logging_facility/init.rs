//! Subscriber installation
//!
//! Operation logs go to stderr so command output on stdout stays parseable.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, `estoque` crates at debug
    Pretty,
    /// One JSON object per event, `estoque` crates at info
    Json,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Pretty => "estoque=debug",
            Profile::Json => "estoque=info",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. Tests install
/// [`init_test_capture`](super::init_test_capture) instead.
///
/// ```
/// use estoque_core::logging_facility::{init, Profile};
///
/// init(Profile::Json);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter());
        match profile {
            Profile::Pretty => builder.finish().init(),
            Profile::Json => builder.json().finish().init(),
        }
    });
}
