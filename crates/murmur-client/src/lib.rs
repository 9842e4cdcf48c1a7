//! View-state engine of the murmur terminal chat client.
//!
//! Keeps the message log, works out which messages the current conversation
//! shows and which of those fit on screen, resolves author aliases, and tracks
//! unread private threads. Transport, rendering and argument parsing live
//! elsewhere; they talk to this crate through [`Session`].

pub mod authors;
pub mod config;
pub mod error;
pub mod filter;
pub mod message_log;
pub mod notifications;
pub mod read_state;
pub mod session;
pub mod viewport;

use tracing_subscriber::{fmt, EnvFilter};

pub use authors::{AuthorClaim, AuthorDirectory};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use session::{Session, ViewSnapshot};
pub use viewport::{ScrollState, Viewport};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "murmur_client=info,murmur_store=info,warn";

/// Install the global `tracing` subscriber.
///
/// Output goes to stderr so it does not fight the terminal UI on stdout.
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("tracing initialised");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_only_once() {
        assert!(init_tracing());
        assert!(!init_tracing());
    }
}
