//! Ctrl+C handling for a running collection.
//!
//! `collect` races the collector against [`CancellationToken::cancelled`].
//! When the signal wins, the command flushes what it already wrote and
//! returns [`Interrupted`], which `main` turns into exit code 130.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Shared interrupt flag. Clones observe the same state, and the flag never
/// resets once raised.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    raised: Arc<watch::Sender<bool>>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (raised, _) = watch::channel(false);
        Self {
            raised: Arc::new(raised),
        }
    }

    /// Raise the flag on the first SIGINT. Listener failures are reported
    /// on stderr and leave the token untouched.
    pub fn raise_on_ctrl_c(&self) {
        let token = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => token.cancel(),
                Err(e) => eprintln!("Failed to listen for Ctrl+C: {e}"),
            }
        });
    }

    pub fn cancel(&self) {
        self.raised.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.raised.borrow()
    }

    /// Resolves once the flag is raised, immediately if it already is.
    pub async fn cancelled(&self) {
        let mut rx = self.raised.subscribe();
        // The sender lives as long as `self`, so `wait_for` cannot see a closed channel.
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

/// Error returned by a command that stopped because of Ctrl+C.
#[derive(Debug, Clone, Copy)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("interrupted by SIGINT")
    }
}

impl std::error::Error for Interrupted {}

pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<Interrupted>())
}

pub fn print_interrupted_message() {
    eprintln!("^C\nCollection cancelled by user");
}
