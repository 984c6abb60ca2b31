//! Async page driver.
//!
//! This module requires the `tokio` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! vetsim = { version = "0.1", features = ["tokio"] }
//! ```
//!
//! [`drive`] sleeps until the page's next timer is due, pumps it, and feeds
//! it input arriving on a channel in between. The page must be built on a
//! clock that advances on its own, such as [`SystemClock`](vetsim_core::SystemClock).

use std::time::Duration;

use tokio::sync::mpsc;

use crate::page::{Page, PageInput};

/// Create the channel used to feed input to [`drive`].
pub fn input_channel(buffer: usize) -> (mpsc::Sender<PageInput>, mpsc::Receiver<PageInput>) {
    mpsc::channel(buffer)
}

/// Run the page until every input sender has been dropped.
///
/// The page is left intact on return; destroy or drop it as needed.
pub async fn drive(page: &mut Page, mut inputs: mpsc::Receiver<PageInput>) {
    tracing::debug!(target: "vetsim::page", "page driver started");
    loop {
        if page.is_destroyed() {
            break;
        }
        let wait = page.timers().time_until_next();
        tokio::select! {
            input = inputs.recv() => match input {
                Some(input) => {
                    page.handle_input(input);
                }
                None => break,
            },
            _ = sleep_for(wait) => {
                page.pump();
            }
        }
    }
    tracing::debug!(target: "vetsim::page", "page driver stopped");
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}
