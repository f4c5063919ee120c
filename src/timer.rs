use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A handle to a task that runs a callback periodically, until
/// the handle is stopped or dropped.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a task that calls `on_tick` once immediately, and then once every `period`.
    ///
    /// Ticks that are missed while a callback is still running are skipped.
    pub fn start<F, Fut>(period: Duration, mut on_tick: F) -> Ticker
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick().await;
            }
        });
        log::debug!("started ticker with a period of {:?}", period);
        Ticker {
            handle: Some(handle),
        }
    }

    /// Stop calling the callback. Does nothing if already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log::debug!("stopped ticker");
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
