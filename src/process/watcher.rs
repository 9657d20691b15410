//! Periodic memory high-water sampling on a background thread

use crate::process::stats::memory_mb;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Samples memory use every `interval` and keeps the maximum
#[derive(Debug)]
pub struct MemoryWatcher {
    peak_mb: Arc<AtomicU64>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MemoryWatcher {
    /// Start sampling with the default memory probe
    pub fn spawn(interval: Duration) -> std::io::Result<Self> {
        Self::spawn_with(interval, memory_mb)
    }

    /// Start sampling with a custom probe returning megabytes
    pub fn spawn_with<F>(interval: Duration, probe: F) -> std::io::Result<Self>
    where
        F: Fn() -> u64 + Send + 'static,
    {
        let peak_mb = Arc::new(AtomicU64::new(probe()));
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let peak = Arc::clone(&peak_mb);

        let handle = thread::Builder::new()
            .name("runconf-memwatch".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        peak.fetch_max(probe(), Ordering::Relaxed);
                    },
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        peak.fetch_max(probe(), Ordering::Relaxed);
                        break;
                    },
                }
            })?;

        tracing::debug!(?interval, "memory watcher started");
        Ok(Self {
            peak_mb,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Highest reading so far
    pub fn peak_mb(&self) -> u64 {
        self.peak_mb.load(Ordering::Relaxed)
    }

    /// Stop sampling and return the highest reading
    pub fn stop(mut self) -> u64 {
        self.shutdown();
        self.peak_mb()
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The thread may already be gone; a failed send is fine then.
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!(
                    operation = "MemoryWatcher::stop",
                    "memory watcher thread panicked"
                );
            }
        }
    }
}

impl Drop for MemoryWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_watcher_keeps_maximum() {
        let readings = [5_u64, 40, 12, 3];
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let probe = move || {
            let i = counter.fetch_add(1, Ordering::SeqCst);
            readings[i.min(readings.len() - 1)]
        };

        let watcher = MemoryWatcher::spawn_with(Duration::from_millis(1), probe).unwrap();
        while calls.load(Ordering::SeqCst) < readings.len() {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(watcher.stop(), 40);
    }

    #[test]
    fn test_stop_samples_once_more() {
        let watcher = MemoryWatcher::spawn_with(Duration::from_secs(3600), || 9).unwrap();
        assert_eq!(watcher.peak_mb(), 9);
        assert_eq!(watcher.stop(), 9);
    }

    #[test]
    fn test_drop_stops_thread() {
        let watcher = MemoryWatcher::spawn(Duration::from_millis(5)).unwrap();
        drop(watcher);
    }
}
