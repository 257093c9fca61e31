//! Debounced OS auto-detection.
//!
//! Each source edit bumps a generation counter and aborts the pending
//! request. A request only starts after the debounce period, and its result
//! is tagged with the generation it was started for; anything older than the
//! current generation is dropped when read.

use crate::core::{
    domain::error::MachinesResult,
    infrastructure::os_detector::{DetectedOs, OsDetector},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::{debug, warn};

/// A finished detection request.
#[derive(Debug)]
pub struct DetectionResult {
    pub generation: u64,
    pub source: String,
    pub outcome: MachinesResult<Option<DetectedOs>>,
}

pub struct AutodetectService {
    detector: Arc<dyn OsDetector>,
    debounce: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: UnboundedSender<DetectionResult>,
    rx: UnboundedReceiver<DetectionResult>,
}

impl AutodetectService {
    pub fn new(detector: Arc<dyn OsDetector>, debounce: Duration) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            detector,
            debounce,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// Generation of the most recent source edit.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a request is waiting out its debounce period or running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Marks every earlier request stale and aborts the pending one.
    pub fn supersede(&mut self) {
        self.generation += 1;
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Starts a debounced detection of `source`, superseding earlier ones.
    pub fn schedule(&mut self, source: String) {
        self.supersede();
        let generation = self.generation;
        let detector = Arc::clone(&self.detector);
        let debounce = self.debounce;
        let tx = self.tx.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            debug!(generation, source = %source, "Running OS auto-detection");
            let outcome = detector.detect_os(source.clone()).await;
            let result = DetectionResult {
                generation,
                source,
                outcome,
            };
            if tx.send(result).is_err() {
                debug!(generation, "Detection finished after the dialog went away");
            }
        }));
    }

    /// Waits for the pending request and returns its result.
    ///
    /// Returns `None` right away when nothing is pending, and also when the
    /// request died without reporting.
    pub async fn next_result(&mut self) -> Option<DetectionResult> {
        if let Some(pending) = self.pending.as_mut() {
            if let Err(e) = pending.await {
                warn!(error = %e, "OS auto-detection task did not complete");
            }
            self.pending = None;
        }

        while let Ok(result) = self.rx.try_recv() {
            if result.generation == self.generation {
                return Some(result);
            }
            debug!(
                generation = result.generation,
                current = self.generation,
                "Ignoring stale OS auto-detection result"
            );
        }
        None
    }
}

impl Drop for AutodetectService {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
