use crate::domain::model::DistanceAnnotation;
use crate::domain::ports::DistanceLookup;
use crate::utils::validation::is_valid_postal_code;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delays distance lookups while the postal code is still being typed.
///
/// Only the most recent schedule survives; results are sent on the channel
/// returned by [`DistanceDebouncer::new`] and are meant to be applied through
/// `FormAction::AnnotateDistance`, which drops them if the code changed since.
pub struct DistanceDebouncer {
    lookup: Arc<dyn DistanceLookup>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    results: mpsc::UnboundedSender<DistanceAnnotation>,
}

impl DistanceDebouncer {
    pub fn new(
        lookup: Arc<dyn DistanceLookup>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<DistanceAnnotation>) {
        let (results, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            lookup,
            delay,
            pending: None,
            results,
        };
        (debouncer, receiver)
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, postal_code: &str) {
        self.cancel();
        if !is_valid_postal_code(postal_code) {
            return;
        }

        let lookup = Arc::clone(&self.lookup);
        let results = self.results.clone();
        let delay = self.delay;
        let postal_code = postal_code.to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match lookup.lookup(&postal_code).await {
                Ok(Some(annotation)) => {
                    tracing::debug!(
                        postal_code = %annotation.postal_code,
                        distance_km = annotation.distance_km,
                        "distance resolved"
                    );
                    // Receiver gone means the session ended.
                    let _ = results.send(annotation);
                }
                Ok(None) => tracing::debug!(%postal_code, "no distance for postal code"),
                Err(e) => tracing::warn!(%postal_code, error = %e, "distance lookup failed"),
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DistanceDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
