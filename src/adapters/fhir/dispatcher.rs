//! Asynchronous bundle dispatcher
//!
//! Validated messages are forwarded to the FHIR endpoint on a
//! fire-and-forget basis: the synchronous pipeline enqueues a job and
//! returns immediately, and a small worker pool drains the queue in the
//! background. The queue is bounded; when it is full the job is dropped
//! with a warning rather than blocking the caller. Delivery failures are
//! logged and never retried.

use super::client::BundleEndpoint;
use crate::config::DispatchConfig;
use crate::domain::errors::DispatchError;
use crate::domain::ids::CorrelationId;
use crate::domain::summary::ClinicalSummary;
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// One queued delivery
#[derive(Debug, Clone)]
pub struct DispatchJob {
    /// Correlation identifier of the originating submission
    pub correlation_id: CorrelationId,

    /// Declared message type, carried for log context
    pub message_type: String,

    /// The extracted summary; serialized as the bundle payload
    pub summary: ClinicalSummary,
}

/// Cloneable enqueue-side handle
///
/// Handed to the pipeline so it can schedule deliveries without owning
/// the worker pool. Enqueueing is synchronous and never blocks.
#[derive(Clone)]
pub struct DispatchHandle {
    tx: mpsc::Sender<DispatchJob>,
    closed: Arc<AtomicBool>,
}

impl DispatchHandle {
    /// Queues a job for background delivery
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::QueueFull`] when the queue is at capacity
    /// (the job is dropped) and [`DispatchError::ShutDown`] once
    /// [`Dispatcher::shutdown`] has run or the worker pool has stopped.
    pub fn enqueue(&self, job: DispatchJob) -> Result<(), DispatchError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DispatchError::ShutDown);
        }

        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DispatchError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DispatchError::ShutDown,
        })
    }
}

/// Background delivery worker pool
///
/// Owns a bounded job queue and the workers draining it. Workers exit
/// once every [`DispatchHandle`] has been dropped and the queue is empty;
/// [`Dispatcher::shutdown`] waits for that up to the configured grace
/// period, then abandons whatever is still in flight.
pub struct Dispatcher {
    tx: mpsc::Sender<DispatchJob>,
    closed: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    shutdown_grace: Duration,
}

impl Dispatcher {
    /// Starts the worker pool against the given endpoint
    pub fn new(endpoint: Arc<dyn BundleEndpoint>, config: &DispatchConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..config.workers)
            .map(|worker_id| {
                let endpoint = Arc::clone(&endpoint);
                let rx = Arc::clone(&rx);
                tokio::spawn(run_worker(worker_id, endpoint, rx))
            })
            .collect();

        tracing::debug!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "Dispatcher started"
        );

        Self {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
            workers,
            shutdown_grace: Duration::from_secs(config.shutdown_grace_seconds),
        }
    }

    /// Returns an enqueue-side handle
    pub fn handle(&self) -> DispatchHandle {
        DispatchHandle {
            tx: self.tx.clone(),
            closed: Arc::clone(&self.closed),
        }
    }

    /// Drains the queue and stops the workers
    ///
    /// Callers must drop their [`DispatchHandle`]s first; the queue only
    /// closes once every sender is gone. If draining takes longer than
    /// the grace period the remaining deliveries are abandoned — an
    /// accepted loss under the fire-and-forget contract.
    pub async fn shutdown(self) {
        tracing::info!(
            grace_seconds = self.shutdown_grace.as_secs(),
            "Shutting down dispatcher"
        );

        // Refuse new jobs on every outstanding handle, then close our
        // sender so workers observe the drained queue.
        self.closed.store(true, Ordering::Release);
        drop(self.tx);

        match tokio::time::timeout(self.shutdown_grace, join_all(self.workers)).await {
            Ok(results) => {
                for result in results {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Dispatch worker terminated abnormally");
                    }
                }
                tracing::info!("Dispatch queue drained");
            }
            Err(_) => {
                tracing::warn!("Grace period elapsed, abandoning in-flight deliveries");
            }
        }
    }
}

async fn run_worker(
    worker_id: usize,
    endpoint: Arc<dyn BundleEndpoint>,
    rx: Arc<Mutex<mpsc::Receiver<DispatchJob>>>,
) {
    loop {
        // Hold the lock only while waiting; delivery runs outside it so
        // the other workers can pick up queued jobs.
        let job = {
            let mut rx = rx.lock().await;
            rx.recv().await
        };

        match job {
            Some(job) => deliver(&*endpoint, job).await,
            None => break,
        }
    }

    tracing::debug!(worker_id, "Dispatch worker stopped");
}

async fn deliver(endpoint: &dyn BundleEndpoint, job: DispatchJob) {
    let payload = match serde_json::to_value(&job.summary) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(
                correlation_id = %job.correlation_id,
                error = %e,
                "Failed to serialize bundle payload"
            );
            return;
        }
    };

    match endpoint.post_bundle(&payload).await {
        Ok(status) => {
            tracing::info!(
                correlation_id = %job.correlation_id,
                message_type = %job.message_type,
                destination = endpoint.destination(),
                status,
                "Successfully forwarded bundle to FHIR endpoint"
            );
        }
        Err(e) => {
            tracing::error!(
                correlation_id = %job.correlation_id,
                message_type = %job.message_type,
                destination = endpoint.destination(),
                error = %e,
                "Failed to forward bundle to FHIR endpoint"
            );
        }
    }
}
