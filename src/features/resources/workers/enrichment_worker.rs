use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::features::resources::models::{
    EnrichmentEvent, EnrichmentJob, EnrichmentTask, EnrichmentTaskStatus, EnrichmentWrite,
};
use crate::features::resources::stores::ResourceStore;
use crate::modules::ai::DocumentSummarizer;

/// Buffered settlement events per subscriber before lagging ones drop
const EVENT_CAPACITY: usize = 256;

/// Accepts enrichment jobs without blocking the caller
pub trait EnrichmentSink: Send + Sync {
    /// Schedules the job and returns immediately
    fn submit(&self, job: EnrichmentJob);

    fn is_in_flight(&self, resource_id: Uuid) -> bool;
}

/// Runs each enrichment job on its own tokio task.
///
/// A job calls the summarizer under a deadline, then writes the summary or the
/// failure markers back, guarded by the job's attempt token. There is no retry
/// inside a job.
#[derive(Clone)]
pub struct BackgroundEnrichment {
    store: Arc<dyn ResourceStore>,
    summarizer: Arc<dyn DocumentSummarizer>,
    timeout: Duration,
    tasks: Arc<Mutex<HashMap<Uuid, EnrichmentTask>>>,
    events: broadcast::Sender<EnrichmentEvent>,
}

impl BackgroundEnrichment {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        summarizer: Arc<dyn DocumentSummarizer>,
        timeout: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            summarizer,
            timeout,
            tasks: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    /// Settlement events for every job submitted after subscribing
    pub fn subscribe(&self) -> broadcast::Receiver<EnrichmentEvent> {
        self.events.subscribe()
    }

    /// Record of the job running for a resource, if any
    pub fn task(&self, resource_id: Uuid) -> Option<EnrichmentTask> {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&resource_id)
            .cloned()
    }

    /// Marks the job running, unless a newer attempt has replaced it
    fn mark_running(&self, resource_id: Uuid, attempt: i32) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = tasks.get_mut(&resource_id).filter(|t| t.attempt == attempt) {
            task.status = EnrichmentTaskStatus::Running;
        }
    }

    /// Drops the record of a settled job; the resource row is the durable record
    fn settle(&self, resource_id: Uuid, attempt: i32) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if tasks.get(&resource_id).is_some_and(|t| t.attempt == attempt) {
            tasks.remove(&resource_id);
        }
    }

    async fn run(self, job: EnrichmentJob) {
        let EnrichmentJob {
            resource_id,
            attempt,
            text,
        } = job;

        self.mark_running(resource_id, attempt);
        tracing::info!("Enrichment started for resource {} (attempt {})", resource_id, attempt);

        let (write, status) =
            match tokio::time::timeout(self.timeout, self.summarizer.summarize(&text)).await {
                Ok(Ok(result)) => (
                    EnrichmentWrite::Completed {
                        summary: result.summary,
                        short_notes: result.short_notes,
                    },
                    EnrichmentTaskStatus::Completed,
                ),
                Ok(Err(e)) => {
                    tracing::warn!(
                        "Enrichment failed for resource {} (attempt {}): {}",
                        resource_id,
                        attempt,
                        e
                    );
                    (EnrichmentWrite::Failed, EnrichmentTaskStatus::Failed)
                }
                Err(_) => {
                    tracing::warn!(
                        "Enrichment for resource {} (attempt {}) exceeded {:?}",
                        resource_id,
                        attempt,
                        self.timeout
                    );
                    (EnrichmentWrite::Failed, EnrichmentTaskStatus::TimedOut)
                }
            };

        let applied = match self.store.write_enrichment(resource_id, attempt, &write).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::info!(
                    "Discarded stale enrichment result for resource {} (attempt {})",
                    resource_id,
                    attempt
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    "Failed to store enrichment result for resource {}: {}",
                    resource_id,
                    e
                );
                false
            }
        };

        self.settle(resource_id, attempt);

        // No subscribers is fine
        let _ = self.events.send(EnrichmentEvent {
            resource_id,
            attempt,
            status,
            applied,
        });
    }
}

impl EnrichmentSink for BackgroundEnrichment {
    fn submit(&self, job: EnrichmentJob) {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner()).insert(
            job.resource_id,
            EnrichmentTask {
                resource_id: job.resource_id,
                attempt: job.attempt,
                status: EnrichmentTaskStatus::Queued,
            },
        );

        tokio::spawn(self.clone().run(job));
    }

    fn is_in_flight(&self, resource_id: Uuid) -> bool {
        self.task(resource_id)
            .is_some_and(|task| task.status.is_in_flight())
    }
}
