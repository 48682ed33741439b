use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::engine::TranslationOutcome;

/// One audit trail entry emitted alongside a finished translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub at: DateTime<Utc>,
    pub action: String,
    pub detail: String,
}

/// Optional persistence collaborator. Best-effort: a failing store is
/// logged and never blocks returning the result to the caller.
pub trait ScanStore: Send + Sync {
    fn record(&self, outcome: &TranslationOutcome) -> anyhow::Result<()>;
    fn audit(&self, event: &AuditEvent) -> anyhow::Result<()>;
}

/// Discards everything. The default when no persistence is configured.
#[derive(Debug, Default)]
pub struct NullStore;

impl ScanStore for NullStore {
    fn record(&self, _outcome: &TranslationOutcome) -> anyhow::Result<()> {
        Ok(())
    }

    fn audit(&self, _event: &AuditEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// In-memory store, used by tests and by callers that render their own
/// report from the retained outcomes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    outcomes: Mutex<Vec<TranslationOutcome>>,
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryStore {
    pub fn outcome_count(&self) -> usize {
        self.outcomes.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ScanStore for MemoryStore {
    fn record(&self, outcome: &TranslationOutcome) -> anyhow::Result<()> {
        self.outcomes
            .lock()
            .map_err(|_| anyhow::anyhow!("outcome store poisoned"))?
            .push(outcome.clone());
        Ok(())
    }

    fn audit(&self, event: &AuditEvent) -> anyhow::Result<()> {
        self.events
            .lock()
            .map_err(|_| anyhow::anyhow!("audit store poisoned"))?
            .push(event.clone());
        Ok(())
    }
}
