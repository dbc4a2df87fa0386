use std::sync::{Arc, Mutex};

use renderq::events::{JobEvent, JobEventSink};
use renderq::exec::ExecutionReport;

/// Sink that keeps every event, for asserting on what the loop did.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<JobEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<JobEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Ids of jobs in the order they were started.
    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                JobEvent::Started { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Terminal reports in completion order.
    pub fn finished(&self) -> Vec<ExecutionReport> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                JobEvent::Finished(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    /// File names of descriptors that failed to load.
    pub fn load_failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                JobEvent::LoadFailed { file, .. } => Some(file),
                _ => None,
            })
            .collect()
    }
}

impl JobEventSink for RecordingSink {
    fn record(&self, event: &JobEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
