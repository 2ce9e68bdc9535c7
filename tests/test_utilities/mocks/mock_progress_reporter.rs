use bom_artifact_sync::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter for testing that captures events
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn start(&self, total: usize) {
        self.events.lock().unwrap().push(format!("start: {}", total));
    }

    fn advance(&self, repository: &str, outcome: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}: {}", repository, outcome));
    }

    fn finish(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("finish: {}", message));
    }
}
