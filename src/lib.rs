pub mod bridge;
pub mod domain;
pub mod exec;
pub mod npm;
pub mod progress;
pub mod project;

/// Test utilities shared across unit tests.
#[cfg(test)]
pub mod test_utils {
    use crate::progress::Progress;
    use std::sync::{Arc, Mutex};

    /// A progress sink that records every line, for asserting on exact
    /// message ordering.
    #[derive(Clone, Default)]
    pub struct RecordingProgress {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingProgress {
        pub fn new() -> Self {
            RecordingProgress::default()
        }

        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Progress for RecordingProgress {
        fn write(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
    }
}
