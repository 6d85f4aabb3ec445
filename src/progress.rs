//! The user-facing progress sink the host wires the bridge to.

/// One `write` per user-visible state transition; ordering is part of the
/// bridge's observable contract.
pub trait Progress: Send + Sync {
    fn write(&self, message: &str);
}

/// Writes progress lines to stdout.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn write(&self, message: &str) {
        println!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_progress_does_not_panic() {
        ConsoleProgress.write("Installing npm dependencies for the root project");
    }
}
