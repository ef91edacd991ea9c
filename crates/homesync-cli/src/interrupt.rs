//! Ctrl+C handling around enclosed commands
//!
//! While an enclosed command runs it receives the interrupt itself, and this
//! process keeps going so the repository edits still get restored.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;

static IN_WORK: AtomicBool = AtomicBool::new(false);

/// Install the process-wide handler
pub fn install() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if IN_WORK.load(Ordering::SeqCst) {
            return;
        }
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130);
    })
    .context("Failed to set Ctrl+C handler")
}

/// Marks an enclosed command as running until dropped
pub struct WorkGuard;

impl WorkGuard {
    pub fn enter() -> Self {
        IN_WORK.store(true, Ordering::SeqCst);
        Self
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        IN_WORK.store(false, Ordering::SeqCst);
    }
}
