/// Galaxy3D post-processing engine - process-level logging host
///
/// Holds the global logger and severity filter used by the `engine_*!`
/// macros. GPU-side state (surface pool, programs, pass graph) is never stored
/// here: it lives in explicitly constructed `PostProcessor` objects.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::Result;
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Whether `Engine::initialize()` has been called since the last shutdown
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Minimum severity forwarded to the logger (stored as the enum index)
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn severity_from_index(index: u8) -> LogSeverity {
    match index {
        0 => LogSeverity::Trace,
        1 => LogSeverity::Debug,
        2 => LogSeverity::Info,
        3 => LogSeverity::Warn,
        _ => LogSeverity::Error,
    }
}

// ===== PUBLIC API =====

/// Engine singleton manager
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_postfx::galaxy3d::Engine;
/// use galaxy_3d_postfx::galaxy3d::log::LogSeverity;
///
/// Engine::initialize()?;
/// Engine::set_min_severity(LogSeverity::Debug);
/// // ... create post processors, render frames ...
/// Engine::shutdown();
/// # Ok::<(), galaxy_3d_postfx::galaxy3d::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Initialize the engine
    ///
    /// Idempotent. Returns Result for parity with the other subsystems.
    pub fn initialize() -> Result<()> {
        let _ = logger_lock();
        if !INITIALIZED.swap(true, Ordering::SeqCst) {
            crate::engine_debug!("galaxy3d::Engine", "Engine initialized");
        }
        Ok(())
    }

    /// Shutdown the engine
    ///
    /// Restores the default logger and severity filter. Safe to call when
    /// the engine was never initialized.
    pub fn shutdown() {
        if INITIALIZED.swap(false, Ordering::SeqCst) {
            crate::engine_debug!("galaxy3d::Engine", "Engine shut down");
        }
        Self::reset_logger();
        MIN_SEVERITY.store(LogSeverity::Info as u8, Ordering::SeqCst);
    }

    /// Whether `initialize()` was called since the last `shutdown()`
    pub fn is_initialized() -> bool {
        INITIALIZED.load(Ordering::SeqCst)
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the minimum severity forwarded to the logger
    ///
    /// ERROR entries are always forwarded.
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity as u8, Ordering::SeqCst);
    }

    /// Current minimum severity
    pub fn min_severity() -> LogSeverity {
        severity_from_index(MIN_SEVERITY.load(Ordering::SeqCst))
    }

    fn enabled(severity: LogSeverity) -> bool {
        severity == LogSeverity::Error || severity >= Self::min_severity()
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if !Self::enabled(severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! and engine_err! to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if !Self::enabled(severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
