//! Trace-point registry and activation flags.
//!
//! Each instrumented event is declared once with a stable name and a
//! default activation state. The registry collects every declaration into
//! one ordered, name-addressable table; the [`Handle`] returned at
//! registration is the only thing a call site keeps for its guard check.
//!
//! The table is append-only during initialization and structurally
//! read-only afterwards. Only the per-entry activation flags ever mutate,
//! and those are plain atomics, so guard checks never touch the lock.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;

/// The process-wide registry instance.
static GLOBAL: Registry = Registry::new();

/// Error types for registry operations.
#[derive(Debug, Clone)]
pub enum Error {
    /// A trace point with this name is already registered.
    DuplicateName(&'static str),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                write!(f, "Trace point already registered: {}", name)
            }
        }
    }
}

impl core::error::Error for Error {}

/// Opaque handle to a registered trace point.
///
/// Returned by [`Registry::register`] and consumed by every guard check.
/// Copyable and freely shareable across threads; the underlying flag lives
/// for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    flag: &'static AtomicBool,
}

impl Handle {
    /// Guard check: is this trace point currently active?
    ///
    /// A single relaxed atomic load. No lock, no allocation. A concurrent
    /// flag flip may become visible on a later check rather than
    /// instantaneously; a reader always sees either the old or the new
    /// value, never a torn one.
    #[inline]
    pub fn is_active(self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Flip the activation flag. Written only by the activator.
    pub(crate) fn set_active(self, active: bool) {
        self.flag.store(active, Ordering::Relaxed);
    }
}

/// Enumeration row for a single trace point.
#[derive(Debug, Clone)]
pub struct TracePointInfo {
    /// Stable trace-point name.
    pub name: &'static str,
    /// Declared default activation state.
    pub default_active: bool,
    /// Activation state at the time of enumeration.
    pub active: bool,
}

struct Entry {
    name: &'static str,
    default_active: bool,
    handle: Handle,
}

/// Ordered, name-addressable table of trace points.
///
/// [`Registry::global`] is the process-wide instance used by instrumented
/// code; it is constructed before any declaration runs and never torn down.
/// Separate instances can be built with [`Registry::new`] for test
/// isolation.
pub struct Registry {
    entries: Mutex<Vec<Entry>>,
}

impl Registry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Get the process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register a trace point.
    ///
    /// Called once per declaration site during initialization. Registering
    /// a name twice is a configuration error in the instrumented subsystem
    /// and is reported rather than silently overwriting the first
    /// declaration.
    pub fn register(&self, name: &'static str, default_active: bool) -> Result<Handle, Error> {
        let mut entries = self.entries.lock();
        if entries.iter().any(|e| e.name == name) {
            return Err(Error::DuplicateName(name));
        }

        // Call sites keep reading the flag for the process lifetime, so it
        // gets a stable leaked allocation independent of the table storage.
        let flag: &'static AtomicBool = Box::leak(Box::new(AtomicBool::new(default_active)));
        let handle = Handle { flag };
        entries.push(Entry {
            name,
            default_active,
            handle,
        });

        debug!(
            "registered trace point {} (default {})",
            name,
            if default_active { "on" } else { "off" }
        );
        Ok(handle)
    }

    /// Look up a trace point by exact name.
    pub fn lookup(&self, name: &str) -> Option<Handle> {
        self.entries
            .lock()
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.handle)
    }

    /// Snapshot all trace points in declaration order.
    pub fn enumerate(&self) -> Vec<TracePointInfo> {
        self.entries
            .lock()
            .iter()
            .map(|e| TracePointInfo {
                name: e.name,
                default_active: e.default_active,
                active: e.handle.is_active(),
            })
            .collect()
    }

    /// Number of registered trace points.
    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Set every registered flag. Backs the wildcard selection token.
    pub(crate) fn set_all(&self, active: bool) -> usize {
        let entries = self.entries.lock();
        for e in entries.iter() {
            e.handle.set_active(active);
        }
        entries.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
