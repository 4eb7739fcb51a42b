//! Runtime-toggleable trace points for NVMe queue and IOMMU/DMA paths.
//!
//! Each instrumented event is declared once with a stable name and a
//! compile-time default activation state. All declarations land in one
//! process-wide [`Registry`]; an operator selection (exact names or the
//! `*` wildcard) flips individual activation flags at runtime without
//! recompiling, and a disabled event costs one relaxed atomic load on the
//! hot path.
//!
//! Formatting and emission of trace records is out of scope here; a call
//! site performs the guard check and hands off to the external writer only
//! when the trace point is active.
//!
//! # Quick Start
//!
//! ```ignore
//! // Initialize once during library startup, before any I/O workers run.
//! vfn_trace::init();
//!
//! // Activate trace points named by the operator, e.g. from an
//! // environment variable.
//! let registry = vfn_trace::Registry::global();
//! let report = vfn_trace::apply_selection(
//!     registry,
//!     vfn_trace::split_spec("nvme_cq_spin,nvme_sq_post"),
//! );
//! if !report.fully_applied() {
//!     log::warn!("{} unknown trace point(s) in selection", report.unknown.len());
//! }
//!
//! // Hot path: guard check before emitting a trace record.
//! let events = vfn_trace::events::handles().unwrap();
//! if events.nvme_cq_spin.is_active() {
//!     // emit the record via the external writer
//! }
//!
//! // Listing for a --list-trace-points style surface.
//! for tp in registry.enumerate() {
//!     log::info!("{}: {}", tp.name, if tp.active { "on" } else { "off" });
//! }
//! ```

#![no_std]

extern crate alloc;

#[macro_use]
extern crate log;

pub mod activator;
pub mod events;
pub mod registry;

// Re-export key types for convenience
pub use activator::{SelectionReport, WILDCARD, apply_selection, clear_selection, split_spec};
pub use registry::{Error, Handle, Registry, TracePointInfo};

/// Initialize the trace-point subsystem.
///
/// Registers the built-in events with the global registry. Call once during
/// library startup, before any instrumented hot-path code can execute;
/// calling it again is a logged no-op.
pub fn init() {
    info!("Initializing trace points...");

    events::init();

    info!(
        "Trace-point registry ready with {} entries",
        Registry::global().count()
    );
}
