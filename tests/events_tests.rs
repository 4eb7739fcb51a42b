//! Integration tests for the built-in event declarations.
//!
//! These exercise the global registry, so all tests in this file share
//! process-wide state; the one test that mutates activation flags restores
//! them so the rest can run in any order.

use vfn_trace::registry::Registry;
use vfn_trace::{apply_selection, clear_selection, events};

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn test_init_registers_all_events() {
    vfn_trace::init();

    assert!(events::is_initialized());
    assert_eq!(Registry::global().count(), events::NUM_EVENTS);
}

#[test]
fn test_reinit_is_a_noop() {
    vfn_trace::init();
    vfn_trace::init();

    assert_eq!(Registry::global().count(), events::NUM_EVENTS);
}

#[test]
fn test_every_event_name_resolves() {
    vfn_trace::init();

    let registry = Registry::global();
    for name in [
        events::NVME_CQ_GET_CQE,
        events::NVME_CQ_GOT_CQE,
        events::NVME_CQ_SPIN,
        events::NVME_CQ_UPDATE_HEAD,
        events::NVME_SQ_POST,
        events::NVME_SQ_UPDATE_TAIL,
        events::NVME_SKIP_MMIO,
        events::IOMMUFD_IOAS_MAP_DMA,
        events::IOMMUFD_IOAS_UNMAP_DMA,
        events::VFIO_IOMMU_TYPE1_MAP_DMA,
        events::VFIO_IOMMU_TYPE1_UNMAP_DMA,
        events::VFIO_IOMMU_TYPE1_RECYCLE_EPHEMERAL_IOVAS,
    ] {
        assert!(registry.lookup(name).is_some(), "missing event: {}", name);
    }
}

#[test]
fn test_handles_available_after_init() {
    vfn_trace::init();

    assert!(events::handles().is_some());
}

#[test]
fn test_only_cq_fetch_defaults_off() {
    vfn_trace::init();

    for tp in Registry::global().enumerate() {
        assert_eq!(tp.default_active, tp.name != events::NVME_CQ_GET_CQE);
    }
}

// =============================================================================
// End-to-End Selection Test
// =============================================================================

#[test]
fn test_end_to_end_defaults_then_selective_activation() {
    vfn_trace::init();
    let registry = Registry::global();

    let rows = registry.enumerate();
    assert_eq!(rows.len(), 12);

    // Immediately after initialization every flag sits at its default.
    for tp in &rows {
        assert_eq!(
            tp.active, tp.default_active,
            "{} not at its default state",
            tp.name
        );
    }

    // Activating the one defaulted-off event flips exactly that entry.
    let report = apply_selection(registry, [events::NVME_CQ_GET_CQE]);
    assert_eq!(report.matched, 1);
    assert!(report.fully_applied());

    for tp in registry.enumerate() {
        if tp.name == events::NVME_CQ_GET_CQE {
            assert!(tp.active);
        } else {
            assert_eq!(tp.active, tp.default_active);
        }
    }

    let handles = events::handles().unwrap();
    assert!(handles.nvme_cq_get_cqe.is_active());

    // Restore the default so the other tests in this binary see a clean
    // registry regardless of execution order.
    clear_selection(registry, [events::NVME_CQ_GET_CQE]);
    assert!(!handles.nvme_cq_get_cqe.is_active());
}
