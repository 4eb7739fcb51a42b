//! Built-in trace points of the instrumented library.
//!
//! One declaration per instrumented event in the NVMe queue and IOMMU/DMA
//! mapping paths. Names are the stable operator-facing identifiers;
//! defaults match the shipped configuration, where everything is on except
//! the completion queue fetch probe (it fires on every poll of an empty
//! queue and would drown the writer).

use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;

use crate::registry::{Error, Handle, Registry};

// =============================================================================
// Event Names
// =============================================================================

/// A completion queue entry is about to be fetched.
pub const NVME_CQ_GET_CQE: &str = "nvme_cq_get_cqe";
/// A completion queue entry was fetched.
pub const NVME_CQ_GOT_CQE: &str = "nvme_cq_got_cqe";
/// Spinning on the completion queue phase bit.
pub const NVME_CQ_SPIN: &str = "nvme_cq_spin";
/// Completion queue head doorbell update.
pub const NVME_CQ_UPDATE_HEAD: &str = "nvme_cq_update_head";
/// A submission queue entry was posted.
pub const NVME_SQ_POST: &str = "nvme_sq_post";
/// Submission queue tail doorbell update.
pub const NVME_SQ_UPDATE_TAIL: &str = "nvme_sq_update_tail";
/// A doorbell MMIO write was elided.
pub const NVME_SKIP_MMIO: &str = "nvme_skip_mmio";
/// DMA mapping through an iommufd IOAS.
pub const IOMMUFD_IOAS_MAP_DMA: &str = "iommufd_ioas_map_dma";
/// DMA unmapping through an iommufd IOAS.
pub const IOMMUFD_IOAS_UNMAP_DMA: &str = "iommufd_ioas_unmap_dma";
/// DMA mapping through vfio iommu type1.
pub const VFIO_IOMMU_TYPE1_MAP_DMA: &str = "vfio_iommu_type1_map_dma";
/// DMA unmapping through vfio iommu type1.
pub const VFIO_IOMMU_TYPE1_UNMAP_DMA: &str = "vfio_iommu_type1_unmap_dma";
/// Ephemeral IOVA ranges recycled after quiescence.
pub const VFIO_IOMMU_TYPE1_RECYCLE_EPHEMERAL_IOVAS: &str =
    "vfio_iommu_type1_recycle_ephemeral_iovas";

/// Number of built-in trace points.
pub const NUM_EVENTS: usize = 12;

// =============================================================================
// Handles
// =============================================================================

/// Guard-check handles for the built-in trace points.
///
/// `Copy`, so instrumented subsystems can grab the whole set once at
/// startup and keep it around without touching the registry again.
#[derive(Debug, Clone, Copy)]
pub struct EventHandles {
    pub nvme_cq_get_cqe: Handle,
    pub nvme_cq_got_cqe: Handle,
    pub nvme_cq_spin: Handle,
    pub nvme_cq_update_head: Handle,
    pub nvme_sq_post: Handle,
    pub nvme_sq_update_tail: Handle,
    pub nvme_skip_mmio: Handle,
    pub iommufd_ioas_map_dma: Handle,
    pub iommufd_ioas_unmap_dma: Handle,
    pub vfio_iommu_type1_map_dma: Handle,
    pub vfio_iommu_type1_unmap_dma: Handle,
    pub vfio_iommu_type1_recycle_ephemeral_iovas: Handle,
}

/// Handles registered with the global registry.
static HANDLES: Mutex<Option<EventHandles>> = Mutex::new(None);

/// Whether the built-in events have been registered.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

fn register_all(registry: &Registry) -> Result<EventHandles, Error> {
    Ok(EventHandles {
        nvme_cq_get_cqe: registry.register(NVME_CQ_GET_CQE, false)?,
        nvme_cq_got_cqe: registry.register(NVME_CQ_GOT_CQE, true)?,
        nvme_cq_spin: registry.register(NVME_CQ_SPIN, true)?,
        nvme_cq_update_head: registry.register(NVME_CQ_UPDATE_HEAD, true)?,
        nvme_sq_post: registry.register(NVME_SQ_POST, true)?,
        nvme_sq_update_tail: registry.register(NVME_SQ_UPDATE_TAIL, true)?,
        nvme_skip_mmio: registry.register(NVME_SKIP_MMIO, true)?,
        iommufd_ioas_map_dma: registry.register(IOMMUFD_IOAS_MAP_DMA, true)?,
        iommufd_ioas_unmap_dma: registry.register(IOMMUFD_IOAS_UNMAP_DMA, true)?,
        vfio_iommu_type1_map_dma: registry.register(VFIO_IOMMU_TYPE1_MAP_DMA, true)?,
        vfio_iommu_type1_unmap_dma: registry.register(VFIO_IOMMU_TYPE1_UNMAP_DMA, true)?,
        vfio_iommu_type1_recycle_ephemeral_iovas: registry
            .register(VFIO_IOMMU_TYPE1_RECYCLE_EPHEMERAL_IOVAS, true)?,
    })
}

/// Register the built-in trace points with the global registry.
///
/// Must run before any instrumented hot-path code executes. Calling it
/// again is a logged no-op.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        warn!("trace events already registered");
        return;
    }

    match register_all(Registry::global()) {
        Ok(handles) => {
            *HANDLES.lock() = Some(handles);
            info!("registered {} trace events", NUM_EVENTS);
        }
        Err(e) => {
            INITIALIZED.store(false, Ordering::SeqCst);
            error!("failed to register trace events: {}", e);
        }
    }
}

/// Guard-check handles for the built-in events, or `None` before [`init`].
pub fn handles() -> Option<EventHandles> {
    *HANDLES.lock()
}

/// Check if the built-in events have been registered.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}
