// =============================================================================
// MiniCon — Limine Boot Protocol Interface
// =============================================================================
//
// The kernel binary contains static request structures in the
// `.limine_requests` section. Limine scans for them at boot and fills in
// response pointers before jumping to `kmain()`.
//
// We only need two things from the bootloader:
//   - the base revision handshake (proves Limine understood our requests)
//   - the HHDM offset, to reach the VGA text buffer at physical 0xB8000
//
// Base revision 2 is requested on purpose: from revision 3 on, Limine stops
// mapping the legacy low-memory holes (where the VGA buffer lives) into the
// HHDM.
// =============================================================================

use limine::BaseRevision;
use limine::request::HhdmRequest;

#[used]
#[unsafe(link_section = ".limine_requests")]
static BASE_REVISION: BaseRevision = BaseRevision::with_revision(2);

/// Request for the Higher Half Direct Map offset.
///
/// Physical address P is accessible at virtual address P + offset.
#[used]
#[unsafe(link_section = ".limine_requests")]
static HHDM_REQUEST: HhdmRequest = HhdmRequest::new();

/// Whether the loader accepted our base revision.
pub fn base_revision_supported() -> bool {
    BASE_REVISION.is_supported()
}

/// The HHDM offset, or `None` if the loader did not answer the request.
pub fn hhdm_offset() -> Option<u64> {
    HHDM_REQUEST.get_response().map(|response| response.offset())
}
