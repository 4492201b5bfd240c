use crate::models::media::ResourceHandle;

/// Allocates dereferenceable handles over assembled capture bytes.
///
/// The platform analogue hands out object URLs backed by in-memory blobs.
/// Handles stay valid until revoked, which is outside this crate.
pub trait ResourceAllocator: Send + Sync {
    /// Assemble `chunks` in order and return a handle to the result.
    fn allocate(&self, chunks: &[Vec<u8>]) -> ResourceHandle;
}
