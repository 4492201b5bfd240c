//! In-memory resource allocation.

use std::collections::HashMap;

use parking_lot::Mutex;

use device_capture_core::models::media::ResourceHandle;
use device_capture_core::traits::resource_allocator::ResourceAllocator;

/// Allocator that assembles chunks into an in-memory store keyed by
/// `mem://` URLs, with readback for content assertions.
pub struct MemoryAllocator {
    store: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryAllocator {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    /// The bytes behind a handle, if this allocator issued it.
    pub fn bytes_for(&self, handle: &ResourceHandle) -> Option<Vec<u8>> {
        self.store.lock().get(&handle.url).cloned()
    }

    /// Number of live allocations.
    pub fn allocation_count(&self) -> usize {
        self.store.lock().len()
    }
}

impl Default for MemoryAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceAllocator for MemoryAllocator {
    fn allocate(&self, chunks: &[Vec<u8>]) -> ResourceHandle {
        let mut bytes = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks {
            bytes.extend_from_slice(chunk);
        }

        let url = format!("mem://{}", uuid::Uuid::new_v4());
        log::debug!("allocated {} bytes at {}", bytes.len(), url);
        self.store.lock().insert(url.clone(), bytes);
        ResourceHandle { url }
    }
}
