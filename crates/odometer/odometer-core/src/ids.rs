//! Run generation identifiers.

use serde::{Deserialize, Serialize};

/// Generation of one animation run. Ticks tagged with an older id are stale.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RunId(pub u32);

/// Monotonic allocator for RunId.
#[derive(Default, Debug)]
pub struct RunAllocator {
    next_run: u32,
}

impl RunAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> RunId {
        let id = RunId(self.next_run);
        self.next_run = self.next_run.wrapping_add(1);
        id
    }
}
