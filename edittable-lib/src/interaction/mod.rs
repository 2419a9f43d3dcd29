//! Pointer gestures, the save latch and unsaved-edit tracking

mod dirty;
mod drag;
mod latch;

pub use dirty::DirtyState;
pub use drag::*;
pub use latch::SaveGuard;
pub use latch::SaveLatch;
