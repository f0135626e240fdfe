//! The shopping cart core: store, storage seam, and session registry.

mod sessions;
mod storage;
mod store;

pub use sessions::*;
pub use storage::*;
pub use store::*;
