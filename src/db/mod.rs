pub mod error;
pub mod main_store;
mod memory_store;
mod store;

pub use error::StoreError;
pub use main_store::MainStore;
pub use memory_store::MemoryStore;
pub use store::PrefStore;
