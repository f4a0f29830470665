//! Listing cache backend and its background sweeper.

pub mod memory;
mod sweeper;

pub use memory::MemoryListingCache;
pub use sweeper::spawn_sweeper;
