mod cache;

pub use cache::MemoryListingCache;
