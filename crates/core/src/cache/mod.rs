mod error;
mod keys;
mod traits;
mod types;

pub use error::{CacheError, Result};
pub use keys::ListingKey;
pub use traits::ListingCache;
pub use types::{FillFence, Lookup};
