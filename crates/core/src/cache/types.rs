use crate::todo::TodoPage;

/// Generation stamp handed out on a cache miss.
///
/// A fill presenting a fence older than the user's current generation is
/// discarded, so a page computed before an invalidation never lands in the
/// cache after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillFence(u64);

impl FillFence {
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Hit(TodoPage),
    Miss(FillFence),
}
