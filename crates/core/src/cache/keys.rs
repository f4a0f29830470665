use crate::identity::UserId;

/// Cache key for one listing request.
///
/// Keys carry the raw `limit` and `offset` exactly as the caller sent them,
/// before normalization. Two requests that normalize to the same window but
/// differ in their raw values occupy separate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingKey {
    pub user_id: UserId,
    pub limit: i64,
    pub offset: i64,
}

impl ListingKey {
    pub fn new(user_id: UserId, limit: i64, offset: i64) -> Self {
        Self {
            user_id,
            limit,
            offset,
        }
    }
}

impl std::fmt::Display for ListingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "todos:{}:{}:{}", self.user_id, self.limit, self.offset)
    }
}
