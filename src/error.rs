use thiserror::Error;

pub type UserId = u32;
pub type ItemId = u32;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// user or item missing from the loaded data
    #[error("bad input: user {user} / item {item} not in loaded data")]
    BadInput { user: UserId, item: ItemId },

    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T, E = RecommendError> = std::result::Result<T, E>;
