use thiserror::Error;

/// Schema violations found while validating a dataset document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid artifact key '{0}' (expected set|slot|mainStat)")]
    InvalidArtifactKey(String),

    #[error("invalid main stat key '{0}' (expected slot|mainStat)")]
    InvalidSlotKey(String),

    #[error("invalid rank {rank} in {context} (ranks start at 1)")]
    InvalidRank { context: String, rank: u32 },

    #[error("mainStatsBySlot lists unknown slot '{0}'")]
    UnknownSlot(String),

    #[error("empty {field} in {context}")]
    EmptyField {
        field: &'static str,
        context: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
