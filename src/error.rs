//! Error types for load combination generation

use thiserror::Error;

use crate::combinations::LoadBehaviour;
use crate::loads::{CombinationType, LimitState};

/// Main error type for load combination operations
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Unknown {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Combination type '{combination_type}' is not valid for limit state '{limit_state}'")]
    IncompatibleCombination {
        limit_state: LimitState,
        combination_type: CombinationType,
    },

    #[error("Alternative combination requires a variant selector (6.10a or 6.10b)")]
    MissingAlternativeVariant,

    #[error("Variant selector given for non-alternative combination type '{0}'")]
    UnexpectedAlternativeVariant(CombinationType),

    #[error("Unsupported combination: no rule for '{0}'")]
    UnsupportedCombination(CombinationType),

    #[error("Partial factors for {0} actions are not implemented")]
    UnimplementedBehaviour(LoadBehaviour),

    #[error("Factor table has no entry for {0}")]
    MissingFactor(String),

    #[error("Variable load case '{0}' requires a category")]
    MissingCategory(String),

    #[error("Load case '{0}' is not variable and must not have a category")]
    UnexpectedCategory(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Load case '{0}' not found")]
    LoadCaseNotFound(String),

    #[error("Load case group '{0}' not found")]
    GroupNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DesignError {
    pub(crate) fn invalid(kind: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}

/// Result type for load combination operations
pub type DesignResult<T> = Result<T, DesignError>;
