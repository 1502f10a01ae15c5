use crate::expression::error::ParseError;
use crate::foundation::ids::PlacedId;

pub type BlocksResult<T> = Result<T, BlocksError>;

#[derive(thiserror::Error, Debug)]
pub enum BlocksError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown operator kind: {0}")]
    UnknownOperatorKind(String),

    #[error("unknown function kind: {0}")]
    UnknownFunctionKind(String),

    #[error("unknown value kind: {0}")]
    UnknownValueKind(String),

    #[error("missing owner expression: {0}")]
    MissingOwnerExpression(PlacedId),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlocksError {
    pub fn unknown_operator(op: impl Into<String>) -> Self {
        Self::UnknownOperatorKind(op.into())
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunctionKind(name.into())
    }

    pub fn unknown_value(kind: impl Into<String>) -> Self {
        Self::UnknownValueKind(kind.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Errors that abort one interaction step without invalidating the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingOwnerExpression(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
