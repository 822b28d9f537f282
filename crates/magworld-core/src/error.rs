use thiserror::Error;

use crate::BodyId;

/// Construction-time faults. Evolving a well-formed world never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("shape has no cells")]
    EmptyShape,
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),
    #[error("unknown body {0}")]
    UnknownBody(BodyId),
    #[error("agent body `{0}` is fixed")]
    FixedAgent(String),
    #[error("unrecognized script key `{key}` at offset {offset}")]
    ScriptKey { key: char, offset: usize },
    #[error("repeat count at offset {offset} is out of range")]
    ScriptCount { offset: usize },
}
