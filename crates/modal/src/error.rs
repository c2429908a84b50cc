//! Modal configuration errors.

use thiserror::Error;

use crate::ElementId;

/// A problem with the modal's surroundings.
///
/// Never returned to callers: operations log it and become no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("{0} not found")]
    MissingElement(ElementId),
}
