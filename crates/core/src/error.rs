use crate::patch::UpdateRejection;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Update rejected: {0}")]
    Rejected(#[from] UpdateRejection),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
