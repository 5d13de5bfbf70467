use thiserror::Error;

#[derive(Debug, Error)]
pub enum RbacError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown workcenter: {0}")]
    UnknownWorkcenter(String),
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("invalid grant: {0}")]
    InvalidGrant(String),
}

pub type RbacResult<T> = Result<T, RbacError>;
