use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum IdeaServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("payment required: {0}")]
    PaymentRequired(String),
}

impl From<IdeaServiceError> for AppError {
    fn from(err: IdeaServiceError) -> Self {
        match err {
            IdeaServiceError::Invalid(msg) => AppError::BadRequest(msg),
            IdeaServiceError::NotFound(what) => AppError::NotFound(what),
            IdeaServiceError::PaymentRequired(msg) => AppError::PaymentRequired(msg),
            IdeaServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
