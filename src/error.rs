use thiserror::Error;

/// Failures surfaced by the scheduling services.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl SchedulerError {
    /// Text safe to show to the operator. Database details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            SchedulerError::Database(_) => "Something went wrong while talking to the database".to_string(),
            SchedulerError::Validation(msg) => msg.clone(),
            SchedulerError::NotFound(what) => format!("{what} not found"),
        }
    }
}

impl From<anyhow::Error> for SchedulerError {
    fn from(err: anyhow::Error) -> Self {
        SchedulerError::Validation(err.to_string())
    }
}
