use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifyError>;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing environment variable: {name}")]
    MissingEnv { name: String },

    #[error("webhook rejected notification: HTTP {status}")]
    Rejected { status: u16 },
}

impl NotifyError {
    #[must_use]
    pub fn missing_env(name: &str) -> Self {
        Self::MissingEnv {
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }
}
