use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrgError {
    #[error("API key not found. Please run 'org auth' to configure.")]
    ApiKeyNotFound,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PermissionDenied(String),

    /// A membership points at a team the server did not return alongside it.
    #[error("Inconsistent data from server: {0}")]
    Consistency(String),

    #[error("{} errors occurred: {}", .0.len(), join_messages(.0))]
    Aggregate(Vec<OrgError>),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Aborted")]
    Aborted,

    #[error("State error: {0}")]
    StateError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type OrgResult<T> = Result<T, OrgError>;

/// Coarse classification of an [`OrgError`], mostly useful for matching in
/// callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    PermissionDenied,
    Consistency,
    Aggregate,
    Other,
}

impl OrgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrgError::NotFound(_) => ErrorKind::NotFound,
            OrgError::Conflict(_) => ErrorKind::Conflict,
            OrgError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            OrgError::Consistency(_) => ErrorKind::Consistency,
            OrgError::Aggregate(_) => ErrorKind::Aggregate,
            _ => ErrorKind::Other,
        }
    }

    /// One message per underlying failure. Aggregates are flattened.
    pub fn messages(&self) -> Vec<String> {
        match self {
            OrgError::Aggregate(errors) => errors.iter().flat_map(|e| e.messages()).collect(),
            other => vec![other.to_string()],
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

fn join_messages(errors: &[OrgError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> OrgResult<T>;
    fn with_context<F>(self, f: F) -> OrgResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> OrgResult<T> {
        self.map_err(|e| OrgError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> OrgResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| OrgError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> OrgResult<T> {
        self.ok_or_else(|| OrgError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> OrgResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| OrgError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! org_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::OrgError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::OrgError::$error_type(format!($fmt, $($arg)*))
    };
}
