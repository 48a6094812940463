use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid parameter {name}={value}: expected {range}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        range: String,
    },

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, value: f64, range: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            value,
            range: range.into(),
        }
    }
}

impl From<hound::Error> for FilterError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => FilterError::Io(e),
            other => FilterError::UnsupportedFormat(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
