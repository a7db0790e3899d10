use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid network type `{0}`, expected `colocation` or `taste`")]
    InvalidNetworkType(String),

    #[error("user {0} does not appear in the venue profiles")]
    UnknownUser(u64),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("user {0} has no venue overlap with any profile, percentages are undefined")]
    DegenerateProfile(u64),

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
