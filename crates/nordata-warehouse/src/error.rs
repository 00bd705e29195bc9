use thiserror::Error;

/// Errors from warehouse helpers.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The credentials environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),

    /// The connection string could not be parsed.
    #[error("malformed credentials: {0}")]
    MalformedCredentials(String),

    /// An argument was rejected before contacting the warehouse.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The statement itself is wrong (syntax, unknown table, ...).
    #[error("SQL ProgrammingError = {0}")]
    Programming(String),

    /// Any other failure reported by the driver.
    #[error("SQL error = {0}")]
    Sql(String),

    /// Reading a SQL file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for warehouse operations.
pub type WarehouseResult<T> = Result<T, WarehouseError>;
