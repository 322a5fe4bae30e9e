use scylla::errors::{DbError, ExecutionError, NewSessionError, PrepareError, RequestAttemptError};

/// Error type for Cassandra client operations
#[derive(Debug, thiserror::Error)]
pub enum CassandraError {
    /// No endpoint reachable or session build failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Malformed or semantically invalid statement
    #[error("Query error: {0}")]
    Query(String),

    /// Unknown keyspace, table, or column
    #[error("Schema error: {0}")]
    Schema(String),

    /// No response within the configured bound
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Bind arity mismatch against a prepared statement
    #[error("Argument error: statement takes {expected} bind value(s), got {actual}")]
    Argument { expected: usize, actual: usize },

    /// Statement operation on a closed session
    #[error("Session is closed")]
    Closed,

    /// Result deserialization or driver-internal failure
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<NewSessionError> for CassandraError {
    fn from(err: NewSessionError) -> Self {
        CassandraError::Connection(err.to_string())
    }
}

impl From<PrepareError> for CassandraError {
    fn from(err: PrepareError) -> Self {
        CassandraError::Query(err.to_string())
    }
}

impl From<ExecutionError> for CassandraError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::RequestTimeout { .. } => CassandraError::Timeout(err.to_string()),
            ExecutionError::BadQuery { .. } => CassandraError::Query(err.to_string()),
            ExecutionError::ConnectionPoolError { .. } => {
                CassandraError::Connection(err.to_string())
            }
            ExecutionError::LastAttemptError(attempt) => match attempt {
                RequestAttemptError::DbError(db, message) => classify_db_error(&db, &message),
                other => CassandraError::Query(other.to_string()),
            },
            other => CassandraError::Query(other.to_string()),
        }
    }
}

/// Map a server-side error code to the client error taxonomy.
///
/// Cassandra reports both syntax problems and unknown schema objects through
/// `Invalid`, so the message text decides between the two.
pub(crate) fn classify_db_error(err: &DbError, message: &str) -> CassandraError {
    match err {
        DbError::SyntaxError | DbError::Unauthorized => {
            CassandraError::Query(format!("{err}: {message}"))
        }
        DbError::Invalid => {
            if mentions_schema_object(message) {
                CassandraError::Schema(message.to_string())
            } else {
                CassandraError::Query(message.to_string())
            }
        }
        DbError::AlreadyExists { .. } => CassandraError::Schema(format!("{err}: {message}")),
        DbError::ReadTimeout { .. } | DbError::WriteTimeout { .. } => {
            CassandraError::Timeout(format!("{err}: {message}"))
        }
        DbError::Unavailable { .. } | DbError::Overloaded | DbError::IsBootstrapping => {
            CassandraError::Connection(format!("{err}: {message}"))
        }
        other => CassandraError::Query(format!("{other}: {message}")),
    }
}

fn mentions_schema_object(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("keyspace")
        || lower.contains("table")
        || lower.contains("column")
        || lower.contains("unconfigured")
        || lower.contains("does not exist")
}
