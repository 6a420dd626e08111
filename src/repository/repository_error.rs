use mongodb::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Already Exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid Query: {0}")]
    InvalidQuery(String),
    #[error("Database Error: {0}")]
    DatabaseError(String),
    #[error("Connection Error: {0}")]
    ConnectionError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
}

impl RepositoryError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RepositoryError::NotFound(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::DatabaseError(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RepositoryError::SerializationError(msg.into())
    }
}

/// Server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        let message = err.to_string();
        match err.kind.as_ref() {
            ErrorKind::Write(mongodb::error::WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
                RepositoryError::AlreadyExists(message)
            }
            ErrorKind::Authentication { .. } | ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                RepositoryError::ConnectionError(message)
            }
            ErrorKind::InvalidArgument { .. } => RepositoryError::InvalidQuery(message),
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                RepositoryError::SerializationError(message)
            }
            _ => RepositoryError::DatabaseError(message),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON deserialization error: {}", err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_kind() {
        assert_eq!(RepositoryError::not_found("Booking 42").to_string(), "Not Found: Booking 42");
        assert_eq!(RepositoryError::database("timeout").to_string(), "Database Error: timeout");
    }

    #[test]
    fn test_bson_errors_are_serialization_errors() {
        let err = bson::from_document::<crate::model::contact::ContactSubmission>(bson::doc! { "name": 5 })
            .map_err(RepositoryError::from)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::SerializationError(_)));
    }
}
