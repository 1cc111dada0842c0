//! Error types for the model facade and the object extender
//!
//! The facade adds no error kinds of its own on top of SeaORM: anything the
//! database layer raises is carried through `ModelError::Database` untouched,
//! so callers can still match on the original `DbErr`.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors returned by the `Model` / `ModelMut` operations
///
/// # Example
///
/// ```rust,ignore
/// use modelkit::{Model, ModelError, FindOptions};
///
/// match users::Entity::get_all(&db, FindOptions::new()).await {
///     Ok(users) => println!("{} users", users.len()),
///     Err(ModelError::Database(e)) => eprintln!("query failed: {e}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ModelError {
    /// Error raised by SeaORM or the database driver, passed through as-is
    #[error(transparent)]
    Database(#[from] DbErr),

    /// A hydrated record could not be converted to its plain shape
    #[error("Plain conversion failed: {0}")]
    Plain(#[from] serde_json::Error),

    /// `patch` ran on a backend that only reports an affected row count
    ///
    /// Only returned when the call uses `CountOnly::Error`.
    #[error("Update on '{table}' affected {rows_affected} row(s) but the backend cannot return them")]
    ReturningUnsupported {
        /// Table the update ran against
        table: String,
        /// Row count reported by the backend
        rows_affected: u64,
    },
}

impl ModelError {
    /// Create a ReturningUnsupported error
    pub fn returning_unsupported(table: impl Into<String>, rows_affected: u64) -> Self {
        Self::ReturningUnsupported {
            table: table.into(),
            rows_affected,
        }
    }

    /// The underlying database error, if this error came from SeaORM
    pub fn as_db_err(&self) -> Option<&DbErr> {
        match self {
            Self::Database(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised when invoking members of an extended [`Object`](crate::extend::Object)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtendError {
    /// No layer of the object defines the name
    #[error("'{0}' is not defined on this object")]
    Missing(String),

    /// The name resolves to a plain value, not a method
    #[error("'{0}' is not a method")]
    NotCallable(String),

    /// A method rejected its arguments
    #[error("Invalid argument for '{name}': {message}")]
    InvalidArgument {
        /// Method that rejected the call
        name: String,
        /// Why the argument was rejected
        message: String,
    },
}

impl ExtendError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_pass_through() {
        let err: ModelError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err.as_db_err(), Some(DbErr::Custom(m)) if m == "boom"));
        assert_eq!(err.to_string(), "Custom Error: boom");
    }

    #[test]
    fn test_returning_unsupported_message() {
        let err = ModelError::returning_unsupported("users", 2);
        assert!(err.as_db_err().is_none());
        assert_eq!(
            err.to_string(),
            "Update on 'users' affected 2 row(s) but the backend cannot return them"
        );
    }
}
