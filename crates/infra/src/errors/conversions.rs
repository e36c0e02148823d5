//! Conversions from external infrastructure errors into domain errors.

use std::io;
use std::path::Path;

use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use vectara_domain::VectaraError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub VectaraError);

impl From<InfraError> for VectaraError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<VectaraError> for InfraError {
    fn from(value: VectaraError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoVectaraError {
    fn into_vectara(self) -> VectaraError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → VectaraError */
/* -------------------------------------------------------------------------- */

impl IntoVectaraError for SqlError {
    fn into_vectara(self) -> VectaraError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => VectaraError::Database("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        VectaraError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        VectaraError::Database("unique constraint violation".into())
                    }
                    _ => VectaraError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => VectaraError::Database("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                VectaraError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                VectaraError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => VectaraError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => VectaraError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_vectara())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → VectaraError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(VectaraError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → VectaraError */
/* -------------------------------------------------------------------------- */

impl IntoVectaraError for HttpError {
    fn into_vectara(self) -> VectaraError {
        if self.is_timeout() {
            return VectaraError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return VectaraError::Transport(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return VectaraError::from_status(status.as_u16(), self.to_string());
        }

        VectaraError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_vectara())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → VectaraError */
/* -------------------------------------------------------------------------- */

/// Map a filesystem error, keeping the path it happened on
pub fn io_error(path: &Path, err: &io::Error) -> VectaraError {
    VectaraError::Io { path: path.display().to_string(), message: err.to_string() }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
