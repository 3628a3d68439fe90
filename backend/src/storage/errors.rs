use thiserror::Error;

/// Failures surfaced by the repositories.
///
/// Constraint violations get their own variants so the service layer can
/// map a lost check-then-write race to a conflict instead of an internal
/// error; everything else stays wrapped as `Database`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key rejected the write or delete.
    #[error("foreign key constraint violated")]
    ForeignKeyViolation,

    /// The targeted row no longer exists (raced with a concurrent delete).
    #[error("row not found")]
    RowNotFound,

    /// A value cannot be represented in its column.
    #[error("value out of range for column {column}")]
    OutOfRange { column: &'static str },

    /// Any other database failure.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return StoreError::UniqueViolation {
                        constraint: db_err.message().to_string(),
                    };
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return StoreError::ForeignKeyViolation;
                }
                _ => {
                    // SQLite reports a restrict-on-delete failure as
                    // SQLITE_CONSTRAINT_TRIGGER, which kind() leaves
                    // unclassified; only insert/update failures carry the
                    // foreign-key code
                    if db_err.message().contains("FOREIGN KEY constraint failed") {
                        return StoreError::ForeignKeyViolation;
                    }
                }
            }
        }
        StoreError::Database(err)
    }
}
