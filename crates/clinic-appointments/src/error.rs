//! Error types for appointment persistence.

/// A failure to reach or query the database.
///
/// Both variants are database-access failures; they only record which layer
/// reported it. Missing rows are never errors, they surface as `None`.
#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    /// A statement failed to prepare or execute (SQL error, constraint
    /// violation, I/O failure while stepping the cursor).
    #[error("appointment database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No pooled connection could be checked out.
    #[error("appointment connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}
