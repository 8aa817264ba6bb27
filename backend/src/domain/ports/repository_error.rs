//! Error type shared by every persistence port.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// An insert or update collided with a unique constraint.
        UniqueViolation { message: String } => "unique constraint violated: {message}",
        /// A row references, or is referenced by, a row that blocks the change.
        ForeignKey { message: String } => "foreign key constraint violated: {message}",
    }
}

impl RepositoryError {
    /// Translate a repository failure into a domain error about `resource`.
    ///
    /// Connection failures surface as service unavailable, constraint
    /// failures as conflicts, and query failures as internal errors.
    ///
    /// # Examples
    /// ```
    /// use travel_backend::domain::ErrorCode;
    /// use travel_backend::domain::ports::RepositoryError;
    ///
    /// let err = RepositoryError::foreign_key("histories_user_id_fkey").into_domain("User");
    /// assert_eq!(err.code(), ErrorCode::Conflict);
    /// ```
    #[must_use]
    pub fn into_domain(self, resource: &str) -> Error {
        match self {
            Self::Connection { message } => {
                Error::service_unavailable(format!("{resource} repository unavailable: {message}"))
            }
            Self::Query { message } => {
                Error::internal(format!("{resource} repository error: {message}"))
            }
            Self::UniqueViolation { .. } => Error::conflict(format!("{resource} already exists")),
            Self::ForeignKey { .. } => Error::conflict(format!(
                "{resource} is linked to other records and cannot be changed this way"
            )),
        }
    }
}
