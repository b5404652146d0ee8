//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{AdminUserListing, UserCounts, UserListFilter};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read access to registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users matching `filter`, newest first, with any profile summary.
    async fn list(
        &self,
        filter: &UserListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminUserListing>, UserPersistenceError>;

    /// Count users by type; `recently_registered` counts users created at or
    /// after `since`.
    async fn counts(&self, since: DateTime<Utc>) -> Result<UserCounts, UserPersistenceError>;
}
