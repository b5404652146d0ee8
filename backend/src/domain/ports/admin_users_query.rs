//! Driving port for the admin user listing.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{AdminUserListing, Error, UserListFilter};

/// Admin use-case listing registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminUsersQuery: Send + Sync {
    /// Paginated users, newest first, without credential material.
    async fn list_users(
        &self,
        filter: &UserListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminUserListing>, Error>;
}
