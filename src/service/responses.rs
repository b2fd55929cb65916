//! Response bodies

use serde::{Deserialize, Serialize};

use crate::domain::AccountSummary;
use crate::projection::AccountPage;

/// `{}` body for successful mutations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// GET /v1/list-users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsResponse {
    pub users: Vec<AccountSummary>,
    pub amount_page: u64,
    pub size_page: u64,
    pub current_page: u64,
}

impl From<AccountPage> for ListAccountsResponse {
    fn from(page: AccountPage) -> Self {
        Self {
            users: page.accounts,
            amount_page: page.total_pages,
            size_page: page.size_page,
            current_page: page.page,
        }
    }
}
