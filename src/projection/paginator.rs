//! Paginator
//!
//! Windowed listing of active accounts. The total is read off the
//! `COUNT(*) OVER ()` column that accompanies every returned row, so a normal
//! page costs a single read.

use std::sync::Arc;

use crate::domain::AccountSummary;
use crate::store::{AccountStore, PageWindow, StoreResult};
use crate::validation::Violation;

/// Largest accepted page size
pub const SIZE_PAGE_MAX: u64 = 65535;

/// Largest accepted page number
pub const PAGE_MAX: u64 = i64::MAX as u64;

/// A validated page request (`page >= 1`, `1 <= size_page <= 65535`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, size_page: u64) -> Result<Self, Vec<Violation>> {
        let mut violations = Vec::new();
        if !(1..=PAGE_MAX).contains(&page) {
            violations.push(Violation::new(
                "page",
                format!("must be between 1 and {}", PAGE_MAX),
            ));
        }
        if !(1..=SIZE_PAGE_MAX).contains(&size_page) {
            violations.push(Violation::new(
                "size_page",
                format!("must be between 1 and {}", SIZE_PAGE_MAX),
            ));
        }

        if violations.is_empty() {
            Ok(Self { page, size_page })
        } else {
            Err(violations)
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size_page(&self) -> u64 {
        self.size_page
    }

    /// `LIMIT size_page OFFSET (page - 1) * size_page`.
    ///
    /// Offsets beyond `i64::MAX` saturate; such a window is always empty.
    pub fn window(&self) -> PageWindow {
        let offset = (self.page - 1)
            .checked_mul(self.size_page)
            .and_then(|offset| i64::try_from(offset).ok())
            .unwrap_or(i64::MAX);

        PageWindow {
            limit: self.size_page as i64,
            offset,
        }
    }
}

/// Number of pages needed for `total_count` rows
pub fn total_pages(total_count: u64, size_page: u64) -> u64 {
    if size_page == 0 {
        return 0;
    }
    (total_count + size_page - 1) / size_page
}

/// One page of active accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPage {
    pub accounts: Vec<AccountSummary>,
    pub total_count: u64,
    pub total_pages: u64,
    pub page: u64,
    pub size_page: u64,
}

/// Lists active accounts page by page
#[derive(Clone)]
pub struct Paginator {
    store: Arc<dyn AccountStore>,
}

impl Paginator {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Read one page.
    ///
    /// An empty first page means there are no active accounts. An empty later
    /// page carries no count column, so the total is fetched separately.
    pub async fn list(&self, request: PageRequest) -> StoreResult<AccountPage> {
        let rows = self.store.page_active(request.window()).await?;

        let total_count = match rows.first() {
            Some(row) => row.total_count,
            None if request.page() > 1 => self.store.count_active().await?,
            None => 0,
        };

        tracing::debug!(
            page = request.page(),
            size_page = request.size_page(),
            returned = rows.len(),
            total_count = total_count,
            "Account page read"
        );

        Ok(AccountPage {
            accounts: rows.into_iter().map(|row| row.account).collect(),
            total_count,
            total_pages: total_pages(total_count, request.size_page()),
            page: request.page(),
            size_page: request.size_page(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::derive_credential;
    use crate::domain::NewAccount;
    use crate::store::MemoryAccountStore;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 65535), 1);
        assert_eq!(total_pages(i64::MAX as u64, 65535), (i64::MAX as u64).div_ceil(65535));
    }

    #[test]
    fn test_page_request_bounds() {
        assert!(PageRequest::new(1, 1).is_ok());
        assert!(PageRequest::new(PAGE_MAX, SIZE_PAGE_MAX).is_ok());

        let violations = PageRequest::new(0, 0).unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["page", "size_page"]);

        assert!(PageRequest::new(PAGE_MAX + 1, 10).is_err());
        assert!(PageRequest::new(1, SIZE_PAGE_MAX + 1).is_err());
    }

    #[test]
    fn test_window_math() {
        let window = PageRequest::new(3, 10).unwrap().window();
        assert_eq!(window, PageWindow { limit: 10, offset: 20 });

        let window = PageRequest::new(1, 65535).unwrap().window();
        assert_eq!(window.offset, 0);

        let window = PageRequest::new(PAGE_MAX, SIZE_PAGE_MAX).unwrap().window();
        assert_eq!(window.offset, i64::MAX);
    }

    async fn store_with(count: usize) -> MemoryAccountStore {
        let store = MemoryAccountStore::new();
        for i in 0..count {
            store
                .insert(NewAccount {
                    username: format!("user_{:03}", i),
                    credential: derive_credential("secretpw"),
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_empty_store_lists_zero_pages() {
        let paginator = Paginator::new(Arc::new(store_with(0).await));
        let page = paginator.list(PageRequest::new(1, 10).unwrap()).await.unwrap();

        assert!(page.accounts.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_last_partial_page() {
        let paginator = Paginator::new(Arc::new(store_with(25).await));
        let page = paginator.list(PageRequest::new(3, 10).unwrap()).await.unwrap();

        assert_eq!(page.accounts.len(), 5);
        assert_eq!(page.accounts[0].username, "user_020");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.size_page, 10);
    }

    #[tokio::test]
    async fn test_page_past_the_end_keeps_total() {
        let paginator = Paginator::new(Arc::new(store_with(20).await));
        let page = paginator.list(PageRequest::new(5, 10).unwrap()).await.unwrap();

        assert!(page.accounts.is_empty());
        assert_eq!(page.total_count, 20);
        assert_eq!(page.total_pages, 2);
    }
}
