//! Account Service
//!
//! Use-case façade held by the router as state. Validates request bodies,
//! runs the matching handler, and maps outcomes onto `AppError`.

mod requests;
mod responses;

use std::sync::Arc;

use crate::domain::account::{USERNAME_MAX_CHARS, USERNAME_MIN_CHARS};
use crate::domain::{AccountSummary, MutationOutcome};
use crate::error::{AppError, AppResult};
use crate::handlers::{CreateAccountCommand, CreateAccountHandler, MutateAccountCommand, MutationWorkflow};
use crate::projection::{PageRequest, Paginator};
use crate::store::{AccountStore, StoreError};
use crate::validation::{within_chars, Validate};

pub use requests::{
    CreateAccountRequest, DisableAccountRequest, ListAccountsRequest, UpdatePasswordRequest,
    UpdateProfileRequest,
};
pub use responses::{EmptyResponse, ListAccountsResponse};

const REDACTED_DETAIL: &str = "An internal error occurred";

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    creator: CreateAccountHandler,
    workflow: MutationWorkflow,
    paginator: Paginator,
    redact_internal_errors: bool,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            creator: CreateAccountHandler::new(store.clone()),
            workflow: MutationWorkflow::new(store.clone()),
            paginator: Paginator::new(store.clone()),
            store,
            redact_internal_errors: false,
        }
    }

    /// Hide store error details from 500 responses (production)
    pub fn with_redacted_errors(mut self, redact: bool) -> Self {
        self.redact_internal_errors = redact;
        self
    }

    pub async fn create(&self, request: CreateAccountRequest) -> AppResult<()> {
        request.validate().map_err(AppError::Validation)?;

        let command = CreateAccountCommand::new(request.username, request.password);
        self.creator
            .execute(command)
            .await
            .map_err(|e| self.store_failure(e))
    }

    pub async fn update_profile(&self, request: UpdateProfileRequest) -> AppResult<()> {
        request.validate().map_err(AppError::Validation)?;

        let command = MutateAccountCommand::set_profile(
            request.username,
            request.current_password,
            request.about,
            request.age,
        );
        self.mutate(command).await
    }

    pub async fn update_password(&self, request: UpdatePasswordRequest) -> AppResult<()> {
        request.validate().map_err(AppError::Validation)?;

        let command = MutateAccountCommand::set_password(
            request.username,
            request.current_password,
            request.new_password,
        );
        self.mutate(command).await
    }

    pub async fn disable(&self, request: DisableAccountRequest) -> AppResult<()> {
        request.validate().map_err(AppError::Validation)?;

        let command = MutateAccountCommand::disable(request.username, request.password);
        self.mutate(command).await
    }

    pub async fn list(&self, request: ListAccountsRequest) -> AppResult<ListAccountsResponse> {
        request.validate().map_err(AppError::Validation)?;

        let page_request =
            PageRequest::new(request.page, request.size_page).map_err(AppError::Validation)?;
        let page = self
            .paginator
            .list(page_request)
            .await
            .map_err(|e| self.store_failure(e))?;

        Ok(page.into())
    }

    /// Public fields of one active account.
    ///
    /// A name that could never have been created reads as not found.
    pub async fn get(&self, username: &str) -> AppResult<AccountSummary> {
        if !within_chars(username, USERNAME_MIN_CHARS, USERNAME_MAX_CHARS) {
            return Err(AppError::AccountNotFound(username.to_string()));
        }

        self.store
            .find_active(username)
            .await
            .map_err(|e| self.store_failure(e))?
            .ok_or_else(|| AppError::AccountNotFound(username.to_string()))
    }

    async fn mutate(&self, command: MutateAccountCommand) -> AppResult<()> {
        let username = command.username.clone();
        let outcome = self
            .workflow
            .execute(command)
            .await
            .map_err(|e| self.store_failure(e))?;

        match outcome {
            MutationOutcome::Applied => Ok(()),
            MutationOutcome::NotFound => Err(AppError::AccountNotFound(username)),
            MutationOutcome::Denied => Err(AppError::PermissionDenied),
            MutationOutcome::Invalid(violations) => Err(AppError::Validation(violations)),
        }
    }

    fn store_failure(&self, error: StoreError) -> AppError {
        if error.is_duplicate() {
            tracing::warn!(error = %error, "Account creation rejected");
            return AppError::Database(error.to_string());
        }

        tracing::error!(error = ?error, "Store operation failed");
        if self.redact_internal_errors {
            AppError::Database(REDACTED_DETAIL.to_string())
        } else {
            AppError::Database(error.to_string())
        }
    }
}
