// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The dashboard workflow: guard, fetch, render and the mutation actions.
//!
//! Every action reports where the user should go next as a [`Navigation`]
//! and leaves user-facing messages in the notice queue. A 401 from any
//! authenticated call ends the session and navigates to login.

use crate::api::Backend;
use crate::error::ApiError;
use crate::filter::FilterState;
use crate::models::{Credentials, ExportFile, NewTransaction, Summary, Transaction, TxType};
use crate::session::{Session, TokenStore};
use crate::utils::{parse_date, parse_decimal};
use crate::view::{DashboardView, Renderer};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(m) => f.write_str(m),
            Notice::Error(m) => write!(f, "error: {}", m),
        }
    }
}

/// Raw input of the add-transaction action, validated before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub amount: String,
    pub r#type: String,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl AddForm {
    pub fn validate(&self) -> Result<NewTransaction, ApiError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::Validation("Title must not be empty".into()));
        }
        let amount = parse_decimal(&self.amount).map_err(|_| {
            ApiError::Validation(format!("Amount '{}' is not a number", self.amount.trim()))
        })?;
        let r#type = TxType::parse_known(&self.r#type).ok_or_else(|| {
            ApiError::Validation(format!(
                "Type '{}' must be income or expense",
                self.r#type.trim()
            ))
        })?;
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            None => None,
            Some(d) if DateTime::parse_from_rfc3339(d).is_ok() => Some(d.to_string()),
            Some(d) => {
                let day = parse_date(d).map_err(|e| ApiError::Validation(e.to_string()))?;
                Some(format!("{}T00:00:00", day))
            }
        };
        Ok(NewTransaction {
            title: title.to_string(),
            amount,
            r#type,
            category,
            date,
        })
    }
}

pub struct App<'s, B: Backend> {
    backend: B,
    store: &'s dyn TokenStore,
    renderer: Renderer,
    transactions: Vec<Transaction>,
    summary: Option<Summary>,
    notices: Vec<Notice>,
}

impl<'s, B: Backend> App<'s, B> {
    pub fn new(backend: B, store: &'s dyn TokenStore) -> Self {
        Self {
            backend,
            store,
            renderer: Renderer::new(),
            transactions: Vec::new(),
            summary: None,
            notices: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn info(&mut self, msg: impl Into<String>) {
        self.notices.push(Notice::Info(msg.into()));
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.notices.push(Notice::Error(msg.into()));
    }

    fn guard(&mut self) -> Result<Option<Session>> {
        let session = Session::guard(self.store)?;
        if session.is_none() {
            self.error("You are not logged in. Run `ledgerline login` first.");
        }
        Ok(session)
    }

    fn expire(&mut self) -> Result<Navigation> {
        warn!("session expired, clearing stored token");
        Session::end(self.store)?;
        self.transactions.clear();
        self.error(ApiError::Unauthorized.to_string());
        Ok(Navigation::Login)
    }

    /// Shared handling for a failed authenticated call.
    fn failed(&mut self, what: &str, err: ApiError) -> Result<Navigation> {
        if err.is_unauthorized() {
            return self.expire();
        }
        self.error(format!("{}: {}", what, err));
        Ok(Navigation::Stay)
    }

    pub fn register(&mut self, creds: &Credentials) -> Result<Navigation> {
        match self.backend.register(creds) {
            Ok(user) => {
                self.info(format!("Registered '{}'. You can now log in.", user.username));
                Ok(Navigation::Login)
            }
            Err(e) => {
                self.error(format!("Registration failed: {}", e));
                Ok(Navigation::Stay)
            }
        }
    }

    pub fn login(&mut self, creds: &Credentials) -> Result<Navigation> {
        match self.backend.login(creds) {
            Ok(resp) if !resp.access_token.is_empty() => {
                Session::start(self.store, &resp.access_token)?;
                info!(username = %creds.username, "logged in");
                self.info(format!("Logged in as '{}'.", creds.username));
                Ok(Navigation::Dashboard)
            }
            Ok(_) => {
                self.error("Login failed: server returned no token");
                Ok(Navigation::Stay)
            }
            Err(e) => {
                self.error(format!("Login failed: {}", e));
                Ok(Navigation::Stay)
            }
        }
    }

    /// Logs out. Calling it without a session is harmless.
    pub fn logout(&mut self) -> Result<Navigation> {
        Session::end(self.store)?;
        self.transactions.clear();
        self.info("Logged out.");
        Ok(Navigation::Login)
    }

    /// Guards, then fetches the transaction list.
    pub fn load(&mut self) -> Result<Navigation> {
        match self.guard()? {
            Some(session) => self.fetch(&session),
            None => Ok(Navigation::Login),
        }
    }

    fn fetch(&mut self, session: &Session) -> Result<Navigation> {
        match self.backend.list_transactions(session.token()) {
            Ok(list) => {
                self.transactions = list;
                Ok(Navigation::Stay)
            }
            Err(ApiError::Unauthorized) => self.expire(),
            Err(e) => {
                // Never leave a stale list behind a failed fetch.
                self.transactions.clear();
                self.error(format!("Failed to fetch transactions: {}", e));
                Ok(Navigation::Stay)
            }
        }
    }

    /// Re-reads the list after a successful mutation and asks for a redraw.
    fn refetch(&mut self, session: &Session) -> Result<Navigation> {
        match self.fetch(session)? {
            Navigation::Login => Ok(Navigation::Login),
            _ => Ok(Navigation::Dashboard),
        }
    }

    pub fn view(&self, filter: &FilterState, now: DateTime<Local>) -> DashboardView {
        DashboardView::build(&self.transactions, filter, now)
    }

    pub fn render(&mut self, filter: &FilterState, now: DateTime<Local>) -> String {
        let view = self.view(filter, now);
        self.renderer.render(&view)
    }

    /// Validates and submits the form, then re-fetches. The form is reset
    /// only once the backend accepted it. `Dashboard` means the list was
    /// refreshed and should be drawn again.
    pub fn add(&mut self, form: &mut AddForm) -> Result<Navigation> {
        let Some(session) = self.guard()? else {
            return Ok(Navigation::Login);
        };
        let tx = match form.validate() {
            Ok(tx) => tx,
            Err(e) => {
                self.error(e.to_string());
                return Ok(Navigation::Stay);
            }
        };
        match self.backend.add_transaction(session.token(), &tx) {
            Ok(created) => {
                *form = AddForm::default();
                self.info(format!("Added transaction {} '{}'.", created.id, created.title));
                self.refetch(&session)
            }
            Err(e) => self.failed("Failed to add transaction", e),
        }
    }

    /// Deletes after `confirm` agrees, then re-fetches. A confirmation that
    /// could not be read counts as a failure, not as a "no".
    pub fn delete<F>(&mut self, id: i64, confirm: F) -> Result<Navigation>
    where
        F: FnOnce(i64) -> Result<bool>,
    {
        let Some(session) = self.guard()? else {
            return Ok(Navigation::Login);
        };
        match confirm(id) {
            Ok(true) => {}
            Ok(false) => {
                self.info("Delete cancelled.");
                return Ok(Navigation::Stay);
            }
            Err(e) => {
                self.error(format!("Could not read confirmation: {}", e));
                return Ok(Navigation::Stay);
            }
        }
        match self.backend.delete_transaction(session.token(), id) {
            Ok(()) => {
                self.info(format!("Deleted transaction {}.", id));
                self.refetch(&session)
            }
            Err(e) => self.failed("Failed to delete transaction", e),
        }
    }

    /// Downloads the export and hands the untouched bytes to `save`.
    pub fn export<F>(&mut self, save: F) -> Result<Navigation>
    where
        F: FnOnce(&ExportFile) -> Result<String>,
    {
        let Some(session) = self.guard()? else {
            return Ok(Navigation::Login);
        };
        match self.backend.export_csv(session.token()) {
            Ok(file) => {
                let dest = save(&file)?;
                self.info(format!("Exported {} bytes to {}", file.bytes.len(), dest));
                Ok(Navigation::Stay)
            }
            Err(e) => self.failed("Export failed", e),
        }
    }

    pub fn load_summary(&mut self) -> Result<Navigation> {
        let Some(session) = self.guard()? else {
            return Ok(Navigation::Login);
        };
        match self.backend.summary(session.token()) {
            Ok(s) => {
                self.summary = Some(s);
                Ok(Navigation::Stay)
            }
            Err(e) => self.failed("Failed to load summary", e),
        }
    }
}
