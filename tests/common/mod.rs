// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};
use ledgerline::api::Backend;
use ledgerline::error::{ApiError, ApiResult};
use ledgerline::models::{
    Credentials, ExportFile, NewTransaction, RegisteredUser, Summary, TokenResponse, Transaction,
    TxType,
};
use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};
use std::str::FromStr;

pub fn local(y: i32, m: u32, d: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn tx(id: i64, kind: &str, amount: &str, date: &str) -> Transaction {
    Transaction {
        id,
        title: format!("tx {}", id),
        amount: dec(amount),
        r#type: TxType::from(kind.to_string()),
        category: None,
        date: date.to_string(),
    }
}

/// In-memory backend recording every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    pub rows: RefCell<Vec<Transaction>>,
    pub calls: RefCell<Vec<String>>,
    /// Status every authenticated call answers with, when set.
    pub fail_with: Cell<Option<u16>>,
    /// Fails only the listing endpoint.
    pub fail_list_with: Cell<Option<u16>>,
    pub next_id: Cell<i64>,
}

impl FakeBackend {
    pub fn with_rows(rows: Vec<Transaction>) -> Self {
        let next = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let b = Self::default();
        *b.rows.borrow_mut() = rows;
        b.next_id.set(next);
        b
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }

    fn check(&self, token: &str) -> ApiResult<()> {
        if token != "tok" {
            return Err(ApiError::Unauthorized);
        }
        match self.fail_with.get() {
            Some(code) => Err(ApiError::from_status(code, r#"{"detail":"boom"}"#)),
            None => Ok(()),
        }
    }
}

impl Backend for FakeBackend {
    fn register(&self, creds: &Credentials) -> ApiResult<RegisteredUser> {
        self.record("register");
        if creds.username == "taken" {
            return Err(ApiError::from_status(400, r#"{"detail":"Username already exists"}"#));
        }
        Ok(RegisteredUser {
            id: 1,
            username: creds.username.clone(),
        })
    }

    fn login(&self, creds: &Credentials) -> ApiResult<TokenResponse> {
        self.record("login");
        if creds.password != "secret" {
            return Err(ApiError::Status {
                status: 401,
                message: "Invalid credentials".into(),
            });
        }
        Ok(TokenResponse {
            access_token: "tok".into(),
            token_type: Some("bearer".into()),
        })
    }

    fn list_transactions(&self, token: &str) -> ApiResult<Vec<Transaction>> {
        self.record("list");
        self.check(token)?;
        if let Some(code) = self.fail_list_with.get() {
            return Err(ApiError::from_status(code, ""));
        }
        Ok(self.rows.borrow().clone())
    }

    fn add_transaction(&self, token: &str, new: &NewTransaction) -> ApiResult<Transaction> {
        self.record("add");
        self.check(token)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = Transaction {
            id,
            title: new.title.clone(),
            amount: new.amount,
            r#type: new.r#type.clone(),
            category: new.category.clone(),
            date: new
                .date
                .clone()
                .unwrap_or_else(|| "2024-03-10T12:00:00".to_string()),
        };
        self.rows.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn delete_transaction(&self, token: &str, id: i64) -> ApiResult<()> {
        self.record("delete");
        self.check(token)?;
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(ApiError::from_status(404, r#"{"detail":"Transaction not found"}"#));
        }
        Ok(())
    }

    fn export_csv(&self, token: &str) -> ApiResult<ExportFile> {
        self.record("export");
        self.check(token)?;
        Ok(ExportFile {
            filename: Some("transactions.csv".into()),
            bytes: b"id,title\n1,rent\n".to_vec(),
        })
    }

    fn summary(&self, token: &str) -> ApiResult<Summary> {
        self.record("summary");
        self.check(token)?;
        Ok(Summary {
            total_income: dec("100"),
            total_expense: dec("40"),
            net_balance: dec("60"),
        })
    }
}
