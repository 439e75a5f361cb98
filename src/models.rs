// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction kind. Anything the backend sends that is not income or
/// expense is preserved verbatim and left out of totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxType {
    Income,
    Expense,
    Other(String),
}

impl TxType {
    pub fn as_str(&self) -> &str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
            TxType::Other(s) => s,
        }
    }

    /// Strict parse used for user input; only the two known kinds pass.
    pub fn parse_known(s: &str) -> Option<TxType> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TxType::Income),
            "expense" => Some(TxType::Expense),
            _ => None,
        }
    }
}

impl From<String> for TxType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "income" => TxType::Income,
            "expense" => TxType::Expense,
            _ => TxType::Other(s),
        }
    }
}

impl From<TxType> for String {
    fn from(t: TxType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub r#type: TxType,
    #[serde(default)]
    pub category: Option<String>,
    // Kept raw; an unparseable value must not fail the whole list.
    pub date: String,
}

/// Body of `POST /tx/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub r#type: TxType,
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
}

/// Server-side totals from `GET /summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
}

/// An export artifact, passed through untouched.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}
