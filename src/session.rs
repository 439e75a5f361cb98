// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;

/// Settings key the bearer token lives under.
pub const TOKEN_KEY: &str = "access_token";

/// Where the credential token is persisted between runs.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl TokenStore for Connection {
    fn load(&self) -> Result<Option<String>> {
        let v: Option<String> = self
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![TOKEN_KEY],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v.filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<()> {
        self.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![TOKEN_KEY, token],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.execute("DELETE FROM settings WHERE key=?1", params![TOKEN_KEY])?;
        Ok(())
    }
}

/// In-process store, useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// An authenticated session. Exists only while a token is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Session guard for protected commands: `None` means "go to login".
    pub fn guard(store: &dyn TokenStore) -> Result<Option<Session>> {
        Ok(store.load()?.map(|token| Session { token }))
    }

    /// Persists a freshly issued token and returns the session it opens.
    pub fn start(store: &dyn TokenStore, token: &str) -> Result<Session> {
        store.save(token)?;
        Ok(Session {
            token: token.to_string(),
        })
    }

    /// Ends the session. Safe to call when already logged out.
    pub fn end(store: &dyn TokenStore) -> Result<()> {
        store.clear()
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
