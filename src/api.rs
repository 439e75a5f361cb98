// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Credentials, ExportFile, NewTransaction, RegisteredUser, Summary, TokenResponse, Transaction,
};
use crate::utils::http_client;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

/// The tracker backend. Every authenticated call takes the bearer token.
pub trait Backend {
    fn register(&self, creds: &Credentials) -> ApiResult<RegisteredUser>;
    fn login(&self, creds: &Credentials) -> ApiResult<TokenResponse>;
    fn list_transactions(&self, token: &str) -> ApiResult<Vec<Transaction>>;
    fn add_transaction(&self, token: &str, tx: &NewTransaction) -> ApiResult<Transaction>;
    fn delete_transaction(&self, token: &str, id: i64) -> ApiResult<()>;
    fn export_csv(&self, token: &str) -> ApiResult<ExportFile>;
    fn summary(&self, token: &str) -> ApiResult<Summary>;
}

pub struct HttpBackend {
    client: Client,
    base: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.timeout)?,
            base: config.api_base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn send(&self, req: RequestBuilder, what: &str) -> ApiResult<Response> {
        debug!(request = what, "sending request");
        let resp = req.send().map_err(|e| {
            error!(request = what, error = %e, "request failed");
            ApiError::Network(e)
        })?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        if err.is_unauthorized() {
            warn!(request = what, "backend rejected credentials");
        } else {
            debug!(request = what, status = status.as_u16(), "request unsuccessful");
        }
        Err(err)
    }

    fn authed(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header(AUTHORIZATION, format!("Bearer {}", token))
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let body = resp.text()?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pulls `filename` out of a `Content-Disposition` header value.
pub fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|v| v.trim_matches('"').to_string())
        .filter(|v| !v.is_empty() && !v.contains('/') && !v.contains('\\'))
}

impl Backend for HttpBackend {
    fn register(&self, creds: &Credentials) -> ApiResult<RegisteredUser> {
        let req = self.client.post(self.url("/register")).json(creds);
        decode(self.send(req, "POST /register")?)
    }

    fn login(&self, creds: &Credentials) -> ApiResult<TokenResponse> {
        let req = self.client.post(self.url("/login")).json(creds);
        match self.send(req, "POST /login") {
            // A 401 here means bad credentials, not an expired session.
            Err(ApiError::Unauthorized) => Err(ApiError::Status {
                status: 401,
                message: "Invalid credentials".into(),
            }),
            other => decode(other?),
        }
    }

    fn list_transactions(&self, token: &str) -> ApiResult<Vec<Transaction>> {
        let req = self.authed(self.client.get(self.url("/transactions")), token);
        decode(self.send(req, "GET /transactions")?)
    }

    fn add_transaction(&self, token: &str, tx: &NewTransaction) -> ApiResult<Transaction> {
        let req = self.authed(self.client.post(self.url("/tx/add")).json(tx), token);
        decode(self.send(req, "POST /tx/add")?)
    }

    fn delete_transaction(&self, token: &str, id: i64) -> ApiResult<()> {
        let path = format!("/delete-transaction/{}", id);
        let req = self.authed(self.client.delete(self.url(&path)), token);
        self.send(req, "DELETE /delete-transaction")?;
        Ok(())
    }

    fn export_csv(&self, token: &str) -> ApiResult<ExportFile> {
        let req = self.authed(self.client.get(self.url("/export-csv")), token);
        let resp = self.send(req, "GET /export-csv")?;
        let filename = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename);
        let bytes = resp.bytes()?.to_vec();
        Ok(ExportFile { filename, bytes })
    }

    fn summary(&self, token: &str) -> ApiResult<Summary> {
        let req = self.authed(self.client.get(self.url("/summary")), token);
        decode(self.send(req, "GET /summary")?)
    }
}
