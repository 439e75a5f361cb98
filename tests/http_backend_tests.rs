// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerline::api::{attachment_filename, Backend, HttpBackend};
use ledgerline::config::Config;
use ledgerline::error::ApiError;
use ledgerline::models::{Credentials, NewTransaction, TxType};
use reqwest::Url;
use rust_decimal::Decimal;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse().ok())
        .unwrap_or(0)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            if buf.len() >= pos + 4 + content_length(&head) {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Answers exactly one request and hands back what was received.
fn serve_once(
    status: &'static str,
    headers: &'static str,
    body: &'static str,
) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
            status,
            body.len(),
            headers,
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });
    (Url::parse(&format!("http://{}", addr)).unwrap(), handle)
}

fn backend(base: Url) -> HttpBackend {
    let config = Config {
        origin: base.clone(),
        api_base: base,
        data_dir: None,
        timeout: Duration::from_secs(5),
    };
    HttpBackend::new(&config).unwrap()
}

#[test]
fn list_sends_bearer_and_decodes() {
    let body = r#"[{"id":7,"title":"Salary","amount":1500.75,"type":"income","category":null,"date":"2024-03-01T09:00:00+05:30"},
                  {"id":8,"title":"Move","amount":20,"type":"transfer","category":"Misc","date":"2024-03-02T10:00:00"}]"#;
    let (url, server) = serve_once("200 OK", "Content-Type: application/json\r\n", body);
    let list = backend(url).list_transactions("tok").unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("GET /transactions "));
    assert!(request.to_lowercase().contains("authorization: bearer tok"));
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].amount, Decimal::new(150075, 2));
    assert_eq!(list[0].r#type, TxType::Income);
    assert_eq!(list[0].category, None);
    assert_eq!(list[1].r#type, TxType::Other("transfer".into()));
}

#[test]
fn status_401_is_unauthorized() {
    let (url, server) = serve_once(
        "401 Unauthorized",
        "Content-Type: application/json\r\n",
        r#"{"detail":"Could not validate credentials"}"#,
    );
    let err = backend(url).delete_transaction("tok", 3).unwrap_err();
    let request = server.join().unwrap();
    assert!(request.starts_with("DELETE /delete-transaction/3 "));
    assert!(matches!(err, ApiError::Unauthorized));
}

#[test]
fn error_detail_becomes_message() {
    let (url, server) = serve_once(
        "404 Not Found",
        "Content-Type: application/json\r\n",
        r#"{"detail":"Transaction not found"}"#,
    );
    let err = backend(url).delete_transaction("tok", 99).unwrap_err();
    server.join().unwrap();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Transaction not found");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn error_without_body_gets_generic_message() {
    let (url, server) = serve_once("500 Internal Server Error", "", "");
    let err = backend(url).summary("tok").unwrap_err();
    server.join().unwrap();
    assert_eq!(err.to_string(), "Request failed with status 500");
}

#[test]
fn add_posts_amount_as_number() {
    let created = r#"{"id":1,"title":"Lunch","amount":12.5,"type":"expense","category":"Food","date":"2024-03-08T00:00:00"}"#;
    let (url, server) = serve_once("200 OK", "Content-Type: application/json\r\n", created);
    let new = NewTransaction {
        title: "Lunch".into(),
        amount: Decimal::new(125, 1),
        r#type: TxType::Expense,
        category: Some("Food".into()),
        date: Some("2024-03-08T00:00:00".into()),
    };
    let tx = backend(url).add_transaction("tok", &new).unwrap();
    let request = server.join().unwrap();
    assert!(request.starts_with("POST /tx/add "));
    assert!(request.contains(r#""amount":12.5"#));
    assert!(request.contains(r#""type":"expense""#));
    assert_eq!(tx.id, 1);
}

#[test]
fn export_keeps_bytes_and_filename() {
    let (url, server) = serve_once(
        "200 OK",
        "Content-Type: text/csv\r\nContent-Disposition: attachment; filename=transactions.csv\r\n",
        "id,title,amount\r\n1,Rent,900.0\r\n",
    );
    let file = backend(url).export_csv("tok").unwrap();
    server.join().unwrap();
    assert_eq!(file.filename.as_deref(), Some("transactions.csv"));
    assert_eq!(file.bytes, b"id,title,amount\r\n1,Rent,900.0\r\n".to_vec());
}

#[test]
fn login_401_means_bad_credentials() {
    let (url, server) = serve_once(
        "401 Unauthorized",
        "Content-Type: application/json\r\n",
        r#"{"detail":"Invalid credentials"}"#,
    );
    let creds = Credentials {
        username: "ana".into(),
        password: "wrong".into(),
    };
    let err = backend(url).login(&creds).unwrap_err();
    server.join().unwrap();
    assert!(!err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = Url::parse(&format!("http://{}", addr)).unwrap();
    let err = backend(url).list_transactions("tok").unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.to_string().starts_with("Network error"));
}

#[test]
fn content_disposition_parsing() {
    assert_eq!(
        attachment_filename(r#"attachment; filename="report.csv""#).as_deref(),
        Some("report.csv")
    );
    assert_eq!(attachment_filename("attachment"), None);
    assert_eq!(attachment_filename("attachment; filename=../etc/passwd"), None);
}
