#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

/// Build an unsigned JWT carrying `payload`.
pub fn make_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

/// Run the CLI with isolated token storage and the given backend.
pub fn run_cli(args: &[&str], data_dir: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_arona"));
    cmd.args(args);
    cmd.env("ARONA_DATA_DIR", data_dir);
    cmd.env("ARONA_API_URL", api_url);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], data_dir: &Path, api_url: &str) -> String {
    let output = run_cli(args, data_dir, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], data_dir: &Path, api_url: &str) -> String {
    let output = run_cli(args, data_dir, api_url);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Seed the token file as a previous sign-in would have left it.
pub fn store_token(data_dir: &Path, token: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    let json = serde_json::json!({ "auth_token": token });
    std::fs::write(data_dir.join("storage.json"), json.to_string()).unwrap();
}

/// The token currently on disk, if any.
pub fn stored_token(data_dir: &Path) -> Option<String> {
    let json = std::fs::read_to_string(data_dir.join("storage.json")).ok()?;
    let value: Value = serde_json::from_str(&json).ok()?;
    value["auth_token"].as_str().map(str::to_string)
}
