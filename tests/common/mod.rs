#![allow(dead_code)]

use std::fs;
use std::io::Error;
use std::path::{Path, PathBuf};

pub const ACCOUNTS_CSV: &str = "account_id,balance,apr,minimum_payment,credit_limit\n\
                                visa,5000,18.99,150,10000\n\
                                store-card,3400,22,102,\n";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, Error> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Wraps `params` in the request envelope the CLI reads.
pub fn request(scenario_type: &str, params: serde_json::Value) -> String {
    serde_json::json!({"scenario_type": scenario_type, "params": params}).to_string()
}
