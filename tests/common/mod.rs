//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use recsv::{parse_str, ReadOptions};

/// Parse with default options, panicking on malformed input
pub fn rows(input: &str) -> Vec<Vec<String>> {
    parse_str(input, ReadOptions::default()).unwrap()
}

/// Build an owned row from string slices
pub fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// Build owned rows from string slices
pub fn owned(table: &[&[&str]]) -> Vec<Vec<String>> {
    table.iter().map(|fields| row(fields)).collect()
}
