//! Integration tests for hashrate-scout

mod config_test;
mod pipeline_test;
