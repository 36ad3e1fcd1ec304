//! E2E test suite entry point.

mod build_workflow;
#[path = "../common/mod.rs"]
mod common;
mod search_workflow;
