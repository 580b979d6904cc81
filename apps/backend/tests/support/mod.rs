#![allow(dead_code)]

pub mod veto_client;

pub use app_builder::{create_test_app, test_state};
pub use veto_client::VetoClient;
