//! Test support for the veto backend
//!
//! Logging initialization shared by unit and integration tests, plus
//! assertions for the Problem Details error contract.

pub mod logging;
pub mod problem_details;

pub use problem_details::{assert_problem_details, ProblemDetailsLike};
