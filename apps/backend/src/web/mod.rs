//! HTTP boundary helpers shared by middleware, extractors and errors.

pub mod trace_ctx;
