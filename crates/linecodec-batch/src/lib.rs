//! # linecodec-batch
//!
//! Batch parse engine for ordered line collections.
//!
//! ## Features
//! - Three scheduling strategies: sequential, Rayon parallel, Tokio async —
//!   all with identical output for identical input
//! - Order preserved by pre-assigned result slots, never by append
//! - `max_errors` early termination and cooperative cancellation
//! - Line-supply helpers for files and readers ("absence is not failure")
//!
//! ## Usage
//! ```no_run
//! use linecodec_batch::{BatchEngine, ParseRequest, Strategy};
//!
//! // let engine = BatchEngine::new();
//! // let result = engine.parse::<MyLine>(ParseRequest::new(lines).strategy(Strategy::Parallel));
//! ```

pub mod engine;
pub mod request;
pub mod source;

pub use engine::BatchEngine;
pub use request::{CancelToken, ParseRequest, Strategy};
