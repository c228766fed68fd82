//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod event_logger;
pub mod presenter;
pub mod question_generator;
pub mod score_store;
