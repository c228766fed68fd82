//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated multiple-choice question
//! - [`player::PlayerId`]: the identity a score is attributed to
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod player;
pub mod question;
pub mod string;
