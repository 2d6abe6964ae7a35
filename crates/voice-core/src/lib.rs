//! # Voice Core
//!
//! The domain layer of the PositiveVoice backend.
//! Post lifecycle rules, the AI gateway policy and the ports that
//! infrastructure must implement. Zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{AiGateway, PostService};
