//! # Voice Shared
//!
//! Wire types shared by the HTTP functions and their clients:
//! the response envelope and the request/response DTOs.

pub mod dto;
pub mod response;

pub use response::{Envelope, ErrorBody};
