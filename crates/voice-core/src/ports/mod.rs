//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod ai;
mod auth;
mod repository;

pub use ai::{Embedder, SentimentDetector, TextGenerator};
pub use auth::{AuthError, ClaimsReader};
pub use repository::{BaseRepository, PostRepository, ScanFilter, SortDirection};
