//! Domain entities - the core business objects.

mod ai;
mod caller;
mod category;
mod cursor;
mod post;

pub use ai::{Classification, ModerationVerdict, SentimentLabel, SentimentScores};
pub use caller::Caller;
pub use category::Category;
pub use cursor::PageCursor;
pub use post::{MAX_CONTENT_CHARS, Post, PostType, validate_content};
