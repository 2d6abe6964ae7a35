//! Caller identity implementations.

mod claims;

pub use claims::JwtClaimsReader;
