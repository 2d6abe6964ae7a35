use serde::{Deserialize, Serialize};

/// The authenticated author of a request, as asserted by the identity provider.
///
/// Passed explicitly into every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: String,
}

impl Caller {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
