use serde::{Deserialize, Serialize};

/// `{"data": ...}` wrapper used by every user endpoint, for payloads and
/// error messages alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Envelope { data }
    }
}
