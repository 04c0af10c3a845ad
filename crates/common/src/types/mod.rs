use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn healthy() -> Self {
        Self { status: "healthy".into() }
    }
}

/// Acknowledgement returned after a successful CSV write.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveAck {
    pub status: String,
}

impl SaveAck {
    pub fn ok() -> Self {
        Self { status: "ok".into() }
    }
}

/// Request body of `POST /csv/{filename}`: the full replacement text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveCsvRequest {
    pub content: String,
}
