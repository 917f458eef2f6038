use serde::{Deserialize, Serialize};

pub const SEED_SUCCESS_MESSAGE: &str = "Sample data created successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
}

impl SeedResponse {
    pub fn success() -> Self {
        Self {
            message: SEED_SUCCESS_MESSAGE.to_string(),
        }
    }
}
