use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

impl Board {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}
