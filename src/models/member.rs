use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    /// Members marked as paid are frozen out of settlement suggestions
    /// regardless of their computed balance.
    #[serde(default)]
    pub has_paid: bool,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Member {
            id: Uuid::new_v4(),
            name: name.into(),
            has_paid: false,
        }
    }
}
