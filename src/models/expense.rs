use crate::constants::{UNKNOWN_PAYER_ID, UNKNOWN_PAYER_NAME};
use crate::models::member::Member;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Who fronted the money for an expense. Deleting a member repoints their
/// expenses to `Unknown` instead of deleting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payer {
    Member(Uuid),
    Unknown,
}

impl Payer {
    pub fn member_id(&self) -> Option<Uuid> {
        match self {
            Payer::Member(id) => Some(*id),
            Payer::Unknown => None,
        }
    }
}

// Stored as the member id string, or the literal "unknown".
impl Serialize for Payer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payer::Member(id) => id.serialize(serializer),
            Payer::Unknown => serializer.serialize_str(UNKNOWN_PAYER_ID),
        }
    }
}

impl<'de> Deserialize<'de> for Payer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == UNKNOWN_PAYER_ID {
            Ok(Payer::Unknown)
        } else {
            Uuid::parse_str(&raw)
                .map(Payer::Member)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Comida,
    Bebida,
    Alcohol,
    Carbon,
    Transporte,
    Alojamiento,
    Entretenimiento,
    Otros,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Comida,
        Category::Bebida,
        Category::Alcohol,
        Category::Carbon,
        Category::Transporte,
        Category::Alojamiento,
        Category::Entretenimiento,
        Category::Otros,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Comida => "Comida",
            Category::Bebida => "Bebida",
            Category::Alcohol => "Alcohol",
            Category::Carbon => "Carbon",
            Category::Transporte => "Transporte",
            Category::Alojamiento => "Alojamiento",
            Category::Entretenimiento => "Entretenimiento",
            Category::Otros => "Otros",
        };
        write!(f, "{}", s)
    }
}

/// Portion of an expense attributed to one participant. Splits are always
/// equal, so every share of an expense carries the same value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExpenseShare {
    pub member_id: Uuid,
    pub share: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub payer: Payer,
    pub category: Category,
    pub participants: Vec<Uuid>,
    pub shares: Vec<ExpenseShare>,
    /// Base64 receipt photo, never interpreted by the crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl Expense {
    /// Display name of the payer, resolved against the current member list.
    /// Not stored: rename and deletion are picked up automatically.
    pub fn payer_name(&self, members: &[Member]) -> String {
        match self.payer {
            Payer::Member(id) => members
                .iter()
                .find(|m| m.id == id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| UNKNOWN_PAYER_NAME.to_string()),
            Payer::Unknown => UNKNOWN_PAYER_NAME.to_string(),
        }
    }

    /// Equal shares over `participants`.
    pub fn equal_shares(amount: f64, participants: &[Uuid]) -> Vec<ExpenseShare> {
        if participants.is_empty() {
            return Vec::new();
        }
        let share = amount / participants.len() as f64;
        participants
            .iter()
            .map(|&member_id| ExpenseShare { member_id, share })
            .collect()
    }
}
