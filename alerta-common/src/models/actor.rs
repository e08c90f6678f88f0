use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to an already-authenticated identity. Authentication
/// and permission checks happen upstream; the engines only stamp
/// `resolved_by` / `sender_id` from whatever actor they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Resident,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: Uuid, role: ActorRole) -> Self {
        Self { id, role }
    }
}
