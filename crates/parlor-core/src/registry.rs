use serde::{Deserialize, Serialize};

use crate::engine::EngineMetadata;

/// Unique identifier for a registered game type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

/// A registered game entry in the arcade catalog.
#[derive(Debug, Clone)]
pub struct GameEntry {
    pub id: GameId,
    pub metadata: EngineMetadata,
}
