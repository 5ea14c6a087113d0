// [libs/domain/models/src/label.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Un humano autorizado a clasificar tablas normalizadas. Creado por el
/// comando `create <username>` con un id v7 (ordenado en el tiempo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelUser {
    pub id: Uuid,
    pub username: String,
}

/// Una clasificacion humana persistida contra una tabla comprimida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub id: Uuid,
    pub compressed_table_id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub created_at: DateTime<Utc>,
}
