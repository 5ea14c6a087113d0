// [apps/edgar-pipeline/src/web/state.rs]
/*!
 * APARATO: ESTADO DE LA SUPERFICIE DE ETIQUETADO (ESTRATO L6)
 * RESPONSABILIDAD: UN CANAL POR USUARIO QUE PUEDE CERRARSE PERMANENTEMENTE
 *
 * spec.md S5 describe un canal acotado mono-productor/mono-consumidor
 * por usuario; aqui se simplifica a una bandera `closed` por usuario
 * (el "canal" es la consulta de refill misma, no un buffer prellenado),
 * conservando el comportamiento observable: una vez que un refill
 * encuentra el almacen vacio, ese usuario nunca vuelve a ver una tabla
 * en la misma corrida del servidor.
 */

use std::collections::HashMap;
use std::sync::Arc;

use pipeline_db::{DbError, LabelRepository};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Clone)]
pub struct WebState {
    pub app: AppState,
    channels: Arc<Mutex<HashMap<Uuid, bool>>>,
}

impl WebState {
    pub fn new(app: AppState) -> Self {
        Self { app, channels: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Siguiente tabla sin clasificar para este usuario, o `None` si su
    /// canal ya fue cerrado por un refill anterior que no encontro nada.
    pub async fn next_table_for(&self, user_id: Uuid) -> Result<Option<Uuid>, DbError> {
        {
            let channels = self.channels.lock().await;
            if channels.get(&user_id).copied().unwrap_or(false) {
                return Ok(None);
            }
        }

        let label_repo = LabelRepository::new(&self.app.db);
        match label_repo.random_unlabelled_table().await {
            Ok(table_id) => Ok(Some(table_id)),
            Err(DbError::NotFound) => {
                let mut channels = self.channels.lock().await;
                channels.insert(user_id, true);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
