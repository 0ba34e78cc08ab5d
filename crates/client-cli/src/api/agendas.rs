use super::{ApiClient, ApiError};
use shared::AgendaItem;

pub struct AgendasApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl AgendasApi<'_> {
    pub async fn list(&self) -> Result<Vec<AgendaItem>, ApiError> {
        self.api.get_json("/agendas").await
    }
}
