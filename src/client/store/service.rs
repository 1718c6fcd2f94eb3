use crate::{
    client::{error::api::ApiError, store::ResourceStore},
    model::{
        api::{ListParams, Page},
        service::ServiceDto,
    },
};

impl ResourceStore<'_, ServiceDto> {
    /// Services of one game; a game without services yields an empty page
    pub async fn for_game(&self, game_id: i64) -> Result<Page<ServiceDto>, ApiError> {
        self.list(Some(game_id), ListParams::default()).await
    }
}
