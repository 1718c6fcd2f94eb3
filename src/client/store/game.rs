use crate::{
    client::{
        cache::MutationOptions,
        error::api::ApiError,
        store::ResourceStore,
    },
    model::{
        api::Deleted,
        game::{CategoryDto, CategoryPayload, GameDto},
    },
};

impl ResourceStore<'_, GameDto> {
    /// Add a category to a game, invalidating that game's detail query
    pub async fn create_category(
        &self,
        game_id: i64,
        payload: CategoryPayload,
    ) -> Result<CategoryDto, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([Self::detail_key(game_id)]),
                self.ctx.client.create_game_category(game_id, payload),
            )
            .await
    }

    /// Delete a category of a game, invalidating that game's detail query
    pub async fn delete_category(&self, game_id: i64, category_id: i64) -> Result<Deleted, ApiError> {
        self.ctx
            .cache
            .mutate(
                MutationOptions::invalidates([Self::detail_key(game_id)]),
                self.ctx.client.delete_game_category(category_id),
            )
            .await
    }
}
