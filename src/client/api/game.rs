use reqwest::Method;

use crate::{
    client::{
        api::{path::ApiPath, with_body, ApiClient},
        error::api::ApiError,
        schema::Validate,
    },
    model::{
        api::{DataEnvelope, Deleted},
        game::{CategoryDto, CategoryPayload},
        payload::IntoRequestBody,
    },
};

fn category_path(id: i64) -> ApiPath {
    ApiPath::new("game").push(id).push("category")
}

impl ApiClient {
    /// Add a category to a game
    pub async fn create_game_category(
        &self,
        game_id: i64,
        payload: CategoryPayload,
    ) -> Result<CategoryDto, ApiError> {
        payload.validate()?;

        let request = with_body(
            self.request(Method::POST, &category_path(game_id))?,
            payload.into_body()?,
        )?;
        let envelope: DataEnvelope<CategoryDto> =
            self.send(request, "Failed to add game category").await?;

        Ok(envelope.data)
    }

    /// Delete a game category by its own ID
    pub async fn delete_game_category(&self, category_id: i64) -> Result<Deleted, ApiError> {
        let request = self.request(Method::DELETE, &category_path(category_id))?;

        self.send_ignoring_body(request, "Failed to delete game category")
            .await?;

        Ok(Deleted { success: true })
    }
}
