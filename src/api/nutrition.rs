use super::ApiClient;
use crate::error::ApiError;
use crate::models::NutritionSnapshot;

impl ApiClient {
    pub async fn nutrition_analysis(&self) -> Result<NutritionSnapshot, ApiError> {
        let snapshot: Option<NutritionSnapshot> = self.get("/api/nutrition/analysis").await?;
        Ok(snapshot.unwrap_or_default())
    }
}
