use crate::domain::model::{FoodLog, NewFoodLog};
use crate::domain::ports::{FoodLogStore, NutritionSource};
use crate::utils::error::{HealthError, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct FoodService {
    nutrition: Arc<dyn NutritionSource>,
    logs: Arc<dyn FoodLogStore>,
}

impl FoodService {
    pub fn new(nutrition: Arc<dyn NutritionSource>, logs: Arc<dyn FoodLogStore>) -> Self {
        Self { nutrition, logs }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<serde_json::Value>> {
        let foods = self.nutrition.search_foods(query).await?;
        tracing::debug!("Food search '{}' returned {} items", query, foods.len());
        Ok(foods)
    }

    pub async fn log_food(&self, entry: NewFoodLog) -> Result<FoodLog> {
        if entry.food_name.trim().is_empty() {
            return Err(HealthError::invalid_input("Missing field: food_name"));
        }
        self.logs.insert_log(entry).await
    }

    /// 依建立時間由新到舊
    pub async fn list_logs(&self, user_id: i64) -> Result<Vec<FoodLog>> {
        self.logs.logs_for_user(user_id).await
    }

    pub async fn delete_log(&self, id: i64) -> Result<()> {
        self.logs.delete_log(id).await
    }

    pub async fn total_calories(&self, user_id: i64) -> Result<f64> {
        self.logs.total_calories(user_id).await
    }
}
