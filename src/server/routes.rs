use crate::core::bmr::BmrInput;
use crate::domain::model::NewFoodLog;
use crate::server::state::AppState;
use crate::utils::error::{HealthError, Result};
use crate::utils::validation::{require_text, require_value};
use crate::server::extract::{BearerUser, JsonBody, PathParam, QueryParams};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

type AppJson = Result<Json<Value>>;

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct UserQuery {
    user_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct FoodLogRequest {
    user_id: Option<i64>,
    food_name: Option<String>,
    calories: Option<f64>,
    quantity: Option<f64>,
}

#[derive(Deserialize)]
pub struct BmrRequest {
    user_id: Option<i64>,
    age: Option<f64>,
    gender: Option<String>,
    height: Option<f64>,
    weight: Option<f64>,
    activity_level: Option<String>,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppJson {
    let username = require_text("username", payload.username)?;
    let email = require_text("email", payload.email)?;
    let password = require_text("password", payload.password)?;

    state.auth.register(&username, &email, &password).await?;
    Ok(Json(json!({ "message": "User registered successfully" })))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppJson {
    // 缺欄位與帳密錯誤回應相同訊息
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(HealthError::InvalidCredentials);
    };

    let outcome = state.auth.login(&email, &password).await?;
    Ok(Json(json!({
        "message": "Login successful",
        "token": outcome.token,
        "userId": outcome.user_id,
    })))
}

pub async fn symptom_checker_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<Value>,
) -> AppJson {
    // 缺少或非字串的 symptoms 一律視為空白輸入
    let symptoms = payload
        .get("symptoms")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let advice = state.symptoms.check_symptoms(symptoms).await?;
    Ok(Json(json!({ "advice": advice })))
}

pub async fn symptoms_list_handler(State(state): State<Arc<AppState>>) -> AppJson {
    let symptoms = state.symptoms.list_symptom_names().await?;
    Ok(Json(json!({ "symptoms": symptoms })))
}

pub async fn food_search_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> AppJson {
    let query = require_text("q", params.q)?;
    let foods = state.food.search(&query).await?;
    Ok(Json(Value::Array(foods)))
}

pub async fn food_log_handler(
    State(state): State<Arc<AppState>>,
    bearer: BearerUser,
    JsonBody(payload): JsonBody<FoodLogRequest>,
) -> AppJson {
    let entry = NewFoodLog {
        user_id: bearer.resolve(payload.user_id)?,
        food_name: require_text("food_name", payload.food_name)?,
        calories: require_value("calories", payload.calories)?,
        quantity: require_value("quantity", payload.quantity)?,
    };

    let row = state.food.log_food(entry).await?;
    Ok(Json(json!({
        "id": row.id,
        "food_name": row.food_name,
        "calories": row.calories,
        "quantity": row.quantity,
    })))
}

pub async fn food_logs_handler(
    State(state): State<Arc<AppState>>,
    bearer: BearerUser,
    QueryParams(params): QueryParams<UserQuery>,
) -> AppJson {
    let user_id = bearer.resolve(params.user_id)?;
    let rows = state.food.list_logs(user_id).await?;
    Ok(Json(serde_json::to_value(rows)?))
}

pub async fn delete_food_log_handler(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> AppJson {
    state.food.delete_log(id).await?;
    Ok(Json(json!({ "success": true, "deletedId": id })))
}

pub async fn total_calories_handler(
    State(state): State<Arc<AppState>>,
    bearer: BearerUser,
    QueryParams(params): QueryParams<UserQuery>,
) -> AppJson {
    let user_id = bearer.resolve(params.user_id)?;
    let total = state.food.total_calories(user_id).await?;
    Ok(Json(json!({ "total_calories": total })))
}

pub async fn get_bmr_handler(
    State(state): State<Arc<AppState>>,
    bearer: BearerUser,
    PathParam(user_id): PathParam<i64>,
) -> AppJson {
    let user_id = bearer.resolve(Some(user_id))?;
    match state.bmr.get(user_id).await? {
        Some(info) => Ok(Json(serde_json::to_value(info)?)),
        None => Ok(Json(json!({}))),
    }
}

pub async fn save_bmr_handler(
    State(state): State<Arc<AppState>>,
    bearer: BearerUser,
    JsonBody(payload): JsonBody<BmrRequest>,
) -> AppJson {
    let input = BmrInput {
        user_id: bearer.resolve(payload.user_id)?,
        age: require_value("age", payload.age)?,
        gender: require_text("gender", payload.gender)?,
        height: require_value("height", payload.height)?,
        weight: require_value("weight", payload.weight)?,
        activity_level: payload.activity_level.unwrap_or_default(),
    };

    let result = state.bmr.save(input).await?;
    Ok(Json(serde_json::to_value(result)?))
}
