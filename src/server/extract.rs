use crate::server::state::AppState;
use crate::utils::error::HealthError;
use crate::utils::validation::require_value;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// JSON 請求主體；不檢查 Content-Type，空主體視為 `{}`，解析失敗回傳 400 `{error}`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HealthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| HealthError::invalid_input(format!("Invalid request body: {}", e.body_text())))?;

        let data: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(data)
            .map(JsonBody)
            .map_err(|e| HealthError::invalid_input(format!("Invalid JSON body: {}", e)))
    }
}

/// 路徑參數，格式錯誤時回傳 400 `{error}`
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HealthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| PathParam(value))
            .map_err(|e| HealthError::invalid_input(e.body_text()))
    }
}

/// 查詢字串參數，格式錯誤時回傳 400 `{error}`
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HealthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| QueryParams(value))
            .map_err(|e| HealthError::invalid_input(e.body_text()))
    }
}

/// 選用的 Bearer token；沒有 Authorization 標頭時為 None，token 無效時回傳 401
pub struct BearerUser(pub Option<i64>);

impl BearerUser {
    /// 合併 token 的使用者與請求帶入的 user_id，兩者同時存在時必須一致
    pub fn resolve(&self, requested: Option<i64>) -> crate::utils::error::Result<i64> {
        match (self.0, requested) {
            (Some(token_user), Some(user_id)) if token_user != user_id => Err(
                HealthError::unauthorized("Token does not belong to this user"),
            ),
            (Some(token_user), _) => Ok(token_user),
            (None, requested) => require_value("user_id", requested),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for BearerUser {
    type Rejection = HealthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(BearerUser(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                HealthError::unauthorized("Authorization header must be 'Bearer <token>'")
            })?;

        let user_id = state.auth.verify_token(token)?;
        tracing::debug!("Authenticated request for user {}", user_id);
        Ok(BearerUser(Some(user_id)))
    }
}
