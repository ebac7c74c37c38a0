use std::{sync::Arc, time::Duration};

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{delete, get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use crate::config::toml_config::ServerConfig;
use crate::utils::error::Result;
use routes::{
    delete_food_log_handler, food_log_handler, food_logs_handler, food_search_handler,
    get_bmr_handler, health_handler, login_handler, register_handler, save_bmr_handler,
    symptom_checker_handler, symptoms_list_handler, total_calories_handler,
};
use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/api/symptom-checker", post(symptom_checker_handler))
        .route("/api/symptoms-list", get(symptoms_list_handler))
        .route("/api/food/search", get(food_search_handler))
        .route("/api/food/log", post(food_log_handler))
        .route("/api/food/log/:id", delete(delete_food_log_handler))
        .route("/api/food/logs", get(food_logs_handler))
        .route("/api/food/total-calories", get(total_calories_handler))
        .route("/api/bmr", post(save_bmr_handler))
        .route("/api/bmr/:user_id", get(get_bmr_handler))
        .layer(cors)
        .with_state(state)
}

/// 在既有的 listener 上提供服務，直到收到關閉訊號
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub async fn start_server(config: &ServerConfig) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::from_config(config).await?;

    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("🚀 Server running on {address}");

    serve(listener, state).await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
