use crate::adapters::catalog::FileCatalog;
use crate::adapters::ledger::LedgerStore;
use crate::adapters::nutrition::UsdaClient;
use crate::adapters::storage::LocalStorage;
use crate::config::toml_config::ServerConfig;
use crate::core::auth::AuthService;
use crate::core::bmr::BmrService;
use crate::core::food::FoodService;
use crate::core::symptom_checker::SymptomChecker;
use crate::domain::ports::{
    BmrStore, CatalogStore, ConfigProvider, FoodLogStore, NutritionSource, UserStore,
};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub symptoms: SymptomChecker,
    pub auth: AuthService,
    pub food: FoodService,
    pub bmr: BmrService,
}

impl AppState {
    pub fn new<L>(
        catalog: Arc<dyn CatalogStore>,
        nutrition: Arc<dyn NutritionSource>,
        ledger: Arc<L>,
        config: &ServerConfig,
    ) -> Arc<Self>
    where
        L: UserStore + FoodLogStore + BmrStore + 'static,
    {
        Arc::new(Self {
            symptoms: SymptomChecker::new(catalog),
            auth: AuthService::new(
                ledger.clone(),
                config.auth.jwt_secret.clone(),
                config.auth.token_ttl_seconds,
                config.auth.bcrypt_cost,
            ),
            food: FoodService::new(nutrition, ledger.clone()),
            bmr: BmrService::new(ledger),
        })
    }

    /// 依設定組裝所有服務：本機資料目錄中的目錄檔與帳本、USDA 搜尋
    pub async fn from_config(config: &ServerConfig) -> Result<Arc<Self>> {
        let storage = LocalStorage::new(config.data_dir());

        let catalog = FileCatalog::new(storage.clone(), config.catalog_file())?;
        let ledger = LedgerStore::open(storage, config.ledger_file()).await?;
        let nutrition = UsdaClient::new(
            config.nutrition.endpoint.clone(),
            config.nutrition.api_key.clone(),
            Duration::from_secs(config.nutrition.timeout_seconds),
        )?;

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(nutrition),
            Arc::new(ledger),
            config,
        ))
    }
}
