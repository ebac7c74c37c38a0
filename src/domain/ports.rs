use crate::domain::model::{BmrInfo, CatalogEntry, FoodLog, NewFoodLog, User};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// 症狀目錄的唯讀來源；讀取失敗時回傳 CatalogUnavailable
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>>;

    /// 依儲存順序回傳原始名稱
    async fn list_phrase_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_entries()
            .await?
            .into_iter()
            .map(|entry| entry.name().to_string())
            .collect())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 新增使用者，email 重複時回傳 Conflict
    async fn insert_user(&self, username: &str, email: &str, password_hash: &str) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait FoodLogStore: Send + Sync {
    async fn insert_log(&self, log: NewFoodLog) -> Result<FoodLog>;
    async fn logs_for_user(&self, user_id: i64) -> Result<Vec<FoodLog>>;
    async fn delete_log(&self, id: i64) -> Result<()>;
    async fn total_calories(&self, user_id: i64) -> Result<f64>;
}

#[async_trait]
pub trait BmrStore: Send + Sync {
    async fn upsert_bmr(&self, info: BmrInfo) -> Result<()>;
    async fn find_bmr(&self, user_id: i64) -> Result<Option<BmrInfo>>;
}

#[async_trait]
pub trait NutritionSource: Send + Sync {
    /// 回傳外部營養 API 的 foods 陣列原樣內容
    async fn search_foods(&self, query: &str) -> Result<Vec<serde_json::Value>>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn catalog_file(&self) -> &str;
    fn ledger_file(&self) -> &str;
}
