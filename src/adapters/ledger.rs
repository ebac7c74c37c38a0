use crate::domain::model::{BmrInfo, FoodLog, NewFoodLog, User};
use crate::domain::ports::{BmrStore, FoodLogStore, Storage, UserStore};
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// 使用者、飲食紀錄與 BMR 資料表的快照格式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Ledger {
    next_user_id: i64,
    next_log_id: i64,
    users: Vec<User>,
    food_logs: Vec<FoodLog>,
    bmr_info: Vec<BmrInfo>,
}

impl Ledger {
    fn allocate_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    fn allocate_log_id(&mut self) -> i64 {
        self.next_log_id += 1;
        self.next_log_id
    }
}

/// 記憶體中的資料表，每次寫入後透過 Storage 覆寫 JSON 快照
pub struct LedgerStore<S: Storage> {
    storage: S,
    path: String,
    ledger: RwLock<Ledger>,
}

impl<S: Storage> LedgerStore<S> {
    /// 載入既有快照，檔案不存在時從空白開始
    pub async fn open(storage: S, path: impl Into<String>) -> Result<Self> {
        let path = path.into();

        let ledger = if storage.exists(&path).await {
            let data = storage.read_file(&path).await?;
            let ledger: Ledger = serde_json::from_slice(&data)?;
            tracing::info!(
                "📒 Loaded ledger '{}' ({} users, {} food logs, {} BMR records)",
                path,
                ledger.users.len(),
                ledger.food_logs.len(),
                ledger.bmr_info.len()
            );
            ledger
        } else {
            tracing::info!("📒 No ledger at '{}', starting empty", path);
            Ledger::default()
        };

        Ok(Self {
            storage,
            path,
            ledger: RwLock::new(ledger),
        })
    }

    async fn persist(&self, ledger: &Ledger) -> Result<()> {
        let data = serde_json::to_vec_pretty(ledger)?;
        self.storage.write_file(&self.path, &data).await.map_err(|e| {
            tracing::error!("❌ Failed to write ledger '{}': {}", self.path, e);
            HealthError::storage(e.to_string())
        })
    }

    /// 先寫入快照，成功後才替換記憶體內容；必須在持有寫入鎖時呼叫
    async fn commit(&self, current: &mut Ledger, next: Ledger) -> Result<()> {
        self.persist(&next).await?;
        *current = next;
        Ok(())
    }
}

#[async_trait]
impl<S: Storage + 'static> UserStore for LedgerStore<S> {
    async fn insert_user(&self, username: &str, email: &str, password_hash: &str) -> Result<User> {
        let mut ledger = self.ledger.write().await;

        if ledger.users.iter().any(|u| u.email == email) {
            return Err(HealthError::Conflict {
                message: "Email already in use".to_string(),
            });
        }

        let mut next = ledger.clone();
        let user = User {
            id: next.allocate_user_id(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        next.users.push(user.clone());
        self.commit(&mut ledger, next).await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let ledger = self.ledger.read().await;
        Ok(ledger.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl<S: Storage + 'static> FoodLogStore for LedgerStore<S> {
    async fn insert_log(&self, log: NewFoodLog) -> Result<FoodLog> {
        let mut ledger = self.ledger.write().await;

        let mut next = ledger.clone();
        let row = FoodLog {
            id: next.allocate_log_id(),
            user_id: log.user_id,
            food_name: log.food_name,
            calories: log.calories,
            quantity: log.quantity,
            created_at: Utc::now(),
        };
        next.food_logs.push(row.clone());
        self.commit(&mut ledger, next).await?;

        Ok(row)
    }

    async fn logs_for_user(&self, user_id: i64) -> Result<Vec<FoodLog>> {
        let ledger = self.ledger.read().await;
        let mut rows: Vec<FoodLog> = ledger
            .food_logs
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();

        // 同一時間戳記時以 id 較大者為新
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn delete_log(&self, id: i64) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        if !ledger.food_logs.iter().any(|row| row.id == id) {
            return Ok(());
        }

        let mut next = ledger.clone();
        next.food_logs.retain(|row| row.id != id);
        self.commit(&mut ledger, next).await
    }

    async fn total_calories(&self, user_id: i64) -> Result<f64> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .food_logs
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.calories)
            .sum())
    }
}

#[async_trait]
impl<S: Storage + 'static> BmrStore for LedgerStore<S> {
    async fn upsert_bmr(&self, info: BmrInfo) -> Result<()> {
        let mut ledger = self.ledger.write().await;

        let mut next = ledger.clone();
        match next.bmr_info.iter().position(|row| row.user_id == info.user_id) {
            Some(index) => next.bmr_info[index] = info,
            None => next.bmr_info.push(info),
        }
        self.commit(&mut ledger, next).await
    }

    async fn find_bmr(&self, user_id: i64) -> Result<Option<BmrInfo>> {
        let ledger = self.ledger.read().await;
        Ok(ledger.bmr_info.iter().find(|row| row.user_id == user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{LocalStorage, MemoryStorage};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// 可切換為寫入失敗的儲存
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: Arc<AtomicBool>,
    }

    impl Storage for FlakyStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.inner.read_file(path).await
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(HealthError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "disk is read-only",
                )));
            }
            self.inner.write_file(path, data).await
        }

        async fn exists(&self, path: &str) -> bool {
            self.inner.exists(path).await
        }
    }

    fn log(user_id: i64, calories: f64) -> NewFoodLog {
        NewFoodLog {
            user_id,
            food_name: "Rice".to_string(),
            calories,
            quantity: 2.0,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = LedgerStore::open(MemoryStorage::new(), "ledger.json").await.unwrap();
        let a = store.insert_user("a", "a@x.io", "h").await.unwrap();
        let b = store.insert_user("b", "b@x.io", "h").await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let first = store.insert_log(log(a.id, 100.0)).await.unwrap();
        let second = store.insert_log(log(a.id, 100.0)).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_every_write_updates_snapshot() {
        let storage = MemoryStorage::new();
        let store = LedgerStore::open(storage.clone(), "ledger.json").await.unwrap();
        store.insert_user("a", "a@x.io", "h").await.unwrap();

        let snapshot = storage.get_file("ledger.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&snapshot).unwrap();
        assert_eq!(value["users"][0]["email"], "a@x.io");
    }

    #[tokio::test]
    async fn test_delete_missing_log_is_ok() {
        let store = LedgerStore::open(MemoryStorage::new(), "ledger.json").await.unwrap();
        store.delete_log(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_reopen_from_disk_keeps_rows_and_counters() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap().to_string();

        {
            let store = LedgerStore::open(LocalStorage::new(base.clone()), "ledger.json")
                .await
                .unwrap();
            let user = store.insert_user("a", "a@x.io", "h").await.unwrap();
            store.insert_log(log(user.id, 320.0)).await.unwrap();
        }

        let store = LedgerStore::open(LocalStorage::new(base), "ledger.json")
            .await
            .unwrap();
        assert!(store.find_user_by_email("a@x.io").await.unwrap().is_some());
        assert_eq!(store.total_calories(1).await.unwrap(), 320.0);

        let next = store.insert_user("b", "b@x.io", "h").await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_ledger_unchanged() {
        let storage = FlakyStorage::default();
        let store = LedgerStore::open(storage.clone(), "ledger.json").await.unwrap();
        let user = store.insert_user("a", "a@x.io", "h").await.unwrap();
        store.insert_log(log(user.id, 100.0)).await.unwrap();

        storage.fail_writes.store(true, Ordering::SeqCst);

        let err = store.insert_user("b", "b@x.io", "h").await.unwrap_err();
        assert!(matches!(err, HealthError::StorageError { .. }));
        assert!(store.insert_log(log(user.id, 50.0)).await.is_err());
        assert!(store.delete_log(1).await.is_err());
        assert!(store
            .upsert_bmr(BmrInfo {
                user_id: user.id,
                age: 30.0,
                gender: "male".to_string(),
                height: 180.0,
                weight: 80.0,
                bmr: 1853.36,
                activity_level: "sedentary".to_string(),
                daily_calorie_limit: 2224,
            })
            .await
            .is_err());

        assert!(store.find_user_by_email("b@x.io").await.unwrap().is_none());
        assert_eq!(store.total_calories(user.id).await.unwrap(), 100.0);
        assert_eq!(store.logs_for_user(user.id).await.unwrap().len(), 1);
        assert!(store.find_bmr(user.id).await.unwrap().is_none());

        // 儲存恢復後重試會成功，且 id 不會被失敗的寫入佔用
        storage.fail_writes.store(false, Ordering::SeqCst);
        let retried = store.insert_user("b", "b@x.io", "h").await.unwrap();
        assert_eq!(retried.id, 2);

        let snapshot = storage.inner.get_file("ledger.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&snapshot).unwrap();
        assert_eq!(value["food_logs"].as_array().unwrap().len(), 1);
    }
}
