use crate::domain::model::{ActivityLevel, BmrInfo, Gender};
use crate::domain::ports::BmrStore;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BmrInput {
    pub user_id: i64,
    pub age: f64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmrResult {
    pub bmr: f64,
    pub daily_calorie_limit: i64,
}

/// Harris-Benedict 修訂版公式
pub fn basal_metabolic_rate(gender: Gender, weight: f64, height: f64, age: f64) -> f64 {
    match gender {
        Gender::Male => 88.36 + 13.4 * weight + 4.8 * height - 5.7 * age,
        Gender::Female => 447.6 + 9.2 * weight + 3.1 * height - 4.3 * age,
    }
}

pub fn daily_calorie_limit(bmr: f64, activity_level: &str) -> i64 {
    let factor = ActivityLevel::from_label(activity_level)
        .map(ActivityLevel::factor)
        .unwrap_or(ActivityLevel::Sedentary.factor());
    (bmr * factor).round() as i64
}

pub fn calculate(input: &BmrInput) -> BmrResult {
    let bmr = basal_metabolic_rate(
        Gender::from_label(&input.gender),
        input.weight,
        input.height,
        input.age,
    );

    BmrResult {
        bmr,
        daily_calorie_limit: daily_calorie_limit(bmr, &input.activity_level),
    }
}

#[derive(Clone)]
pub struct BmrService {
    store: Arc<dyn BmrStore>,
}

impl BmrService {
    pub fn new(store: Arc<dyn BmrStore>) -> Self {
        Self { store }
    }

    /// 計算後以 user_id 覆寫既有紀錄
    pub async fn save(&self, input: BmrInput) -> Result<BmrResult> {
        let result = calculate(&input);

        self.store
            .upsert_bmr(BmrInfo {
                user_id: input.user_id,
                age: input.age,
                gender: input.gender,
                height: input.height,
                weight: input.weight,
                bmr: result.bmr,
                activity_level: input.activity_level,
                daily_calorie_limit: result.daily_calorie_limit,
            })
            .await?;

        Ok(result)
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<BmrInfo>> {
        self.store.find_bmr(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::LedgerStore;
    use crate::adapters::storage::MemoryStorage;

    fn input(gender: &str, activity_level: &str) -> BmrInput {
        BmrInput {
            user_id: 1,
            age: 30.0,
            gender: gender.to_string(),
            height: 180.0,
            weight: 80.0,
            activity_level: activity_level.to_string(),
        }
    }

    #[test]
    fn test_male_formula() {
        let result = calculate(&input("male", "moderate"));
        // 88.36 + 1072 + 864 - 171
        assert!((result.bmr - 1853.36).abs() < 1e-9);
        assert_eq!(result.daily_calorie_limit, (1853.36f64 * 1.55).round() as i64);
    }

    #[test]
    fn test_other_genders_use_female_formula() {
        let female = calculate(&input("female", "sedentary"));
        // 447.6 + 736 + 558 - 129
        assert!((female.bmr - 1612.6).abs() < 1e-9);
        assert_eq!(calculate(&input("Male", "sedentary")).bmr, female.bmr);
    }

    #[test]
    fn test_unknown_activity_uses_sedentary_factor() {
        let bmr = 1500.0;
        assert_eq!(daily_calorie_limit(bmr, "marathon"), 1800);
        assert_eq!(daily_calorie_limit(bmr, "very_active"), 2850);
        assert_eq!(daily_calorie_limit(bmr, "light"), 2063);
    }

    #[tokio::test]
    async fn test_save_upserts_per_user() {
        let store = LedgerStore::open(MemoryStorage::new(), "ledger.json")
            .await
            .unwrap();
        let service = BmrService::new(Arc::new(store));

        assert!(service.get(1).await.unwrap().is_none());

        service.save(input("male", "active")).await.unwrap();
        let updated = service.save(input("female", "light")).await.unwrap();

        let stored = service.get(1).await.unwrap().unwrap();
        assert_eq!(stored.gender, "female");
        assert_eq!(stored.activity_level, "light");
        assert_eq!(stored.daily_calorie_limit, updated.daily_calorie_limit);
    }
}
