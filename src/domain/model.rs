use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 症狀目錄中的一筆資料：原始名稱、比對用的正規化片語與對應建議
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCatalogEntry", into = "RawCatalogEntry")]
pub struct CatalogEntry {
    name: String,
    phrase: String,
    advice: String,
    word_count: usize,
}

impl CatalogEntry {
    pub fn new(name: &str, advice: impl Into<String>) -> Self {
        let phrase = normalize_phrase(name);
        let word_count = phrase.split(' ').filter(|w| !w.is_empty()).count();

        Self {
            name: name.to_string(),
            phrase,
            advice: advice.into(),
            word_count,
        }
    }

    /// 目錄中儲存的名稱，不做任何轉換
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 小寫且空白收斂後的片語，只用於比對
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn advice(&self) -> &str {
        &self.advice
    }

    /// 片語的字數，建構時計算一次
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 目錄檔案的序列化格式，接受舊資料表欄位名稱 name / response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCatalogEntry {
    #[serde(alias = "name")]
    pub phrase: String,
    #[serde(alias = "response")]
    pub advice: String,
}

impl From<RawCatalogEntry> for CatalogEntry {
    fn from(raw: RawCatalogEntry) -> Self {
        CatalogEntry::new(&raw.phrase, raw.advice)
    }
}

impl From<CatalogEntry> for RawCatalogEntry {
    fn from(entry: CatalogEntry) -> Self {
        RawCatalogEntry {
            phrase: entry.name,
            advice: entry.advice,
        }
    }
}

/// 單次請求的輸入 token 序列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    pub(crate) fn from_tokens(tokens: Vec<String>) -> Self {
        debug_assert!(tokens.iter().all(|t| !t.is_empty()));
        Self { tokens }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 以單一空白串接
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

pub const FALLBACK_ADVICE: &str = "No specific advice found. Please consult a doctor.";

/// 症狀檢查的回應：命中的建議清單，或固定的備援訊息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    Matched(Vec<String>),
    Fallback,
}

impl Serialize for Advice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Advice::Matched(items) => items.serialize(serializer),
            Advice::Fallback => serializer.serialize_str(FALLBACK_ADVICE),
        }
    }
}

impl Advice {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Advice::Fallback)
    }

    pub fn items(&self) -> &[String] {
        match self {
            Advice::Matched(items) => items,
            Advice::Fallback => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLog {
    pub id: i64,
    pub user_id: i64,
    pub food_name: String,
    pub calories: f64,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFoodLog {
    pub user_id: i64,
    pub food_name: String,
    pub calories: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// 只有 "male" 走男性公式，其餘一律視為女性
    pub fn from_label(label: &str) -> Self {
        if label == "male" {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// 無法辨識的等級回傳 None，呼叫端以久坐係數計算
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrInfo {
    pub user_id: i64,
    pub age: f64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub bmr: f64,
    pub activity_level: String,
    pub daily_calorie_limit: i64,
}
