use crate::domain::model::{CatalogEntry, RawCatalogEntry};
use crate::domain::ports::{CatalogStore, Storage};
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use std::path::Path;

/// 固定內容的目錄
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
    Tsv,
}

impl CatalogFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["json", "csv", "tsv"];

    pub fn from_path(path: &str) -> Option<Self> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(CatalogFormat::Json),
            Some("csv") => Some(CatalogFormat::Csv),
            Some("tsv") => Some(CatalogFormat::Tsv),
            _ => None,
        }
    }
}

/// 解析目錄檔內容；JSON 為物件陣列，CSV/TSV 需有標題列
pub fn parse_catalog(data: &[u8], format: CatalogFormat) -> Result<Vec<CatalogEntry>> {
    match format {
        CatalogFormat::Json => Ok(serde_json::from_slice(data)?),
        CatalogFormat::Csv | CatalogFormat::Tsv => {
            let delimiter = if format == CatalogFormat::Tsv { b'\t' } else { b',' };
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .trim(csv::Trim::All)
                .from_reader(data);

            reader
                .deserialize::<RawCatalogEntry>()
                .map(|row| -> Result<CatalogEntry> { Ok(CatalogEntry::from(row?)) })
                .collect()
        }
    }
}

/// 每次請求都從儲存重新讀取的目錄
///
/// 檔案更新後下一個請求就會看到新內容；讀取中途的更新可能讓單一請求看到舊版本，
/// 這是可接受的。
#[derive(Debug, Clone)]
pub struct FileCatalog<S: Storage> {
    storage: S,
    path: String,
    format: CatalogFormat,
}

impl<S: Storage> FileCatalog<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let format = CatalogFormat::from_path(&path).ok_or_else(|| {
            HealthError::InvalidConfigValueError {
                field: "storage.catalog_file".to_string(),
                value: path.clone(),
                reason: format!(
                    "Catalog file must end with one of: {}",
                    CatalogFormat::EXTENSIONS.join(", ")
                ),
            }
        })?;

        Ok(Self {
            storage,
            path,
            format,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<S: Storage + 'static> CatalogStore for FileCatalog<S> {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>> {
        let data = self.storage.read_file(&self.path).await.map_err(|e| {
            tracing::error!("❌ Failed to read catalog '{}': {}", self.path, e);
            HealthError::catalog_unavailable(e.to_string())
        })?;

        parse_catalog(&data, self.format).map_err(|e| {
            tracing::error!("❌ Failed to parse catalog '{}': {}", self.path, e);
            HealthError::catalog_unavailable(e.to_string())
        })
    }
}
