use crate::core::matcher::find_matches;
use crate::core::responder::build_response;
use crate::core::tokenizer::tokenize;
use crate::domain::model::{Advice, CatalogEntry, TokenSequence};
use crate::domain::ports::CatalogStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// 在指定目錄上執行完整的症狀比對，純函式
pub fn check_symptoms_against(raw_text: &str, catalog: &[CatalogEntry]) -> Result<Advice> {
    let tokens = tokenize(raw_text)?;
    Ok(check_tokens(&tokens, catalog))
}

/// 對已切好的 token 序列比對並組出回應
pub fn check_tokens(tokens: &TokenSequence, catalog: &[CatalogEntry]) -> Advice {
    let matched = find_matches(tokens, catalog);

    tracing::debug!(
        "Matched {} advice entries for {} tokens against {} catalog phrases",
        matched.len(),
        tokens.len(),
        catalog.len()
    );

    build_response(matched)
}

#[derive(Clone)]
pub struct SymptomChecker {
    catalog: Arc<dyn CatalogStore>,
}

impl SymptomChecker {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// 先驗證輸入，再讀取目錄快照；比對本身不做任何 I/O
    pub async fn check_symptoms(&self, raw_text: &str) -> Result<Advice> {
        let tokens = tokenize(raw_text)?;
        let entries = self.catalog.list_entries().await?;
        Ok(check_tokens(&tokens, &entries))
    }

    pub async fn list_symptom_names(&self) -> Result<Vec<String>> {
        self.catalog.list_phrase_names().await
    }
}
