use crate::domain::model::Advice;
use std::collections::HashSet;

/// 依首次出現順序去除重複建議
pub fn dedup_preserving_order(advice: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(advice.len());
    advice
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// 沒有任何命中時回傳備援訊息，否則回傳去重後的清單
pub fn build_response(matched: Vec<String>) -> Advice {
    if matched.is_empty() {
        return Advice::Fallback;
    }

    Advice::Matched(dedup_preserving_order(matched))
}
