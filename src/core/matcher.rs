use crate::core::edit_distance::{levenshtein, max_distance_for};
use crate::domain::model::{CatalogEntry, TokenSequence};

/// 以滑動視窗比對輸入 token 與目錄片語，回傳命中的建議（尚未去重）
///
/// 對每一筆目錄資料，視窗長度為該片語的字數 w；從每個起點 i 取 tokens[i..i+w]，
/// 靠近結尾時視窗會被截短但仍照常比對。截短的視窗通常距離較大，
/// 因此多字片語若出現在輸入最末端且被截斷，可能比對不到。
pub fn find_matches(tokens: &TokenSequence, catalog: &[CatalogEntry]) -> Vec<String> {
    let tokens = tokens.as_slice();
    let mut matched = Vec::new();

    if tokens.is_empty() {
        return matched;
    }

    for entry in catalog {
        let width = entry.word_count();
        let threshold = max_distance_for(entry.phrase());

        for start in 0..tokens.len() {
            let end = (start + width).min(tokens.len());
            let window = tokens[start..end].join(" ");

            if levenshtein(&window, entry.phrase()) <= threshold {
                matched.push(entry.advice().to_string());
            }
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize;

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("headache", "Take rest and drink fluids."),
            CatalogEntry::new("fever", "See a doctor if fever persists."),
            CatalogEntry::new("sore throat", "Gargle with warm salt water."),
        ]
    }

    #[test]
    fn test_single_word_phrases() {
        let tokens = tokenize("headache and fever").unwrap();
        let matched = find_matches(&tokens, &catalog());
        assert_eq!(
            matched,
            vec![
                "Take rest and drink fluids.".to_string(),
                "See a doctor if fever persists.".to_string()
            ]
        );
    }

    #[test]
    fn test_multi_word_window() {
        let tokens = tokenize("I have a sore throat today").unwrap();
        let matched = find_matches(&tokens, &catalog());
        assert!(matched.contains(&"Gargle with warm salt water.".to_string()));
    }

    #[test]
    fn test_misspelling_within_threshold() {
        let catalog = vec![CatalogEntry::new("laryngitis", "Rest your voice.")];
        let tokens = tokenize("laryngytis").unwrap();
        assert_eq!(find_matches(&tokens, &catalog), vec!["Rest your voice.".to_string()]);
    }

    #[test]
    fn test_repeated_matches_are_not_collapsed_here() {
        let tokens = tokenize("fever fever").unwrap();
        let matched = find_matches(&tokens, &catalog());
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_truncated_tail_window_is_still_compared() {
        // "sore" 在結尾只能形成單字視窗，與 "sore throat" 距離 7，不命中
        let tokens = tokenize("fever sore").unwrap();
        let matched = find_matches(&tokens, &catalog());
        assert_eq!(matched, vec!["See a doctor if fever persists.".to_string()]);

        // 短片語的截斷視窗仍可能落在門檻內
        let short = vec![CatalogEntry::new("flu a", "Stay home.")];
        let tokens = tokenize("flu").unwrap();
        assert_eq!(find_matches(&tokens, &short), vec!["Stay home.".to_string()]);
    }

    #[test]
    fn test_empty_tokens_or_catalog() {
        let empty = tokenize("and").unwrap();
        assert!(find_matches(&empty, &catalog()).is_empty());

        let tokens = tokenize("fever").unwrap();
        assert!(find_matches(&tokens, &[]).is_empty());
    }
}
