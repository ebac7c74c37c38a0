use crate::domain::model::TokenSequence;
use crate::utils::error::{HealthError, Result};
use regex::Regex;
use std::sync::LazyLock;

static COMMA_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",+").expect("static regex is valid"));

/// 整個 token 等於這些字時移除
const CONJUNCTIONS: [&str; 2] = ["and", "&"];

/// 將使用者輸入轉成小寫 token 序列
///
/// 順序：轉小寫、連續逗號換成一個空白、移除獨立的 "and" / "&"、切分空白。
/// 結果可能是空序列（例如輸入只有 "and"），由呼叫端視為沒有可辨識的症狀。
pub fn tokenize(raw: &str) -> Result<TokenSequence> {
    if raw.trim().is_empty() {
        return Err(HealthError::invalid_input("Please enter symptoms."));
    }

    let lowered = raw.to_lowercase();
    let without_commas = COMMA_RUNS.replace_all(&lowered, " ");

    let tokens = without_commas
        .split_whitespace()
        .filter(|token| !CONJUNCTIONS.contains(token))
        .map(str::to_string)
        .collect();

    Ok(TokenSequence::from_tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(raw: &str) -> Vec<String> {
        tokenize(raw).unwrap().as_slice().to_vec()
    }

    #[test]
    fn test_lowercases_and_splits_on_whitespace_runs() {
        assert_eq!(words("  Headache \t FEVER\n"), vec!["headache", "fever"]);
    }

    #[test]
    fn test_comma_runs_become_separators() {
        assert_eq!(words("cough,,,fever,nausea"), vec!["cough", "fever", "nausea"]);
    }

    #[test]
    fn test_conjunctions_removed_only_as_whole_tokens() {
        assert_eq!(words("headache and fever & chills"), vec!["headache", "fever", "chills"]);
        assert_eq!(words("sandy hand"), vec!["sandy", "hand"]);
        assert_eq!(words("AND, &"), Vec::<String>::new());
    }

    #[test]
    fn test_blank_input_is_invalid() {
        assert!(matches!(tokenize(""), Err(HealthError::InvalidInput { .. })));
        assert!(matches!(tokenize(" \t "), Err(HealthError::InvalidInput { .. })));
    }

    #[test]
    fn test_tokenization_is_idempotent() {
        for raw in [
            "Sore throat, and runny nose",
            "fever & cough,,headache",
            "and",
            "  Stomach   ache  ",
        ] {
            let first = tokenize(raw).unwrap();
            if first.is_empty() {
                continue;
            }
            let second = tokenize(&first.joined()).unwrap();
            assert_eq!(first, second, "re-tokenizing {:?}", raw);
        }
    }

    proptest! {
        #[test]
        fn proptest_tokenization_is_idempotent(
            raw in "((and|AND|&|,+|[a-zA-Z]{1,6})[ \\t]{0,2}){0,10}",
        ) {
            prop_assume!(!raw.trim().is_empty());
            let first = tokenize(&raw).unwrap();
            prop_assume!(!first.is_empty());

            let second = tokenize(&first.joined()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn proptest_tokens_are_clean(raw in "[a-zA-Z&, ]{1,40}") {
            prop_assume!(!raw.trim().is_empty());
            for token in tokenize(&raw).unwrap().as_slice() {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.contains(',') && !token.contains(' '));
                prop_assert!(!CONJUNCTIONS.contains(&token.as_str()));
                prop_assert_eq!(token, &token.to_lowercase());
            }
        }
    }
}
