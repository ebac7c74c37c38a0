use anyhow::Result;
use health_tracker::domain::ports::CatalogStore;
use health_tracker::{Advice, CatalogEntry, FileCatalog, InMemoryCatalog, LocalStorage, SymptomChecker};
use std::collections::HashSet;
use std::sync::Arc;

fn shipped_catalog() -> FileCatalog<LocalStorage> {
    FileCatalog::new(LocalStorage::new("data"), "symptoms.json").unwrap()
}

#[tokio::test]
async fn test_shipped_catalog_loads() -> Result<()> {
    let names = shipped_catalog().list_phrase_names().await?;

    let raw: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string("data/symptoms.json")?)?;
    let stored: Vec<String> = raw
        .iter()
        .filter_map(|row| row["name"].as_str().map(str::to_string))
        .collect();

    assert!(names.len() >= 10);
    assert!(names.contains(&"sore throat".to_string()));
    assert_eq!(names, stored);
    Ok(())
}

#[tokio::test]
async fn test_sentence_against_shipped_catalog() -> Result<()> {
    let catalog = shipped_catalog();
    let entries = catalog.list_entries().await?;
    let advice_for = |phrase: &str| {
        entries
            .iter()
            .find(|e| e.name() == phrase)
            .map(|e| e.advice().to_string())
            .unwrap()
    };

    let checker = SymptomChecker::new(Arc::new(catalog));
    let advice = checker
        .check_symptoms("I have a headache, and a sore throat")
        .await?;

    let got: HashSet<String> = advice.items().iter().cloned().collect();
    let expected: HashSet<String> = [advice_for("headache"), advice_for("sore throat")].into();
    assert_eq!(got, expected);
    Ok(())
}

#[tokio::test]
async fn test_emergency_phrases_share_advice_once() -> Result<()> {
    let checker = SymptomChecker::new(Arc::new(shipped_catalog()));
    let advice = checker
        .check_symptoms("chest pain and shortness of breath")
        .await?;

    assert_eq!(
        advice,
        Advice::Matched(vec!["Seek emergency medical care immediately.".to_string()])
    );
    Ok(())
}

#[tokio::test]
async fn test_catalog_order_does_not_change_advice_set() -> Result<()> {
    let entries = vec![
        CatalogEntry::new("fever", "A"),
        CatalogEntry::new("cough", "B"),
        CatalogEntry::new("runny nose", "C"),
    ];
    let mut reversed = entries.clone();
    reversed.reverse();

    let forward = SymptomChecker::new(Arc::new(InMemoryCatalog::new(entries)));
    let backward = SymptomChecker::new(Arc::new(InMemoryCatalog::new(reversed)));
    let input = "cough & fevr, runny nose";

    let a: HashSet<String> = forward.check_symptoms(input).await?.items().iter().cloned().collect();
    let b: HashSet<String> = backward.check_symptoms(input).await?.items().iter().cloned().collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    Ok(())
}
