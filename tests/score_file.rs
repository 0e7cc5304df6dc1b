// ============================================
// tests/score_file.rs
// ファイルに保存したベストスコアの読み書き
// ============================================

use std::fs;

use kanaquest::save_data::{FileStore, SCORES_KEY};
use kanaquest::{GameMode, ScoreData, ScoreLedger};

fn load(dir: &std::path::Path) -> ScoreLedger {
    ScoreLedger::load(Box::new(FileStore::new(dir)))
}

#[test]
fn scores_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut ledger = load(dir.path());
    assert_eq!(ledger.scores(), ScoreData::default());
    assert!(ledger.update(GameMode::Hiragana, 3));
    assert!(ledger.update(GameMode::Mixed, 12));
    assert!(!ledger.update(GameMode::Mixed, 10));

    let reloaded = load(dir.path());
    assert_eq!(
        reloaded.scores(),
        ScoreData {
            hiragana: 3,
            katakana: 0,
            mixed: 12
        }
    );

    let raw = fs::read_to_string(dir.path().join(format!("{SCORES_KEY}.json"))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!({"hiragana": 3, "katakana": 0, "mixed": 12}));
}

#[test]
fn corrupted_file_starts_from_zero_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{SCORES_KEY}.json"));
    fs::write(&path, "{\"hiragana\": 5, \"katak").unwrap();

    let mut ledger = load(dir.path());
    assert_eq!(ledger.scores(), ScoreData::default());

    ledger.update(GameMode::Katakana, 2);
    let reloaded = load(dir.path());
    assert_eq!(reloaded.best(GameMode::Katakana), 2);
    assert_eq!(reloaded.best(GameMode::Hiragana), 0);
}
