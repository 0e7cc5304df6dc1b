// ============================================
// src/save_data.rs
// セーブデータ (モードごとのベストスコア) の構造と読み書きロジック
// ============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{QuizError, QuizResult};
use crate::kana::GameMode;

/// ベストスコアを保存するキー
pub const SCORES_KEY: &str = "kanaquest_scores";

// --------------------------------------------------
// 保存先 (キーと文字列の読み書きだけを担当)
// --------------------------------------------------

/// 文字列を保存できるキーバリューストア
pub trait KeyValueStore {
    /// 値が無ければ `Ok(None)`
    fn read(&self, key: &str) -> QuizResult<Option<String>>;
    /// 値をまるごと置き換える
    fn write(&self, key: &str, value: &str) -> QuizResult<()>;
}

/// ディレクトリ内に `<key>.json` として保存するストア
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

/// MARK:OSごとのデータ保存用ディレクトリ。取得できなければカレントディレクトリ
pub fn default_data_dir() -> PathBuf {
    match ProjectDirs::from("jp", "Fukumoto0141", "KANA_QUEST") {
        Some(proj_dirs) => proj_dirs.data_dir().to_path_buf(),
        None => PathBuf::from("."),
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> QuizResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> QuizResult<()> {
        fs::create_dir_all(&self.dir)?;

        // 一時ファイルに書いてから差し替える (書きかけのファイルを残さない)
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(self.path_for(key))
            .map_err(|e| e.error)?;
        Ok(())
    }
}

/// メモリ上だけのストア (テストやセーブ不要の実行用)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> QuizResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> QuizResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn read(&self, key: &str) -> QuizResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> QuizResult<()> {
        (**self).write(key, value)
    }
}

// --------------------------------------------------
// ベストスコア
// --------------------------------------------------

/// 保存されるJSONの形 `{"hiragana": 0, "katakana": 0, "mixed": 0}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreData {
    pub hiragana: u32,
    pub katakana: u32,
    pub mixed: u32,
}

impl ScoreData {
    pub fn get(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Hiragana => self.hiragana,
            GameMode::Katakana => self.katakana,
            GameMode::Mixed => self.mixed,
        }
    }

    fn slot_mut(&mut self, mode: GameMode) -> &mut u32 {
        match mode {
            GameMode::Hiragana => &mut self.hiragana,
            GameMode::Katakana => &mut self.katakana,
            GameMode::Mixed => &mut self.mixed,
        }
    }
}

/// モードごとのベストスコア帳
///
/// 値は下がらない。更新のたびに全モード分をまとめて書き直す。
pub struct ScoreLedger {
    scores: ScoreData,
    store: Box<dyn KeyValueStore>,
}

impl ScoreLedger {
    /// MARK:保存先から読み込む (無い・壊れている場合はすべて0)
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let scores = match store.read(SCORES_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<ScoreData>(&text) {
                Ok(scores) => scores,
                Err(e) => {
                    tracing::warn!("Malformed score data, starting from zero: {}", e);
                    ScoreData::default()
                }
            },
            Ok(None) => ScoreData::default(),
            Err(e) => {
                tracing::warn!("Failed to read score data, starting from zero: {}", e);
                ScoreData::default()
            }
        };
        tracing::info!(
            "Scores loaded: hiragana={} katakana={} mixed={}",
            scores.hiragana,
            scores.katakana,
            scores.mixed
        );
        Self { scores, store }
    }

    pub fn best(&self, mode: GameMode) -> u32 {
        self.scores.get(mode)
    }

    pub fn scores(&self) -> ScoreData {
        self.scores
    }

    /// `candidate` が今のベストより大きいときだけ更新して保存する。
    /// 更新したら `true`
    pub fn update(&mut self, mode: GameMode, candidate: u32) -> bool {
        let slot = self.scores.slot_mut(mode);
        if candidate <= *slot {
            return false;
        }
        *slot = candidate;
        tracing::info!("New best for {}: {}", mode, candidate);
        self.save();
        true
    }

    /// MARK:全モード分をJSONで保存する
    fn save(&self) {
        let result = serde_json::to_string(&self.scores)
            .map_err(QuizError::from)
            .and_then(|json| self.store.write(SCORES_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save score data: {}", e);
        }
    }
}
