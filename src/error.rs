// ============================================
// src/error.rs
// エラー型の定義
// ============================================

use thiserror::Error;

/// クイズ本体のエラー
#[derive(Error, Debug)]
pub enum QuizError {
    /// 出題プールが空 (文字データの定義ミス)
    #[error("Question pool is empty")]
    EmptyPool,

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// ヒント取得のエラー。呼び出し側には出さず、代わりの文言に置き換える。
#[derive(Error, Debug)]
pub enum HintError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response did not contain any text")]
    EmptyResponse,
}

pub type QuizResult<T> = Result<T, QuizError>;
