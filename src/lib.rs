// ============================================
// src/lib.rs
// KanaQuest のクイズ本体 (画面に依存しない部分)
// ============================================

pub mod config;
pub mod error;
pub mod hint;
pub mod kana;
pub mod question;
pub mod save_data;
pub mod session;

pub use error::{HintError, QuizError, QuizResult};
pub use kana::{Category, GameMode, Kana, KanaType};
pub use save_data::{ScoreData, ScoreLedger};
pub use session::{AnswerOutcome, Feedback, Phase, QuizSession};
