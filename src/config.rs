// ============================================
// src/config.rs
// コマンドライン引数と環境変数による設定
// ============================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::hint::{DEFAULT_MODEL, GeminiHints, HintProvider, OfflineHints};
use crate::kana::GameMode;
use crate::save_data::default_data_dir;

/// KanaQuest: ひらがな・カタカナの4択クイズ
#[derive(Parser, Debug, Clone)]
#[command(name = "kanaquest", version, about)]
pub struct Cli {
    /// モード選択を飛ばしてこのモードで始める
    #[arg(long, value_enum)]
    pub mode: Option<GameMode>,

    /// ベストスコアの保存先ディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// ログの出力先ディレクトリ (省略時は <data_dir>/logs)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// ヒント取得で通信しない
    #[arg(long)]
    pub offline: bool,

    /// Gemini API キー
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub hint_model: String,

    /// ヒント取得のタイムアウト (秒)
    #[arg(long, default_value_t = 10)]
    pub hint_timeout_secs: u64,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("logs"))
    }

    pub fn hint_timeout(&self) -> Duration {
        Duration::from_secs(self.hint_timeout_secs)
    }

    /// 設定に合ったヒント取得を作る
    pub fn hint_provider(&self) -> Arc<dyn HintProvider> {
        if self.offline {
            tracing::info!("Hints: offline");
            return Arc::new(OfflineHints);
        }
        if self.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; hints will use the fallback text");
        }
        Arc::new(GeminiHints::new(
            self.api_key.clone(),
            self.hint_model.clone(),
            self.hint_timeout(),
        ))
    }
}
