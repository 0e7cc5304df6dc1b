// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::stdout;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use kanaquest::ScoreLedger;
use kanaquest::config::Cli;
use kanaquest::save_data::FileStore;

mod app;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // .env があれば読み込む (無ければ無視)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let _guard = setup_logging(&cli.log_dir())?;

    let ledger = ScoreLedger::load(Box::new(FileStore::new(cli.data_dir())));
    let mut app = App::new(ledger, cli.hint_provider(), cli.mode)?;

    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal);
    restore_terminal()?;

    tracing::info!("Bye");
    result
}

/// ログはファイルにだけ出す (画面はTUIが使うため)
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, "kanaquest.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/kanaquest.log", log_dir.display());
    Ok(guard)
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}
