// ============================================
// src/app.rs
// 画面遷移・キー入力・タイマー/ヒントのタスク管理
// ============================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use kanaquest::hint::{self, HintProvider};
use kanaquest::session::{AUTO_ADVANCE_DELAY, AdvanceTicket, AnswerOutcome};
use kanaquest::{GameMode, QuizResult, QuizSession, ScoreLedger};

use crate::ui;

/// 不正解のときに枠を揺らす時間
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// 非同期タスクからメインループへの通知
#[derive(Debug)]
pub enum AppEvent {
    AdvanceDue(AdvanceTicket),
    HintReady { generation: u64, text: String },
}

/// 表示中の画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ModeSelect,
    Quiz,
}

/// アプリ全体の状態を管理する
pub struct App {
    screen: Screen,
    /// モード選択画面のカーソル位置
    cursor: usize,
    ledger: ScoreLedger,
    session: Option<QuizSession>,

    hints: Arc<dyn HintProvider>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// 正解後の自動進行タイマー
    advance_task: Option<JoinHandle<()>>,

    shake_until: Option<Instant>,
    should_quit: bool,
}

impl App {
    pub fn new(
        ledger: ScoreLedger,
        hints: Arc<dyn HintProvider>,
        start_mode: Option<GameMode>,
    ) -> QuizResult<Self> {
        let (events_tx, events_rx) = unbounded_channel();
        let mut app = Self {
            screen: Screen::ModeSelect,
            cursor: 0,
            ledger,
            session: None,
            hints,
            events_tx,
            events_rx,
            advance_task: None,
            shake_until: None,
            should_quit: false,
        };
        if let Some(mode) = start_mode {
            app.select_mode(mode)?;
        }
        Ok(app)
    }

    // --------------------------------------------------
    // 描画用の参照
    // --------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_until.is_some_and(|until| Instant::now() < until)
    }

    // --------------------------------------------------
    // メインループ
    // --------------------------------------------------

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
        while !self.should_quit {
            self.drain_events()?;
            terminal.draw(|f| ui::draw(f, self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }
        self.cancel_advance();
        Ok(())
    }

    /// タイマーやヒント取得の結果を反映する
    pub fn drain_events(&mut self) -> QuizResult<()> {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) -> QuizResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        match event {
            AppEvent::AdvanceDue(ticket) => {
                // 今の問題への予約でなければ、後から予約したタイマーを残す
                if ticket.generation != session.generation() {
                    return Ok(());
                }
                // モード選択画面に戻っている間は進めない
                if self.screen == Screen::Quiz {
                    session.complete_advance(ticket)?;
                }
                self.advance_task = None;
            }
            AppEvent::HintReady { generation, text } => {
                session.finish_hint(generation, text);
            }
        }
        Ok(())
    }

    // --------------------------------------------------
    // キー入力
    // --------------------------------------------------

    pub fn handle_key(&mut self, code: KeyCode) -> QuizResult<()> {
        match self.screen {
            Screen::ModeSelect => self.handle_mode_select_key(code),
            Screen::Quiz => self.handle_quiz_key(code),
        }
    }

    fn handle_mode_select_key(&mut self, code: KeyCode) -> QuizResult<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(GameMode::ALL.len() - 1),
            KeyCode::Enter => self.select_mode(GameMode::ALL[self.cursor])?,
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.cursor = index;
                self.select_mode(GameMode::ALL[index])?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_quiz_key(&mut self, code: KeyCode) -> QuizResult<()> {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.go_home(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.answer(index);
            }
            KeyCode::Char('n') | KeyCode::Enter => {
                if let Some(session) = self.session.as_mut() {
                    session.request_next()?;
                }
            }
            KeyCode::Char('h') => self.request_hint(),
            KeyCode::Tab | KeyCode::Char('m') => {
                let next = match self.session.as_ref().map(|s| s.mode()) {
                    Some(GameMode::Hiragana) => GameMode::Katakana,
                    Some(GameMode::Katakana) => GameMode::Mixed,
                    _ => GameMode::Hiragana,
                };
                self.select_mode(next)?;
            }
            _ => {}
        }
        Ok(())
    }

    // --------------------------------------------------
    // 操作
    // --------------------------------------------------

    /// モードを選んでクイズ画面へ
    pub fn select_mode(&mut self, mode: GameMode) -> QuizResult<()> {
        self.cancel_advance();
        self.shake_until = None;
        match self.session.as_mut() {
            Some(session) => session.switch_mode(mode)?,
            None => self.session = Some(QuizSession::new(mode)?),
        }
        self.cursor = GameMode::ALL.iter().position(|m| *m == mode).unwrap_or(0);
        self.screen = Screen::Quiz;
        Ok(())
    }

    /// モード選択画面へ戻る
    pub fn go_home(&mut self) {
        self.cancel_advance();
        self.shake_until = None;
        self.screen = Screen::ModeSelect;
    }

    fn answer(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(option) = session.question().options.get(index).copied() else {
            return;
        };

        match session.submit_answer(option, &mut self.ledger) {
            AnswerOutcome::Correct { advance, .. } => self.schedule_advance(advance),
            AnswerOutcome::Wrong => self.shake_until = Some(Instant::now() + SHAKE_DURATION),
            AnswerOutcome::Ignored => {}
        }
    }

    fn schedule_advance(&mut self, ticket: AdvanceTicket) {
        self.cancel_advance();
        let tx = self.events_tx.clone();
        self.advance_task = Some(tokio::spawn(async move {
            tokio::time::sleep(AUTO_ADVANCE_DELAY).await;
            let _ = tx.send(AppEvent::AdvanceDue(ticket));
        }));
    }

    fn cancel_advance(&mut self) {
        if let Some(task) = self.advance_task.take() {
            task.abort();
        }
    }

    fn request_hint(&mut self) {
        let Some(request) = self.session.as_mut().and_then(|s| s.begin_hint()) else {
            return;
        };
        tracing::info!("Hint requested for '{}'", request.glyph);

        let hints = Arc::clone(&self.hints);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let text = hint::fetch_hint(hints.as_ref(), request.glyph, request.category).await;
            let _ = tx.send(AppEvent::HintReady {
                generation: request.generation,
                text,
            });
        });
    }
}
