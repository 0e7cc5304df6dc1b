// ============================================
// src/session.rs
// クイズ1セッション分の状態と状態遷移
// ============================================

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::QuizResult;
use crate::kana::{Category, GameMode, Kana};
use crate::question::{self, Question};
use crate::save_data::ScoreLedger;

/// 正解してから次の問題に進むまでの時間
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(800);

/// 回答後の判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

/// 今の問題の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    Answered(Feedback),
}

/// 自動で次の問題へ進むための予約。どの問題に対する予約かを `generation` で持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    pub generation: u64,
}

/// `submit_answer` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// 正解。`advance` を `AUTO_ADVANCE_DELAY` 後に `complete_advance` へ渡す
    Correct { advance: AdvanceTicket, new_best: bool },
    Wrong,
    /// 回答済みなので何もしていない
    Ignored,
}

/// ヒント取得の依頼内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRequest {
    pub generation: u64,
    pub glyph: &'static str,
    pub category: Category,
}

/// クイズ1セッション分の状態
///
/// 画面側はここのメソッドを通してだけ状態を変える。
pub struct QuizSession {
    mode: GameMode,
    pool: Vec<&'static Kana>,
    last_index: Option<usize>,
    question: Question,

    // 回答状態
    selected: Option<String>,
    feedback: Option<Feedback>,
    streak: u32,

    // ヒント
    hint_loading: bool,
    hint: Option<String>,

    /// 問題を引くたびに増える。古いタイマーやヒントの結果を捨てるのに使う
    generation: u64,
    rng: StdRng,
}

impl QuizSession {
    pub fn new(mode: GameMode) -> QuizResult<Self> {
        Self::with_rng(mode, StdRng::from_os_rng())
    }

    pub fn with_seed(mode: GameMode, seed: u64) -> QuizResult<Self> {
        Self::with_rng(mode, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mode: GameMode, mut rng: StdRng) -> QuizResult<Self> {
        let pool = mode.pool();
        let question = question::draw(&pool, None, &mut rng)?;
        tracing::info!("Session started: mode={} pool={}", mode, pool.len());
        Ok(Self {
            mode,
            pool,
            last_index: Some(question.index),
            question,
            selected: None,
            feedback: None,
            streak: 0,
            hint_loading: false,
            hint: None,
            generation: 0,
            rng,
        })
    }

    // --------------------------------------------------
    // 参照用
    // --------------------------------------------------

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn pool(&self) -> &[&'static Kana] {
        &self.pool
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn phase(&self) -> Phase {
        match self.feedback {
            None => Phase::AwaitingAnswer,
            Some(feedback) => Phase::Answered(feedback),
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_hint_loading(&self) -> bool {
        self.hint_loading
    }

    // --------------------------------------------------
    // 状態遷移
    // --------------------------------------------------

    /// 選択肢を選ぶ。回答済みの問題では何もしない
    pub fn submit_answer(&mut self, option: &str, ledger: &mut ScoreLedger) -> AnswerOutcome {
        if self.feedback.is_some() {
            return AnswerOutcome::Ignored;
        }

        self.selected = Some(option.to_string());

        if self.question.is_correct(option) {
            self.feedback = Some(Feedback::Correct);
            self.streak += 1;
            let new_best = ledger.update(self.mode, self.streak);
            tracing::debug!(
                "Correct: '{}' streak={} new_best={}",
                self.question.target.glyph,
                self.streak,
                new_best
            );
            AnswerOutcome::Correct {
                advance: AdvanceTicket {
                    generation: self.generation,
                },
                new_best,
            }
        } else {
            self.feedback = Some(Feedback::Wrong);
            tracing::debug!(
                "Wrong: '{}' answered '{}', streak {} reset",
                self.question.target.glyph,
                option,
                self.streak
            );
            self.streak = 0;
            AnswerOutcome::Wrong
        }
    }

    /// 正解後の自動進行。予約した問題がまだ表示中のときだけ進む
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> QuizResult<bool> {
        if ticket.generation != self.generation || self.feedback != Some(Feedback::Correct) {
            tracing::debug!(
                "Discarding stale advance (ticket={}, current={})",
                ticket.generation,
                self.generation
            );
            return Ok(false);
        }
        self.next_question()?;
        Ok(true)
    }

    /// 不正解のあと「次の問題へ」。不正解の状態でなければ何もしない
    pub fn request_next(&mut self) -> QuizResult<bool> {
        if self.feedback != Some(Feedback::Wrong) {
            return Ok(false);
        }
        self.next_question()?;
        Ok(true)
    }

    /// モードを切り替える。今の問題と連続正解数は捨てる
    pub fn switch_mode(&mut self, mode: GameMode) -> QuizResult<()> {
        tracing::info!("Switching mode: {} -> {}", self.mode, mode);
        self.mode = mode;
        self.pool = mode.pool();
        self.last_index = None;
        self.streak = 0;
        self.next_question()
    }

    /// ヒント取得を始める。不正解の状態で、取得中でもなく、まだヒントが無いときだけ
    pub fn begin_hint(&mut self) -> Option<HintRequest> {
        if self.feedback != Some(Feedback::Wrong) || self.hint_loading || self.hint.is_some() {
            return None;
        }
        self.hint_loading = true;
        Some(HintRequest {
            generation: self.generation,
            glyph: self.question.target.glyph,
            category: self.question.target.category,
        })
    }

    /// 取得したヒントを反映する。別の問題に進んでいたら捨てる
    pub fn finish_hint(&mut self, generation: u64, text: String) -> bool {
        if generation != self.generation {
            tracing::debug!("Discarding stale hint for generation {}", generation);
            return false;
        }
        self.hint_loading = false;
        self.hint = Some(text);
        true
    }

    fn next_question(&mut self) -> QuizResult<()> {
        let question = question::draw(&self.pool, self.last_index, &mut self.rng)?;
        self.last_index = Some(question.index);
        self.question = question;
        self.selected = None;
        self.feedback = None;
        self.hint = None;
        self.hint_loading = false;
        self.generation += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::HIRAGANA;
    use crate::save_data::{MemoryStore, SCORES_KEY};

    fn ledger() -> ScoreLedger {
        ScoreLedger::load(Box::new(MemoryStore::new()))
    }

    fn wrong_option(session: &QuizSession) -> &'static str {
        let target = session.question().target.thai;
        session
            .question()
            .options
            .iter()
            .copied()
            .find(|o| *o != target)
            .unwrap()
    }

    #[test]
    fn starts_awaiting_an_answer_with_zero_streak() {
        let session = QuizSession::with_seed(GameMode::Hiragana, 1).unwrap();
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.selected(), None);
        assert_eq!(session.question().options.len(), 4);
    }

    #[test]
    fn correct_answer_raises_streak_and_best() {
        let mut ledger = ScoreLedger::load(Box::new(MemoryStore::with_entry(
            SCORES_KEY,
            r#"{"hiragana":4,"katakana":0,"mixed":0}"#,
        )));
        let mut session = QuizSession::with_seed(GameMode::Hiragana, 2).unwrap();
        session.streak = 4;

        let answer = session.question().target.thai;
        let outcome = session.submit_answer(answer, &mut ledger);

        assert_eq!(
            outcome,
            AnswerOutcome::Correct {
                advance: AdvanceTicket { generation: 0 },
                new_best: true
            }
        );
        assert_eq!(session.streak(), 5);
        assert_eq!(ledger.best(GameMode::Hiragana), 5);
        assert_eq!(session.phase(), Phase::Answered(Feedback::Correct));
    }

    #[test]
    fn wrong_answer_resets_streak_but_not_best() {
        let mut ledger = ledger();
        ledger.update(GameMode::Hiragana, 7);
        let mut session = QuizSession::with_seed(GameMode::Hiragana, 3).unwrap();
        session.streak = 7;

        let wrong = wrong_option(&session);
        assert_eq!(session.submit_answer(wrong, &mut ledger), AnswerOutcome::Wrong);
        assert_eq!(session.streak(), 0);
        assert_eq!(ledger.best(GameMode::Hiragana), 7);
        assert_eq!(session.phase(), Phase::Answered(Feedback::Wrong));
        assert_eq!(session.selected(), Some(wrong));
    }

    #[test]
    fn second_submission_is_ignored() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Katakana, 4).unwrap();
        let answer = session.question().target.thai;

        session.submit_answer(answer, &mut ledger);
        let wrong = wrong_option(&session);
        assert_eq!(session.submit_answer(wrong, &mut ledger), AnswerOutcome::Ignored);
        assert_eq!(session.submit_answer(answer, &mut ledger), AnswerOutcome::Ignored);

        assert_eq!(session.streak(), 1);
        assert_eq!(session.selected(), Some(answer));
        assert_eq!(session.phase(), Phase::Answered(Feedback::Correct));
        assert_eq!(ledger.best(GameMode::Katakana), 1);
    }

    #[test]
    fn advance_moves_to_a_new_question() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Mixed, 5).unwrap();
        let first = session.question().index;

        let answer = session.question().target.thai;
        let AnswerOutcome::Correct { advance, .. } = session.submit_answer(answer, &mut ledger)
        else {
            panic!("expected a correct answer");
        };
        assert!(session.complete_advance(advance).unwrap());

        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.selected(), None);
        assert_ne!(session.question().index, first);
        assert_eq!(session.generation(), 1);
        assert_eq!(session.streak(), 1);

        // 同じ予約をもう一度使っても進まない
        assert!(!session.complete_advance(advance).unwrap());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn request_next_only_after_a_wrong_answer() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Hiragana, 6).unwrap();
        assert!(!session.request_next().unwrap());
        assert_eq!(session.generation(), 0);

        let wrong = wrong_option(&session);
        session.submit_answer(wrong, &mut ledger);
        assert!(session.request_next().unwrap());
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.selected(), None);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn wrong_answer_does_not_auto_advance() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Hiragana, 7).unwrap();
        let wrong = wrong_option(&session);
        session.submit_answer(wrong, &mut ledger);

        let stale = AdvanceTicket { generation: 0 };
        assert!(!session.complete_advance(stale).unwrap());
        assert_eq!(session.phase(), Phase::Answered(Feedback::Wrong));
    }

    #[test]
    fn switching_mode_discards_question_and_streak() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Hiragana, 8).unwrap();
        let answer = session.question().target.thai;
        let AnswerOutcome::Correct { advance, .. } = session.submit_answer(answer, &mut ledger)
        else {
            panic!("expected a correct answer");
        };

        session.switch_mode(GameMode::Mixed).unwrap();
        assert_eq!(session.mode(), GameMode::Mixed);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.pool().len(), HIRAGANA.len() * 2);
        assert!(session.pool().contains(&session.question().target));

        // 切り替え前の予約は無効
        assert!(!session.complete_advance(advance).unwrap());
        // ベストは消えない
        assert_eq!(ledger.best(GameMode::Hiragana), 1);
    }

    #[test]
    fn hint_only_once_per_wrong_question() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Katakana, 9).unwrap();
        assert_eq!(session.begin_hint(), None);

        let wrong = wrong_option(&session);
        session.submit_answer(wrong, &mut ledger);

        let request = session.begin_hint().unwrap();
        assert_eq!(request.glyph, session.question().target.glyph);
        assert_eq!(request.category, Category::Katakana);
        assert!(session.is_hint_loading());
        // 取得中の2回目は抑止
        assert_eq!(session.begin_hint(), None);

        assert!(session.finish_hint(request.generation, "จำว่า".into()));
        assert!(!session.is_hint_loading());
        assert_eq!(session.hint(), Some("จำว่า"));
        assert_eq!(session.begin_hint(), None);
    }

    #[test]
    fn stale_hint_is_discarded_after_advancing() {
        let mut ledger = ledger();
        let mut session = QuizSession::with_seed(GameMode::Hiragana, 10).unwrap();
        let wrong = wrong_option(&session);
        session.submit_answer(wrong, &mut ledger);
        let request = session.begin_hint().unwrap();

        session.request_next().unwrap();
        assert!(!session.is_hint_loading());
        assert!(!session.finish_hint(request.generation, "late".into()));
        assert_eq!(session.hint(), None);
    }
}
