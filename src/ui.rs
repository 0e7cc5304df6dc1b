// ============================================
// src/ui.rs
// 画面描画 (モード選択 / クイズ)
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use kanaquest::{Feedback, GameMode, QuizSession};

use crate::app::{App, Screen};

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("KanaQuest");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    match (app.screen(), app.session()) {
        (Screen::Quiz, Some(session)) => draw_quiz(f, inner_area, app, session),
        _ => draw_mode_select(f, inner_area, app),
    }
}

// --------------------------------------------------
// モード選択画面
// --------------------------------------------------

fn draw_mode_select(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // [0] タイトル
            Constraint::Length(1), // [1] 空白
            Constraint::Length(3), // [2] モード一覧
            Constraint::Min(1),    // [3] 空白
            Constraint::Length(1), // [4] 操作説明
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from("ฝึกอ่านฮิรางานะ & คาตาคานะ").bold(),
            Line::from("เลือกโหมด").style(Style::default().fg(Color::Gray)),
        ])
        .centered(),
        chunks[0],
    );

    let scores = app.ledger().scores();
    let lines: Vec<Line> = GameMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let selected = i == app.cursor();
            let marker = if selected { "▶ " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}. {}", i + 1, mode.title()), style),
                Span::styled(
                    format!("   Best: {}", scores.get(*mode)),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).centered(), chunks[2]);

    f.render_widget(
        Paragraph::new("1-3 / ↑↓ Enter: select   q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[4],
    );
}

// --------------------------------------------------
// クイズ画面
// --------------------------------------------------

fn draw_quiz(f: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let feedback = session.feedback();
    let question = session.question();
    let target = question.target;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] ステータスバー (モード, 連続正解, ベスト)
            Constraint::Length(1), // [1] 空白
            Constraint::Length(5), // [2] 文字カード
            Constraint::Length(3), // [3] 答え / ヒント
            Constraint::Length(4), // [4] 選択肢
            Constraint::Min(1),    // [5] 次へ
            Constraint::Length(1), // [6] 操作説明
        ])
        .split(area);

    // 0. ステータスバー
    let status = Line::from(vec![
        Span::styled(session.mode().title(), Style::default().fg(Color::Cyan)),
        Span::raw("   Streak: "),
        Span::styled(session.streak().to_string(), Style::default().bold()),
        Span::raw("   Best: "),
        Span::styled(
            app.ledger().best(session.mode()).to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    f.render_widget(Paragraph::new(status).centered(), chunks[0]);

    // 1. 文字カード (正解は緑、不正解は赤、揺れている間は二重線)
    let border_color = match feedback {
        Some(Feedback::Correct) => Color::Green,
        Some(Feedback::Wrong) => Color::Red,
        None => Color::Gray,
    };
    let border_type = if app.is_shaking() {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    let card_area = centered_width(chunks[2], 21);
    let mut card_lines = vec![Line::from(""), Line::from(target.glyph).bold()];
    if feedback == Some(Feedback::Correct) {
        card_lines.push(Line::from("✨").green());
    }
    f.render_widget(
        Paragraph::new(card_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(border_color)),
            )
            .centered(),
        card_area,
    );

    // 2. 不正解なら答えとヒント
    if feedback == Some(Feedback::Wrong) {
        let mut lines = vec![
            Line::from(format!("{} ({})", target.thai, target.romaji))
                .style(Style::default().fg(Color::Red).bold()),
        ];
        if let Some(hint) = session.hint() {
            lines.push(
                Line::from(hint.to_string()).style(Style::default().fg(Color::Yellow).italic()),
            );
        } else if session.is_hint_loading() {
            lines.push(Line::from("กำลังขอเคล็ดลับ...").style(Style::default().fg(Color::Yellow)));
        } else {
            lines.push(
                Line::from("h: ขอเคล็ดลับช่วยจำ").style(Style::default().fg(Color::Yellow)),
            );
        }
        f.render_widget(
            Paragraph::new(lines).centered().wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    // 3. 選択肢
    let options: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match feedback {
                None => Style::default().fg(Color::White),
                Some(_) if *option == target.thai => {
                    Style::default().fg(Color::Black).bg(Color::Green)
                }
                Some(_) if session.selected() == Some(*option) => {
                    Style::default().fg(Color::White).bg(Color::Red)
                }
                Some(_) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(format!(" {}. {} ", i + 1, option), style))
        })
        .collect();
    f.render_widget(Paragraph::new(options).centered(), chunks[4]);

    // 4. 次へ
    if feedback == Some(Feedback::Wrong) {
        f.render_widget(
            Paragraph::new("n / Enter: ลองใหม่ข้อถัดไป")
                .style(Style::default().fg(Color::White).bold())
                .centered(),
            chunks[5],
        );
    }

    f.render_widget(
        Paragraph::new("1-4: answer   Tab: mode   Esc: home   q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[6],
    );
}

/// `area` の中央に幅 `width` の領域を取る
fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
