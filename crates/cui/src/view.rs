use crate::app::{App, PathPromptMode};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Min(6),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(root[1]);

    draw_picker(frame, middle[0], app);
    draw_balls(frame, middle[1], app);
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
    if app.path_prompt_mode.is_some() {
        draw_path_prompt(frame, app);
    }
}

/// Ball background by number range.
pub fn ball_color(number: u8) -> Color {
    match number {
        1..=20 => Color::Yellow,
        21..=30 => Color::Red,
        31..=40 => Color::Gray,
        _ => Color::Green,
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.selector.config();
    let title = format!(
        "{} | {}: {}",
        app.locale.text("Lotto Picker", "로또 번호 생성기"),
        app.locale.text("Hint", "안내"),
        app.next_hint()
    );
    let summary = format!(
        "{} {}/{} | {} {}..={} | {} {} | {} {}",
        app.locale.text("Picked", "지정"),
        app.selector.preselected().len(),
        config.max_preselect,
        app.locale.text("Range", "범위"),
        config.min_number,
        config.max_number,
        app.locale.text("Seed", "시드"),
        app.selector.seed(),
        app.locale.text("Lang", "언어"),
        app.locale.code()
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Status", "상태"),
            app.status_line
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Overview", "개요"));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_picker(frame: &mut Frame, area: Rect, app: &App) {
    let picked_style = if app.selector.is_preselected(app.picker) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(ball_color(app.picker))
            .add_modifier(Modifier::BOLD)
    };
    let typed = if app.typed.is_empty() {
        "-".to_string()
    } else {
        app.typed.clone()
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("< {:>2} >", app.picker), picked_style)),
        Line::from(""),
        Line::from(format!("{}: {typed}", app.locale.text("typed", "입력"))),
        Line::from(format!(
            "{}: {}",
            app.locale.text("slots left", "남은 칸"),
            app.selector.remaining_slots()
        )),
        Line::from(format!(
            "{}: {}",
            app.locale.text("state", "단계"),
            app.phase_label()
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Number", "번호"))
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_balls(frame: &mut Frame, area: Rect, app: &App) {
    let numbers = app.visible_numbers();
    let kept = app.selector.preselected().len();
    let mut balls = Vec::new();
    let mut marks = Vec::new();
    for slot in 0..app.slot_count() {
        if slot > 0 {
            balls.push(Span::raw("  "));
            marks.push(Span::raw("  "));
        }
        match numbers.get(slot) {
            Some(number) => {
                balls.push(Span::styled(
                    format!(" {number:>2} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(ball_color(*number))
                        .add_modifier(Modifier::BOLD),
                ));
                let mark = if slot < kept { " ** " } else { "    " };
                marks.push(Span::raw(mark));
            }
            None => {
                balls.push(Span::styled(" -- ", Style::default().fg(Color::DarkGray)));
                marks.push(Span::raw("    "));
            }
        }
    }
    let lines = vec![
        Line::from(""),
        Line::from(balls),
        Line::from(marks),
        Line::from(""),
        Line::from(
            app.locale
                .text("** = picked by hand", "** = 직접 지정한 번호"),
        )
        .dark_gray(),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Numbers", "생성 번호"));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Events", "기록"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "q quit | ? help | esc close/clear",
            "q 종료 | ? 도움말 | esc 닫기/지우기",
        )),
        Line::from(app.locale.text(
            "arrows/jk move by 1 | PgUp/PgDn move by 10",
            "방향키/jk 1씩 이동 | PgUp/PgDn 10씩 이동",
        )),
        Line::from(app.locale.text(
            "0-9 type a number directly",
            "0-9 번호 직접 입력",
        )),
        Line::from(app.locale.text(
            "a/enter add number | r run draw | x reset",
            "a/엔터 번호 추가 | r 자동 생성 | x 초기화",
        )),
        Line::from(app.locale.text(
            "Shift+S/Ctrl+S save | Shift+L/Ctrl+L load",
            "Shift+S/Ctrl+S 저장 | Shift+L/Ctrl+L 불러오기",
        )),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "도움말"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_path_prompt(frame: &mut Frame, app: &App) {
    let Some(mode) = app.path_prompt_mode else {
        return;
    };
    let area = centered_rect(70, 28, frame.area());
    frame.render_widget(Clear, area);
    let title = match mode {
        PathPromptMode::Save => app.locale.text("Save Path", "저장 경로"),
        PathPromptMode::Load => app.locale.text("Load Path", "불러올 경로"),
    };
    let action_hint = match mode {
        PathPromptMode::Save => app
            .locale
            .text("Enter=save  Esc=cancel", "엔터=저장  Esc=취소"),
        PathPromptMode::Load => app
            .locale
            .text("Enter=load  Esc=cancel", "엔터=불러오기  Esc=취소"),
    };
    let lines = vec![
        Line::from(action_hint),
        Line::from(app.locale.text(
            "Leave empty to use default path:",
            "비워 두면 기본 경로를 사용합니다:",
        )),
        Line::from(format!("  {}", app.prompt_default_path_hint())),
        Line::from(""),
        Line::from(format!("> {}", app.path_prompt_input)),
    ];
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::UiLocale;
    use lotto_core::LottoConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn ball_colors_follow_ranges() {
        assert_eq!(ball_color(1), Color::Yellow);
        assert_eq!(ball_color(20), Color::Yellow);
        assert_eq!(ball_color(21), Color::Red);
        assert_eq!(ball_color(30), Color::Red);
        assert_eq!(ball_color(31), Color::Gray);
        assert_eq!(ball_color(40), Color::Gray);
        assert_eq!(ball_color(41), Color::Green);
        assert_eq!(ball_color(45), Color::Green);
    }

    #[test]
    fn renders_drawn_numbers() {
        let mut app =
            App::bootstrap(UiLocale::EnUs, LottoConfig::default(), 3).expect("bootstrap");
        app.picker = 17;
        app.add_picked();
        app.draw();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| draw(frame, &app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Lotto Picker"));
        assert!(text.contains(" 17 "));
    }
}
