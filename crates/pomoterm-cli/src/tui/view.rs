//! Timer screen.
//!
//! ```text
//!
//!   ☲ Focus (1/4)                                    25m
//!   ██████████████████░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
//!                        s · start/pause | r · reset | …
//! ```

use pomoterm_core::{HintVerbosity, Session, Snapshot, TimerStatus};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const PADDING: u16 = 2;
pub const MAX_WIDTH: u16 = 80;

const TITLE: Color = Color::Rgb(0xff, 0xff, 0xff);
const HELP: Color = Color::Rgb(0x62, 0x62, 0x62);

const FILLED: char = '█';
const EMPTY: char = '░';

const FULL_HINT: &str = "s · start/pause | r · reset | R · hard reset | b · next | h · hint | q · quit";

/// Progress bar width for a terminal `width` columns wide.
pub fn bar_width(width: u16) -> u16 {
    width.saturating_sub(PADDING * 2 + 4).min(MAX_WIDTH)
}

pub fn hint_text(snapshot: &Snapshot) -> &'static str {
    match snapshot.hint {
        HintVerbosity::Full => FULL_HINT,
        HintVerbosity::Minimal => match snapshot.status {
            TimerStatus::Stopped => "s · start",
            TimerStatus::Running => "s · pause",
            TimerStatus::Paused => "s · resume",
            TimerStatus::Finished => "b · next",
        },
    }
}

/// Solid-fill bar: `width` cells, `round(progress * width)` of them filled.
pub fn bar_line(progress: f64, width: u16) -> Line<'static> {
    let width = usize::from(width);
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    Line::from(vec![
        Span::styled(FILLED.to_string().repeat(filled), Style::default().fg(TITLE)),
        Span::styled(EMPTY.to_string().repeat(width - filled), Style::default().fg(HELP)),
    ])
}

pub fn spinner_glyph(snapshot: &Snapshot, frame: usize) -> &'static str {
    let frames = snapshot.spinner.frames();
    frames[frame % frames.len()]
}

pub fn draw(frame: &mut Frame, session: &Session) {
    let snapshot = session.engine().snapshot();
    let area = frame.area();

    let body = Rect {
        x: area.x + PADDING.min(area.width),
        y: area.y + 1.min(area.height),
        width: bar_width(area.width),
        height: area.height.saturating_sub(1).min(3),
    };
    let [header, bar, hints] = Layout::vertical([Constraint::Length(1); 3]).areas(body);

    let title_style = Style::default().fg(TITLE);
    let subtitle_style = if snapshot.running {
        title_style
    } else {
        Style::default().fg(HELP)
    };
    let subtitle = snapshot.subtitle();
    let [spinner_area, title_area, subtitle_area] = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(subtitle.chars().count() as u16),
    ])
    .areas(header);

    frame.render_widget(
        Paragraph::new(spinner_glyph(&snapshot, session.spinner_frame())),
        spinner_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(snapshot.title(), title_style)),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(subtitle, subtitle_style)).alignment(Alignment::Right),
        subtitle_area,
    );

    frame.render_widget(Paragraph::new(bar_line(snapshot.progress, bar.width)), bar);

    frame.render_widget(
        Paragraph::new(Line::styled(hint_text(&snapshot), Style::default().fg(HELP)))
            .alignment(Alignment::Right),
        hints,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomoterm_core::{Command, Message, NoAlert, TimerEngine};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(session: &Session, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, session)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn session() -> Session {
        Session::new(TimerEngine::default(), Box::new(NoAlert))
    }

    #[test]
    fn bar_width_is_capped() {
        assert_eq!(bar_width(200), 80);
        assert_eq!(bar_width(50), 42);
        assert_eq!(bar_width(4), 0);
    }

    #[test]
    fn bar_line_rounds_fill() {
        let text = |p: f64, w: u16| bar_line(p, w).to_string();
        assert_eq!(text(0.0, 4), "░░░░");
        assert_eq!(text(0.5, 4), "██░░");
        assert_eq!(text(0.012, 80), format!("█{}", "░".repeat(79)));
        assert_eq!(text(1.0, 3), "███");
        assert_eq!(text(1.0, 0), "");
    }

    #[test]
    fn idle_screen_shows_title_length_and_hint() {
        let rows = render(&session(), 90, 5);
        assert!(rows[0].trim().is_empty());
        assert!(rows[1].contains('☱'));
        assert!(rows[1].contains("Focus (1/4)"));
        assert!(rows[1].trim_end().ends_with("25m"));
        assert!(rows[3].contains("s · start/pause"));
    }

    #[test]
    fn paused_screen_and_minimal_hint() {
        let mut s = session();
        s.handle(Message::Command(Command::StartPause));
        s.handle(Message::Command(Command::StartPause));
        s.handle(Message::Command(Command::ToggleHint));
        let rows = render(&s, 90, 5);
        assert!(rows[1].trim_end().ends_with("paused"));
        assert!(rows[3].trim_end().ends_with("s · resume"));
        assert!(!rows[3].contains("reset"));
    }

    #[test]
    fn long_break_has_no_cycle_suffix_and_line_spinner() {
        let mut s = session();
        for _ in 0..7 {
            s.handle(Message::Command(Command::Advance));
        }
        let rows = render(&s, 90, 5);
        assert!(rows[1].contains("| Long Break"));
        assert!(!rows[1].contains('☱'));
        assert!(!rows[1].contains("(4/4)"));
        assert!(rows[1].trim_end().ends_with("30m"));
    }

    #[test]
    fn finished_bar_is_full() {
        let mut s = session();
        s.handle(Message::Command(Command::Advance));
        s.handle(Message::Command(Command::StartPause));
        for _ in 0..300 {
            s.handle(Message::Tick(chrono::Utc::now()));
        }
        let rows = render(&s, 90, 5);
        assert!(rows[1].trim_end().ends_with("done"));
        let bar: String = rows[2]
            .chars()
            .skip(PADDING as usize)
            .take(bar_width(90) as usize)
            .collect();
        assert_eq!(bar.chars().count(), 80);
        assert!(bar.chars().all(|c| c == FILLED), "bar not full: {bar:?}");
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        render(&session(), 3, 1);
        render(&session(), 1, 2);
    }
}
