use crate::client::ProfileSource;
use crate::controller::LookupState;
use crate::models::profile::UserProfile;
use crate::tui::app::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const TAGLINE: &str = "Instantly search and explore GitHub developer profiles by username.";

fn text_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn count_or_dash(value: Option<u64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

/// The profile card as plain text, one entry per line.
pub fn profile_lines(profile: &UserProfile) -> Vec<String> {
    vec![
        format!("Avatar: {}", text_or_empty(&profile.avatar_url)),
        text_or_empty(&profile.name),
        profile.handle(),
        text_or_empty(&profile.bio),
        String::new(),
        format!(
            "Repos: {}   Followers: {}   Following: {}",
            count_or_dash(profile.public_repos),
            count_or_dash(profile.followers),
            count_or_dash(profile.following)
        ),
        String::new(),
        format!("View GitHub Profile → {}", text_or_empty(&profile.html_url)),
    ]
}

pub fn render<S: ProfileSource + 'static>(app: &App<S>, frame: &mut Frame) {
    let state = app.state();
    render_state(&state, app.mode, app.spinner_char(), frame);
}

fn render_state(state: &LookupState, mode: AppMode, spinner: char, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    // Header
    let title = if state.in_flight {
        format!("Welcome to DevRadar {} Searching...", spinner)
    } else {
        "Welcome to DevRadar".to_string()
    };
    let title = Paragraph::new(title)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let tagline = Paragraph::new(TAGLINE).style(Style::default().fg(Color::Gray));
    frame.render_widget(tagline, chunks[1]);

    render_input(state, frame, chunks[2]);

    if let Some(error) = &state.error_message {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, chunks[3]);
    }

    match mode {
        AppMode::Help => render_help_view(frame, chunks[4]),
        AppMode::Search => {
            if let Some(profile) = &state.result {
                render_profile_card(profile, frame, chunks[4]);
            }
        }
    }

    let status_text = match mode {
        AppMode::Help => "Press any key to close help",
        AppMode::Search if state.result.is_some() => {
            "Enter: Search | Ctrl+U: Clear | Ctrl+O: Open profile | F1: Help | Esc: Quit"
        }
        AppMode::Search => "Enter: Search | Ctrl+U: Clear | F1: Help | Esc: Quit",
    };
    let status = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[5]);
}

fn render_input(state: &LookupState, frame: &mut Frame, area: Rect) {
    // Submit is disabled while a lookup is running
    let (submit_label, submit_style) = if state.in_flight {
        ("Searching...", Style::default().fg(Color::DarkGray))
    } else {
        ("Search", Style::default().fg(Color::Blue))
    };

    let (text, text_style) = if state.query.is_empty() {
        (
            "Enter GitHub username...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (state.query.as_str(), Style::default().fg(Color::Yellow))
    };

    let input = Paragraph::new(text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(Span::styled(format!("[ {} ]", submit_label), submit_style)),
    );
    frame.render_widget(input, area);
}

fn render_profile_card(profile: &UserProfile, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = profile_lines(profile)
        .into_iter()
        .enumerate()
        .map(|(i, line)| match i {
            1 => Line::styled(line, Style::default().add_modifier(Modifier::BOLD)),
            2 => Line::styled(line, Style::default().fg(Color::Gray)),
            7 => Line::styled(
                line,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            _ => Line::from(line),
        })
        .collect();

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Profile"));
    frame.render_widget(card, area);
}

fn render_help_view(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        "DevRadar - Help",
        "---------",
        "",
        "  Type          Edit the username",
        "  Backspace     Delete last character",
        "  Ctrl+U        Clear the username",
        "  Enter         Look up the profile",
        "  Ctrl+O        Open the profile in your browser",
        "  F1            Toggle this help",
        "  Esc / Ctrl+C  Quit application",
        "",
        "Press any key to close help",
    ];

    let items: Vec<ListItem> = help_text.into_iter().map(ListItem::new).collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn octocat() -> UserProfile {
        UserProfile {
            login: Some("octocat".to_string()),
            avatar_url: Some("u".to_string()),
            html_url: Some("h".to_string()),
            name: Some("The Octocat".to_string()),
            bio: Some("b".to_string()),
            public_repos: Some(8),
            followers: Some(1000),
            following: Some(9),
        }
    }

    fn draw(state: &LookupState, mode: AppMode) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_state(state, mode, '⠋', frame))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_profile_lines() {
        let lines = profile_lines(&octocat());
        assert_eq!(lines[0], "Avatar: u");
        assert_eq!(lines[1], "The Octocat");
        assert_eq!(lines[2], "@octocat");
        assert_eq!(lines[3], "b");
        assert_eq!(lines[5], "Repos: 8   Followers: 1000   Following: 9");
        assert_eq!(lines[7], "View GitHub Profile → h");
    }

    #[test]
    fn test_profile_lines_with_missing_fields() {
        let lines = profile_lines(&UserProfile::default());
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "");
        assert_eq!(lines[5], "Repos: -   Followers: -   Following: -");
    }

    #[test]
    fn test_render_idle_shows_placeholder_only() {
        let screen = draw(&LookupState::default(), AppMode::Search);
        assert!(screen.contains("Enter GitHub username..."));
        assert!(screen.contains("[ Search ]"));
        assert!(!screen.contains("Profile"));
        assert!(!screen.contains("GitHub user not found"));
    }

    #[test]
    fn test_render_in_flight_disables_submit() {
        let state = LookupState {
            query: "octocat".to_string(),
            in_flight: true,
            ..Default::default()
        };
        let screen = draw(&state, AppMode::Search);
        assert!(screen.contains("[ Searching... ]"));
        assert!(screen.contains("octocat"));
    }

    #[test]
    fn test_render_error_region() {
        let state = LookupState {
            query: "nobody".to_string(),
            error_message: Some("GitHub user not found".to_string()),
            ..Default::default()
        };
        let screen = draw(&state, AppMode::Search);
        assert!(screen.contains("GitHub user not found"));
        assert!(!screen.contains("Followers"));
    }

    #[test]
    fn test_render_profile_card() {
        let state = LookupState {
            query: "octocat".to_string(),
            result: Some(octocat()),
            ..Default::default()
        };
        let screen = draw(&state, AppMode::Search);
        assert!(screen.contains("The Octocat"));
        assert!(screen.contains("@octocat"));
        assert!(screen.contains("Repos: 8   Followers: 1000   Following: 9"));
        assert!(screen.contains("Ctrl+O: Open profile"));
        assert!(screen.contains("Ctrl+U: Clear"));
    }

    #[test]
    fn test_render_help_hides_card() {
        let state = LookupState {
            result: Some(octocat()),
            ..Default::default()
        };
        let screen = draw(&state, AppMode::Help);
        assert!(screen.contains("DevRadar - Help"));
        assert!(!screen.contains("The Octocat"));
    }
}
