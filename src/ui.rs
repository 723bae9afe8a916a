use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use chrono::{Datelike, NaiveDate};

use crate::app::{App, InputMode, Sender, Tab};
use crate::health::{self, Risk};
use crate::language::LANGUAGES;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    // Body: sidebar, main column, suggestions panel (dropped when narrow)
    let sidebar_width = if app.sidebar_open { 26 } else { 6 };
    let suggestions_width = if body_area.width >= 90 { 34 } else { 0 };

    let [sidebar_area, main_area, suggestions_area] = Layout::horizontal([
        Constraint::Length(sidebar_width),
        Constraint::Min(0),
        Constraint::Length(suggestions_width),
    ])
    .areas(body_area);

    app.sidebar_area = Some(sidebar_area);

    render_sidebar(app, frame, sidebar_area);

    match app.active_tab {
        Tab::Chat => render_chat(app, frame, main_area),
        tab => {
            app.chat_area = None;
            render_placeholder(frame, main_area, tab);
        }
    }

    if suggestions_width > 0 {
        render_suggestions(app, frame, suggestions_area);
    }

    render_footer(app, frame, footer_area);

    if app.show_language_picker {
        render_language_picker(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" SwasthyaAI ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("Medical Assistant ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("[{}] ", app.language.code),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " TYPING ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match app.input_mode {
        InputMode::Normal => {
            if app.show_language_picker {
                vec![
                    Span::styled(" j/k ", key_style),
                    Span::styled(" nav ", label_style),
                    Span::styled(" Enter ", key_style),
                    Span::styled(" select ", label_style),
                    Span::styled(" Esc ", key_style),
                    Span::styled(" cancel ", label_style),
                ]
            } else {
                vec![
                    Span::styled(" i ", key_style),
                    Span::styled(" type ", label_style),
                    Span::styled(" Tab ", key_style),
                    Span::styled(" tabs ", label_style),
                    Span::styled(" j/k ", key_style),
                    Span::styled(" scroll ", label_style),
                    Span::styled(" b ", key_style),
                    Span::styled(" sidebar ", label_style),
                    Span::styled(" L ", key_style),
                    Span::styled(" language ", label_style),
                    Span::styled(" q ", key_style),
                    Span::styled(" quit ", label_style),
                ]
            }
        }
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" stop typing ", label_style),
        ],
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines: Vec<Line> = Vec::new();

    if app.sidebar_open {
        lines.push(Line::from(Span::styled(
            " SwasthyaAI",
            Style::default().fg(Color::Cyan).bold(),
        )));
        lines.push(Line::from(Span::styled(
            " Medical Assistant",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
    }

    for (i, tab) in Tab::all().iter().enumerate() {
        let active = *tab == app.active_tab;
        let style = if active {
            Style::default().bg(Color::Blue).fg(Color::White).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        let text = if app.sidebar_open {
            format!(" {} {} ", i + 1, tab.label())
        } else {
            format!(" {} ", tab.glyph())
        };
        lines.push(Line::from(Span::styled(text, style)));
        lines.push(Line::default());
    }

    let sidebar = Paragraph::new(lines).block(block);
    frame.render_widget(sidebar, area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Chat column: status header, transcript, input box
    let [status_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    app.chat_area = Some(chat_area);

    render_chat_status(app, frame, status_area);
    render_transcript(app, frame, chat_area);
    render_input(app, frame, input_area);
}

fn render_chat_status(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let status = Line::from(vec![
        Span::styled("SwasthyaAI Assistant  ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::styled("Online & Ready to Help  ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} {}", app.language.symbol, app.language.name),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status).block(block), area);
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Chat ");

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let mut lines: Vec<Line> = Vec::new();

    for msg in &app.messages {
        let time = msg.timestamp.format("%H:%M");
        match msg.sender {
            Sender::User => {
                lines.push(Line::from(vec![
                    Span::styled("You", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", time), Style::default().fg(Color::DarkGray)),
                ]));
            }
            Sender::Assistant => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "SwasthyaAI",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", time), Style::default().fg(Color::DarkGray)),
                ]));
            }
        }
        for line in msg.content.lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::default());
    }

    if app.is_typing {
        lines.push(Line::from(Span::styled(
            "SwasthyaAI",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let border_color = if app.input_mode == InputMode::Editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Ask about symptoms, diseases, or health advice ");

    // Horizontal scroll keeps the cursor visible in long inputs
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app.input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(block);

    frame.render_widget(input, area);

    if app.input_mode == InputMode::Editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, tab: Tab) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", tab.label()));

    let text = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            format!("  {} is not available yet.", tab.label()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "  Press 1 to return to the chat.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    let month = app.current_date.format("%B");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} Suggestions ", month));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        " Health tips and alerts for this month",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());

    // Calendar
    lines.push(Line::from(Span::styled(
        format!(" {}", app.current_date.format("%B %Y")),
        Style::default().fg(Color::Cyan).bold(),
    )));
    lines.extend(calendar_lines(app.current_date));
    lines.push(Line::default());

    // Seasonal alert
    lines.push(Line::from(Span::styled(
        format!(" {}", health::MONSOON_ALERT_TITLE),
        Style::default().fg(Color::Yellow).bold(),
    )));
    lines.push(Line::from(Span::styled(
        format!(" {}", health::MONSOON_ALERT_BODY),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(Span::styled(
        " ! High Alert",
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::default());

    // Disease cards
    lines.push(Line::from(Span::styled(
        " Common Diseases & Prevention",
        Style::default().fg(Color::Cyan).bold(),
    )));
    lines.push(Line::default());

    for disease in health::DISEASES {
        let risk_color = match disease.risk {
            Risk::High => Color::Red,
            Risk::Medium => Color::Yellow,
            Risk::Low => Color::Green,
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", disease.name), Style::default().bold()),
            Span::styled(format!("[{}]", disease.risk.label()), Style::default().fg(risk_color)),
        ]));
        lines.push(Line::from(Span::styled(
            " Symptoms:",
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", disease.symptoms.join(", ")),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            " Prevention:",
            Style::default().fg(Color::Cyan),
        )));
        for tip in disease.prevention {
            lines.push(Line::from(Span::styled(
                format!("  • {}", tip),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::default());
    }

    // Quick actions
    lines.push(Line::from(Span::styled(
        " Quick Actions",
        Style::default().fg(Color::Cyan).bold(),
    )));
    for action in health::QUICK_ACTIONS {
        lines.push(Line::from(Span::styled(
            format!("  > {}", action),
            Style::default().fg(Color::Gray),
        )));
    }

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

/// Lay out the month of `date` as 7-day rows of calendar cells, leading
/// and trailing blanks included.
pub fn month_grid(date: NaiveDate) -> Vec<Option<u32>> {
    let first = date.with_day(1).unwrap_or(date);

    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let days_in_month = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(30);

    let offset = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<u32>> = vec![None; offset];
    cells.extend((1..=days_in_month).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

fn calendar_lines(date: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "  S   M   T   W   T   F   S",
        Style::default().fg(Color::DarkGray),
    )));

    let today = date.day();
    for week in month_grid(date).chunks(7) {
        let mut spans: Vec<Span> = Vec::new();
        for cell in week {
            match cell {
                Some(day) => {
                    let style = if *day == today {
                        Style::default().bg(Color::Cyan).fg(Color::Black).bold()
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    spans.push(Span::styled(format!(" {:2} ", day), style));
                }
                None => spans.push(Span::raw("    ")),
            }
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn render_language_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    // Calculate popup size and position (centered)
    let popup_width = 36.min(area.width.saturating_sub(4));
    let popup_height = (LANGUAGES.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Language (Enter to select, Esc to cancel) ");

    let items: Vec<ListItem> = LANGUAGES
        .iter()
        .map(|lang| {
            let marker = if lang.code == app.language.code { "* " } else { "  " };
            let style = if lang.code == app.language.code {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(
                "{}{}  {} ({})",
                marker, lang.symbol, lang.name, lang.native_name
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.language_picker_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_grid_august_2026() {
        // August 2026 starts on a Saturday and has 31 days.
        let date = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let cells = month_grid(date);

        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.iter().take(6).filter(|c| c.is_some()).count(), 0);
        assert_eq!(cells[6], Some(1));
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 31);
    }

    #[test]
    fn test_month_grid_february_leap_year() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let cells = month_grid(date);
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 29);
        // February 2024 starts on a Thursday.
        assert_eq!(cells[4], Some(1));
    }

    #[test]
    fn test_month_grid_december_rolls_year() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let cells = month_grid(date);
        assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 31);
    }
}
