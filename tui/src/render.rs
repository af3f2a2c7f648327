//! Rendering for the dicebag TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use dicebag_types::Group;

use crate::app::{App, StatusKind};
use crate::theme::{colors, styles};
use crate::view::InputMode;

const UNNAMED_TITLE: &str = "Unnamed group - press r to name";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, frame.area());

    let prompt_height = if matches!(app.input_mode(), InputMode::Normal) {
        0
    } else {
        3
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),                // Groups
            Constraint::Length(prompt_height), // Prompt
            Constraint::Length(1),             // Status bar
            Constraint::Length(1),             // Key hints
        ])
        .split(frame.area());

    draw_groups(frame, app, chunks[0]);
    if prompt_height > 0 {
        draw_prompt(frame, app, chunks[1]);
    }
    draw_status_bar(frame, app, chunks[2]);
    draw_key_hints(frame, app, chunks[3]);
}

fn group_height(group: &Group) -> u16 {
    // Borders, one line per die (or the empty hint), and the total line.
    let body = group.dice().len().max(1) as u16;
    body.saturating_add(3)
}

/// First group to draw so the selected one is on screen.
fn first_visible(groups: &[Group], selected: usize, available: u16) -> usize {
    let mut first = selected.min(groups.len().saturating_sub(1));
    let mut used = groups.get(first).map_or(0, group_height);
    while first > 0 {
        let above = group_height(&groups[first - 1]);
        if used.saturating_add(above) > available {
            break;
        }
        used += above;
        first -= 1;
    }
    first
}

fn draw_groups(frame: &mut Frame, app: &App, area: Rect) {
    let groups = app.groups();
    if groups.is_empty() {
        let welcome = Paragraph::new(vec![
            Line::from(Span::styled(
                "No dice groups yet.",
                Style::default().fg(colors::TEXT_PRIMARY),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("n", styles::key_hint()),
                Span::raw(" to create one."),
            ]),
        ])
        .style(Style::default().fg(colors::TEXT_MUTED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(styles::border(false))
                .title(" dicebag ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(welcome, area);
        return;
    }

    let selected = app.view().selected_group();
    let mut y = area.y;
    let bottom = area.y.saturating_add(area.height);

    for (index, group) in groups
        .iter()
        .enumerate()
        .skip(first_visible(groups, selected, area.height))
    {
        if y >= bottom {
            break;
        }
        let height = group_height(group).min(bottom - y);
        let rect = Rect::new(area.x, y, area.width, height);
        let selected_die = (index == selected).then(|| app.view().selected_die());
        draw_group(frame, group, index == selected, selected_die, rect);
        y = y.saturating_add(height);
    }
}

fn draw_group(
    frame: &mut Frame,
    group: &Group,
    is_selected: bool,
    selected_die: Option<usize>,
    area: Rect,
) {
    let title = if group.name().trim().is_empty() {
        UNNAMED_TITLE
    } else {
        group.name()
    };

    let mut lines: Vec<Line> = Vec::with_capacity(group.dice().len() + 1);
    if group.is_empty() {
        lines.push(Line::from(Span::styled(
            "No dice. Press a to add one.",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }
    for (index, die) in group.dice().iter().enumerate() {
        let marker = if selected_die == Some(index) { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{die}"),
            styles::die(selected_die == Some(index)),
        )));
    }

    let total = match group.total() {
        Some(total) => Span::styled(format!("Total: {total}"), styles::total(true)),
        None => Span::styled("Total: not available", styles::total(false)),
    };
    lines.push(Line::from(total));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(is_selected))
        .title(Span::styled(format!(" {title} "), styles::group_title(is_selected)))
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let (title, draft) = match app.input_mode() {
        InputMode::Normal => return,
        InputMode::Naming { draft } => (" Rename group ", draft.as_str()),
        InputMode::AddingDie { draft } => (" Add die: number of sides ", draft.as_str()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::YELLOW))
        .title(title)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);

    frame.render_widget(
        Paragraph::new(draft)
            .style(Style::default().fg(colors::TEXT_PRIMARY))
            .block(block),
        area,
    );

    let cursor_x = inner
        .x
        .saturating_add(draft.width() as u16)
        .min(inner.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, inner.y));
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.status() {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => colors::YELLOW,
                StatusKind::Error => colors::RED,
            };
            (status.text.clone(), Style::default().fg(color))
        }
        None => {
            let count = app.groups().len();
            let noun = if count == 1 { "group" } else { "groups" };
            (
                format!("{count} {noun}"),
                Style::default().fg(colors::TEXT_MUTED),
            )
        }
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

fn draw_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if matches!(app.input_mode(), InputMode::Normal) {
        let can_roll = app.selected_group().is_some_and(|group| !group.is_empty());
        if can_roll {
            &[
                ("n", "new group"),
                ("a", "add die"),
                ("r", "rename"),
                ("enter", "roll"),
                ("x", "remove die"),
                ("q", "quit"),
            ]
        } else {
            &[("n", "new group"), ("a", "add die"), ("r", "rename"), ("q", "quit")]
        }
    } else {
        &[("enter", "confirm"), ("esc", "cancel")]
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, label) in hints {
        spans.push(Span::styled(*key, styles::key_hint()));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(colors::TEXT_MUTED),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
