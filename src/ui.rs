//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - The two sequence input fields with their validation messages
//! - The alignment panel: residue-colored top row, mismatch-highlighted
//!   bottom row, ruler and column marker
//! - Residue class legend and status bar
//! - Copy notification and help overlay

pub mod glyphs;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::compare::{ColumnPair, Paint};
use crate::model::{AlignmentView, AppState, Focus, InputField, Track};
use crate::residue::{ResidueClass, FALLBACK_COLOR};
use crate::validate::Field;

use glyphs::Glyphs;

/// Width reserved for row labels inside the alignment panel.
const LABEL_WIDTH: u16 = 12;
/// Height of an input field (text line plus borders).
const FIELD_HEIGHT: u16 = 3;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Rows of the alignment panel: ruler, top, bottom, marker, plus borders.
const ALIGNMENT_HEIGHT: u16 = 6;

const TOP_TEXT: Color = Color::Black;

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();
    let message_width = area.width.saturating_sub(2) as usize;

    let first_errors = error_lines(state.form.field(Field::First), message_width);
    let second_errors = error_lines(state.form.field(Field::Second), message_width);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(first_errors.len() as u16),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(second_errors.len() as u16),
            Constraint::Length(1),
            Constraint::Length(ALIGNMENT_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    render_field(frame, state, Field::First, layout[0]);
    render_errors(frame, first_errors, layout[1]);
    render_field(frame, state, Field::Second, layout[2]);
    render_errors(frame, second_errors, layout[3]);
    render_hint(frame, state, layout[4]);
    render_alignment_panel(frame, state, glyphs, layout[5]);
    render_legend(frame, glyphs, layout[6]);
    render_status_bar(frame, state, layout[8]);

    if let Some(notification) = &state.notification {
        render_notification(frame, &notification.message, area);
    }
    if state.show_help {
        render_help(frame, area);
    }
}

/// Wraps the field's message to the available width.
fn error_lines(field: &InputField, width: usize) -> Vec<String> {
    match &field.error {
        Some(error) => textwrap::wrap(&error.to_string(), width.max(10))
            .into_iter()
            .map(|line| line.into_owned())
            .collect(),
        None => Vec::new(),
    }
}

/// Renders one input field, scrolled so the cursor stays visible.
fn render_field(frame: &mut Frame, state: &AppState, field: Field, area: Rect) {
    let input = state.form.field(field);
    let focused = state.focus == Focus::Form && state.form.focus == field;

    let border_style = if input.error.is_some() {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let skip = visible_start(input.cursor(), inner_width);
    let text: String = input.value().chars().skip(skip).take(inner_width).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("{} ({})", field.label(), input.value().chars().count()));
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused && inner_width > 0 {
        let x = area.x + 1 + (input.cursor() - skip) as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// First character shown in a field of `width` cells with the cursor at `cursor`.
fn visible_start(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

fn render_errors(frame: &mut Frame, lines: Vec<String>, area: Rect) {
    if lines.is_empty() {
        return;
    }
    let lines: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(Color::Red))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_hint(frame: &mut Frame, state: &AppState, area: Rect) {
    let hint = match state.focus {
        Focus::Form => " Enter: compare | Tab: switch field | Ctrl+Y: copy field | Esc: alignment | F1: help",
        Focus::Result => " v: select | y: copy selection | Y: copy row | i: edit | ?: help | q: quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Renders the alignment panel, or a placeholder before the first comparison.
fn render_alignment_panel(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let focused = state.focus == Focus::Result;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let Some(view) = &state.view else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Alignment");
        let text = Span::styled(
            "Enter two sequences of equal length and press Enter",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let start_col = view.first_col;
    let end_col = (start_col + view.visible_cols).min(view.len());

    let summary = view.summary;
    let title = format!(
        "Alignment [Length: {} | Mismatches: {} | Identity: {:.1}%]",
        summary.length,
        summary.mismatches,
        summary.identity()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let lines = vec![
        ruler_line(view, glyphs, start_col, end_col),
        residue_line(view, Track::Top, focused, start_col, end_col),
        residue_line(view, Track::Bottom, focused, start_col, end_col),
        marker_line(view, glyphs, focused, start_col, end_col),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Left-aligned label cell, truncated to fit.
fn label_cell(text: &str) -> String {
    let max = LABEL_WIDTH as usize - 1;
    let label: String = if text.chars().count() > max {
        let mut cut: String = text.chars().take(max - 1).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    };
    format!("{:<width$}", label, width = LABEL_WIDTH as usize)
}

/// Position ruler: a tick every 10 columns, a dot every 5.
fn ruler_line(view: &AlignmentView, glyphs: &Glyphs, start: usize, end: usize) -> Line<'static> {
    let left = if start > 0 { glyphs.arrow_left } else { " " };
    let right = if end < view.len() { glyphs.arrow_right } else { "" };
    let label = label_cell(&format!("{}{}", left, start + 1));

    let mut ruler = String::new();
    for col in start..end {
        let pos = col + 1;
        ruler.push_str(if pos % 10 == 0 {
            glyphs.ruler_tick
        } else if pos % 5 == 0 {
            glyphs.ruler_mid
        } else {
            " "
        });
    }

    let dim = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled(label, dim),
        Span::styled(ruler, dim),
        Span::styled(right.to_string(), dim),
    ])
}

/// Style of one residue cell, before cursor/selection emphasis.
fn cell_style(column: &ColumnPair, track: Track) -> Style {
    match track {
        Track::Top => Style::default().fg(TOP_TEXT).bg(column.top.color.into()),
        Track::Bottom => {
            let style = Style::default().fg(column.bottom.text.into());
            match column.bottom.background {
                Paint::Solid(rgb) => style.bg(rgb.into()).add_modifier(Modifier::BOLD),
                Paint::Transparent => style,
            }
        }
    }
}

fn residue_line(
    view: &AlignmentView,
    track: Track,
    focused: bool,
    start: usize,
    end: usize,
) -> Line<'static> {
    let label_idx = match track {
        Track::Top => 0,
        Track::Bottom => 1,
    };
    let label_style = if focused && view.track == track {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(label_cell(&view.labels[label_idx]), label_style)];
    for (col_idx, column) in view.columns[start..end].iter().enumerate() {
        let col = start + col_idx;
        let residue = match track {
            Track::Top => column.top.residue,
            Track::Bottom => column.bottom.residue,
        };

        let mut style = cell_style(column, track);
        if view.track == track && view.is_selected(col) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if focused && view.track == track && col == view.cursor_col {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(residue.to_string(), style));
    }
    Line::from(spans)
}

/// Marker under the cursor column, with its 1-based position.
fn marker_line(
    view: &AlignmentView,
    glyphs: &Glyphs,
    focused: bool,
    start: usize,
    end: usize,
) -> Line<'static> {
    if !focused || view.cursor_col < start || view.cursor_col >= end {
        return Line::default();
    }
    let offset = view.cursor_col - start;
    Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH as usize + offset)),
        Span::styled(
            format!("{} {}", glyphs.column_marker, view.cursor_col + 1),
            Style::default().fg(Color::Yellow),
        ),
    ])
}

/// One swatch per residue class, plus the gap/unknown fallback.
fn render_legend(frame: &mut Frame, glyphs: &Glyphs, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for class in ResidueClass::ALL {
        let members: String = class.members().collect();
        spans.push(Span::styled(
            glyphs.legend_bullet.to_string(),
            Style::default().fg(class.color().into()),
        ));
        spans.push(Span::raw(format!(" {} {}  ", class.label(), members)));
    }
    spans.push(Span::styled(
        glyphs.legend_bullet.to_string(),
        Style::default().fg(FALLBACK_COLOR.into()),
    ));
    spans.push(Span::raw(" gap/other"));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// 1-based column of the field cursor; the end of input counts as the last column.
fn field_position(cursor: usize, len: usize) -> usize {
    (cursor + 1).min(len)
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, position_info) = match state.focus {
        Focus::Form => {
            let field = state.form.focused();
            let len = field.value().chars().count();
            (
                "EDIT",
                format!(
                    "{} | Pos {}/{} ",
                    state.form.focus.label(),
                    field_position(field.cursor(), len),
                    len
                ),
            )
        }
        Focus::Result => match &state.view {
            Some(view) => (
                if view.selection_anchor.is_some() { "VISUAL" } else { "VIEW" },
                format!(
                    "{} | Col {}/{} ",
                    match view.track {
                        Track::Top => "Top",
                        Track::Bottom => "Bottom",
                    },
                    view.cursor_col + 1,
                    view.len()
                ),
            ),
            None => ("VIEW", String::new()),
        },
    };

    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = format!(" {} | {} ", mode_str, message);

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Top-centered transient message.
fn render_notification(frame: &mut Frame, message: &str, area: Rect) {
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: 3.min(area.height),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let text = Span::styled(
        message.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}

const HELP_TEXT: &[&str] = &[
    "Editing",
    "  type            enter residues (A R N D C Q E G H I L K M F P S T W Y V, -)",
    "  Enter           compare the two sequences",
    "  Tab / Up / Down switch field",
    "  Ctrl+Y          copy the field",
    "  Esc             go to the alignment",
    "",
    "Alignment",
    "  h l / arrows    move one column",
    "  j k             bottom / top row",
    "  0 $ Home End    first / last column",
    "  PgUp PgDn       scroll one page",
    "  v               start / stop selection",
    "  y / Y           copy selection / whole row",
    "  i / Tab         back to editing",
    "  q               quit",
    "",
    "Ctrl+C quits, F1 toggles this help. Press any key to close.",
];

fn render_help(frame: &mut Frame, area: Rect) {
    let width = (HELP_TEXT.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 4)
        .min(area.width);
    let height = (HELP_TEXT.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = HELP_TEXT.iter().map(|l| Line::from(*l)).collect();
    let block = Block::default().borders(Borders::ALL).title("Help");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Calculates the number of alignment columns that fit the terminal width.
pub fn calculate_visible_columns(terminal_width: u16) -> usize {
    // Account for borders and the label column
    terminal_width.saturating_sub(LABEL_WIDTH + 3) as usize
}
