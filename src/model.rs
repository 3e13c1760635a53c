//! Application state for the interactive viewer.
//!
//! This module contains:
//! - the input form (two editable fields and their messages)
//! - the alignment view built from the last valid submission
//! - transient UI state (notification, help overlay, status message)
//!
//! The comparator itself stays stateless; everything here is owned by
//! [`AppState`] and replaced wholesale on each successful submission.

use std::ops::Range;
use std::time::{Duration, Instant};

use crate::clipboard::{copy_selection, Clipboard, ClipboardError};
use crate::compare::{ColumnPair, CompareError, Comparison};
use crate::session_log::SessionLog;
use crate::validate::{validate_field, validate_pair, Field, PairErrors, SequencePair, ValidationError};

/// How long the copy notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(1);

/// Text of the copy notification.
pub const COPIED_MESSAGE: &str = "Sequence copied to clipboard!";

/// A single-line text input with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    /// Cursor position, in characters
    cursor: usize,
    /// Message of the first failing validation rule
    pub error: Option<ValidationError>,
}

impl InputField {
    /// Creates a field holding `value`, cursor at the end.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self {
            value,
            cursor,
            error: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// The two-field input form.
#[derive(Debug, Clone)]
pub struct FormState {
    first: InputField,
    second: InputField,
    /// Field receiving keystrokes
    pub focus: Field,
    /// Set after the first submission; from then on edits re-validate live
    submitted: bool,
}

impl FormState {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: InputField::new(first),
            second: InputField::new(second),
            focus: Field::First,
            submitted: false,
        }
    }

    pub fn field(&self, field: Field) -> &InputField {
        match field {
            Field::First => &self.first,
            Field::Second => &self.second,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut InputField {
        match field {
            Field::First => &mut self.first,
            Field::Second => &mut self.second,
        }
    }

    pub fn focused(&self) -> &InputField {
        self.field(self.focus)
    }

    pub fn focused_mut(&mut self) -> &mut InputField {
        self.field_mut(self.focus)
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of fields currently showing an error.
    pub fn error_count(&self) -> usize {
        [&self.first, &self.second]
            .iter()
            .filter(|f| f.error.is_some())
            .count()
    }

    /// Called after every edit.
    pub fn on_edit(&mut self) {
        if self.submitted {
            self.first.error = validate_field(self.first.value(), self.second.value()).err();
            self.second.error = validate_field(self.second.value(), self.first.value()).err();
        }
    }

    /// Validates both fields, storing per-field messages.
    pub fn submit(&mut self) -> Result<SequencePair, PairErrors> {
        self.submitted = true;
        let result = validate_pair(self.first.value(), self.second.value());
        let errors = result.as_ref().err().cloned().unwrap_or_default();
        self.first.error = errors.first;
        self.second.error = errors.second;
        result
    }
}

/// Which row of the alignment view the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Top,
    Bottom,
}

/// Result panel built from a validated pair.
#[derive(Debug, Clone)]
pub struct AlignmentView {
    pub pair: SequencePair,
    /// Row labels (FASTA ids or defaults)
    pub labels: [String; 2],
    pub columns: Vec<ColumnPair>,
    pub summary: Comparison,
    /// Current column (0-based)
    pub cursor_col: usize,
    pub track: Track,
    /// First visible column
    pub first_col: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    /// Column where the selection started, if selecting
    pub selection_anchor: Option<usize>,
}

impl AlignmentView {
    pub fn new(pair: SequencePair, labels: [String; 2]) -> Result<Self, CompareError> {
        let columns = pair.compare()?;
        let summary = Comparison::of(&columns);
        Ok(Self {
            pair,
            labels,
            columns,
            summary,
            cursor_col: 0,
            track: Track::Top,
            first_col: 0,
            visible_cols: 0,
            selection_anchor: None,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn resize(&mut self, visible_cols: usize) {
        self.visible_cols = visible_cols;
        self.ensure_cursor_visible();
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col + 1 < self.len() {
            self.cursor_col += 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn goto_first_column(&mut self) {
        self.cursor_col = 0;
        self.ensure_cursor_visible();
    }

    pub fn goto_last_column(&mut self) {
        self.cursor_col = self.len().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    /// Scrolls one page left or right, keeping the cursor on screen.
    pub fn page(&mut self, forward: bool) {
        let step = self.visible_cols.max(1);
        self.cursor_col = if forward {
            (self.cursor_col + step).min(self.len().saturating_sub(1))
        } else {
            self.cursor_col.saturating_sub(step)
        };
        self.ensure_cursor_visible();
    }

    /// Switches between top and bottom rows; an active selection is dropped.
    pub fn switch_track(&mut self, track: Track) {
        if self.track != track {
            self.track = track;
            self.selection_anchor = None;
        }
    }

    pub fn toggle_selection(&mut self) {
        self.selection_anchor = match self.selection_anchor {
            Some(_) => None,
            None => Some(self.cursor_col),
        };
    }

    /// Clears the selection; returns false if there was none.
    pub fn clear_selection(&mut self) -> bool {
        self.selection_anchor.take().is_some()
    }

    /// Selected columns, anchor and cursor included.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        self.selection_anchor.map(|anchor| {
            let start = anchor.min(self.cursor_col);
            let end = anchor.max(self.cursor_col) + 1;
            start..end
        })
    }

    pub fn is_selected(&self, col: usize) -> bool {
        self.selection_range().is_some_and(|r| r.contains(&col))
    }

    fn residue(&self, col: &ColumnPair, track: Track) -> char {
        match track {
            Track::Top => col.top.residue,
            Track::Bottom => col.bottom.residue,
        }
    }

    /// Residues of a column range on the current row.
    pub fn text(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.columns[start..end]
            .iter()
            .map(|c| self.residue(c, self.track))
            .collect()
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection_range().map(|r| self.text(r))
    }

    pub fn row_text(&self) -> String {
        self.text(0..self.len())
    }

    /// Keeps the cursor visible, centering it when it leaves the viewport.
    fn ensure_cursor_visible(&mut self) {
        if self.cursor_col < self.first_col
            || self.cursor_col >= self.first_col + self.visible_cols
        {
            self.center_column();
        }
        self.clamp_viewport();
    }

    fn center_column(&mut self) {
        if self.visible_cols > 0 {
            let half = self.visible_cols / 2;
            self.first_col = self.cursor_col.saturating_sub(half);
        }
    }

    fn clamp_viewport(&mut self) {
        if self.first_col + self.visible_cols > self.len() {
            self.first_col = self.len().saturating_sub(self.visible_cols);
        }
        self.cursor_col = self.cursor_col.min(self.len().saturating_sub(1));
    }
}

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    Result,
}

/// A self-dismissing message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTIFICATION_DURATION
    }
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    pub form: FormState,
    /// Result of the last valid submission
    pub view: Option<AlignmentView>,
    pub focus: Focus,
    /// Row labels used for the next view
    pub labels: [String; 2],
    pub notification: Option<Notification>,
    /// Status message to display
    pub status_message: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub log: SessionLog,
    /// Columns available to the result panel
    visible_cols: usize,
    /// The status message is the "fields need fixing" count
    status_counts_errors: bool,
}

fn fixing_message(count: usize) -> String {
    format!(
        "{} field{} need{} fixing",
        count,
        if count == 1 { "" } else { "s" },
        if count == 1 { "s" } else { "" }
    )
}

impl AppState {
    /// Creates a state with the form pre-filled.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            form: FormState::new(first, second),
            view: None,
            focus: Focus::Form,
            labels: ["Sequence 1".to_string(), "Sequence 2".to_string()],
            notification: None,
            status_message: None,
            show_help: false,
            should_quit: false,
            log: SessionLog::disabled(),
            visible_cols: 0,
            status_counts_errors: false,
        }
    }

    pub fn with_labels(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.labels = [first.into(), second.into()];
        self
    }

    pub fn with_log(mut self, log: SessionLog) -> Self {
        self.log = log;
        self
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, cols: usize) {
        self.visible_cols = cols;
        if let Some(view) = self.view.as_mut() {
            view.resize(cols);
        }
    }

    /// Validates the form and, on success, replaces the displayed result.
    ///
    /// On failure the previous result stays untouched.
    pub fn submit(&mut self) {
        let pair = match self.form.submit() {
            Ok(pair) => pair,
            Err(errors) => {
                self.log.record("invalid", &errors.to_string());
                self.set_status(fixing_message(errors.messages().len()));
                self.status_counts_errors = true;
                return;
            }
        };

        match AlignmentView::new(pair, self.labels.clone()) {
            Ok(mut view) => {
                view.resize(self.visible_cols);
                let summary = view.summary;
                self.log.record(
                    "submit",
                    &format!(
                        "length={} mismatches={} top={} bottom={}",
                        summary.length,
                        summary.mismatches,
                        view.pair.top(),
                        view.pair.bottom()
                    ),
                );
                self.set_status(format!(
                    "Compared {} positions: {} mismatch{}",
                    summary.length,
                    summary.mismatches,
                    if summary.mismatches == 1 { "" } else { "es" }
                ));
                self.view = Some(view);
            }
            // Unreachable after validation, but never display a misaligned diff
            Err(err) => {
                self.log.record("error", &err.to_string());
                self.set_status(err.to_string());
            }
        }
    }

    /// Moves keyboard focus to the result panel, if there is one.
    pub fn focus_result(&mut self) {
        if self.view.is_some() {
            self.focus = Focus::Result;
        } else {
            self.set_status("Nothing to show yet: press Enter to compare");
        }
    }

    pub fn focus_form(&mut self) {
        self.focus = Focus::Form;
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_counts_errors = false;
    }

    /// Applies an edit to the focused field.
    ///
    /// A pending "need fixing" count follows live revalidation and is
    /// cleared once both fields are valid.
    pub fn edit(&mut self, apply: impl FnOnce(&mut InputField) -> bool) {
        if !apply(self.form.focused_mut()) {
            return;
        }
        self.form.on_edit();
        if self.status_counts_errors {
            match self.form.error_count() {
                0 => {
                    self.status_message = None;
                    self.status_counts_errors = false;
                }
                count => self.status_message = Some(fixing_message(count)),
            }
        }
    }

    /// Inserts pasted text into the focused field, dropping line breaks.
    pub fn paste(&mut self, text: &str) {
        self.edit(|field| {
            let mut changed = false;
            for c in text.chars().filter(|c| !matches!(c, '\n' | '\r')) {
                field.insert(c);
                changed = true;
            }
            changed
        });
    }

    /// Applies `apply` to the result panel, if there is one.
    pub fn with_view(&mut self, apply: impl FnOnce(&mut AlignmentView)) {
        if let Some(view) = self.view.as_mut() {
            apply(view);
        }
    }

    /// Copies `raw` and shows the notification on success.
    fn copy(&mut self, clipboard: &mut dyn Clipboard, raw: &str, now: Instant) {
        match copy_selection(clipboard, raw) {
            Ok(text) => {
                self.log.record("copy", &text);
                self.notification = Some(Notification::new(COPIED_MESSAGE, now));
            }
            Err(ClipboardError::Empty) => {}
            Err(err) => {
                self.log.record("error", &err.to_string());
                self.set_status(err.to_string());
            }
        }
    }

    /// Copies the selected residues of the result panel.
    pub fn copy_selection(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        let text = self.view.as_ref().and_then(AlignmentView::selected_text);
        match text {
            Some(text) => {
                self.copy(clipboard, &text, now);
                if let Some(view) = self.view.as_mut() {
                    view.clear_selection();
                }
            }
            None => {
                self.set_status("No selection: press v to start one");
            }
        }
    }

    /// Copies the whole current row of the result panel.
    pub fn copy_row(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        if let Some(text) = self.view.as_ref().map(AlignmentView::row_text) {
            self.copy(clipboard, &text, now);
        }
    }

    /// Copies the content of the focused input field.
    pub fn copy_field(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        let text = self.form.focused().value().to_string();
        self.copy(clipboard, &text, now);
    }

    /// Expires the notification once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }
}
