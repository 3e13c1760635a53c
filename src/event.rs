//! Keyboard event handling.
//!
//! Keys are routed by focus:
//!
//! Form (editing a sequence field):
//! - printable characters: insert at the cursor
//! - `Backspace`/`Delete`, `Left`/`Right`, `Home`/`End`: edit and move
//! - `Tab`/`Shift+Tab`, `Up`/`Down`: switch field
//! - `Enter`: compare the two sequences
//! - `Ctrl+Y`: copy the field content
//! - `Esc`: go to the result panel
//!
//! Result panel (Vim-style):
//! - `h`/`l`, `Left`/`Right`: move one column
//! - `j`/`k`, `Down`/`Up`: switch between top and bottom row
//! - `0`/`Home`, `$`/`End`: first/last column
//! - `PageUp`/`PageDown`: scroll one page
//! - `v`: start or stop a selection, `y`: copy it, `Y`: copy the whole row
//! - `Esc`: clear the selection, or go back to the form
//! - `i`/`Tab`: go back to the form
//! - `?`: help, `q`: quit
//!
//! `Ctrl+C` quits and `F1` toggles help from anywhere.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::clipboard::Clipboard;
use crate::model::{AlignmentView, AppState, Focus, Track};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Toggle the help overlay
    ToggleHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
    /// Insert a character in the focused field
    InsertChar(char),
    /// Insert bracketed-paste text in the focused field
    Paste(String),
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character under the cursor
    Delete,
    /// Move the field cursor left
    CursorLeft,
    /// Move the field cursor right
    CursorRight,
    /// Move the field cursor to the start
    CursorHome,
    /// Move the field cursor to the end
    CursorEnd,
    /// Focus the other field
    SwitchField,
    /// Validate and compare
    Submit,
    /// Copy the focused field
    CopyField,
    /// Focus the result panel
    FocusResult,
    /// Focus the form
    FocusForm,
    /// Move one column left
    MoveLeft,
    /// Move one column right
    MoveRight,
    /// Select the top row
    MoveUp,
    /// Select the bottom row
    MoveDown,
    /// Go to first column (0 or Home)
    GotoFirstColumn,
    /// Go to last column ($ or End)
    GotoLastColumn,
    /// Scroll one page left
    PageLeft,
    /// Scroll one page right
    PageRight,
    /// Start or stop a selection
    ToggleSelection,
    /// Copy the selection
    CopySelection,
    /// Copy the current row
    CopyRow,
    /// Clear the selection, or leave the result panel if there is none
    Escape,
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on the current focus.
pub fn handle_event(event: Event, focus: Focus, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, focus, show_help)
        }
        Event::Paste(text) if focus == Focus::Form && !show_help => Action::Paste(text),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current focus.
fn handle_key_event(key: KeyEvent, focus: Focus, show_help: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    if key.code == KeyCode::F(1) {
        return Action::ToggleHelp;
    }

    match focus {
        Focus::Form => handle_form_key(key),
        Focus::Result => handle_result_key(key),
    }
}

/// Handles key events while a sequence field is focused.
fn handle_form_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('y') => Action::CopyField,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter => Action::Submit,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Action::SwitchField,
        KeyCode::Esc => Action::FocusResult,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Char(c) if !c.is_control() => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Handles key events in the result panel (Vim-style navigation).
fn handle_result_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,

        KeyCode::Char('0') | KeyCode::Home => Action::GotoFirstColumn,
        KeyCode::Char('$') | KeyCode::End => Action::GotoLastColumn,
        KeyCode::PageUp => Action::PageLeft,
        KeyCode::PageDown => Action::PageRight,

        KeyCode::Char('v') => Action::ToggleSelection,
        KeyCode::Char('y') => Action::CopySelection,
        KeyCode::Char('Y') => Action::CopyRow,

        KeyCode::Esc => Action::Escape,
        KeyCode::Char('i') | KeyCode::Tab | KeyCode::BackTab => Action::FocusForm,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action, clipboard: &mut dyn Clipboard) -> bool {
    let now = Instant::now();
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.toggle_help();
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
        Action::InsertChar(c) => {
            state.edit(|field| {
                field.insert(c);
                true
            });
        }
        Action::Paste(text) => {
            state.paste(&text);
        }
        Action::Backspace => {
            state.edit(|field| field.backspace());
        }
        Action::Delete => {
            state.edit(|field| field.delete());
        }
        Action::CursorLeft => {
            state.form.focused_mut().move_left();
        }
        Action::CursorRight => {
            state.form.focused_mut().move_right();
        }
        Action::CursorHome => {
            state.form.focused_mut().move_home();
        }
        Action::CursorEnd => {
            state.form.focused_mut().move_end();
        }
        Action::SwitchField => {
            state.form.switch_focus();
        }
        Action::Submit => {
            state.submit();
        }
        Action::CopyField => {
            state.copy_field(clipboard, now);
        }
        Action::FocusResult => {
            state.focus_result();
        }
        Action::FocusForm => {
            state.focus_form();
        }
        Action::CopySelection => {
            state.copy_selection(clipboard, now);
        }
        Action::CopyRow => {
            state.copy_row(clipboard, now);
        }
        Action::Escape => {
            let cleared = state.view.as_mut().is_some_and(|view| view.clear_selection());
            if !cleared {
                state.focus_form();
            }
        }
        Action::MoveLeft => state.with_view(AlignmentView::move_left),
        Action::MoveRight => state.with_view(AlignmentView::move_right),
        Action::MoveUp => state.with_view(|view| view.switch_track(Track::Top)),
        Action::MoveDown => state.with_view(|view| view.switch_track(Track::Bottom)),
        Action::GotoFirstColumn => state.with_view(AlignmentView::goto_first_column),
        Action::GotoLastColumn => state.with_view(AlignmentView::goto_last_column),
        Action::PageLeft => state.with_view(|view| view.page(false)),
        Action::PageRight => state.with_view(|view| view.page(true)),
        Action::ToggleSelection => state.with_view(AlignmentView::toggle_selection),
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::model::COPIED_MESSAGE;
    use crate::validate::Field;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_form_keys() {
        let focus = Focus::Form;
        assert_eq!(handle_key_event(key(KeyCode::Char('a')), focus, false), Action::InsertChar('a'));
        // Navigation letters are plain text while editing
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), focus, false), Action::InsertChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), focus, false), Action::Submit);
        assert_eq!(handle_key_event(key(KeyCode::Tab), focus, false), Action::SwitchField);
        assert_eq!(handle_key_event(key(KeyCode::Down), focus, false), Action::SwitchField);
        assert_eq!(handle_key_event(key(KeyCode::Backspace), focus, false), Action::Backspace);
        assert_eq!(handle_key_event(key(KeyCode::Esc), focus, false), Action::FocusResult);
        assert_eq!(handle_key_event(ctrl('y'), focus, false), Action::CopyField);
        assert_eq!(handle_key_event(ctrl('x'), focus, false), Action::None);
    }

    #[test]
    fn test_result_keys() {
        let focus = Focus::Result;
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), focus, false), Action::MoveLeft);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), focus, false), Action::MoveRight);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), focus, false), Action::MoveDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('k')), focus, false), Action::MoveUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('0')), focus, false), Action::GotoFirstColumn);
        assert_eq!(handle_key_event(key(KeyCode::End), focus, false), Action::GotoLastColumn);
        assert_eq!(handle_key_event(key(KeyCode::Char('v')), focus, false), Action::ToggleSelection);
        assert_eq!(handle_key_event(key(KeyCode::Char('y')), focus, false), Action::CopySelection);
        assert_eq!(handle_key_event(key(KeyCode::Char('Y')), focus, false), Action::CopyRow);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), focus, false), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('?')), focus, false), Action::ToggleHelp);
    }

    #[test]
    fn test_global_keys() {
        for focus in [Focus::Form, Focus::Result] {
            assert_eq!(handle_key_event(ctrl('c'), focus, false), Action::Quit);
            assert_eq!(handle_key_event(ctrl('c'), focus, true), Action::Quit);
            assert_eq!(handle_key_event(key(KeyCode::F(1)), focus, false), Action::ToggleHelp);
        }
    }

    #[test]
    fn test_dismiss_help() {
        let key_event = key(KeyCode::Char('x'));
        assert_eq!(handle_key_event(key_event, Focus::Form, true), Action::DismissHelp);
        assert_eq!(handle_key_event(key(KeyCode::Esc), Focus::Result, true), Action::DismissHelp);
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut state = AppState::new("", "");
        let mut clipboard = MemoryClipboard::new();

        for c in "arn".chars() {
            apply_action(&mut state, Action::InsertChar(c), &mut clipboard);
        }
        apply_action(&mut state, Action::SwitchField, &mut clipboard);
        for c in "ARD".chars() {
            apply_action(&mut state, Action::InsertChar(c), &mut clipboard);
        }
        apply_action(&mut state, Action::Submit, &mut clipboard);

        let view = state.view.as_ref().unwrap();
        assert_eq!(view.pair.top(), "ARN");
        assert_eq!(view.summary.mismatches, 1);
        assert_eq!(state.form.focus, Field::Second);
    }

    #[test]
    fn test_select_and_copy_flow() {
        let mut state = AppState::new("MKVLA", "MRVLS");
        let mut clipboard = MemoryClipboard::new();
        state.update_viewport_size(10);

        apply_action(&mut state, Action::Submit, &mut clipboard);
        apply_action(&mut state, Action::FocusResult, &mut clipboard);
        assert_eq!(state.focus, Focus::Result);

        apply_action(&mut state, Action::MoveDown, &mut clipboard);
        apply_action(&mut state, Action::ToggleSelection, &mut clipboard);
        apply_action(&mut state, Action::MoveRight, &mut clipboard);
        apply_action(&mut state, Action::MoveRight, &mut clipboard);
        apply_action(&mut state, Action::CopySelection, &mut clipboard);

        assert_eq!(clipboard.last(), Some("MRV"));
        assert_eq!(state.notification.as_ref().unwrap().message, COPIED_MESSAGE);

        apply_action(&mut state, Action::CopyRow, &mut clipboard);
        assert_eq!(clipboard.last(), Some("MRVLS"));
    }

    #[test]
    fn test_escape_clears_selection_then_leaves() {
        let mut state = AppState::new("ARN", "ARN");
        let mut clipboard = MemoryClipboard::new();
        apply_action(&mut state, Action::Submit, &mut clipboard);
        apply_action(&mut state, Action::FocusResult, &mut clipboard);
        apply_action(&mut state, Action::ToggleSelection, &mut clipboard);

        apply_action(&mut state, Action::Escape, &mut clipboard);
        assert_eq!(state.focus, Focus::Result);
        assert!(state.view.as_ref().unwrap().selection_anchor.is_none());

        apply_action(&mut state, Action::Escape, &mut clipboard);
        assert_eq!(state.focus, Focus::Form);
    }

    #[test]
    fn test_paste_event() {
        let paste = || Event::Paste("MK\nVL".to_string());
        assert_eq!(handle_event(paste(), Focus::Form, false), Action::Paste("MK\nVL".to_string()));
        assert_eq!(handle_event(paste(), Focus::Result, false), Action::None);
        assert_eq!(handle_event(paste(), Focus::Form, true), Action::None);
    }

    #[test]
    fn test_paste_fills_focused_field() {
        let mut state = AppState::new("", "AR");
        let mut clipboard = MemoryClipboard::new();
        apply_action(&mut state, Action::Paste("MK\r\nVL\n".to_string()), &mut clipboard);

        assert_eq!(state.form.field(Field::First).value(), "MKVL");
        assert_eq!(state.form.field(Field::First).cursor(), 4);
        assert!(state.view.is_none());
    }

    #[test]
    fn test_navigation_never_selects() {
        let mut state = AppState::new("ARNDCQ", "ARNDCQ");
        let mut clipboard = MemoryClipboard::new();
        state.update_viewport_size(2);
        apply_action(&mut state, Action::Submit, &mut clipboard);
        apply_action(&mut state, Action::FocusResult, &mut clipboard);

        for action in [
            Action::MoveRight,
            Action::MoveDown,
            Action::PageRight,
            Action::PageLeft,
            Action::GotoLastColumn,
            Action::MoveLeft,
            Action::MoveUp,
            Action::GotoFirstColumn,
        ] {
            apply_action(&mut state, action, &mut clipboard);
            assert!(state.view.as_ref().unwrap().selection_anchor.is_none());
        }
        assert_eq!(state.view.as_ref().unwrap().cursor_col, 0);
    }

    #[test]
    fn test_quit() {
        let mut state = AppState::new("", "");
        let mut clipboard = MemoryClipboard::new();
        assert!(apply_action(&mut state, Action::None, &mut clipboard));
        assert!(!apply_action(&mut state, Action::Quit, &mut clipboard));
    }
}
