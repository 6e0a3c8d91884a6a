//! TUI application state and event handling.
//!
//! The `App` struct owns the search session plus all presentation-only
//! state: form entry, results browsing, filters, the report selection set,
//! and transient status messages. It runs the main event loop via `run()`:
//! poll the session for finished searches, redraw when dirty (or while the
//! loading timers tick), and translate keyboard actions according to the
//! active focus.

use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{self, ExportKind};
use crate::filters::{filter_by_category, filter_by_free_text};
use crate::i18n::translations;
use crate::map::to_map_points;
use crate::models::{Category, PersonRecord, SearchQuery};
use crate::report::{build_report, report_filename, save_report};
use crate::session::{SearchSession, SessionStatus};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Input length cap for form fields and the location filter.
const MAX_FIELD_LEN: usize = 120;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName1,
    LastName2,
    ServiceNumber,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::FirstName,
        FormField::LastName1,
        FormField::LastName2,
        FormField::ServiceNumber,
    ];

    fn next(self) -> FormField {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> FormField {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Form entry state, kept separate from the submitted query so typing never
/// mutates an in-flight search.
#[derive(Debug, Default)]
pub struct FormState {
    pub first_name: String,
    pub last_name1: String,
    pub last_name2: String,
    pub service_number: String,
    pub fuzzy: bool,
}

impl FormState {
    fn new() -> Self {
        Self { fuzzy: true, ..Default::default() }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName1 => &mut self.last_name1,
            FormField::LastName2 => &mut self.last_name2,
            FormField::ServiceNumber => &mut self.service_number,
        }
    }

    fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name1.is_empty()
            && self.last_name2.is_empty()
            && self.service_number.is_empty()
    }

    fn to_query(&self) -> SearchQuery {
        SearchQuery {
            first_name: self.first_name.clone(),
            last_name1: self.last_name1.clone(),
            last_name2: self.last_name2.clone(),
            military_service_number: self.service_number.clone(),
            fuzzy: self.fuzzy,
        }
    }
}

pub struct App {
    session: SearchSession,
    focus: Focus,
    form: FormState,
    active_field: FormField,
    selected_idx: usize,
    location_filter: String,
    editing_location: bool,
    selected_categories: BTreeSet<Category>,
    selected_for_report: BTreeSet<String>,
    status_message: Option<StatusMessage>,
    export_dir: PathBuf,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(session: SearchSession) -> Self {
        Self {
            session,
            focus: Focus::Form,
            form: FormState::new(),
            active_field: FormField::FirstName,
            selected_idx: 0,
            location_filter: String::new(),
            editing_location: false,
            selected_categories: BTreeSet::new(),
            selected_for_report: BTreeSet::new(),
            status_message: None,
            export_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// The records the results view currently shows: category filter first,
    /// then the free-text location filter. Pure recomputation each tick.
    fn visible_records(&self) -> Vec<PersonRecord> {
        let by_category = filter_by_category(self.session.results(), &self.selected_categories);
        filter_by_free_text(&by_category, &self.location_filter)
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            if self.session.poll() {
                self.on_search_settled();
                self.needs_redraw = true;
            }

            let visible = self.visible_records();
            self.clamp_selection(visible.len());

            // Redraw when dirty, while the loading timers tick, or at least
            // every 100ms (terminal resize handling).
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw
                || self.session.is_loading()
                || elapsed >= Duration::from_millis(100)
            {
                terminal.draw(|f| {
                    let state = self.render_state(&visible);
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action, &visible);
        }

        Ok(())
    }

    fn render_state<'a>(&'a self, visible: &'a [PersonRecord]) -> RenderState<'a> {
        let text = translations(self.session.language());
        let loading_message = text.loading_messages
            [self.session.loading_message_index(text.loading_messages.len())];
        RenderState {
            text,
            language: self.session.language(),
            session_status: self.session.status(),
            searched_once: self.session.searched_once(),
            error: self.session.error(),
            form: &self.form,
            active_field: self.active_field,
            focus: self.focus,
            loading_message,
            elapsed_seconds: self.session.elapsed_seconds(),
            summary: self.session.summary(),
            visible,
            total_count: self.session.results().len(),
            map_point_count: to_map_points(visible).len(),
            selected_idx: self.selected_idx,
            selected_for_report: &self.selected_for_report,
            location_filter: &self.location_filter,
            editing_location: self.editing_location,
            selected_categories: &self.selected_categories,
            status_message: self.status_message.as_ref(),
        }
    }

    /// React to the session leaving the loading state.
    fn on_search_settled(&mut self) {
        if self.session.status() == SessionStatus::Success {
            // A fresh result set: show it, preselect every record for the
            // report, and drop filters from the previous search.
            self.focus = Focus::Results;
            self.selected_idx = 0;
            self.location_filter.clear();
            self.editing_location = false;
            self.selected_categories.clear();
            self.selected_for_report =
                self.session.results().iter().map(|r| r.id.clone()).collect();
        }
    }

    fn clamp_selection(&mut self, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
        } else if self.selected_idx >= total {
            self.selected_idx = total - 1;
        }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action, visible: &[PersonRecord]) {
        if action == Action::None {
            return;
        }
        self.needs_redraw = true;

        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::ToggleLanguage => {
                let language = self.session.language().toggled();
                self.session.set_language(language);
                return;
            }
            Action::NewSearch => {
                self.reset_all();
                return;
            }
            _ => {}
        }

        if self.session.is_loading() {
            // Only a stop is meaningful mid-flight.
            if action == Action::Escape {
                self.session.stop();
            }
            return;
        }

        match self.focus {
            Focus::Form => self.handle_form_action(action),
            Focus::Results => self.handle_results_action(action, visible),
        }
    }

    fn handle_form_action(&mut self, action: Action) {
        match action {
            Action::Input(c) => {
                let field = self.form.field_mut(self.active_field);
                if field.len() < MAX_FIELD_LEN {
                    field.push(c);
                }
            }
            Action::DeleteChar => {
                self.form.field_mut(self.active_field).pop();
            }
            Action::NextField | Action::MoveDown => {
                self.active_field = self.active_field.next();
            }
            Action::PrevField | Action::MoveUp => {
                self.active_field = self.active_field.prev();
            }
            Action::ToggleFuzzy => {
                self.form.fuzzy = !self.form.fuzzy;
            }
            Action::Confirm => {
                self.session.submit(self.form.to_query());
            }
            Action::Escape => {
                if self.session.searched_once() {
                    self.focus = Focus::Results;
                } else if !self.form.is_empty() {
                    self.form = FormState::new();
                    self.active_field = FormField::FirstName;
                } else {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    fn handle_results_action(&mut self, action: Action, visible: &[PersonRecord]) {
        if self.editing_location {
            match action {
                Action::Input(c) => {
                    if self.location_filter.len() < MAX_FIELD_LEN {
                        self.location_filter.push(c);
                        self.selected_idx = 0;
                    }
                }
                Action::DeleteChar => {
                    self.location_filter.pop();
                    self.selected_idx = 0;
                }
                Action::Confirm | Action::Escape => {
                    self.editing_location = false;
                }
                _ => {}
            }
            return;
        }

        match action {
            Action::MoveUp => self.move_selection(-1, visible.len()),
            Action::MoveDown => self.move_selection(1, visible.len()),
            Action::PageUp => self.move_selection(-10, visible.len()),
            Action::PageDown => self.move_selection(10, visible.len()),
            Action::Input('/') => {
                self.editing_location = true;
            }
            Action::Input(' ') => self.toggle_report_selection(visible),
            Action::Input(c @ '1'..='7') => {
                let category = Category::ALL[(c as usize) - ('1' as usize)];
                if !self.selected_categories.remove(&category) {
                    self.selected_categories.insert(category);
                }
                self.selected_idx = 0;
            }
            Action::CopyReport => self.copy_report(),
            Action::SaveReport => self.save_report_to_disk(),
            Action::CopyRecordCard => self.copy_record_card(visible),
            Action::Escape => {
                self.focus = Focus::Form;
            }
            Action::Confirm => {
                self.focus = Focus::Form;
                self.active_field = FormField::FirstName;
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);
    }

    fn toggle_report_selection(&mut self, visible: &[PersonRecord]) {
        let Some(record) = visible.get(self.selected_idx) else {
            return;
        };
        if !self.selected_for_report.remove(&record.id) {
            self.selected_for_report.insert(record.id.clone());
        }
    }

    /// Records currently marked for the report, in result order.
    fn report_records(&self) -> Vec<PersonRecord> {
        self.session
            .results()
            .iter()
            .filter(|r| self.selected_for_report.contains(&r.id))
            .cloned()
            .collect()
    }

    fn build_full_report(&self) -> Option<String> {
        let summary = self.session.summary()?;
        let records = self.report_records();
        if records.is_empty() {
            return None;
        }
        Some(build_report(&records, summary, self.session.query(), Utc::now()))
    }

    fn copy_report(&mut self) {
        let text = translations(self.session.language());
        match self.build_full_report() {
            Some(report) => match clipboard::copy_text(ExportKind::Report, &report) {
                Ok(()) => {
                    self.set_status(
                        format!("✓ {}", text.report_copied),
                        MessageType::Success,
                        STATUS_SUCCESS_DURATION_MS,
                    );
                }
                Err(e) => {
                    self.set_status(
                        format!("✗ {}", e),
                        MessageType::Error,
                        STATUS_ERROR_DURATION_MS,
                    );
                }
            },
            None => {
                self.set_status("✗ 0 registros", MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
        }
    }

    fn save_report_to_disk(&mut self) {
        let text = translations(self.session.language());
        let Some(report) = self.build_full_report() else {
            self.set_status("✗ 0 registros", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };
        let filename = report_filename(self.session.query());
        match save_report(&self.export_dir, &filename, &report) {
            Ok(path) => {
                self.set_status(
                    format!("✓ {}: {}", text.report_saved, path.display()),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
        }
    }

    fn copy_record_card(&mut self, visible: &[PersonRecord]) {
        let Some(record) = visible.get(self.selected_idx) else {
            self.set_status("✗ Sin selección", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };
        match clipboard::copy_record_card(record) {
            Ok(()) => {
                self.set_status("✓ Ficha copiada", MessageType::Success, STATUS_SUCCESS_DURATION_MS);
            }
            Err(e) => {
                self.set_status(format!("✗ {}", e), MessageType::Error, STATUS_ERROR_DURATION_MS);
            }
        }
    }

    fn reset_all(&mut self) {
        self.session.reset();
        self.form = FormState::new();
        self.active_field = FormField::FirstName;
        self.focus = Focus::Form;
        self.selected_idx = 0;
        self.location_filter.clear();
        self.editing_location = false;
        self.selected_categories.clear();
        self.selected_for_report.clear();
        self.status_message = None;
    }
}
