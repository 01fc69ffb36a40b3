use crate::config::Config;
use crate::evaluate::{Evaluation, ScoredEntry};
use crate::output::BandConfig;
use crate::tui::theme::ThemeColors;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    SearchInput,
    Help,
    ScoreBreakdown,
}

pub struct App {
    pub entries: Vec<ScoredEntry>,
    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub search_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub last_reload: Instant,
    pub needs_reload: bool,
    pub should_quit: bool,
    pub data_path: PathBuf,
    pub config: Config,
    pub bands: BandConfig,
    pub colors: ThemeColors,
    pub warning_count: usize,
}

impl App {
    pub fn new(evaluation: Evaluation, data_path: PathBuf, config: Config, colors: ThemeColors) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !evaluation.entries.is_empty() {
            table_state.select(Some(0));
        }
        let bands = config.bands();

        Self {
            entries: evaluation.entries,
            table_state,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            flash_message: None,
            last_reload: Instant::now(),
            needs_reload: false,
            should_quit: false,
            data_path,
            config,
            bands,
            colors,
            warning_count: evaluation.warnings.len(),
        }
    }

    pub fn next_row(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= self.entries.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_entry(&self) -> Option<&ScoredEntry> {
        self.table_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn start_search_input(&mut self) {
        self.input_mode = InputMode::SearchInput;
        self.search_input.clear();
    }

    /// Jump to the official whose identifier matches the typed text
    pub fn confirm_search_input(&mut self) {
        let query = self.search_input.trim().to_string();
        self.input_mode = InputMode::Normal;
        if query.is_empty() {
            return;
        }

        match self.entries.iter().position(|e| e.record.id == query) {
            Some(i) => {
                self.table_state.select(Some(i));
                let name = self.entries[i].record.display_name().to_string();
                self.show_flash(format!("Selected: {}", name));
            }
            None => self.show_flash(format!("Error: ID not found: {}", query)),
        }
    }

    pub fn cancel_search_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_score_breakdown(&mut self) {
        if self.selected_entry().is_some() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Replace the scored list after a reload, keeping the selected official
    /// when it is still present
    pub fn update_entries(&mut self, evaluation: Evaluation) {
        let selected_id = self.selected_entry().map(|e| e.record.id.clone());

        self.entries = evaluation.entries;
        self.warning_count = evaluation.warnings.len();

        let position = selected_id
            .and_then(|id| self.entries.iter().position(|e| e.record.id == id));
        match position {
            Some(i) => self.table_state.select(Some(i)),
            None if self.entries.is_empty() => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
        }

        self.last_reload = Instant::now();
        self.show_flash(format!("Reloaded ({} officials)", self.entries.len()));
    }
}
