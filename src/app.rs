use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use crate::assistant;
use crate::config::Config;
use crate::language::{self, Language, LANGUAGES};

/// Simulated latency between a user submission and the assistant reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    History,
    Vaccine,
    Help,
    Contact,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Chat, Tab::History, Tab::Vaccine, Tab::Help, Tab::Contact]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::History => "Chat History",
            Tab::Vaccine => "Vaccine Scheduler",
            Tab::Help => "Help",
            Tab::Contact => "Contact",
        }
    }

    /// Single-character marker shown on the collapsed sidebar rail.
    pub fn glyph(&self) -> &'static str {
        match self {
            Tab::Chat => "C",
            Tab::History => "H",
            Tab::Vaccine => "V",
            Tab::Help => "?",
            Tab::Contact => "@",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Navigation state
    pub active_tab: Tab,
    pub sidebar_open: bool,

    // Transcript state (append-only; display order is insertion order)
    pub messages: Vec<Message>,
    next_message_id: u64,
    pub input: String,
    pub input_cursor: usize, // cursor position in input, in chars
    pub is_typing: bool,
    reply_task: Option<JoinHandle<String>>,
    // Prompts submitted while a reply was still pending; dispatched FIFO so
    // assistant replies always land in submission order.
    pending_prompts: VecDeque<String>,

    // Chat viewport
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Language state
    pub language: &'static Language,
    pub show_language_picker: bool,
    pub language_picker_state: ListState,

    // Panel areas for mouse hit-testing (updated during render)
    pub sidebar_area: Option<Rect>,
    pub chat_area: Option<Rect>,

    // Calendar readout; wall clock is read once at construction
    pub current_date: NaiveDate,
}

impl App {
    pub fn new(config: Config) -> Self {
        let language = language::lookup(config.language.as_deref().unwrap_or("en"));

        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,

            active_tab: Tab::Chat,
            sidebar_open: true,

            messages: Vec::new(),
            next_message_id: 1,
            input: String::new(),
            input_cursor: 0,
            is_typing: false,
            reply_task: None,
            pending_prompts: VecDeque::new(),

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,

            language,
            show_language_picker: false,
            language_picker_state: ListState::default(),

            sidebar_area: None,
            chat_area: None,

            current_date: Local::now().date_naive(),
        };

        app.push_message(Sender::Assistant, assistant::GREETING.to_string());
        app
    }

    fn push_message(&mut self, sender: Sender, content: String) {
        let message = Message {
            id: self.next_message_id,
            content,
            sender,
            timestamp: Local::now(),
        };
        self.next_message_id += 1;
        self.messages.push(message);
    }

    /// Submit the current input buffer. Blank or whitespace-only input is a
    /// no-op. Otherwise the user message is appended immediately and a reply
    /// is scheduled after [`REPLY_DELAY`]; if a reply is already in flight
    /// the prompt is queued behind it.
    pub fn submit_input(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }

        let prompt = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        self.push_message(Sender::User, prompt.clone());

        if self.reply_task.is_some() {
            self.pending_prompts.push_back(prompt);
        } else {
            self.dispatch_reply(prompt);
        }

        self.scroll_chat_to_bottom();
    }

    fn dispatch_reply(&mut self, prompt: String) {
        self.is_typing = true;
        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(REPLY_DELAY).await;
            assistant::respond(&prompt).to_string()
        }));
    }

    /// Collect a finished reply task, append the assistant message, and
    /// dispatch the next queued prompt if any. Called from the run loop.
    pub async fn poll_reply(&mut self) {
        if !self.reply_task.as_ref().is_some_and(|t| t.is_finished()) {
            return;
        }

        if let Some(task) = self.reply_task.take() {
            // A JoinError here means the task was aborted during teardown;
            // there is nothing to append in that case.
            if let Ok(reply) = task.await {
                self.push_message(Sender::Assistant, reply);
            }
            self.is_typing = false;

            if let Some(prompt) = self.pending_prompts.pop_front() {
                self.dispatch_reply(prompt);
            }

            self.scroll_chat_to_bottom();
        }
    }

    /// Cancel any pending reply so a torn-down view is never mutated.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
        self.pending_prompts.clear();
        self.is_typing = false;
    }

    // Navigation actions
    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let i = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.active_tab = tabs[(i + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let i = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.active_tab = tabs[(i + tabs.len() - 1) % tabs.len()];
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    // Chat scrolling
    pub fn scroll_chat_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn scroll_chat_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    /// Scroll the chat so the newest message (or the typing indicator)
    /// is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.messages {
            total_lines += 1; // Sender line ("You:" or "SwasthyaAI:")
            for line in msg.content.lines() {
                // Character count, not byte length, for proper UTF-8 handling;
                // an empty line still occupies one row
                let char_count = line.chars().count();
                total_lines += char_count.div_ceil(wrap_width).max(1) as u16;
            }
            total_lines += 1; // Blank line after message
        }

        if self.is_typing {
            total_lines += 2; // "SwasthyaAI:" + typing indicator
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_typing {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Language picker methods
    pub fn open_language_picker(&mut self) {
        let current_idx = LANGUAGES
            .iter()
            .position(|l| l.code == self.language.code)
            .unwrap_or(0);
        self.language_picker_state.select(Some(current_idx));
        self.show_language_picker = true;
    }

    pub fn language_picker_nav_down(&mut self) {
        let len = LANGUAGES.len();
        let i = self.language_picker_state.selected().unwrap_or(0);
        self.language_picker_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn language_picker_nav_up(&mut self) {
        let i = self.language_picker_state.selected().unwrap_or(0);
        self.language_picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_language(&mut self) {
        if let Some(i) = self.language_picker_state.selected() {
            if let Some(lang) = LANGUAGES.get(i) {
                self.language = lang;
                self.show_language_picker = false;
                // Save to config
                let _ = Config::save_language(lang.code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        // Default config keeps tests independent of the host config dir.
        App::new(Config::new())
    }

    async fn settle(app: &mut App) {
        tokio::time::sleep(REPLY_DELAY + Duration::from_millis(10)).await;
        app.poll_reply().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_appends_user_then_assistant() {
        let mut app = test_app();
        let base = app.messages.len();

        app.input = "vaccine info please".to_string();
        app.submit_input();

        assert_eq!(app.messages.len(), base + 1);
        assert_eq!(app.messages.last().unwrap().sender, Sender::User);
        assert!(app.is_typing);
        assert!(app.input.is_empty());

        settle(&mut app).await;

        assert_eq!(app.messages.len(), base + 2);
        let reply = app.messages.last().unwrap();
        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.content, assistant::VACCINE_INFO);
        assert!(!app.is_typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_is_a_noop() {
        let mut app = test_app();
        let base = app.messages.len();

        app.input = String::new();
        app.submit_input();
        app.input = "   \t ".to_string();
        app.submit_input();

        assert_eq!(app.messages.len(), base);
        assert!(!app.is_typing);
        app.poll_reply().await;
        assert_eq!(app.messages.len(), base);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_not_appended_before_delay() {
        let mut app = test_app();
        let base = app.messages.len();

        app.input = "dengue".to_string();
        app.submit_input();

        tokio::time::sleep(Duration::from_millis(500)).await;
        app.poll_reply().await;

        assert_eq!(app.messages.len(), base + 1);
        assert!(app.is_typing);

        settle(&mut app).await;
        assert_eq!(app.messages.len(), base + 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_submissions_reply_in_order() {
        let mut app = test_app();
        let base = app.messages.len();

        app.input = "dengue".to_string();
        app.submit_input();
        app.input = "malaria".to_string();
        app.submit_input();

        // Both user messages landed immediately; one reply in flight.
        assert_eq!(app.messages.len(), base + 2);
        assert!(app.is_typing);

        settle(&mut app).await;
        // First reply landed, second prompt dispatched.
        assert_eq!(app.messages.len(), base + 3);
        assert_eq!(app.messages.last().unwrap().content, assistant::DENGUE_INFO);
        assert!(app.is_typing);

        settle(&mut app).await;
        assert_eq!(app.messages.len(), base + 4);
        assert_eq!(app.messages.last().unwrap().content, assistant::MALARIA_INFO);
        assert!(!app.is_typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_reply() {
        let mut app = test_app();
        let base = app.messages.len();

        app.input = "fever".to_string();
        app.submit_input();
        app.shutdown();

        tokio::time::sleep(REPLY_DELAY + Duration::from_millis(10)).await;
        app.poll_reply().await;

        assert_eq!(app.messages.len(), base + 1);
        assert!(!app.is_typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_ids_are_unique_and_increasing() {
        let mut app = test_app();

        app.input = "hello".to_string();
        app.submit_input();
        settle(&mut app).await;

        let ids: Vec<u64> = app.messages.iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_new_applies_configured_language() {
        let app = App::new(Config {
            language: Some("hi".to_string()),
        });
        assert_eq!(app.language.code, "hi");

        let app = App::new(Config {
            language: Some("xx".to_string()),
        });
        assert_eq!(app.language.code, "en");
    }

    #[test]
    fn test_scroll_estimate_at_exact_wrap_width() {
        let mut app = test_app();
        app.messages.clear();
        app.chat_width = 10;
        app.chat_height = 2;

        // Content fills the wrap width exactly: one row, not two.
        app.push_message(Sender::User, "a".repeat(10));
        app.scroll_chat_to_bottom();

        // Sender line + one content row + trailing blank = 3 rows total.
        assert_eq!(app.chat_scroll, 1);
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = test_app();
        assert_eq!(app.active_tab, Tab::Chat);
        app.prev_tab();
        assert_eq!(app.active_tab, Tab::Contact);
        app.next_tab();
        assert_eq!(app.active_tab, Tab::Chat);
        for _ in 0..Tab::all().len() {
            app.next_tab();
        }
        assert_eq!(app.active_tab, Tab::Chat);
    }

    #[test]
    fn test_language_picker_selects_and_applies() {
        let mut app = test_app();
        app.open_language_picker();
        assert_eq!(app.language_picker_state.selected(), Some(0));

        app.language_picker_nav_down();
        app.language_picker_nav_down();
        // Apply without persisting side effects mattering in tests.
        if let Some(i) = app.language_picker_state.selected() {
            app.language = &LANGUAGES[i];
            app.show_language_picker = false;
        }
        assert_eq!(app.language.code, "ta");
        assert!(!app.show_language_picker);
    }
}
