use crate::client::ProfileSource;
use crate::controller::{LookupState, ProfileLookupController};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum AppMode {
    #[default]
    Search,
    Help,
}

pub struct App<S> {
    pub controller: ProfileLookupController<S>,
    pub mode: AppMode,
    pub should_quit: bool,
    pub spinner_frame: usize,
}

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

impl<S: ProfileSource + 'static> App<S> {
    pub fn new(controller: ProfileLookupController<S>) -> Self {
        Self {
            controller,
            mode: AppMode::default(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    pub fn state(&self) -> LookupState {
        self.controller.state()
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn tick(&mut self) {
        if self.controller.state().in_flight {
            self.advance_spinner();
        }
    }

    /// Starts a lookup for the current query in the background.
    ///
    /// Returns false when the submit control is disabled: nothing typed yet,
    /// or a lookup is already running.
    pub fn submit(&self) -> bool {
        let state = self.controller.state();
        if !state.can_submit() {
            return false;
        }

        // in_flight is published here, before the task is scheduled
        tokio::spawn(self.controller.submit_lookup(&state.query));
        true
    }

    pub fn profile_url(&self) -> Option<String> {
        self.controller
            .state()
            .result
            .and_then(|profile| profile.html_url)
    }

    fn open_profile(&self) {
        let Some(url) = self.profile_url() else {
            return;
        };
        if let Err(e) = open::that_detached(&url) {
            tracing::warn!(url, error = %e, "failed to open profile link");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Help mode: any key closes help
        if self.mode == AppMode::Help {
            self.mode = AppMode::Search;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('u') => self.controller.set_query(String::new()),
                KeyCode::Char('o') => self.open_profile(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.mode = AppMode::Help,
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Backspace => self.controller.edit_query(|q| {
                q.pop();
            }),
            KeyCode::Char(c) => self.controller.edit_query(|q| q.push(c)),
            _ => {}
        }
    }
}
