//! Application store - the single owner of [`ApplicationState`]
//!
//! Every mutation goes through [`Store::dispatch`], which runs the pure
//! [`reduce`] transition function and publishes the resulting snapshot to
//! subscribers over a `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;

use bugbuddy_core::prelude::*;
use bugbuddy_core::{AnalysisRecord, Page, ProfileUpdate, Theme, UserProfile};

/// Root aggregate of everything the application knows
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationState {
    pub current_page: Page,
    pub theme: Theme,
    /// True only between analysis start and completion
    pub is_analyzing: bool,
    pub current_analysis: Option<Arc<AnalysisRecord>>,
    /// Newest first. Never re-sorted in storage.
    pub history: Vec<Arc<AnalysisRecord>>,
    pub user: UserProfile,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::with_profile(UserProfile::default())
    }
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a given profile; the global theme follows the profile
    pub fn with_profile(user: UserProfile) -> Self {
        Self {
            current_page: Page::Landing,
            theme: user.theme,
            is_analyzing: false,
            current_analysis: None,
            history: Vec::new(),
            user,
        }
    }
}

/// State transitions accepted by the store
#[derive(Debug, Clone)]
pub enum Action {
    SetPage(Page),
    ToggleTheme,
    SetAnalyzing(bool),
    SetCurrentAnalysis(Arc<AnalysisRecord>),
    AddToHistory(Arc<AnalysisRecord>),
    UpdateUser(ProfileUpdate),
}

impl Action {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetPage(_) => "SetPage",
            Action::ToggleTheme => "ToggleTheme",
            Action::SetAnalyzing(_) => "SetAnalyzing",
            Action::SetCurrentAnalysis(_) => "SetCurrentAnalysis",
            Action::AddToHistory(_) => "AddToHistory",
            Action::UpdateUser(_) => "UpdateUser",
        }
    }
}

/// Pure transition function: `(state, action) -> state`
///
/// Fails only with [`Error::AlreadyInProgress`] when an analysis is started
/// while another one is in flight.
pub fn reduce(state: &ApplicationState, action: Action) -> Result<ApplicationState> {
    let mut next = state.clone();

    match action {
        Action::SetPage(page) => {
            next.current_page = page;
        }
        Action::ToggleTheme => {
            next.theme = state.theme.toggled();
            next.user.theme = next.theme;
        }
        Action::SetAnalyzing(true) if state.is_analyzing => {
            return Err(Error::AlreadyInProgress);
        }
        Action::SetAnalyzing(flag) => {
            next.is_analyzing = flag;
        }
        Action::SetCurrentAnalysis(record) => {
            next.current_analysis = Some(record);
        }
        Action::AddToHistory(record) => {
            next.history.insert(0, record);
        }
        Action::UpdateUser(update) => {
            update.apply_to(&mut next.user);
        }
    }

    Ok(next)
}

/// Owner of the application state
///
/// Instantiate one per engine (and one per test); there is no global store.
#[derive(Debug)]
pub struct Store {
    state: Arc<ApplicationState>,
    snapshot_tx: watch::Sender<Arc<ApplicationState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(ApplicationState::default())
    }
}

impl Store {
    pub fn new(initial: ApplicationState) -> Self {
        let state = Arc::new(initial);
        let (snapshot_tx, _) = watch::channel(state.clone());
        Self { state, snapshot_tx }
    }

    /// Apply one action. Actions are applied strictly in call order and each
    /// successful transition is published to subscribers.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let name = action.name();
        let next = reduce(&self.state, action)?;
        trace!("Store: applied {}", name);

        self.state = Arc::new(next);
        self.snapshot_tx.send_replace(self.state.clone());
        Ok(())
    }

    /// Current state
    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<ApplicationState> {
        self.state.clone()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<ApplicationState>> {
        self.snapshot_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugbuddy_core::{AccentColor, Confidence, SuggestedFix};

    fn record(message: &str, confidence: i64) -> Arc<AnalysisRecord> {
        Arc::new(AnalysisRecord::new(
            message,
            None,
            "explanation",
            SuggestedFix::new("fix()", Some("javascript")),
            "reasoning",
            Confidence::new(confidence).unwrap(),
        ))
    }

    #[test]
    fn test_initial_state() {
        let state = ApplicationState::new();
        assert_eq!(state.current_page, Page::Landing);
        assert_eq!(state.theme, Theme::Dark);
        assert!(!state.is_analyzing);
        assert!(state.current_analysis.is_none());
        assert!(state.history.is_empty());
        assert_eq!(state.user.name, "Developer");
    }

    #[test]
    fn test_initial_theme_follows_profile() {
        let user = UserProfile {
            theme: Theme::Light,
            ..UserProfile::default()
        };
        let state = ApplicationState::with_profile(user);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_set_page() {
        let state = ApplicationState::new();
        let next = reduce(&state, Action::SetPage(Page::History)).unwrap();
        assert_eq!(next.current_page, Page::History);
        assert_eq!(next.history, state.history);
    }

    #[test]
    fn test_set_page_is_idempotent() {
        let state = ApplicationState::new();
        let once = reduce(&state, Action::SetPage(Page::Profile)).unwrap();
        let twice = reduce(&once, Action::SetPage(Page::Profile)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toggle_theme_keeps_profile_in_step() {
        let mut state = ApplicationState::new();
        for _ in 0..5 {
            state = reduce(&state, Action::ToggleTheme).unwrap();
            assert_eq!(state.theme, state.user.theme);
        }
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_set_analyzing_twice_is_rejected() {
        let state = ApplicationState::new();
        let analyzing = reduce(&state, Action::SetAnalyzing(true)).unwrap();
        assert!(analyzing.is_analyzing);

        let err = reduce(&analyzing, Action::SetAnalyzing(true)).unwrap_err();
        assert!(matches!(err, Error::AlreadyInProgress));
    }

    #[test]
    fn test_clearing_analyzing_is_always_allowed() {
        let state = ApplicationState::new();
        let cleared = reduce(&state, Action::SetAnalyzing(false)).unwrap();
        assert!(!cleared.is_analyzing);
    }

    #[test]
    fn test_set_current_analysis_leaves_history_alone() {
        let state = ApplicationState::new();
        let r = record("TypeError", 92);
        let next = reduce(&state, Action::SetCurrentAnalysis(r.clone())).unwrap();
        assert_eq!(next.current_analysis, Some(r));
        assert!(next.history.is_empty());
    }

    #[test]
    fn test_add_to_history_prepends() {
        let mut state = ApplicationState::new();
        for i in 0..3 {
            state = reduce(&state, Action::AddToHistory(record(&format!("e{}", i), 70))).unwrap();
        }
        let before = state.history.clone();
        let r = record("newest", 80);

        let next = reduce(&state, Action::AddToHistory(r.clone())).unwrap();

        assert_eq!(next.history.len(), before.len() + 1);
        assert!(Arc::ptr_eq(&next.history[0], &r));
        assert_eq!(&next.history[1..], &before[..]);
        assert!(next.current_analysis.is_none());
    }

    #[test]
    fn test_update_user_is_shallow_merge() {
        let state = ApplicationState::new();
        let update = ProfileUpdate {
            email: Some("ada@example.com".to_string()),
            accent_color: Some("#EC4899".parse::<AccentColor>().unwrap()),
            ..ProfileUpdate::default()
        };
        let next = reduce(&state, Action::UpdateUser(update)).unwrap();

        assert_eq!(next.user.email, "ada@example.com");
        assert_eq!(next.user.accent_color.as_str(), "#EC4899");
        assert_eq!(next.user.name, "Developer");
        assert_eq!(next.user.theme, next.theme);
    }

    #[test]
    fn test_analysis_completion_sequence() {
        let mut store = Store::default();
        let r = record("TypeError: Cannot read property 'foo' of undefined", 92);

        store.dispatch(Action::SetAnalyzing(true)).unwrap();
        store.dispatch(Action::SetCurrentAnalysis(r.clone())).unwrap();
        store.dispatch(Action::AddToHistory(r.clone())).unwrap();
        store.dispatch(Action::SetAnalyzing(false)).unwrap();
        store.dispatch(Action::SetPage(Page::Results)).unwrap();

        let state = store.state();
        assert!(!state.is_analyzing);
        assert_eq!(state.current_analysis, Some(r.clone()));
        assert_eq!(state.history, vec![r]);
        assert_eq!(state.current_page, Page::Results);
        assert_eq!(state.history[0].confidence.value(), 92);
    }

    #[test]
    fn test_failed_dispatch_leaves_state_unchanged() {
        let mut store = Store::default();
        store.dispatch(Action::SetAnalyzing(true)).unwrap();
        let before = store.snapshot();

        assert!(store.dispatch(Action::SetAnalyzing(true)).is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_subscribers_see_latest_snapshot() {
        let mut store = Store::default();
        let mut rx = store.subscribe();

        store.dispatch(Action::SetPage(Page::Input)).unwrap();
        store.dispatch(Action::ToggleTheme).unwrap();

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.current_page, Page::Input);
        assert_eq!(snapshot.theme, Theme::Light);
    }

    #[test]
    fn test_separate_stores_are_independent() {
        let mut a = Store::default();
        let b = Store::default();
        a.dispatch(Action::SetPage(Page::History)).unwrap();
        assert_eq!(b.state().current_page, Page::Landing);
    }
}
