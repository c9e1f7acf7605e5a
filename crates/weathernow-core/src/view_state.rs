//! Page view state machine (Idle → Loading → Content | Error).
//!
//! Used by the app controller to decide what the surface shows and whether a
//! unit toggle can repaint in place.

/// What the page is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Content,
    Error,
}

impl ViewState {
    /// State after a search, geolocation or map click is issued.
    ///
    /// Every state may start a new lookup; a lookup already in flight is not
    /// cancelled, its result is discarded later by request sequence.
    pub fn on_lookup_started(self) -> Self {
        ViewState::Loading
    }

    /// State after a fetch completes successfully.
    pub fn on_fetch_succeeded(self) -> Self {
        ViewState::Content
    }

    /// State after a fetch fails or the query is rejected.
    pub fn on_failure(self) -> Self {
        ViewState::Error
    }

    /// True if a unit toggle should repaint the cached snapshot in place.
    pub fn can_repaint(self) -> bool {
        matches!(self, ViewState::Content)
    }

    pub fn is_loading(self) -> bool {
        matches!(self, ViewState::Loading)
    }
}
