//! Page navigation state machine with a fixed-duration flip lock.

use crate::config::DEFAULT_FLIP_DURATION_MS;
use crate::render::PresentationAdapter;

/// Whether a flip animation is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    /// Navigation requests are accepted
    Idle,
    /// A flip is animating; navigation requests are dropped
    Transitioning,
}

/// Snapshot of the navigator handed to presenters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigatorState {
    /// Page currently shown (1-based)
    pub current_page: u32,
    /// Number of pages in the book (at least 1)
    pub total_pages: u32,
    /// True while a flip is animating
    pub is_locked: bool,
}

impl NavigatorState {
    /// Initial state for a book with `total_pages` pages.
    pub fn new(total_pages: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            is_locked: false,
        }
    }

    #[inline]
    pub fn transition_state(&self) -> TransitionState {
        if self.is_locked {
            TransitionState::Transitioning
        } else {
            TransitionState::Idle
        }
    }

    #[inline]
    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    #[inline]
    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Check whether `page` is a valid 1-based page index.
    #[inline]
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

/// Platform-agnostic page navigator.
///
/// The navigator owns the current page and the flip lock, and pushes every
/// change to its [`PresentationAdapter`]. It does not handle timing directly:
/// after an accepted navigation the owner must call
/// [`finish_transition`](Self::finish_transition) once
/// [`flip_duration_ms`](Self::flip_duration_ms) has elapsed.
/// [`FlipBook`](crate::FlipBook) does that scheduling for you.
///
/// Rejected requests (out of range, or issued while locked) are silent
/// no-ops that return `false`.
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::{NavigatorState, PageNavigator, PresentationAdapter, TransitionState};
///
/// struct NoopPresenter;
///
/// impl PresentationAdapter for NoopPresenter {
///     fn render(&mut self, _state: &NavigatorState) {}
///     fn refresh_controls(&mut self, _state: &NavigatorState) {}
/// }
///
/// let mut nav = PageNavigator::new(4, NoopPresenter);
/// assert!(nav.next_page());
/// assert_eq!(nav.current_page(), 2);
/// assert_eq!(nav.transition_state(), TransitionState::Transitioning);
///
/// // Dropped while the flip animates
/// assert!(!nav.next_page());
///
/// // Called by the timer after `flip_duration_ms()`
/// nav.finish_transition();
/// assert_eq!(nav.transition_state(), TransitionState::Idle);
/// ```
#[derive(Clone, Debug)]
pub struct PageNavigator<P> {
    state: NavigatorState,
    /// Lock duration in milliseconds
    flip_duration_ms: u32,
    presenter: P,
}

impl<P: PresentationAdapter> PageNavigator<P> {
    /// Create a navigator for `total_pages` pages on page 1.
    ///
    /// A page count of zero is raised to one.
    pub fn new(total_pages: u32, presenter: P) -> Self {
        Self {
            state: NavigatorState::new(total_pages),
            flip_duration_ms: DEFAULT_FLIP_DURATION_MS,
            presenter,
        }
    }

    /// Set the lock duration used for subsequent flips.
    pub fn with_flip_duration(mut self, flip_duration_ms: u32) -> Self {
        self.flip_duration_ms = flip_duration_ms;
        self
    }

    /// Navigate to `target` (1-based).
    ///
    /// Returns `false` without touching any state if the target is out of
    /// range or a flip is in progress. Navigating to the current page is a
    /// full transition.
    pub fn go_to_page(&mut self, target: u32) -> bool {
        if !self.state.contains(target) || self.state.is_locked {
            log::trace!(
                "flip to page {} rejected (page {}/{}, locked: {})",
                target,
                self.state.current_page,
                self.state.total_pages,
                self.state.is_locked
            );
            return false;
        }

        self.state.is_locked = true;
        self.state.current_page = target;
        log::debug!("flipping to page {}/{}", target, self.state.total_pages);
        self.presenter.render(&self.state);
        true
    }

    /// Navigate one page forward.
    pub fn next_page(&mut self) -> bool {
        if self.state.current_page < self.state.total_pages && !self.state.is_locked {
            self.go_to_page(self.state.current_page + 1)
        } else {
            false
        }
    }

    /// Navigate one page back.
    pub fn previous_page(&mut self) -> bool {
        if self.state.current_page > 1 && !self.state.is_locked {
            self.go_to_page(self.state.current_page - 1)
        } else {
            false
        }
    }

    /// Navigate to the first page.
    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    /// Navigate to the last page.
    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.state.total_pages)
    }

    /// End the current flip: clear the lock and refresh the controls.
    ///
    /// Returns `false` if no flip was in progress.
    pub fn finish_transition(&mut self) -> bool {
        if !self.state.is_locked {
            return false;
        }
        self.state.is_locked = false;
        log::debug!("flip to page {} finished", self.state.current_page);
        self.presenter.refresh_controls(&self.state);
        true
    }

    /// Push the current state to the controls without navigating.
    ///
    /// Used once at startup so buttons and indicators match page 1.
    pub fn refresh_controls(&mut self) {
        self.presenter.refresh_controls(&self.state);
    }

    /// Read-only snapshot of the navigator.
    #[inline]
    pub fn state(&self) -> NavigatorState {
        self.state
    }

    #[inline]
    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    #[inline]
    pub fn total_pages(&self) -> u32 {
        self.state.total_pages
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked
    }

    #[inline]
    pub fn transition_state(&self) -> TransitionState {
        self.state.transition_state()
    }

    /// Lock duration in milliseconds.
    ///
    /// Use this to configure your timer.
    #[inline]
    pub fn flip_duration_ms(&self) -> u32 {
        self.flip_duration_ms
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Render(NavigatorState),
        Refresh(NavigatorState),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl PresentationAdapter for Recorder {
        fn render(&mut self, state: &NavigatorState) {
            self.calls.push(Call::Render(*state));
        }

        fn refresh_controls(&mut self, state: &NavigatorState) {
            self.calls.push(Call::Refresh(*state));
        }
    }

    fn navigator(total: u32) -> PageNavigator<Recorder> {
        PageNavigator::new(total, Recorder::default())
    }

    #[test]
    fn test_initial_state() {
        let nav = navigator(4);
        assert_eq!(
            nav.state(),
            NavigatorState {
                current_page: 1,
                total_pages: 4,
                is_locked: false
            }
        );
        assert_eq!(nav.transition_state(), TransitionState::Idle);
        assert_eq!(nav.flip_duration_ms(), 400);
        assert!(nav.presenter().calls.is_empty());
    }

    #[test]
    fn test_zero_pages_raised_to_one() {
        let mut nav = navigator(0);
        assert_eq!(nav.total_pages(), 1);
        assert!(!nav.next_page());
        assert!(!nav.previous_page());
        assert!(nav.go_to_page(1));
    }

    #[test]
    fn test_accepted_targets_become_current() {
        let mut nav = navigator(6);
        for target in [3, 6, 1, 5, 2] {
            assert!(nav.go_to_page(target));
            assert_eq!(nav.current_page(), target);
            nav.finish_transition();
        }
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        let mut nav = navigator(4);
        nav.go_to_page(3);
        nav.finish_transition();

        assert!(!nav.go_to_page(0));
        assert!(!nav.go_to_page(5));
        assert!(!nav.go_to_page(u32::MAX));
        assert_eq!(nav.current_page(), 3);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_go_to_page_renders_locked_state() {
        let mut nav = navigator(4);
        nav.go_to_page(2);

        let expected = NavigatorState {
            current_page: 2,
            total_pages: 4,
            is_locked: true,
        };
        assert_eq!(nav.presenter().calls, vec![Call::Render(expected)]);
    }

    #[test]
    fn test_same_page_is_full_transition() {
        let mut nav = navigator(4);
        assert!(nav.go_to_page(1));
        assert!(nav.is_locked());
        assert!(nav.finish_transition());

        let calls = &nav.presenter().calls;
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::Render(s) if s.current_page == 1 && s.is_locked));
        assert!(matches!(calls[1], Call::Refresh(s) if s.current_page == 1 && !s.is_locked));
    }

    #[test]
    fn test_lock_excludes_all_navigation() {
        let mut nav = navigator(5);
        nav.go_to_page(3);
        let before = nav.state();

        assert!(!nav.next_page());
        assert!(!nav.previous_page());
        assert!(!nav.go_to_page(1));
        assert!(!nav.first_page());
        assert!(!nav.last_page());

        assert_eq!(nav.state(), before);
        assert_eq!(nav.presenter().calls.len(), 1);
    }

    #[test]
    fn test_boundaries() {
        let mut nav = navigator(3);
        assert!(!nav.previous_page());
        assert_eq!(nav.current_page(), 1);
        assert!(!nav.is_locked());

        nav.last_page();
        nav.finish_transition();
        assert!(!nav.next_page());
        assert_eq!(nav.current_page(), 3);
        assert!(!nav.is_locked());
    }

    #[test]
    fn test_finish_without_flip_is_noop() {
        let mut nav = navigator(4);
        assert!(!nav.finish_transition());
        assert!(nav.presenter().calls.is_empty());
    }

    #[test]
    fn test_refresh_controls_reports_unlocked_state() {
        let mut nav = navigator(4);
        nav.next_page();
        nav.finish_transition();

        let last = nav.presenter().calls.last().cloned();
        assert_eq!(
            last,
            Some(Call::Refresh(NavigatorState {
                current_page: 2,
                total_pages: 4,
                is_locked: false
            }))
        );
    }

    #[test]
    fn test_custom_flip_duration() {
        let nav = navigator(4).with_flip_duration(650);
        assert_eq!(nav.flip_duration_ms(), 650);
    }

    #[test]
    fn test_page_always_in_range() {
        let mut nav = navigator(3);
        let requests = [0, 1, 2, 7, 3, 3, 4, 2, 0, 1];
        for target in requests {
            nav.go_to_page(target);
            let s = nav.state();
            assert!(s.current_page >= 1 && s.current_page <= s.total_pages);
            nav.previous_page();
            nav.finish_transition();
            nav.next_page();
            nav.finish_transition();
            let s = nav.state();
            assert!(s.current_page >= 1 && s.current_page <= s.total_pages);
        }
    }
}
