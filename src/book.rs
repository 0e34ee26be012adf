//! Flip book: a navigator wired to a timer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::NavInput;
use crate::timer::Timer;
use crate::{BookConfig, NavigatorState, PageNavigator, PresentationAdapter};

/// A page navigator whose flip lock is released by a [`Timer`].
///
/// Every accepted navigation schedules exactly one deferred unlock after
/// the configured flip duration. Clones share the same navigator, so a
/// handle can be moved into each event callback.
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::{BookConfig, FlipBook, NavigatorState, PresentationAdapter};
/// use flipbook_core_view::timer::ManualTimer;
///
/// struct NoopPresenter;
///
/// impl PresentationAdapter for NoopPresenter {
///     fn render(&mut self, _state: &NavigatorState) {}
///     fn refresh_controls(&mut self, _state: &NavigatorState) {}
/// }
///
/// let timer = ManualTimer::new();
/// let book = FlipBook::new(&BookConfig::default(), NoopPresenter, timer.clone());
///
/// book.next_page();
/// assert!(book.is_locked());
///
/// timer.advance(400);
/// assert!(!book.is_locked());
/// assert_eq!(book.state().current_page, 2);
/// ```
pub struct FlipBook<P, T> {
    navigator: Rc<RefCell<PageNavigator<P>>>,
    timer: T,
    config: BookConfig,
}

impl<P, T: Clone> Clone for FlipBook<P, T> {
    fn clone(&self) -> Self {
        Self {
            navigator: Rc::clone(&self.navigator),
            timer: self.timer.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P: PresentationAdapter + 'static, T: Timer> FlipBook<P, T> {
    /// Build a book on page 1 and push the initial controls state.
    pub fn new(config: &BookConfig, presenter: P, timer: T) -> Self {
        let mut navigator =
            PageNavigator::new(config.total_pages, presenter).with_flip_duration(config.flip_duration_ms);
        navigator.refresh_controls();
        Self {
            navigator: Rc::new(RefCell::new(navigator)),
            timer,
            config: config.clone(),
        }
    }

    pub fn go_to_page(&self, target: u32) -> bool {
        self.navigate(|nav| nav.go_to_page(target))
    }

    pub fn next_page(&self) -> bool {
        self.navigate(PageNavigator::next_page)
    }

    pub fn previous_page(&self) -> bool {
        self.navigate(PageNavigator::previous_page)
    }

    pub fn first_page(&self) -> bool {
        self.navigate(PageNavigator::first_page)
    }

    pub fn last_page(&self) -> bool {
        self.navigate(PageNavigator::last_page)
    }

    /// Dispatch an input request. Returns `true` if it was accepted.
    pub fn handle_input(&self, input: NavInput) -> bool {
        match input {
            NavInput::Previous => self.previous_page(),
            NavInput::Next => self.next_page(),
            NavInput::JumpTo(page) => self.go_to_page(page),
            NavInput::First => self.first_page(),
            NavInput::Last => self.last_page(),
        }
    }

    pub fn state(&self) -> NavigatorState {
        self.navigator.borrow().state()
    }

    pub fn is_locked(&self) -> bool {
        self.navigator.borrow().is_locked()
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Run `f` against the presenter.
    pub fn with_presenter<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(self.navigator.borrow().presenter())
    }

    fn navigate(&self, request: impl FnOnce(&mut PageNavigator<P>) -> bool) -> bool {
        let (accepted, delay_ms) = {
            let mut nav = self.navigator.borrow_mut();
            (request(&mut *nav), nav.flip_duration_ms())
        };
        if accepted {
            let navigator = Rc::downgrade(&self.navigator);
            self.timer.schedule(
                delay_ms,
                Box::new(move || {
                    if let Some(navigator) = navigator.upgrade() {
                        navigator.borrow_mut().finish_transition();
                    }
                }),
            );
        }
        accepted
    }
}

/// Browser wiring for a flip book.
#[cfg(feature = "web")]
pub mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Document, Event, KeyboardEvent, TouchEvent, TouchList};

    use super::FlipBook;
    use crate::input::{map_key, NavInput, SwipeTracker, TouchPoint};
    use crate::render::web::{listen, DomPresenter};
    use crate::timer::WindowTimer;
    use crate::BookConfig;

    /// A flip book mounted on the page.
    pub type WebFlipBook = FlipBook<DomPresenter, WindowTimer>;

    fn first_touch(list: &TouchList) -> Option<TouchPoint> {
        list.get(0)
            .map(|t| TouchPoint::new(t.client_x() as f64, t.client_y() as f64))
    }

    /// Mount a flip book and its cosmetic effects on the current document.
    pub fn mount(config: &BookConfig) -> Result<WebFlipBook, String> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("No window available")?;
        let document = window.document().ok_or("No document available")?;
        let book = mount_in(&document, config)?;
        crate::effects::web::install(&document, book.config())?;
        Ok(book)
    }

    /// Mount a flip book on `document` without cosmetic effects.
    ///
    /// Binds the previous/next buttons, each `.dot` indicator, arrow/Home/End
    /// keys on the document, and touch swipes on `.book`. When the document
    /// holds a different number of `.page` elements than configured, the
    /// document wins.
    pub fn mount_in(document: &Document, config: &BookConfig) -> Result<WebFlipBook, String> {
        config.validate().map_err(|e| e.to_string())?;
        let presenter = DomPresenter::from_document(document, config)?;

        let mut config = config.clone();
        let dom_pages = u32::try_from(presenter.page_count()).unwrap_or(u32::MAX);
        if dom_pages > 0 && dom_pages != config.total_pages {
            log::warn!(
                "configured {} pages but found {} .page elements",
                config.total_pages,
                dom_pages
            );
            config.total_pages = dom_pages;
        }

        let prev_button = presenter.prev_button().clone();
        let next_button = presenter.next_button().clone();
        let indicators = presenter.indicators().to_vec();
        let book = FlipBook::new(&config, presenter, WindowTimer);

        let handle = book.clone();
        listen(&prev_button, "click", move |_: Event| {
            handle.previous_page();
        })?;

        let handle = book.clone();
        listen(&next_button, "click", move |_: Event| {
            handle.next_page();
        })?;

        for (i, dot) in indicators.iter().enumerate() {
            let handle = book.clone();
            listen(dot, "click", move |_: Event| {
                handle.handle_input(NavInput::indicator(i));
            })?;
        }

        let handle = book.clone();
        listen(document, "keydown", move |event: Event| {
            if handle.is_locked() {
                return;
            }
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(input) = map_key(&event.key()) {
                handle.handle_input(input);
            }
        })?;

        if let Some(container) = document.query_selector(".book").ok().flatten() {
            let tracker = Rc::new(RefCell::new(SwipeTracker::new(config.swipe_threshold)));

            let start = Rc::clone(&tracker);
            listen(&container, "touchstart", move |event: Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                if let Some(point) = first_touch(&event.touches()) {
                    start.borrow_mut().begin(point);
                }
            })?;

            let handle = book.clone();
            listen(&container, "touchend", move |event: Event| {
                if handle.is_locked() {
                    return;
                }
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(point) = first_touch(&event.changed_touches()) else {
                    return;
                };
                let input = tracker.borrow_mut().end(point);
                if let Some(input) = input {
                    handle.handle_input(input);
                }
            })?;
        } else {
            log::warn!("no .book element, swipe navigation disabled");
        }

        log::info!("flip book mounted with {} pages", config.total_pages);
        Ok(book)
    }
}
