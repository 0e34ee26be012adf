//! Presentation of navigator state.

use crate::NavigatorState;

/// Receives every visual state change from a [`PageNavigator`](crate::PageNavigator).
///
/// Implementations must not call back into the navigator or its
/// [`FlipBook`](crate::FlipBook) from these methods.
pub trait PresentationAdapter {
    /// Apply the page stack for `state`. Called synchronously on every
    /// accepted navigation, while the flip lock is held.
    fn render(&mut self, state: &NavigatorState);

    /// Update buttons, indicators and labels. Called when a flip finishes
    /// and once at startup.
    fn refresh_controls(&mut self, state: &NavigatorState);
}

/// Which way a page faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFace {
    /// Front-facing, at or before the current page
    Shown,
    /// Flipped away, after the current page
    Hidden,
}

impl PageFace {
    /// Y-axis rotation in degrees.
    #[inline]
    pub fn rotation_deg(self) -> f64 {
        match self {
            PageFace::Shown => 0.0,
            PageFace::Hidden => -180.0,
        }
    }

    /// CSS transform for this face.
    pub fn transform(self) -> &'static str {
        match self {
            PageFace::Shown => "rotateY(0deg)",
            PageFace::Hidden => "rotateY(-180deg)",
        }
    }
}

/// Visual state of one page in the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageStyle {
    /// 1-based page index
    pub page: u32,
    pub face: PageFace,
    /// Stacking order; lower page numbers sit on top
    pub z_index: u32,
}

/// Compute the page stack for a navigator state.
///
/// ## Example
///
/// ```rust
/// use flipbook_core_view::{NavigatorState, PageFace};
/// use flipbook_core_view::render::page_layout;
///
/// let state = NavigatorState { current_page: 2, total_pages: 3, is_locked: true };
/// let layout = page_layout(&state);
///
/// assert_eq!(layout[0].face, PageFace::Shown);
/// assert_eq!(layout[1].face, PageFace::Shown);
/// assert_eq!(layout[2].face, PageFace::Hidden);
/// assert_eq!(layout[0].z_index, 3);
/// ```
pub fn page_layout(state: &NavigatorState) -> Vec<PageStyle> {
    (1..=state.total_pages)
        .map(|page| PageStyle {
            page,
            face: if page <= state.current_page {
                PageFace::Shown
            } else {
                PageFace::Hidden
            },
            z_index: state.total_pages - page + 1,
        })
        .collect()
}

/// Enabled/active state of the navigation controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlsState {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl ControlsState {
    pub fn from_state(state: &NavigatorState) -> Self {
        Self {
            current_page: state.current_page,
            total_pages: state.total_pages,
            previous_disabled: state.current_page == 1,
            next_disabled: state.current_page == state.total_pages,
        }
    }

    /// Check if the indicator for `page` (1-based) should be marked active.
    #[inline]
    pub fn is_indicator_active(&self, page: u32) -> bool {
        page == self.current_page
    }
}

/// Web-specific presentation backed by the DOM.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::timer::{Timer, WindowTimer};
    use crate::BookConfig;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement};

    /// Attach `handler` to `event` on `target` for the lifetime of the page.
    pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), String>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|_| format!("Failed to listen for {event}"))?;
        closure.forget();
        Ok(())
    }

    /// Collect every element matching `selector`, cast to `T`.
    ///
    /// Elements of a different type are skipped.
    pub(crate) fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, String> {
        let nodes = document
            .query_selector_all(selector)
            .map_err(|_| format!("Invalid selector {selector}"))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<T>().ok())
            .collect())
    }

    pub(crate) fn button_by_id(document: &Document, id: &str) -> Result<HtmlButtonElement, String> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| format!("Missing #{id} element"))?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| format!("#{id} is not a button"))
    }

    pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if element.style().set_property(property, value).is_err() {
            log::warn!("failed to set {property}: {value}");
        }
    }

    /// Presenter that writes navigator state into the flip book markup.
    ///
    /// Expects `.page` elements, `#prevBtn` and `#nextBtn` buttons, `.dot`
    /// indicators, optional `#currentPage` / `#totalPages` labels and an
    /// optional `.book` container.
    #[derive(Clone, Debug)]
    pub struct DomPresenter {
        pages: Vec<HtmlElement>,
        prev_button: HtmlButtonElement,
        next_button: HtmlButtonElement,
        indicators: Vec<Element>,
        current_label: Option<Element>,
        total_label: Option<Element>,
        book: Option<HtmlElement>,
        pulse_scale: f64,
        pulse_duration_ms: u32,
        timer: WindowTimer,
    }

    impl DomPresenter {
        /// Look up the flip book elements in `document`.
        ///
        /// Fails when either navigation button is missing.
        pub fn from_document(document: &Document, config: &BookConfig) -> Result<Self, String> {
            Ok(Self {
                pages: query_all(document, ".page")?,
                prev_button: button_by_id(document, "prevBtn")?,
                next_button: button_by_id(document, "nextBtn")?,
                indicators: query_all(document, ".dot")?,
                current_label: document.get_element_by_id("currentPage"),
                total_label: document.get_element_by_id("totalPages"),
                book: document
                    .query_selector(".book")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
                pulse_scale: config.pulse_scale,
                pulse_duration_ms: config.pulse_duration_ms,
                timer: WindowTimer,
            })
        }

        /// Number of `.page` elements found.
        pub fn page_count(&self) -> usize {
            self.pages.len()
        }

        pub fn prev_button(&self) -> &HtmlButtonElement {
            &self.prev_button
        }

        pub fn next_button(&self) -> &HtmlButtonElement {
            &self.next_button
        }

        pub fn indicators(&self) -> &[Element] {
            &self.indicators
        }

        pub fn book(&self) -> Option<&HtmlElement> {
            self.book.as_ref()
        }

        /// Briefly scale the book up to acknowledge a page change.
        fn pulse(&self) {
            let Some(book) = self.book.clone() else {
                return;
            };
            set_style(&book, "transform", &format!("scale({})", self.pulse_scale));
            self.timer.schedule(
                self.pulse_duration_ms,
                Box::new(move || set_style(&book, "transform", "scale(1)")),
            );
        }
    }

    impl PresentationAdapter for DomPresenter {
        fn render(&mut self, state: &NavigatorState) {
            for (style, element) in page_layout(state).iter().zip(&self.pages) {
                set_style(element, "transform", style.face.transform());
                set_style(element, "z-index", &style.z_index.to_string());
            }
        }

        fn refresh_controls(&mut self, state: &NavigatorState) {
            let controls = ControlsState::from_state(state);

            if let Some(label) = &self.current_label {
                label.set_text_content(Some(&controls.current_page.to_string()));
            }
            if let Some(label) = &self.total_label {
                label.set_text_content(Some(&controls.total_pages.to_string()));
            }

            self.prev_button.set_disabled(controls.previous_disabled);
            self.next_button.set_disabled(controls.next_disabled);

            for (i, dot) in self.indicators.iter().enumerate() {
                let active = controls.is_indicator_active(i as u32 + 1);
                if dot.class_list().toggle_with_force("active", active).is_err() {
                    log::warn!("failed to toggle indicator {}", i + 1);
                }
            }

            self.pulse();
        }
    }
}
