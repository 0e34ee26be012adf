//! Cosmetic effects layered on top of the flip book.
//!
//! None of these touch navigation state. The helpers here compute the CSS
//! values; `web::install` binds them to the document.

/// Transform with a hover lift of `lift_px` appended.
pub fn lift_transform(transform: &str, lift_px: f64) -> String {
    format!("{transform}{}", lift_suffix(lift_px))
}

/// Transform with the first hover lift of `lift_px` removed.
pub fn drop_lift(transform: &str, lift_px: f64) -> String {
    transform.replacen(&lift_suffix(lift_px), "", 1)
}

fn lift_suffix(lift_px: f64) -> String {
    format!(" translateZ({lift_px}px)")
}

/// Playback state of an `audio` or `video` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaState {
    Playing,
    Paused,
}

impl MediaState {
    /// Transform applied to the media element's container.
    pub fn container_transform(self) -> &'static str {
        match self {
            MediaState::Playing => "scale(1.05)",
            MediaState::Paused => "scale(1)",
        }
    }

    /// Box shadow applied to the media element's container.
    pub fn container_shadow(self) -> &'static str {
        match self {
            MediaState::Playing => "0 10px 25px rgba(0, 0, 0, 0.3)",
            MediaState::Paused => "0 5px 15px rgba(0, 0, 0, 0.2)",
        }
    }
}

/// Body `background-position` for a scroll offset.
///
/// ```rust
/// use flipbook_core_view::effects::parallax_position;
///
/// assert_eq!(parallax_position(120.0, 0.5), "center 60px");
/// ```
pub fn parallax_position(scroll_y: f64, speed: f64) -> String {
    format!("center {}px", scroll_y * speed)
}

/// Inline styles for one end of the entrance animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingFrame {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub transition: Option<&'static str>,
}

/// Book styles before the entrance animation.
pub const LOADING_START: LoadingFrame = LoadingFrame {
    opacity: "0",
    transform: "rotateY(90deg) scale(0.8)",
    transition: None,
};

/// Book styles the entrance animation settles on.
pub const LOADING_END: LoadingFrame = LoadingFrame {
    opacity: "1",
    transform: "rotateY(0deg) scale(1)",
    transition: Some("all 1s cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
};

/// Press feedback for menu links.
pub const MENU_PRESS_TRANSFORM: &str = "scale(0.95)";
pub const MENU_PRESS_MS: u32 = 150;

/// Web bindings for the cosmetic effects.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::render::web::{listen, query_all, set_style};
    use crate::timer::{sleep_ms, Timer, WindowTimer};
    use crate::BookConfig;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlElement, HtmlMediaElement};

    /// Install every cosmetic effect on `document`.
    pub fn install(document: &Document, config: &BookConfig) -> Result<(), String> {
        bind_hover_lift(document, config.hover_lift_px)?;
        bind_media_styling(document)?;
        bind_menu_links(document)?;
        bind_parallax(document, config.parallax_speed)?;
        bind_visibility_pause(document)?;
        play_loading_animation(document, config.loading_delay_ms);
        Ok(())
    }

    /// Lift `.page` elements under the pointer, unless they carry `flip`.
    pub fn bind_hover_lift(document: &Document, lift_px: f64) -> Result<(), String> {
        for page in query_all::<HtmlElement>(document, ".page")? {
            let target = page.clone();
            listen(&page, "mouseenter", move |_: Event| {
                if target.class_list().contains("flip") {
                    return;
                }
                let current = target.style().get_property_value("transform").unwrap_or_default();
                set_style(&target, "transform", &lift_transform(&current, lift_px));
            })?;

            let target = page.clone();
            listen(&page, "mouseleave", move |_: Event| {
                let current = target.style().get_property_value("transform").unwrap_or_default();
                set_style(&target, "transform", &drop_lift(&current, lift_px));
            })?;
        }
        Ok(())
    }

    fn style_media_container(media: &HtmlMediaElement, state: MediaState) {
        let Some(container) = media
            .parent_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        set_style(&container, "transform", state.container_transform());
        set_style(&container, "box-shadow", state.container_shadow());
    }

    /// Raise the container of playing `audio`/`video` elements.
    pub fn bind_media_styling(document: &Document) -> Result<(), String> {
        for media in query_all::<HtmlMediaElement>(document, "audio, video")? {
            let target = media.clone();
            listen(&media, "play", move |_: Event| {
                style_media_container(&target, MediaState::Playing);
            })?;

            let target = media.clone();
            listen(&media, "pause", move |_: Event| {
                style_media_container(&target, MediaState::Paused);
            })?;
        }
        Ok(())
    }

    /// Give `.menu a` links press feedback instead of navigating.
    pub fn bind_menu_links(document: &Document) -> Result<(), String> {
        for link in query_all::<HtmlElement>(document, ".menu a")? {
            let target = link.clone();
            listen(&link, "click", move |event: Event| {
                event.prevent_default();
                set_style(&target, "transform", MENU_PRESS_TRANSFORM);
                let release = target.clone();
                WindowTimer.schedule(
                    MENU_PRESS_MS,
                    Box::new(move || set_style(&release, "transform", "scale(1)")),
                );
                let href = target.get_attribute("href").unwrap_or_default();
                log::info!("menu link selected: {href}");
            })?;
        }
        Ok(())
    }

    /// Scroll the body background at `speed` times the page scroll.
    pub fn bind_parallax(document: &Document, speed: f64) -> Result<(), String> {
        let window = web_sys::window().ok_or("No window available")?;
        let Some(body) = document.body() else {
            log::warn!("no body element, parallax disabled");
            return Ok(());
        };
        let scroller = window.clone();
        listen(&window, "scroll", move |_: Event| {
            let scroll_y = scroller.scroll_y().unwrap_or(0.0);
            set_style(&body, "background-position", &parallax_position(scroll_y, speed));
        })
    }

    /// Pause every playing `audio`/`video` element when the page is hidden.
    pub fn bind_visibility_pause(document: &Document) -> Result<(), String> {
        let doc = document.clone();
        listen(document, "visibilitychange", move |_: Event| {
            if !doc.hidden() {
                return;
            }
            let Ok(media) = query_all::<HtmlMediaElement>(&doc, "audio, video") else {
                return;
            };
            for element in media.iter().filter(|m| !m.paused()) {
                if element.pause().is_err() {
                    log::warn!("failed to pause media element");
                }
            }
        })
    }

    fn apply_loading_frame(book: &HtmlElement, frame: &LoadingFrame) {
        if let Some(transition) = frame.transition {
            set_style(book, "transition", transition);
        }
        set_style(book, "opacity", frame.opacity);
        set_style(book, "transform", frame.transform);
    }

    /// Fade and swing the `.book` container into view.
    pub fn play_loading_animation(document: &Document, delay_ms: u32) {
        let Some(book) = document
            .query_selector(".book")
            .ok()
            .flatten()
            .and_then(|el: Element| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        apply_loading_frame(&book, &LOADING_START);
        wasm_bindgen_futures::spawn_local(async move {
            sleep_ms(delay_ms).await;
            apply_loading_frame(&book, &LOADING_END);
        });
    }
}
