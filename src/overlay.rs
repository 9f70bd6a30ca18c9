use crate::constants::*;
use illustrations_core::{CardContent, OverlayCommand};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Show `message` in the page-wide debug overlay, creating it on first use.
pub fn show_error(document: &web::Document, message: &str) {
    let existing = document
        .query_selector(&format!("div.{}", DEBUG_OVERLAY_CLASS))
        .ok()
        .flatten();
    let el = match existing {
        Some(el) => el,
        None => {
            let Ok(el) = document.create_element("div") else {
                log::error!("[overlay] cannot create debug overlay: {}", message);
                return;
            };
            el.set_class_name(DEBUG_OVERLAY_CLASS);
            match document.body() {
                Some(body) => {
                    _ = body.append_child(&el);
                }
                None => {
                    log::error!("[overlay] no body for debug overlay: {}", message);
                    return;
                }
            }
            el
        }
    };
    el.set_text_content(Some(message));
}

fn set_text(card: &web::Element, selector: &str, text: &str) -> Option<web::Element> {
    let el = card.query_selector(selector).ok().flatten()?;
    el.set_text_content(Some(text));
    Some(el)
}

fn fill_card(card: &web::Element, content: &CardContent) {
    set_text(card, CARD_TITLE_SELECTOR, content.title);
    set_text(card, CARD_BODY_SELECTOR, content.body);
    if let Some(meta) = set_text(card, CARD_META_SELECTOR, content.meta) {
        if let Ok(meta) = meta.dyn_into::<web::HtmlElement>() {
            let display = if content.meta.is_empty() { "none" } else { "block" };
            _ = meta.style().set_property("display", display);
        }
    }
}

/// Applies overlay commands to the DOM inside one illustration container.
pub struct OverlayTarget<'a> {
    pub document: &'a web::Document,
    pub container: &'a web::Element,
}

impl<'a> OverlayTarget<'a> {
    pub fn apply(&self, cmd: &OverlayCommand) {
        match cmd {
            OverlayCommand::ShowCard(content) => {
                if let Some(card) = self.speed_card() {
                    fill_card(&card, content);
                }
            }
            OverlayCommand::BeginFlip => {
                if let Some(card) = self.speed_card() {
                    _ = card.class_list().add_1(FLIPPING_CLASS);
                }
            }
            OverlayCommand::EndFlip => {
                if let Some(card) = self.speed_card() {
                    _ = card.class_list().remove_1(FLIPPING_CLASS);
                }
            }
            OverlayCommand::SpawnCard {
                id,
                content,
                position,
                drift,
                delay_ms,
            } => self.spawn_card(*id, content, position.x, position.y, drift.x, drift.y, *delay_ms),
            OverlayCommand::RemoveCard { id } => {
                let selector = format!("[{}=\"{}\"]", CARD_ID_ATTRIBUTE, id);
                if let Some(card) = self.card_stack().and_then(|s| s.query_selector(&selector).ok().flatten()) {
                    card.remove();
                }
            }
        }
    }

    fn speed_card(&self) -> Option<web::Element> {
        self.container.query_selector(SPEED_CARD_SELECTOR).ok().flatten()
    }

    fn card_stack(&self) -> Option<web::Element> {
        self.container.query_selector(CARD_STACK_SELECTOR).ok().flatten()
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_card(&self, id: u32, content: &CardContent, x: f32, y: f32, dx: f32, dy: f32, delay_ms: f64) {
        let Some(stack) = self.card_stack() else {
            return;
        };
        let Some(card) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            return;
        };
        card.set_class_name(SPAWNED_CARD_CLASS);
        _ = card.set_attribute(CARD_ID_ATTRIBUTE, &id.to_string());
        for (tag, class, text) in [
            ("p", "card-title", content.title),
            ("p", "card-body", content.body),
            ("span", "card-meta", content.meta),
        ] {
            if let Ok(el) = self.document.create_element(tag) {
                el.set_class_name(class);
                el.set_text_content(Some(text));
                _ = card.append_child(&el);
            }
        }
        let style = card.style();
        _ = style.set_property("left", &format!("{}px", x));
        _ = style.set_property("top", &format!("{}px", y));
        _ = style.set_property("--drift-x", &format!("{}px", dx));
        _ = style.set_property("--drift-y", &format!("{}px", dy));
        _ = style.set_property("animation-delay", &format!("{}ms", delay_ms));
        _ = stack.append_child(&card);

        while stack.child_element_count() > MAX_STACKED_CARDS {
            match stack.first_element_child() {
                Some(oldest) => oldest.remove(),
                None => break,
            }
        }
    }
}
