use crate::constants::{CONFIG_ATTRIBUTE_PREFIX, SPEED_CARD_SELECTOR};
use illustrations_core::scenes::CardAnchor;
use illustrations_core::{ClientRect, Layout, SceneConfig};
use web_sys as web;

/// `data-*` keys a container may carry besides `data-scene`.
const CONFIG_KEYS: [&str; 5] = ["center-x", "center-y", "fill", "fps", "particles"];

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f32 {
    web::window().map(|w| w.device_pixel_ratio() as f32).unwrap_or(1.0)
}

#[inline]
pub fn client_rect(el: &web::Element) -> ClientRect {
    let r = el.get_bounding_client_rect();
    ClientRect {
        left: r.left() as f32,
        top: r.top() as f32,
        width: r.width() as f32,
        height: r.height() as f32,
    }
}

/// Read the declared tunables once; bad values are logged and defaulted.
pub fn scene_config(container: &web::Element) -> SceneConfig {
    let attrs: Vec<(String, String)> = CONFIG_KEYS
        .iter()
        .filter_map(|key| {
            let name = format!("{}{}", CONFIG_ATTRIBUTE_PREFIX, key);
            container.get_attribute(&name).map(|v| (name, v))
        })
        .collect();
    SceneConfig::from_attributes(attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Position of the fixed overlay card relative to its container, if the
/// container has one and it is laid out.
pub fn card_anchor(container: &web::Element) -> Option<CardAnchor> {
    let card = container.query_selector(SPEED_CARD_SELECTOR).ok().flatten()?;
    let outer = container.get_bounding_client_rect();
    let rect = card.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let left = (rect.left() - outer.left()) as f32;
    Some(CardAnchor {
        left_x: left,
        right_x: (rect.right() - outer.left()) as f32,
        center_x: left + rect.width() as f32 * 0.5,
        center_y: (rect.top() - outer.top()) as f32 + rect.height() as f32 * 0.5,
    })
}

/// Layout box of `container` with the given logical size.
pub fn layout_for(container: &web::Element, width: f64, height: f64) -> Layout {
    let layout = Layout::new(width as f32, height as f32, device_pixel_ratio());
    match card_anchor(container) {
        Some(anchor) => layout.with_card_anchor(anchor),
        None => layout,
    }
}

/// Layout from the container's current bounding box.
pub fn current_layout(container: &web::Element) -> Layout {
    let r = container.get_bounding_client_rect();
    layout_for(container, r.width(), r.height())
}
