//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Device class detection (picks the speed preset)
//! - Locating the playfield on the page (pointer translation)

use crate::settings::DeviceClass;

/// Media query matching narrow (touch) viewports
pub const MOBILE_MEDIA_QUERY: &str = "(max-width: 600px)";
/// URL query parameter that forces a device class, e.g. `?device=mobile`
pub const DEVICE_PARAM: &str = "device";

/// Detect the device class once, at match initialization
#[cfg(target_arch = "wasm32")]
pub fn detect_device_class() -> DeviceClass {
    let Some(window) = web_sys::window() else {
        log::warn!("No window, assuming desktop");
        return DeviceClass::Desktop;
    };

    if let Some(forced) = device_override(&window) {
        log::info!("Device class forced to {}", forced.as_str());
        return forced;
    }

    let matches = window
        .match_media(MOBILE_MEDIA_QUERY)
        .ok()
        .flatten()
        .map(|mql| mql.matches());

    let class = match matches {
        Some(true) => DeviceClass::Mobile,
        Some(false) => DeviceClass::Desktop,
        // matchMedia unavailable, fall back to the viewport width
        None => window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .map(|w| DeviceClass::from_viewport_width(w as f32))
            .unwrap_or_default(),
    };
    log::info!("Detected device class: {}", class.as_str());
    class
}

#[cfg(target_arch = "wasm32")]
fn device_override(window: &web_sys::Window) -> Option<DeviceClass> {
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    DeviceClass::from_str(&params.get(DEVICE_PARAM)?)
}

/// Page x of the canvas's left edge
#[cfg(target_arch = "wasm32")]
pub fn playfield_left(canvas: &web_sys::HtmlCanvasElement) -> f32 {
    canvas.get_bounding_client_rect().left() as f32
}

/// Native builds have no browser to ask
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_device_class() -> DeviceClass {
    match std::env::var("CANVAS_PONG_DEVICE") {
        Ok(value) => DeviceClass::from_str(&value).unwrap_or_else(|| {
            log::warn!("Unknown device class {value:?}, using desktop");
            DeviceClass::Desktop
        }),
        Err(_) => DeviceClass::Desktop,
    }
}
