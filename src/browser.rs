//! Browser Bindings
//!
//! History access, host configuration and the mount point.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, PopStateEvent, Window};

use crate::config::GalleryConfig;
use crate::error::ConfigError;
use crate::gallery::{History, Subscription};
use crate::query;

const MOUNT_ID: &str = "gallery";
const CONFIG_GLOBAL: &str = "CONFIG";

/// `window.history` plus a `popstate` subscription
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl History for BrowserHistory {
    fn current_search(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn push_page(&self, page: u32) {
        let url = query::page_search(page);
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&url)));
        if let Err(err) = pushed {
            log::warn!("[gallery] pushState to {} failed: {:?}", url, err);
        }
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription {
        let callback = Closure::<dyn Fn(PopStateEvent)>::new(move |_: PopStateEvent| listener());
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref())
        {
            log::error!("[gallery] could not listen for popstate: {:?}", err);
        }

        let window = self.window.clone();
        Subscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref());
        })
    }
}

/// Element the gallery renders into, if the page has one
pub fn mount_point(window: &Window) -> Option<Element> {
    window.document()?.get_element_by_id(MOUNT_ID)
}

pub fn as_html_element(element: Element) -> Option<HtmlElement> {
    element.dyn_into::<HtmlElement>().ok()
}

/// Read `window.CONFIG`, let the mount element's `data-project`/`data-feed`
/// attributes override the identifiers, then validate.
pub fn read_config(window: &Window, mount: Option<&Element>) -> Result<GalleryConfig, ConfigError> {
    let raw = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);

    let config = if raw.is_undefined() || raw.is_null() {
        GalleryConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<GalleryConfig>(raw)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
    };

    let config = match mount {
        Some(element) => config.with_identifiers(
            element.get_attribute("data-project"),
            element.get_attribute("data-feed"),
        ),
        None => config,
    };

    config.validate()
}
