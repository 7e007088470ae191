//! Tagplay Gallery Entry Point

mod api;
mod app;
mod browser;
mod components;
mod config;
mod context;
mod error;
mod gallery;
mod logger;
mod models;
mod pagination;
mod query;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else { return };
    let mount = browser::mount_point(&window);

    let config = match browser::read_config(&window, mount.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            logger::init(LevelFilter::Error);
            log::error!("[gallery] not starting: {}", err);
            return;
        }
    };
    logger::init(config.log_level());

    match mount.and_then(browser::as_html_element) {
        Some(element) => {
            leptos::mount::mount_to(element, move || view! { <App config=config window=window /> })
                .forget();
        }
        None => {
            log::warn!("[gallery] no #gallery element, mounting on body");
            mount_to_body(move || view! { <App config=config window=window /> });
        }
    }
}
