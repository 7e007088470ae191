//! Tagplay Gallery App
//!
//! Wires the controller to the browser: HTTP client, signal-backed surface and
//! lightbox, window history and the Leptos task queue.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TagplayClient;
use crate::browser::BrowserHistory;
use crate::components::{GallerySurface, LightboxOverlay};
use crate::config::GalleryConfig;
use crate::context::GalleryContext;
use crate::gallery::{Gallery, GalleryParts, Spawner};
use crate::store::{LightboxView, SignalLightbox, SignalSurface, SurfaceEntry};

#[component]
pub fn App(config: GalleryConfig, window: web_sys::Window) -> impl IntoView {
    // State
    let nodes = RwSignal::new_local(Vec::<SurfaceEntry>::new());
    let lightbox = RwSignal::new_local(None::<LightboxView>);

    let spawner: Spawner = Rc::new(|task: LocalBoxFuture<'static, ()>| spawn_local(task));
    let gallery = Gallery::new(
        config.clone(),
        GalleryParts {
            client: Rc::new(TagplayClient::new(&config)),
            surface: Rc::new(SignalSurface::new(nodes)),
            lightbox: Rc::new(SignalLightbox::new(lightbox)),
            history: Rc::new(BrowserHistory::new(window)),
            spawner,
        },
    );

    // Provide context to all children
    let ctx = GalleryContext::new(gallery);
    provide_context(ctx);
    on_cleanup(move || ctx.destroy());

    view! {
        <div class="tagplay-gallery">
            <GallerySurface nodes=nodes />
            <LightboxOverlay slot=lightbox />
        </div>
    }
}
