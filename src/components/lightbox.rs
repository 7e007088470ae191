//! Lightbox Overlay Component
//!
//! Full-screen single post viewer with previous/next buttons and keyboard keys
//! (ArrowLeft, ArrowRight, Escape).

use leptos::ev;
use leptos::prelude::*;

use crate::components::{PostWidget, Spinner};
use crate::context::use_gallery;
use crate::gallery::{Direction, LightboxContent};
use crate::store::LightboxSlot;

#[component]
pub fn LightboxOverlay(slot: LightboxSlot) -> impl IntoView {
    let step = move |dir: Direction| {
        if let Some(current) = slot.get_untracked() {
            if (current.can_navigate)(dir) {
                (current.navigate)(dir);
            }
        }
    };
    let ctx = use_gallery();
    let close = move || ctx.close_lightbox();

    let keys = window_event_listener(ev::keydown, move |ev| {
        if slot.with_untracked(|s| s.is_none()) {
            return;
        }
        match ev.key().as_str() {
            "ArrowLeft" => step(Direction::Previous),
            "ArrowRight" => step(Direction::Next),
            "Escape" => close(),
            _ => {}
        }
    });
    on_cleanup(move || keys.remove());

    move || {
        slot.get().map(|current| {
            let can_prev = (current.can_navigate)(Direction::Previous);
            let can_next = (current.can_navigate)(Direction::Next);
            let body = match current.content {
                LightboxContent::Post(post) => view! { <PostWidget post=post /> }.into_any(),
                LightboxContent::Loading => view! { <Spinner /> }.into_any(),
            };

            view! {
                <div class="lightbox-backdrop" on:click=move |_| close()>
                    <div class="lightbox-content" on:click=|ev| ev.stop_propagation()>
                        <button
                            class="lightbox-prev"
                            disabled=!can_prev
                            on:click=move |_| step(Direction::Previous)
                        >
                            "‹"
                        </button>
                        {body}
                        <button
                            class="lightbox-next"
                            disabled=!can_next
                            on:click=move |_| step(Direction::Next)
                        >
                            "›"
                        </button>
                        <button class="lightbox-close" on:click=move |_| close()>"×"</button>
                    </div>
                </div>
            }
        })
    }
}
