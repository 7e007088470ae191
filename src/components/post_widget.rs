//! Post Widget Component
//!
//! Renders one post according to the display toggles in the gallery config.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::context::use_gallery;
use crate::models::Post;

pub fn format_date(created: &DateTime<Utc>) -> String {
    created.format("%B %-d, %Y").to_string()
}

pub fn format_time(created: &DateTime<Utc>) -> String {
    created.format("%H:%M").to_string()
}

/// Single post card
///
/// # Arguments
/// * `post` - The post to show
/// * `on_open` - Click handler for the card; omitted inside the lightbox
#[component]
pub fn PostWidget(
    post: Post,
    #[prop(optional)] on_open: Option<StoredValue<Rc<dyn Fn()>, LocalStorage>>,
) -> impl IntoView {
    let ctx = use_gallery();
    let config = ctx.config.get_value();

    let image = post.display_image().cloned();
    let alt = post.text.clone().unwrap_or_default();
    let username = post.username().map(str::to_string).filter(|_| config.include_usernames);
    let caption = post.text.clone().filter(|t| config.include_captions && !t.is_empty());
    let date = post.created.as_ref().filter(|_| config.include_dates).map(format_date);
    let time = post.created.as_ref().filter(|_| config.include_times).map(format_time);
    let link = post.link.clone().filter(|_| config.include_link_metadata);
    let like_count = post.like_count.unwrap_or(0);

    let liked_post = post.clone();
    let flagged_post = post.clone();

    view! {
        <article
            class="tagplay-post"
            class:clickable=on_open.is_some()
            on:click=move |_| {
                if let Some(open) = on_open {
                    open.with_value(|open| open());
                }
            }
        >
            {image.map(|img| view! {
                <div class="post-media">
                    <img src=img.url alt=alt />
                </div>
            })}
            {username.map(|name| view! { <div class="post-username">"@"{name}</div> })}
            {caption.map(|text| view! { <p class="post-caption">{text}</p> })}
            {link.map(|link| view! {
                <a class="post-link" href=link.url.clone() target="_blank" rel="noopener"
                    on:click=|ev| ev.stop_propagation()
                >
                    {link.image.map(|src| view! { <img class="post-link-image" src=src /> })}
                    <span class="post-link-title">
                        {link.title.unwrap_or_else(|| link.url.clone())}
                    </span>
                    {link.description.map(|d| view! {
                        <span class="post-link-description">{d}</span>
                    })}
                </a>
            })}
            <div class="post-meta">
                {date.map(|d| view! { <span class="post-date">{d}</span> })}
                {time.map(|t| view! { <span class="post-time">{t}</span> })}
                {config.include_like.then(|| view! {
                    <button
                        class="post-like"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            ctx.like(&liked_post);
                        }
                    >
                        "♥ "{like_count}
                    </button>
                })}
                {config.include_flag.then(|| view! {
                    <button
                        class="post-flag"
                        title="Report this post"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            ctx.flag(&flagged_post);
                        }
                    >
                        "⚑"
                    </button>
                })}
            </div>
        </article>
    }
}
