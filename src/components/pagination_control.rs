//! Pagination Control Component
//!
//! Page links under the posts. Links keep a real `href` but are intercepted so the
//! controller can push history instead of reloading.

use std::rc::Rc;

use leptos::prelude::*;

use crate::pagination::PageItem;

#[component]
pub fn PaginationControl(
    items: Vec<PageItem>,
    on_select: StoredValue<Rc<dyn Fn(u32)>, LocalStorage>,
) -> impl IntoView {
    view! {
        <ul class="pagination">
            {items.into_iter().map(|item| pagination_item(item, on_select)).collect_view()}
        </ul>
    }
}

fn pagination_item(
    item: PageItem,
    on_select: StoredValue<Rc<dyn Fn(u32)>, LocalStorage>,
) -> impl IntoView {
    let text = item.text();
    let inner = match (item.target(), item.href()) {
        (Some(page), Some(href)) => view! {
            <a
                href=href
                on:click=move |ev| {
                    ev.prevent_default();
                    on_select.with_value(|select| select(page));
                }
            >
                {text}
            </a>
        }
        .into_any(),
        _ => view! { <span>{text}</span> }.into_any(),
    };

    view! { <li class:active=item.is_active()>{inner}</li> }
}
