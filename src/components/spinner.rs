use leptos::prelude::*;

/// Loading indicator shown while a page is in flight
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner-container">
            <div class="spinner"></div>
        </div>
    }
}
