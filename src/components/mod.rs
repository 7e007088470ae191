//! UI Components
//!
//! Leptos components rendering the gallery container, posts, pagination and lightbox.

mod gallery_surface;
mod lightbox;
mod pagination_control;
mod post_widget;
mod spinner;

pub use gallery_surface::GallerySurface;
pub use lightbox::LightboxOverlay;
pub use pagination_control::PaginationControl;
pub use post_widget::PostWidget;
pub use spinner::Spinner;
