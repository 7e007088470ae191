//! Gallery Context
//!
//! Controller handle provided to components via the Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::GalleryConfig;
use crate::gallery::Gallery;
use crate::models::Post;

/// Copyable handle to the running controller
#[derive(Clone, Copy)]
pub struct GalleryContext {
    gallery: StoredValue<Rc<Gallery>, LocalStorage>,
    /// Display toggles, readable without touching the controller
    pub config: StoredValue<GalleryConfig>,
}

impl GalleryContext {
    pub fn new(gallery: Rc<Gallery>) -> Self {
        let config = StoredValue::new(gallery.config().clone());
        Self {
            gallery: StoredValue::new_local(gallery),
            config,
        }
    }

    pub fn like(&self, post: &Post) {
        self.gallery.with_value(|g| g.like_post(post));
    }

    pub fn flag(&self, post: &Post) {
        self.gallery.with_value(|g| g.flag_post(post));
    }

    pub fn close_lightbox(&self) {
        self.gallery.with_value(|g| g.close_lightbox());
    }

    /// Tear the controller down when the owning component unmounts
    pub fn destroy(&self) {
        self.gallery.try_with_value(|g| g.destroy());
    }
}

pub fn use_gallery() -> GalleryContext {
    expect_context::<GalleryContext>()
}
