//! Gallery Core
//!
//! Paging state machine and the controller that drives it. Nothing in here touches
//! the DOM directly; the browser side plugs in through the traits in `ports`.

mod controller;
mod ports;
mod state;

#[cfg(test)]
mod tests;

pub use controller::{Gallery, GalleryParts};
pub use ports::{
    CanNavigate, History, Lightbox, LightboxContent, Navigate, Node, NodeId, Spawner, Subscription,
    Surface,
};
pub use state::Direction;
