//! View State Store
//!
//! Signal-backed implementations of the controller's surface and lightbox. The
//! controller writes through the traits; components read the signals.

use std::cell::Cell;

use leptos::prelude::*;

use crate::gallery::{CanNavigate, Lightbox, LightboxContent, Navigate, Node, NodeId, Surface};

/// A node currently mounted in the gallery container
#[derive(Clone, Debug)]
pub struct SurfaceEntry {
    pub id: NodeId,
    pub node: Node,
}

pub type SurfaceNodes = RwSignal<Vec<SurfaceEntry>, LocalStorage>;

pub struct SignalSurface {
    nodes: SurfaceNodes,
    next_id: Cell<u64>,
}

impl SignalSurface {
    pub fn new(nodes: SurfaceNodes) -> Self {
        Self { nodes, next_id: Cell::new(0) }
    }
}

impl Surface for SignalSurface {
    fn append(&self, node: Node) -> NodeId {
        let id = NodeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.nodes.try_update(|nodes| nodes.push(SurfaceEntry { id, node }));
        id
    }

    fn remove(&self, id: NodeId) {
        self.nodes.try_update(|nodes| nodes.retain(|entry| entry.id != id));
    }

    fn clear(&self) {
        self.nodes.try_update(|nodes| nodes.clear());
    }
}

/// What the lightbox overlay currently shows, with its navigation hooks
#[derive(Clone)]
pub struct LightboxView {
    pub content: LightboxContent,
    pub can_navigate: CanNavigate,
    pub navigate: Navigate,
}

pub type LightboxSlot = RwSignal<Option<LightboxView>, LocalStorage>;

pub struct SignalLightbox {
    slot: LightboxSlot,
}

impl SignalLightbox {
    pub fn new(slot: LightboxSlot) -> Self {
        Self { slot }
    }
}

impl Lightbox for SignalLightbox {
    fn open(&self, content: LightboxContent, can_navigate: CanNavigate, navigate: Navigate) {
        self.slot.try_set(Some(LightboxView { content, can_navigate, navigate }));
    }

    fn close(&self) {
        self.slot.try_set(None);
    }
}
