//! Gallery Surface Component
//!
//! Renders the controller's container nodes in insertion order.

use leptos::prelude::*;

use crate::components::{PaginationControl, PostWidget, Spinner};
use crate::gallery::{Node, NodeId};
use crate::store::SurfaceNodes;

#[component]
pub fn GallerySurface(nodes: SurfaceNodes) -> impl IntoView {
    view! {
        <div class="tagplay-gallery-posts">
            <For
                each=move || {
                    nodes.with(|nodes| nodes.iter().map(|entry| entry.id).collect::<Vec<_>>())
                }
                key=|id| *id
                children=move |id: NodeId| {
                    let node = nodes.with_untracked(|nodes| {
                        nodes.iter().find(|entry| entry.id == id).map(|entry| entry.node.clone())
                    });
                    node.map(render_node)
                }
            />
        </div>
    }
}

fn render_node(node: Node) -> AnyView {
    match node {
        Node::Spinner => view! { <Spinner /> }.into_any(),
        Node::Post { post, on_open } => {
            view! { <PostWidget post=post on_open=StoredValue::new_local(on_open) /> }.into_any()
        }
        Node::Pagination { items, on_select } => {
            let on_select = StoredValue::new_local(on_select);
            view! { <PaginationControl items=items on_select=on_select /> }.into_any()
        }
    }
}
