//! Controller Seams
//!
//! What the controller needs from its surroundings: somewhere to put nodes, a lightbox,
//! the browser history and a way to run local tasks.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::models::Post;
use crate::pagination::PageItem;

use super::state::Direction;

/// Identifies a node appended to a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Something the controller renders into its container
#[derive(Clone)]
pub enum Node {
    Spinner,
    Post {
        post: Post,
        on_open: Rc<dyn Fn()>,
    },
    Pagination {
        items: Vec<PageItem>,
        on_select: Rc<dyn Fn(u32)>,
    },
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Spinner => f.write_str("Spinner"),
            Node::Post { post, .. } => f.debug_struct("Post").field("id", &post.id).finish(),
            Node::Pagination { items, .. } => {
                f.debug_struct("Pagination").field("items", items).finish()
            }
        }
    }
}

/// The container the gallery draws into; children keep insertion order
pub trait Surface {
    fn append(&self, node: Node) -> NodeId;
    /// Removing a node that is already gone is a no-op
    fn remove(&self, id: NodeId);
    fn clear(&self);
}

/// What the lightbox shows
#[derive(Debug, Clone, PartialEq)]
pub enum LightboxContent {
    Post(Post),
    Loading,
}

pub type CanNavigate = Rc<dyn Fn(Direction) -> bool>;
pub type Navigate = Rc<dyn Fn(Direction)>;

/// Full-screen single post viewer
pub trait Lightbox {
    /// Show `content`, replacing whatever is open
    fn open(&self, content: LightboxContent, can_navigate: CanNavigate, navigate: Navigate);
    fn close(&self);
}

/// Browser history access
pub trait History {
    /// Current `location.search`
    fn current_search(&self) -> String;
    /// Push a new entry selecting `page` without reloading
    fn push_page(&self, page: u32);
    /// Call `listener` on back/forward navigation until the subscription is dropped
    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription;
}

/// Handle that runs its teardown when dropped
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self { teardown: Some(Box::new(teardown)) }
    }

    pub fn unsubscribe(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

/// Runs a future on the single UI thread
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;
