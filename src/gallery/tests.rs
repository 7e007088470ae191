//! Controller Tests
//!
//! Drives the Gallery controller with in-memory surface, lightbox, history and client
//! doubles on a single-threaded executor.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt;

    use crate::api::{ContentClient, PageRange};
    use crate::config::GalleryConfig;
    use crate::error::{GalleryError, Result};
    use crate::gallery::{
        CanNavigate, Direction, Gallery, GalleryParts, History, Lightbox, LightboxContent, Navigate,
        Node, NodeId, Spawner, Subscription, Surface,
    };
    use crate::models::{Post, PostPage};
    use crate::pagination::{generate_pagination, PageItem};
    use crate::query;

    // ========================
    // Doubles
    // ========================

    #[derive(Default)]
    struct RecordingSurface {
        nodes: RefCell<Vec<(NodeId, Node)>>,
        next_id: Cell<u64>,
    }

    impl Surface for RecordingSurface {
        fn append(&self, node: Node) -> NodeId {
            let id = NodeId(self.next_id.get());
            self.next_id.set(id.0 + 1);
            self.nodes.borrow_mut().push((id, node));
            id
        }

        fn remove(&self, id: NodeId) {
            self.nodes.borrow_mut().retain(|(node_id, _)| *node_id != id);
        }

        fn clear(&self) {
            self.nodes.borrow_mut().clear();
        }
    }

    impl RecordingSurface {
        fn post_ids(&self) -> Vec<String> {
            self.nodes
                .borrow()
                .iter()
                .filter_map(|(_, node)| match node {
                    Node::Post { post, .. } => Some(post.id.clone()),
                    _ => None,
                })
                .collect()
        }

        fn has_spinner(&self) -> bool {
            self.nodes.borrow().iter().any(|(_, node)| matches!(node, Node::Spinner))
        }

        fn paginations(&self) -> Vec<Vec<PageItem>> {
            self.nodes
                .borrow()
                .iter()
                .filter_map(|(_, node)| match node {
                    Node::Pagination { items, .. } => Some(items.clone()),
                    _ => None,
                })
                .collect()
        }

        fn is_empty(&self) -> bool {
            self.nodes.borrow().is_empty()
        }

        fn click_post(&self, id: &str) {
            let on_open = self.nodes.borrow().iter().find_map(|(_, node)| match node {
                Node::Post { post, on_open } if post.id == id => Some(on_open.clone()),
                _ => None,
            });
            on_open.expect("post is rendered")();
        }

        fn click_page(&self, page: u32) {
            let on_select = self.nodes.borrow().iter().find_map(|(_, node)| match node {
                Node::Pagination { items, on_select }
                    if items.iter().any(|i| i.target() == Some(page)) =>
                {
                    Some(on_select.clone())
                }
                _ => None,
            });
            on_select.expect("page link is rendered")(page);
        }
    }

    #[derive(Default)]
    struct RecordingLightbox {
        current: RefCell<Option<(LightboxContent, CanNavigate, Navigate)>>,
    }

    impl Lightbox for RecordingLightbox {
        fn open(&self, content: LightboxContent, can_navigate: CanNavigate, navigate: Navigate) {
            *self.current.borrow_mut() = Some((content, can_navigate, navigate));
        }

        fn close(&self) {
            *self.current.borrow_mut() = None;
        }
    }

    impl RecordingLightbox {
        fn content(&self) -> Option<LightboxContent> {
            self.current.borrow().as_ref().map(|(content, _, _)| content.clone())
        }

        fn shown_post_id(&self) -> Option<String> {
            match self.content() {
                Some(LightboxContent::Post(post)) => Some(post.id),
                _ => None,
            }
        }

        fn can_navigate(&self, dir: Direction) -> bool {
            let can_navigate = self.current.borrow().as_ref().map(|(_, can, _)| can.clone());
            can_navigate.is_some_and(|can| can(dir))
        }

        fn navigate(&self, dir: Direction) {
            let navigate = self.current.borrow().as_ref().map(|(_, _, nav)| nav.clone());
            if let Some(navigate) = navigate {
                navigate(dir);
            }
        }
    }

    struct MemoryHistory {
        search: RefCell<String>,
        pushes: RefCell<Vec<u32>>,
        listener: Rc<RefCell<Option<Box<dyn Fn()>>>>,
    }

    impl MemoryHistory {
        fn new(search: &str) -> Self {
            Self {
                search: RefCell::new(search.to_string()),
                pushes: RefCell::new(Vec::new()),
                listener: Rc::new(RefCell::new(None)),
            }
        }

        /// Simulate back/forward landing on `search`
        fn pop_to(&self, search: &str) {
            *self.search.borrow_mut() = search.to_string();
            if let Some(listener) = self.listener.borrow().as_ref() {
                listener();
            }
        }

        fn is_subscribed(&self) -> bool {
            self.listener.borrow().is_some()
        }
    }

    impl History for MemoryHistory {
        fn current_search(&self) -> String {
            self.search.borrow().clone()
        }

        fn push_page(&self, page: u32) {
            *self.search.borrow_mut() = query::page_search(page);
            self.pushes.borrow_mut().push(page);
        }

        fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription {
            *self.listener.borrow_mut() = Some(listener);
            let slot = self.listener.clone();
            Subscription::new(move || {
                slot.borrow_mut().take();
            })
        }
    }

    /// Collects log records emitted on the current test thread
    struct CapturedLogs;

    static CAPTURED_LOGS: CapturedLogs = CapturedLogs;

    thread_local! {
        static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    impl log::Log for CapturedLogs {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|records| {
                records.borrow_mut().push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    fn capture_logs() {
        let _ = log::set_logger(&CAPTURED_LOGS);
        log::set_max_level(log::LevelFilter::Trace);
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    fn logged(level: log::Level) -> Vec<String> {
        RECORDS.with(|records| {
            records
                .borrow()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    type Gate = oneshot::Sender<Result<PostPage>>;

    /// Feed of `p0..pN` posts. Gated requests wait for the test to answer them.
    struct FeedClient {
        posts: Vec<Post>,
        failing: Cell<bool>,
        requests: RefCell<Vec<PageRange>>,
        gates: RefCell<HashMap<u64, oneshot::Receiver<Result<PostPage>>>>,
        actions: RefCell<Vec<(String, String)>>,
    }

    impl FeedClient {
        fn with_posts(count: usize) -> Self {
            Self {
                posts: (0..count).map(|i| Post::with_id(format!("p{}", i))).collect(),
                failing: Cell::new(false),
                requests: RefCell::new(Vec::new()),
                gates: RefCell::new(HashMap::new()),
                actions: RefCell::new(Vec::new()),
            }
        }

        fn body_for(&self, range: PageRange) -> PostPage {
            let page = self
                .posts
                .iter()
                .skip(range.offset as usize)
                .take(range.limit as usize)
                .cloned()
                .collect();
            PostPage::new(page, Some(self.posts.len() as u64))
        }

        /// Hold the next request for `page` until the returned sender answers it
        fn gate(&self, page: u32) -> Gate {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(PageRange::for_page(page).offset, rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl ContentClient for FeedClient {
        async fn list_posts(
            &self,
            _project: &str,
            _feed: &str,
            range: PageRange,
        ) -> Result<PostPage> {
            self.requests.borrow_mut().push(range);
            let gate = self.gates.borrow_mut().remove(&range.offset);
            if let Some(gate) = gate {
                return gate
                    .await
                    .unwrap_or_else(|_| Err(GalleryError::Transport("gate dropped".to_string())));
            }
            if self.failing.get() {
                return Err(GalleryError::Transport("connection reset".to_string()));
            }
            Ok(self.body_for(range))
        }

        async fn like_post(&self, _project: &str, _feed: &str, post_id: &str) -> Result<()> {
            self.actions.borrow_mut().push(("like".to_string(), post_id.to_string()));
            Ok(())
        }

        async fn flag_post(&self, _project: &str, _feed: &str, post_id: &str) -> Result<()> {
            self.actions.borrow_mut().push(("flag".to_string(), post_id.to_string()));
            Ok(())
        }
    }

    struct Harness {
        pool: LocalPool,
        gallery: Rc<Gallery>,
        client: Rc<FeedClient>,
        surface: Rc<RecordingSurface>,
        lightbox: Rc<RecordingLightbox>,
        history: Rc<MemoryHistory>,
    }

    impl Harness {
        fn new(search: &str, client: FeedClient) -> Self {
            let pool = LocalPool::new();
            let local = pool.spawner();
            let spawner: Spawner = Rc::new(move |task: LocalBoxFuture<'static, ()>| {
                local.spawn_local(task).expect("executor accepts tasks");
            });

            let client = Rc::new(client);
            let surface = Rc::new(RecordingSurface::default());
            let lightbox = Rc::new(RecordingLightbox::default());
            let history = Rc::new(MemoryHistory::new(search));

            let gallery = Gallery::new(
                GalleryConfig::new("proj", "feed"),
                GalleryParts {
                    client: client.clone(),
                    surface: surface.clone(),
                    lightbox: lightbox.clone(),
                    history: history.clone(),
                    spawner,
                },
            );

            Self { pool, gallery, client, surface, lightbox, history }
        }

        fn settle(&mut self) {
            self.pool.run_until_stalled();
        }

        fn loaded(search: &str, posts: usize) -> Self {
            Self::loaded_with(search, FeedClient::with_posts(posts))
        }

        fn loaded_with(search: &str, client: FeedClient) -> Self {
            let mut harness = Self::new(search, client);
            harness.settle();
            harness
        }
    }

    fn ids(range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|i| format!("p{}", i)).collect()
    }

    // ========================
    // Loading
    // ========================

    #[test]
    fn test_initial_fetch_uses_url_page() {
        let h = Harness::loaded("?page=2", 40);

        assert_eq!(h.gallery.page(), 2);
        assert_eq!(*h.client.requests.borrow(), vec![PageRange { limit: 18, offset: 18 }]);
        assert_eq!(h.surface.post_ids(), ids(18..36));
        assert_eq!(h.surface.paginations(), vec![generate_pagination(2, 3)]);
        assert!(!h.surface.has_spinner());
    }

    #[test]
    fn test_invalid_page_param_loads_first_page() {
        let h = Harness::loaded("?page=abc", 40);
        assert_eq!(h.gallery.page(), 1);
        assert_eq!(h.client.requests.borrow()[0].offset, 0);
    }

    #[test]
    fn test_pagination_rendered_after_posts() {
        let h = Harness::loaded("?page=5", 180);
        let nodes = h.surface.nodes.borrow();
        assert!(matches!(nodes.last(), Some((_, Node::Pagination { .. }))));
        assert_eq!(h.surface.paginations(), vec![generate_pagination(5, 10)]);
    }

    #[test]
    fn test_spinner_shown_until_response() {
        let client = FeedClient::with_posts(5);
        let gate = client.gate(1);
        let mut h = Harness::new("", client);
        h.settle();

        assert!(h.surface.has_spinner());
        assert!(h.surface.post_ids().is_empty());

        gate.send(Ok(h.client.body_for(PageRange::for_page(1)))).unwrap();
        h.settle();

        assert!(!h.surface.has_spinner());
        assert_eq!(h.surface.post_ids(), ids(0..5));
    }

    #[test]
    fn test_fetch_failure_leaves_state_untouched() {
        let mut h = Harness::loaded("", 40);
        h.client.failing.set(true);
        capture_logs();

        let result = h.pool.run_until(h.gallery.fetch_posts(2));

        let errors = logged(log::Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("page 2"), "{}", errors[0]);
        assert!(errors[0].contains("connection reset"), "{}", errors[0]);

        assert_eq!(result, Err(GalleryError::Transport("connection reset".to_string())));
        assert_eq!(h.gallery.page(), 1);
        assert_eq!(h.gallery.posts().len(), 18);
        assert_eq!(h.surface.paginations().len(), 1);
        assert!(!h.surface.has_spinner());
    }

    #[test]
    fn test_refetch_same_page_is_stable() {
        let mut h = Harness::loaded("", 40);
        let first = h.gallery.posts();

        h.pool.run_until(h.gallery.fetch_posts(1)).unwrap();

        assert_eq!(h.gallery.posts(), first);
        assert_eq!(h.gallery.page(), 1);
    }

    #[test]
    fn test_empty_page_still_renders_pagination() {
        let client = FeedClient::with_posts(0);
        let h = Harness::loaded_with("", client);
        assert!(h.surface.post_ids().is_empty());
        assert_eq!(h.surface.paginations(), vec![Vec::<PageItem>::new()]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut h = Harness::loaded("", 60);
        let slow = h.client.gate(2);
        let fast = h.client.gate(3);

        h.gallery.go_to_page(2);
        h.gallery.go_to_page(3);
        h.settle();

        fast.send(Ok(h.client.body_for(PageRange::for_page(3)))).unwrap();
        h.settle();
        slow.send(Ok(h.client.body_for(PageRange::for_page(2)))).unwrap();
        h.settle();

        assert_eq!(h.gallery.page(), 3);
        assert_eq!(h.surface.post_ids(), ids(36..54));
        assert_eq!(h.surface.paginations(), vec![generate_pagination(3, 4)]);
        assert!(!h.surface.has_spinner());
    }

    #[test]
    fn test_stale_fetch_reports_superseded() {
        let mut h = Harness::loaded("", 60);
        let gate = h.client.gate(2);

        let gallery = h.gallery.clone();
        let pending = h
            .pool
            .spawner()
            .spawn_local_with_handle(async move { gallery.fetch_posts(2).await })
            .unwrap();
        h.settle();
        h.pool.run_until(h.gallery.fetch_posts(3)).unwrap();

        gate.send(Ok(h.client.body_for(PageRange::for_page(2)))).unwrap();
        let stale = h.pool.run_until(pending);

        assert_eq!(stale, Err(GalleryError::Superseded { page: 2 }));
        assert_eq!(h.gallery.page(), 3);
    }

    // ========================
    // Page navigation
    // ========================

    #[test]
    fn test_page_link_pushes_history_and_reloads() {
        let mut h = Harness::loaded("", 60);

        h.surface.click_page(3);
        h.settle();

        assert_eq!(*h.history.pushes.borrow(), vec![3]);
        assert_eq!(query::page_from_search(&h.history.current_search()), 3);
        assert_eq!(h.gallery.page(), 3);
        assert_eq!(h.surface.post_ids(), ids(36..54));
        assert_eq!(h.surface.paginations().len(), 1);
    }

    #[test]
    fn test_history_change_refetches_without_push() {
        let mut h = Harness::loaded("", 60);

        h.history.pop_to("?page=2");
        h.settle();

        assert_eq!(h.gallery.page(), 2);
        assert_eq!(h.surface.post_ids(), ids(18..36));
        assert!(h.history.pushes.borrow().is_empty());

        // same page again: nothing to do
        h.history.pop_to("?page=2");
        h.settle();
        assert_eq!(h.client.requests.borrow().len(), 2);
    }

    #[test]
    fn test_history_without_page_means_first_page() {
        let mut h = Harness::loaded("?page=2", 60);

        h.history.pop_to("");
        h.settle();

        assert_eq!(h.gallery.page(), 1);
        assert_eq!(h.surface.post_ids(), ids(0..18));
    }

    #[test]
    fn test_destroy_unsubscribes_and_clears() {
        let h = Harness::loaded("", 20);
        assert!(h.history.is_subscribed());

        h.gallery.destroy();

        assert!(!h.history.is_subscribed());
        assert!(h.surface.is_empty());
    }

    #[test]
    fn test_dropping_gallery_unsubscribes() {
        let h = Harness::loaded("", 20);
        let Harness { pool, gallery, history, .. } = h;
        drop(pool);
        drop(gallery);
        assert!(!history.is_subscribed());
    }

    // ========================
    // Lightbox
    // ========================

    #[test]
    fn test_clicking_post_opens_lightbox() {
        let h = Harness::loaded("", 40);

        h.surface.click_post("p3");

        assert_eq!(h.lightbox.shown_post_id(), Some("p3".to_string()));
        assert!(h.lightbox.can_navigate(Direction::Previous));
        assert!(h.lightbox.can_navigate(Direction::Next));
    }

    #[test]
    fn test_close_lightbox_clears_it() {
        let h = Harness::loaded("", 40);
        h.surface.click_post("p3");

        h.gallery.close_lightbox();

        assert_eq!(h.lightbox.content(), None);
    }

    #[test]
    fn test_lightbox_steps_within_page() {
        let h = Harness::loaded("", 40);
        h.surface.click_post("p3");

        h.lightbox.navigate(Direction::Next);
        assert_eq!(h.lightbox.shown_post_id(), Some("p4".to_string()));

        h.lightbox.navigate(Direction::Previous);
        h.lightbox.navigate(Direction::Previous);
        assert_eq!(h.lightbox.shown_post_id(), Some("p2".to_string()));
        assert_eq!(h.client.requests.borrow().len(), 1);
    }

    #[test]
    fn test_lightbox_crosses_to_next_page() {
        let mut h = Harness::loaded("", 40);
        h.surface.click_post("p17");
        assert!(h.lightbox.can_navigate(Direction::Next));

        h.lightbox.navigate(Direction::Next);
        assert_eq!(h.lightbox.content(), Some(LightboxContent::Loading));
        assert!(!h.lightbox.can_navigate(Direction::Next));
        assert!(!h.lightbox.can_navigate(Direction::Previous));

        h.settle();

        assert_eq!(h.gallery.page(), 2);
        assert_eq!(*h.history.pushes.borrow(), vec![2]);
        assert_eq!(h.lightbox.shown_post_id(), Some("p18".to_string()));
    }

    #[test]
    fn test_lightbox_crosses_to_previous_page() {
        let mut h = Harness::loaded("?page=2", 40);
        h.surface.click_post("p18");

        h.lightbox.navigate(Direction::Previous);
        h.settle();

        assert_eq!(h.gallery.page(), 1);
        assert_eq!(h.lightbox.shown_post_id(), Some("p17".to_string()));
    }

    #[test]
    fn test_lightbox_stops_at_last_page() {
        let mut h = Harness::loaded("?page=2", 40);
        h.surface.click_post("p35");
        h.lightbox.navigate(Direction::Next);
        h.settle();

        // page 3 holds p36..p39
        assert_eq!(h.gallery.page(), 3);
        assert_eq!(h.lightbox.shown_post_id(), Some("p36".to_string()));

        h.surface.click_post("p39");
        assert!(!h.lightbox.can_navigate(Direction::Next));
        h.lightbox.navigate(Direction::Previous);
        assert_eq!(h.lightbox.shown_post_id(), Some("p38".to_string()));
    }

    #[test]
    fn test_lightbox_dead_end_on_single_page() {
        let h = Harness::loaded("", 5);
        h.surface.click_post("p4");

        assert!(!h.lightbox.can_navigate(Direction::Next));
        h.lightbox.navigate(Direction::Next);

        assert_eq!(h.lightbox.shown_post_id(), Some("p4".to_string()));
        assert_eq!(h.client.requests.borrow().len(), 1);
    }

    #[test]
    fn test_lightbox_navigation_aborts_on_failure() {
        let mut h = Harness::loaded("", 40);
        h.surface.click_post("p17");
        h.client.failing.set(true);

        h.lightbox.navigate(Direction::Next);
        h.settle();

        assert_eq!(h.lightbox.content(), Some(LightboxContent::Loading));
        assert_eq!(h.gallery.page(), 1);
    }

    #[test]
    fn test_post_from_discarded_page_is_not_found() {
        let mut h = Harness::loaded("", 30);
        h.surface.click_page(2);
        h.settle();

        // p0 is gone from memory; only page-level movement remains
        assert_eq!(h.gallery.posts().len(), 12);
        assert!(!h.gallery.can_navigate("p0", Direction::Next));
        assert!(h.gallery.can_navigate("p0", Direction::Previous));
    }

    // ========================
    // Post actions
    // ========================

    #[test]
    fn test_like_and_flag_reach_client() {
        let mut h = Harness::loaded("", 3);
        let post = h.gallery.posts()[1].clone();

        h.gallery.like_post(&post);
        h.gallery.flag_post(&post);
        h.settle();

        let mut actions = h.client.actions.borrow().clone();
        actions.sort();
        assert_eq!(
            actions,
            vec![("flag".to_string(), "p1".to_string()), ("like".to_string(), "p1".to_string())]
        );
    }
}
