//! Gallery Controller
//!
//! Owns paging state and drives the surface, the lightbox and the browser history.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::api::{ContentClient, PageRange};
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::models::Post;
use crate::pagination::generate_pagination;
use crate::query;

use super::ports::{
    CanNavigate, History, Lightbox, LightboxContent, Navigate, Node, Spawner, Subscription, Surface,
};
use super::state::{Direction, PageState};

/// Collaborators the controller is wired to
pub struct GalleryParts {
    pub client: Rc<dyn ContentClient>,
    pub surface: Rc<dyn Surface>,
    pub lightbox: Rc<dyn Lightbox>,
    pub history: Rc<dyn History>,
    pub spawner: Spawner,
}

pub struct Gallery {
    config: Rc<GalleryConfig>,
    client: Rc<dyn ContentClient>,
    surface: Rc<dyn Surface>,
    lightbox: Rc<dyn Lightbox>,
    history: Rc<dyn History>,
    spawner: Spawner,
    state: RefCell<PageState>,
    history_subscription: RefCell<Option<Subscription>>,
    this: Weak<Gallery>,
}

impl Gallery {
    /// Create the controller, subscribe to history navigation and start loading the
    /// page named in the URL.
    pub fn new(config: GalleryConfig, parts: GalleryParts) -> Rc<Self> {
        let page = query::page_from_search(&parts.history.current_search());

        let gallery = Rc::new_cyclic(|this| Gallery {
            config: Rc::new(config),
            client: parts.client,
            surface: parts.surface,
            lightbox: parts.lightbox,
            history: parts.history,
            spawner: parts.spawner,
            state: RefCell::new(PageState::new(page)),
            history_subscription: RefCell::new(None),
            this: this.clone(),
        });

        let weak = Rc::downgrade(&gallery);
        let subscription = gallery.history.subscribe(Box::new(move || {
            if let Some(gallery) = weak.upgrade() {
                gallery.on_history_change();
            }
        }));
        *gallery.history_subscription.borrow_mut() = Some(subscription);

        log::info!(
            "[gallery] project={} feed={} starting at page {}",
            gallery.config.project,
            gallery.config.feed,
            page
        );
        gallery.spawn_fetch(page);
        gallery
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn page(&self) -> u32 {
        self.state.borrow().page()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.state.borrow().posts().to_vec()
    }

    /// Stop reacting to history navigation and empty the container
    pub fn destroy(&self) {
        if let Some(subscription) = self.history_subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
        self.surface.clear();
        log::debug!("[gallery] destroyed");
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        (self.spawner)(Box::pin(task));
    }

    fn spawn_fetch(&self, page: u32) {
        let Some(gallery) = self.this.upgrade() else { return };
        self.spawn(async move {
            let _ = gallery.fetch_posts(page).await;
        });
    }

    /// Load `page` and render it below whatever the container already holds.
    ///
    /// On failure nothing but the loading indicator is touched. A response that is
    /// overtaken by a newer fetch is dropped with [`GalleryError::Superseded`].
    pub async fn fetch_posts(&self, page: u32) -> Result<()> {
        let ticket = self.state.borrow_mut().begin_fetch(page);
        let spinner = self.surface.append(Node::Spinner);

        let result = self
            .client
            .list_posts(&self.config.project, &self.config.feed, PageRange::for_page(ticket.page))
            .await;

        self.surface.remove(spinner);

        let body = match result {
            Ok(body) => body,
            Err(err) => {
                log::error!("[gallery] error loading page {}: {}", ticket.page, err);
                return Err(err);
            }
        };

        if !self.state.borrow().is_latest(&ticket) {
            log::debug!("[gallery] dropping stale response for page {}", ticket.page);
            return Err(GalleryError::Superseded { page: ticket.page });
        }

        let posts = {
            let mut state = self.state.borrow_mut();
            state.apply(&ticket, body);
            state.posts().to_vec()
        };
        log::debug!("[gallery] page {} loaded with {} posts", ticket.page, posts.len());

        for post in posts {
            self.append_post(post);
        }
        self.add_pagination();
        Ok(())
    }

    /// Render one post; clicking it opens the lightbox
    pub fn append_post(&self, post: Post) {
        let this = self.this.clone();
        let target = post.clone();
        self.surface.append(Node::Post {
            post,
            on_open: Rc::new(move || {
                if let Some(gallery) = this.upgrade() {
                    gallery.open_lightbox(target.clone());
                }
            }),
        });
    }

    fn add_pagination(&self) {
        let items = {
            let state = self.state.borrow();
            generate_pagination(state.page(), state.num_pages())
        };
        let this = self.this.clone();
        self.surface.append(Node::Pagination {
            items,
            on_select: Rc::new(move |page| {
                if let Some(gallery) = this.upgrade() {
                    gallery.go_to_page(page);
                }
            }),
        });
    }

    /// Fire-and-forget [`Gallery::navigate_to_page`], used by page links
    pub fn go_to_page(&self, page: u32) {
        let Some(gallery) = self.this.upgrade() else { return };
        self.spawn(async move {
            let _ = gallery.navigate_to_page(page).await;
        });
    }

    /// Push `?page=N`, empty the container and load the page
    pub async fn navigate_to_page(&self, page: u32) -> Result<()> {
        self.history.push_page(page);
        self.surface.clear();
        self.fetch_posts(page).await
    }

    /// Back/forward: reload only when the URL names a different page
    fn on_history_change(&self) {
        let page = query::page_from_search(&self.history.current_search());
        if page == self.page() {
            return;
        }
        log::debug!("[gallery] history moved to page {}", page);
        self.surface.clear();
        self.spawn_fetch(page);
    }

    pub fn open_lightbox(&self, post: Post) {
        let can_navigate = self.can_navigate_fn(&post.id);
        let navigate = self.navigate_fn(&post.id);
        self.lightbox.open(LightboxContent::Post(post), can_navigate, navigate);
    }

    pub fn close_lightbox(&self) {
        self.lightbox.close();
    }

    fn can_navigate_fn(&self, post_id: &str) -> CanNavigate {
        let this = self.this.clone();
        let post_id = post_id.to_string();
        Rc::new(move |dir| this.upgrade().is_some_and(|g| g.can_navigate(&post_id, dir)))
    }

    fn navigate_fn(&self, post_id: &str) -> Navigate {
        let this = self.this.clone();
        let post_id = post_id.to_string();
        Rc::new(move |dir| {
            if let Some(gallery) = this.upgrade() {
                gallery.navigate(&post_id, dir);
            }
        })
    }

    pub fn can_navigate(&self, post_id: &str, dir: Direction) -> bool {
        self.state.borrow().can_navigate(post_id, dir)
    }

    /// Step the lightbox from `post_id`, crossing into the adjacent page when the
    /// current one runs out.
    pub fn navigate(&self, post_id: &str, dir: Direction) {
        let neighbour = self.state.borrow().navigated_post(post_id, dir).cloned();
        if let Some(post) = neighbour {
            self.open_lightbox(post);
            return;
        }

        let Some(target) = self.state.borrow().adjacent_page(dir) else { return };
        let Some(gallery) = self.this.upgrade() else { return };

        self.lightbox.open(
            LightboxContent::Loading,
            Rc::new(|_: Direction| false),
            Rc::new(|_: Direction| {}),
        );
        self.spawn(async move {
            if let Err(err) = gallery.navigate_to_page(target).await {
                log::debug!("[gallery] lightbox navigation to page {} aborted: {}", target, err);
                return;
            }
            let entry = gallery.state.borrow().entry_post(dir).cloned();
            if let Some(post) = entry {
                gallery.open_lightbox(post);
            }
        });
    }

    pub fn like_post(&self, post: &Post) {
        self.post_action(post, PostAction::Like);
    }

    pub fn flag_post(&self, post: &Post) {
        self.post_action(post, PostAction::Flag);
    }

    fn post_action(&self, post: &Post, action: PostAction) {
        let Some(gallery) = self.this.upgrade() else { return };
        let post_id = post.id.clone();
        self.spawn(async move {
            let (project, feed) = (&gallery.config.project, &gallery.config.feed);
            let result = match action {
                PostAction::Like => gallery.client.like_post(project, feed, &post_id).await,
                PostAction::Flag => gallery.client.flag_post(project, feed, &post_id).await,
            };
            match result {
                Ok(()) => log::info!("[gallery] {:?} sent for post {}", action, post_id),
                Err(err) => {
                    log::error!("[gallery] {:?} failed for post {}: {}", action, post_id, err)
                }
            }
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum PostAction {
    Like,
    Flag,
}
