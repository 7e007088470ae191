//! Page State
//!
//! The controller's in-memory view of the feed: current page, total count and the
//! posts of the page on screen.

use crate::models::{Post, PostPage};
use crate::pagination::{self, POSTS_PER_PAGE};

/// Lightbox stepping direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Ticket handed out when a fetch is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: u32,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    page: u32,
    total_posts: Option<u64>,
    posts: Vec<Post>,
    generation: u64,
}

impl PageState {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            total_posts: None,
            posts: Vec::new(),
            generation: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_posts(&self) -> Option<u64> {
        self.total_posts
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn num_pages(&self) -> u32 {
        pagination::num_pages(self.total_posts)
    }

    /// Register a new request; any ticket issued earlier becomes stale
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.generation += 1;
        FetchTicket { page: page.max(1), generation: self.generation }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Replace the page contents with a successful response
    pub fn apply(&mut self, ticket: &FetchTicket, body: PostPage) {
        let total = body.total();
        let mut posts = body.data.unwrap_or_default();
        posts.truncate(POSTS_PER_PAGE as usize);
        self.posts = posts;
        if total.is_some() {
            self.total_posts = total;
        }
        self.page = ticket.page;
    }

    pub fn find_post_index(&self, post_id: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.id == post_id)
    }

    /// In-memory neighbour of `post_id` in `dir`
    pub fn navigated_post(&self, post_id: &str, dir: Direction) -> Option<&Post> {
        let index = self.find_post_index(post_id)?;
        let target = match dir {
            Direction::Previous => index.checked_sub(1)?,
            Direction::Next => index + 1,
        };
        self.posts.get(target)
    }

    /// Page number next to the current one in `dir`, if it exists
    pub fn adjacent_page(&self, dir: Direction) -> Option<u32> {
        let target = i64::from(self.page) + dir.offset();
        (target >= 1 && target <= i64::from(self.num_pages())).then_some(target as u32)
    }

    pub fn can_navigate(&self, post_id: &str, dir: Direction) -> bool {
        self.navigated_post(post_id, dir).is_some() || self.adjacent_page(dir).is_some()
    }

    /// Post to land on after stepping onto a freshly loaded page
    pub fn entry_post(&self, dir: Direction) -> Option<&Post> {
        match dir {
            Direction::Next => self.posts.first(),
            Direction::Previous => self.posts.last(),
        }
    }
}
