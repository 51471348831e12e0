use uuid::Uuid;

use crate::models::post::Post;

/// The in-memory feed, newest first, reconciled optimistically from each
/// mutation response. No conflict detection against other sessions and no
/// background re-sync; a full `replace_all` is the only repair.
#[derive(Debug, Default)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: Uuid) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Full refresh from `GET /posts`; the server already orders newest
    /// first.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// A freshly created post goes on top.
    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    /// Replaces the matching post with the server's updated copy (like,
    /// comment, edit responses). An unknown id is ignored; the next full
    /// refresh will pick it up.
    pub fn apply(&mut self, post: Post) {
        if let Some(slot) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *slot = post;
        }
    }

    pub fn remove(&mut self, id: Uuid) {
        self.posts.retain(|p| p.id != id);
    }
}
