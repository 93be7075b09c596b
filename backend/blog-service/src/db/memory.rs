/// In-memory content store for tests
///
/// Mirrors the Postgres adapter's semantics closely enough for workflow
/// tests: rows have insertion-ordered recency, deletes report whether a row
/// existed, and the moderation view joins against live posts only.
use crate::db::ContentStore;
use crate::error::Result;
use crate::models::{Comment, ModeratedComment, Post, PostDraft, PostRef};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    posts: Vec<(u64, Post)>,
    comments: Vec<(u64, Comment)>,
    seq: u64,
}

impl State {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

#[derive(Default)]
pub struct InMemoryContentStore {
    state: Mutex<State>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a comment row directly, bypassing creation-time invariants.
    /// Lets tests fabricate dangling or pre-approved comments.
    pub fn insert_comment_raw(&self, comment: Comment) {
        let mut state = self.state.lock().unwrap();
        let seq = state.next_seq();
        state.comments.push((seq, comment));
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn create_post(&self, draft: PostDraft) -> Result<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            title: draft.title,
            sub_title: draft.sub_title,
            description: draft.description,
            category: draft.category,
            image: draft.image,
            is_published: draft.is_published,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().unwrap();
        let seq = state.next_seq();
        state.posts.push((seq, post.clone()));
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|(_, p)| p.id == id).map(|(_, p)| p.clone()))
    }

    async fn list_published_posts(&self) -> Result<Vec<Post>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state
            .posts
            .iter()
            .filter(|(_, p)| p.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, p)| p).collect())
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state.posts.clone();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, p)| p).collect())
    }

    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>> {
        let posts = self.list_all_posts().await?;
        Ok(posts.into_iter().take(limit.max(0) as usize).collect())
    }

    async fn count_posts(&self) -> Result<i64> {
        Ok(self.state.lock().unwrap().posts.len() as i64)
    }

    async fn count_drafts(&self) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().filter(|(_, p)| !p.is_published).count() as i64)
    }

    async fn set_post_published(&self, id: Uuid, published: bool) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.posts.iter_mut().find(|(_, p)| p.id == id) {
            Some((_, post)) => {
                post.is_published = published;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|(_, p)| p.id != id);
        Ok(state.posts.len() < before)
    }

    async fn create_comment(&self, post_id: Uuid, name: &str, content: &str) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            name: name.to_string(),
            content: content.to_string(),
            is_approved: false,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().unwrap();
        let seq = state.next_seq();
        state.comments.push((seq, comment.clone()));
        Ok(comment)
    }

    async fn approve_comment(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.comments.iter_mut().find(|(_, c)| c.id == id) {
            Some((_, comment)) => {
                comment.is_approved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.comments.len();
        state.comments.retain(|(_, c)| c.id != id);
        Ok(state.comments.len() < before)
    }

    async fn delete_comments_for_post(&self, post_id: Uuid) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.comments.len();
        state.comments.retain(|(_, c)| c.post_id != post_id);
        Ok((before - state.comments.len()) as u64)
    }

    async fn comments_for_moderation(&self) -> Result<Vec<ModeratedComment>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<(u64, ModeratedComment)> = state
            .comments
            .iter()
            .filter_map(|(seq, c)| {
                // Inner-join semantics: skip comments without a live parent
                let parent = state.posts.iter().find(|(_, p)| p.id == c.post_id)?;
                Some((
                    *seq,
                    ModeratedComment {
                        id: c.id,
                        blog: PostRef {
                            id: parent.1.id,
                            title: parent.1.title.clone(),
                        },
                        name: c.name.clone(),
                        content: c.content.clone(),
                        is_approved: c.is_approved,
                        created_at: c.created_at,
                    },
                ))
            })
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, c)| c).collect())
    }

    async fn approved_comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state
            .comments
            .iter()
            .filter(|(_, c)| c.post_id == post_id && c.is_approved)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, c)| c).collect())
    }

    async fn count_comments(&self) -> Result<i64> {
        Ok(self.state.lock().unwrap().comments.len() as i64)
    }
}
