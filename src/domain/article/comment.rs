// src/domain/article/comment.rs
use crate::domain::article::value_objects::{CommentBody, CommentId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// A comment owned by exactly one article. Identifiers are unique within
/// the owning article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub author: UserId,
    pub body: CommentBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: CommentId, author: UserId, body: CommentBody, now: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_written_by(&self, user: UserId) -> bool {
        self.author == user
    }
}
