// src/domain/article/entity.rs
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::domain::article::comment::Comment;
use crate::domain::article::contents::ArticleContents;
use crate::domain::article::specifications::CanRemoveCommentSpec;
use crate::domain::article::update_request::ArticleUpdateRequest;
use crate::domain::article::value_objects::{ArticleId, ArticleTitle, CommentBody, CommentId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Aggregate root owning an article's contents, its comments and the set of
/// users who favorited it.
///
/// Equality and hashing follow [`ArticleKey`]: two articles are the same
/// when they share an author and a title, whatever their comments or
/// timestamps.
#[derive(Debug, Clone)]
pub struct Article {
    id: ArticleId,
    author: UserId,
    contents: ArticleContents,
    favorited_by: HashSet<UserId>,
    comments: Vec<Comment>,
    comment_seq: i64,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Natural key of an article: one title per author.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleKey {
    pub author: UserId,
    pub title: ArticleTitle,
}

/// Persisted state of an article, as loaded by a repository.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub author: UserId,
    pub contents: ArticleContents,
    pub favorited_by: HashSet<UserId>,
    pub comments: Vec<Comment>,
    pub comment_seq: i64,
    /// Optimistic-concurrency token; bumped by every successful save.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author: UserId,
    pub contents: ArticleContents,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        id: ArticleId,
        author: UserId,
        contents: ArticleContents,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            contents,
            favorited_by: HashSet::new(),
            comments: Vec::new(),
            comment_seq: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn restore(record: ArticleRecord) -> Self {
        let ArticleRecord {
            id,
            author,
            contents,
            favorited_by,
            mut comments,
            comment_seq,
            version,
            created_at,
            updated_at,
        } = record;

        comments.sort_by_key(|comment| comment.id);
        let highest = comments.last().map(|comment| comment.id.0).unwrap_or(0);

        Self {
            id,
            author,
            contents,
            favorited_by,
            comments,
            comment_seq: comment_seq.max(highest),
            version,
            created_at,
            updated_at,
        }
    }

    pub fn after_user_favorites_article(&mut self, user: UserId) -> ArticleView<'_> {
        self.favorited_by.insert(user);
        self.update_favorite_by_user(user)
    }

    pub fn after_user_unfavorites_article(&mut self, user: UserId) -> ArticleView<'_> {
        self.favorited_by.remove(&user);
        self.update_favorite_by_user(user)
    }

    /// Projects the article as seen by `user`.
    pub fn update_favorite_by_user(&self, user: UserId) -> ArticleView<'_> {
        ArticleView {
            article: self,
            favorited: self.favorited_by.contains(&user),
        }
    }

    /// Projects the article for an optional viewer; anonymous viewers never
    /// see it as favorited.
    pub fn view_for(&self, viewer: Option<UserId>) -> ArticleView<'_> {
        match viewer {
            Some(user) => self.update_favorite_by_user(user),
            None => ArticleView {
                article: self,
                favorited: false,
            },
        }
    }

    pub fn add_comment(
        &mut self,
        author: UserId,
        body: CommentBody,
        now: DateTime<Utc>,
    ) -> &Comment {
        self.comment_seq += 1;
        let index = self.comments.len();
        self.comments
            .push(Comment::new(CommentId(self.comment_seq), author, body, now));
        &self.comments[index]
    }

    pub fn remove_comment_by_user(
        &mut self,
        user: UserId,
        comment_id: CommentId,
    ) -> DomainResult<Comment> {
        let position = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or_else(|| DomainError::NotFound(format!("comment {comment_id} not found")))?;

        if !CanRemoveCommentSpec::new(self, &self.comments[position], user).is_satisfied() {
            return Err(DomainError::PermissionDenied(
                "not authorized to delete comment".into(),
            ));
        }

        Ok(self.comments.remove(position))
    }

    pub fn update_article(&mut self, request: ArticleUpdateRequest) {
        self.contents.update_if_present(&request);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn is_written_by(&self, user: UserId) -> bool {
        self.author == user
    }

    pub fn key(&self) -> ArticleKey {
        ArticleKey {
            author: self.author,
            title: self.contents.title().clone(),
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn contents(&self) -> &ArticleContents {
        &self.contents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn favorited_by(&self) -> &HashSet<UserId> {
        &self.favorited_by
    }

    pub fn favorited_count(&self) -> usize {
        self.favorited_by.len()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment_seq(&self) -> i64 {
        self.comment_seq
    }

    /// Version this copy was loaded or last saved at.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Advances the version after a repository has stored this copy.
    pub fn mark_saved(&mut self) {
        self.version += 1;
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author && self.contents.title() == other.contents.title()
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.author.hash(state);
        self.contents.title().hash(state);
    }
}

/// An article paired with whether one particular viewer has favorited it.
#[derive(Debug, Clone, Copy)]
pub struct ArticleView<'a> {
    article: &'a Article,
    favorited: bool,
}

impl<'a> ArticleView<'a> {
    pub fn article(&self) -> &'a Article {
        self.article
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }
}

impl Deref for ArticleView<'_> {
    type Target = Article;

    fn deref(&self) -> &Self::Target {
        self.article
    }
}
