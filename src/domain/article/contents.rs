// src/domain/article/contents.rs
use std::collections::BTreeSet;

use crate::domain::article::update_request::ArticleUpdateRequest;
use crate::domain::article::value_objects::{
    ArticleBody, ArticleDescription, ArticleSlug, ArticleTitle, Tag,
};

/// Editable contents embedded in an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContents {
    title: ArticleTitle,
    description: ArticleDescription,
    body: ArticleBody,
    tags: BTreeSet<Tag>,
}

impl ArticleContents {
    pub fn new(
        title: ArticleTitle,
        description: ArticleDescription,
        body: ArticleBody,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            title,
            description,
            body,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn title(&self) -> &ArticleTitle {
        &self.title
    }

    pub fn slug(&self) -> &ArticleSlug {
        self.title.slug()
    }

    pub fn description(&self) -> &ArticleDescription {
        &self.description
    }

    pub fn body(&self) -> &ArticleBody {
        &self.body
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn update_if_present(&mut self, request: &ArticleUpdateRequest) {
        if let Some(title) = request.title_to_update() {
            self.title = title.clone();
        }
        if let Some(description) = request.description_to_update() {
            self.description = description.clone();
        }
        if let Some(body) = request.body_to_update() {
            self.body = body.clone();
        }
    }
}
