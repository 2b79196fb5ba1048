// src/domain/article/update_request.rs
use crate::domain::article::value_objects::{ArticleBody, ArticleDescription, ArticleTitle};

/// Replacement values for an article's contents. A field left unset keeps
/// the article's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleUpdateRequest {
    title_to_update: Option<ArticleTitle>,
    description_to_update: Option<ArticleDescription>,
    body_to_update: Option<ArticleBody>,
}

impl ArticleUpdateRequest {
    pub fn new(
        title: Option<ArticleTitle>,
        description: Option<ArticleDescription>,
        body: Option<ArticleBody>,
    ) -> Self {
        Self {
            title_to_update: title,
            description_to_update: description,
            body_to_update: body,
        }
    }

    pub fn builder() -> ArticleUpdateRequestBuilder {
        ArticleUpdateRequestBuilder::default()
    }

    pub fn title_to_update(&self) -> Option<&ArticleTitle> {
        self.title_to_update.as_ref()
    }

    pub fn description_to_update(&self) -> Option<&ArticleDescription> {
        self.description_to_update.as_ref()
    }

    pub fn body_to_update(&self) -> Option<&ArticleBody> {
        self.body_to_update.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.title_to_update.is_none()
            && self.description_to_update.is_none()
            && self.body_to_update.is_none()
    }
}

#[derive(Debug, Default)]
pub struct ArticleUpdateRequestBuilder {
    title: Option<ArticleTitle>,
    description: Option<ArticleDescription>,
    body: Option<ArticleBody>,
}

impl ArticleUpdateRequestBuilder {
    pub fn title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn description(mut self, description: ArticleDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> ArticleUpdateRequest {
        ArticleUpdateRequest::new(self.title, self.description, self.body)
    }
}
