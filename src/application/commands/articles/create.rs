// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{
            ArticleBody, ArticleContents, ArticleDescription, ArticleTitle, NewArticle, Tag,
        },
        errors::DomainResult,
        user::UserId,
    },
};

pub struct CreateArticleCommand {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    description: Option<String>,
    body: Option<String>,
    tag_list: Vec<String>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_list.push(tag.into());
        self
    }

    pub fn build(self) -> ApplicationResult<CreateArticleCommand> {
        let required = |field: Option<String>, name: &str| {
            field.ok_or_else(|| ApplicationError::validation(format!("{name} is required")))
        };

        Ok(CreateArticleCommand {
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            body: required(self.body, "body")?,
            tag_list: self.tag_list,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: UserId,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let CreateArticleCommand {
            title,
            description,
            body,
            tag_list,
        } = command;

        let title = ArticleTitle::new(title)?;
        let tags = tag_list
            .into_iter()
            .map(Tag::new)
            .collect::<DomainResult<Vec<_>>>()?;
        let contents = ArticleContents::new(
            title,
            ArticleDescription::new(description)?,
            ArticleBody::new(body)?,
            tags,
        );

        if self.repo.find_by_slug(contents.slug()).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "an article with slug '{}' already exists",
                contents.slug()
            )));
        }

        let now = self.clock.now();
        let article = self
            .repo
            .insert(NewArticle {
                author: actor,
                contents,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(
            article_id = %article.id(),
            author = %actor,
            slug = %article.contents().slug(),
            "article created"
        );

        Ok(article.view_for(Some(actor)).into())
    }
}
