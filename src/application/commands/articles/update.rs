// src/application/commands/articles/update.rs
use super::{ArticleCommandService, ownership::ensure_can_modify};
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleBody, ArticleDescription, ArticleTitle, ArticleUpdateRequest},
        user::UserId,
    },
};

pub struct UpdateArticleCommand {
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: UserId,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_by_slug(&command.slug).await?;
        ensure_can_modify(actor, &article, "update")?;

        let request = ArticleUpdateRequest::new(
            command.title.map(ArticleTitle::new).transpose()?,
            command.description.map(ArticleDescription::new).transpose()?,
            command.body.map(ArticleBody::new).transpose()?,
        );

        if request.is_empty() {
            return Ok(article.view_for(Some(actor)).into());
        }

        if let Some(title) = request.title_to_update() {
            if title.slug() != article.contents().slug() {
                if let Some(existing) = self.repo.find_by_slug(title.slug()).await? {
                    if existing.id() != article.id() {
                        return Err(ApplicationError::conflict(format!(
                            "an article with slug '{}' already exists",
                            title.slug()
                        )));
                    }
                }
            }
        }

        article.update_article(request);
        article.touch(self.clock.now());
        self.repo.save(&mut article).await?;

        tracing::info!(article_id = %article.id(), author = %actor, "article updated");

        Ok(article.view_for(Some(actor)).into())
    }
}
