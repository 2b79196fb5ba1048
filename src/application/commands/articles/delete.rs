// src/application/commands/articles/delete.rs
use super::{ArticleCommandService, ownership::ensure_can_modify};
use crate::{application::error::ApplicationResult, domain::user::UserId};

pub struct DeleteArticleCommand {
    pub slug: String,
}

impl ArticleCommandService {
    pub async fn delete_article(
        &self,
        actor: UserId,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let article = self.load_by_slug(&command.slug).await?;
        ensure_can_modify(actor, &article, "delete")?;

        self.repo.delete_by_id(article.id()).await?;

        tracing::info!(
            article_id = %article.id(),
            comments = article.comments().len(),
            "article deleted"
        );
        Ok(())
    }
}
