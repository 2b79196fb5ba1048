// src/application/commands/articles/ownership.rs
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        article::{Article, specifications::CanModifyArticleSpec},
        user::UserId,
    },
};

pub(super) fn ensure_can_modify(
    actor: UserId,
    article: &Article,
    action: &str,
) -> ApplicationResult<()> {
    if CanModifyArticleSpec::new(article, actor).is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "only the author may {action} this article"
        )))
    }
}
