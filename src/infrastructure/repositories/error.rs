use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_AUTHOR: &str = "articles_author_id_fkey";
const CNT_FAVORITE_USER: &str = "article_favorites_user_id_fkey";
const CNT_COMMENT_AUTHOR: &str = "comments_author_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let by_constraint = match db_err.constraint() {
                Some(CNT_ARTICLE_SLUG) => Some(DomainError::Conflict("slug already exists".into())),
                Some(CNT_ARTICLE_AUTHOR) => Some(DomainError::NotFound("author not found".into())),
                Some(CNT_FAVORITE_USER) => Some(DomainError::NotFound("user not found".into())),
                Some(CNT_COMMENT_AUTHOR) => {
                    Some(DomainError::NotFound("comment author not found".into()))
                }
                _ => None,
            };
            if let Some(mapped) = by_constraint {
                return mapped;
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            match db_err.constraint() {
                Some(other) => {
                    DomainError::Persistence(format!("database constraint violation: {other}"))
                }
                None => DomainError::Persistence(db_err.message().to_string()),
            }
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
