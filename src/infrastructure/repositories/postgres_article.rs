// src/infrastructure/repositories/postgres_article.rs
//
// Tables (DDL in tests/fixtures/schema.sql):
//   articles          (id, author_id, title, slug UNIQUE, description, body,
//                      comment_seq, version, created_at, updated_at)
//   article_favorites (article_id, user_id)      PRIMARY KEY (article_id, user_id)
//   article_tags      (article_id, tag)          PRIMARY KEY (article_id, tag)
//   comments          (article_id, id, author_id, body, created_at, updated_at)
//                                                PRIMARY KEY (article_id, id)
//
// `save` only writes when `articles.version` still matches the copy being
// saved. The UPDATE holds the article row lock until commit, so the child
// tables are rewritten by one writer at a time.
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleBody, ArticleContents, ArticleDescription, ArticleId, ArticleRecord,
    ArticleRepository, ArticleSlug, ArticleTitle, Comment, CommentBody, CommentId, NewArticle,
    Tag,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashSet;

const ARTICLE_COLUMNS: &str =
    "id, author_id, title, description, body, comment_seq, version, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    author_id: i64,
    title: String,
    description: String,
    body: String,
    comment_seq: i64,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    author_id: i64,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            author: UserId::new(row.author_id)?,
            body: CommentBody::new(row.body)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

enum Lookup<'a> {
    Id(i64),
    Slug(&'a str),
}

impl Lookup<'_> {
    fn column(&self) -> &'static str {
        match self {
            Lookup::Id(_) => "id",
            Lookup::Slug(_) => "slug",
        }
    }
}

struct ArticleChildren {
    favorited_by: Vec<i64>,
    comments: Vec<CommentRow>,
    tags: Vec<String>,
}

fn assemble(row: ArticleRow, children: ArticleChildren) -> DomainResult<Article> {
    let favorited_by = children
        .favorited_by
        .into_iter()
        .map(UserId::new)
        .collect::<DomainResult<HashSet<_>>>()?;
    let comments = children
        .comments
        .into_iter()
        .map(Comment::try_from)
        .collect::<DomainResult<Vec<_>>>()?;
    let tags = children
        .tags
        .into_iter()
        .map(Tag::new)
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(Article::restore(ArticleRecord {
        id: ArticleId::new(row.id)?,
        author: UserId::new(row.author_id)?,
        contents: ArticleContents::new(
            ArticleTitle::new(row.title)?,
            ArticleDescription::new(row.description)?,
            ArticleBody::new(row.body)?,
            tags,
        ),
        favorited_by,
        comments,
        comment_seq: row.comment_seq,
        version: row.version,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

impl PostgresArticleRepository {
    async fn load_children(
        tx: &mut Transaction<'_, Postgres>,
        article_id: i64,
    ) -> DomainResult<ArticleChildren> {
        let favorited_by = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM article_favorites WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        let comments = sqlx::query_as::<_, CommentRow>(
            "SELECT id, author_id, body, created_at, updated_at
             FROM comments WHERE article_id = $1 ORDER BY id",
        )
        .bind(article_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        let tags = sqlx::query_scalar::<_, String>(
            "SELECT tag FROM article_tags WHERE article_id = $1 ORDER BY tag",
        )
        .bind(article_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        Ok(ArticleChildren {
            favorited_by,
            comments,
            tags,
        })
    }

    /// Reads one article row and its child rows from a single snapshot.
    async fn load(&self, lookup: Lookup<'_>) -> DomainResult<Option<Article>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE {} = $1",
            lookup.column()
        );
        let query = sqlx::query_as::<_, ArticleRow>(&sql);
        let query = match lookup {
            Lookup::Id(id) => query.bind(id),
            Lookup::Slug(slug) => query.bind(slug),
        };
        let row = query.fetch_optional(&mut *tx).await.map_err(map_sqlx)?;

        let article = match row {
            Some(row) => {
                let children = Self::load_children(&mut tx, row.id).await?;
                Some(assemble(row, children)?)
            }
            None => None,
        };

        tx.commit().await.map_err(map_sqlx)?;
        Ok(article)
    }

    async fn sync_tags(
        tx: &mut Transaction<'_, Postgres>,
        article_id: i64,
        tags: Vec<String>,
    ) -> DomainResult<()> {
        sqlx::query("DELETE FROM article_tags WHERE article_id = $1 AND tag <> ALL($2::text[])")
            .bind(article_id)
            .bind(tags.clone())
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO article_tags (article_id, tag)
             SELECT $1, UNNEST($2::text[])
             ON CONFLICT DO NOTHING",
        )
        .bind(article_id)
        .bind(tags)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn sync_favorites(
        tx: &mut Transaction<'_, Postgres>,
        article_id: i64,
        user_ids: Vec<i64>,
    ) -> DomainResult<()> {
        sqlx::query(
            "DELETE FROM article_favorites WHERE article_id = $1 AND user_id <> ALL($2::bigint[])",
        )
        .bind(article_id)
        .bind(user_ids.clone())
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO article_favorites (article_id, user_id)
             SELECT $1, UNNEST($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(article_id)
        .bind(user_ids)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    /// Drops stored comments missing from `comments` and inserts the ones
    /// not stored yet. Stored comments are never rewritten; an id collision
    /// fails the save instead of being skipped.
    async fn sync_comments(
        tx: &mut Transaction<'_, Postgres>,
        article_id: i64,
        comments: &[Comment],
    ) -> DomainResult<()> {
        let ids: Vec<i64> = comments.iter().map(|c| c.id.into()).collect();

        sqlx::query("DELETE FROM comments WHERE article_id = $1 AND id <> ALL($2::bigint[])")
            .bind(article_id)
            .bind(ids)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;

        let stored: HashSet<i64> =
            sqlx::query_scalar::<_, i64>("SELECT id FROM comments WHERE article_id = $1")
                .bind(article_id)
                .fetch_all(&mut **tx)
                .await
                .map_err(map_sqlx)?
                .into_iter()
                .collect();

        let fresh: Vec<&Comment> = comments
            .iter()
            .filter(|c| !stored.contains(&i64::from(c.id)))
            .collect();
        if fresh.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = fresh.iter().map(|c| c.id.into()).collect();
        let authors: Vec<i64> = fresh.iter().map(|c| c.author.into()).collect();
        let bodies: Vec<String> = fresh.iter().map(|c| c.body.as_str().to_owned()).collect();
        let created: Vec<DateTime<Utc>> = fresh.iter().map(|c| c.created_at).collect();
        let updated: Vec<DateTime<Utc>> = fresh.iter().map(|c| c.updated_at).collect();

        sqlx::query(
            "INSERT INTO comments (article_id, id, author_id, body, created_at, updated_at)
             SELECT $1, * FROM UNNEST($2::bigint[], $3::bigint[], $4::text[], $5::timestamptz[], $6::timestamptz[])",
        )
        .bind(article_id)
        .bind(ids)
        .bind(authors)
        .bind(bodies)
        .bind(created)
        .bind(updated)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }
}

fn tag_names(contents: &ArticleContents) -> Vec<String> {
    contents
        .tags()
        .iter()
        .map(|tag| tag.as_str().to_owned())
        .collect()
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            author,
            contents,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (author_id, title, slug, description, body, comment_seq, version, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, 0, 0, $6, $7)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(i64::from(author))
        .bind(contents.title().as_str())
        .bind(contents.slug().as_str())
        .bind(contents.description().as_str())
        .bind(contents.body().as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let tags = tag_names(&contents);
        Self::sync_tags(&mut tx, row.id, tags.clone()).await?;
        tx.commit().await.map_err(map_sqlx)?;

        tracing::debug!(article_id = row.id, "inserted article");

        assemble(
            row,
            ArticleChildren {
                favorited_by: Vec::new(),
                comments: Vec::new(),
                tags,
            },
        )
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.load(Lookup::Id(i64::from(id))).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        self.load(Lookup::Slug(slug.as_str())).await
    }

    async fn save(&self, article: &mut Article) -> DomainResult<()> {
        let article_id = i64::from(article.id());
        let contents = article.contents();

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query(
            "UPDATE articles
             SET title = $1, slug = $2, description = $3, body = $4, comment_seq = $5,
                 updated_at = $6, version = version + 1
             WHERE id = $7 AND version = $8",
        )
        .bind(contents.title().as_str())
        .bind(contents.slug().as_str())
        .bind(contents.description().as_str())
        .bind(contents.body().as_str())
        .bind(article.comment_seq())
        .bind(article.updated_at())
        .bind(article_id)
        .bind(article.version())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM articles WHERE id = $1)",
            )
            .bind(article_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

            return Err(if exists {
                tracing::debug!(article_id, version = article.version(), "stale article save");
                DomainError::Conflict(format!(
                    "article {} was modified concurrently",
                    article.id()
                ))
            } else {
                DomainError::NotFound(format!("article {} not found", article.id()))
            });
        }

        let favorites: Vec<i64> = article.favorited_by().iter().map(|&u| u.into()).collect();
        Self::sync_favorites(&mut tx, article_id, favorites).await?;
        Self::sync_comments(&mut tx, article_id, article.comments()).await?;
        Self::sync_tags(&mut tx, article_id, tag_names(contents)).await?;

        tx.commit().await.map_err(map_sqlx)?;
        article.mark_saved();

        tracing::debug!(
            article_id,
            version = article.version(),
            favorites = article.favorited_count(),
            comments = article.comments().len(),
            "saved article"
        );
        Ok(())
    }

    async fn delete_by_id(&self, id: ArticleId) -> DomainResult<()> {
        let article_id = i64::from(id);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        for statement in [
            "DELETE FROM comments WHERE article_id = $1",
            "DELETE FROM article_favorites WHERE article_id = $1",
            "DELETE FROM article_tags WHERE article_id = $1",
        ] {
            sqlx::query(statement)
                .bind(article_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("article {id} not found")));
        }

        tx.commit().await.map_err(map_sqlx)?;
        tracing::debug!(article_id, "deleted article");
        Ok(())
    }
}
