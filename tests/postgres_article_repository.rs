// Runs against a live PostgreSQL; skipped unless RUN_DB_INTEGRATION=1.
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use conduit_core::domain::article::{
    Article, ArticleBody, ArticleContents, ArticleDescription, ArticleId, ArticleRepository,
    ArticleTitle, CommentBody, CommentId, NewArticle, Tag,
};
use conduit_core::domain::errors::DomainError;
use conduit_core::infrastructure::database::init_pool;
use conduit_core::infrastructure::repositories::PostgresArticleRepository;
use sqlx::PgPool;

mod support;

use support::{fixed_now, user};

const SCHEMA: &str = include_str!("fixtures/schema.sql");

async fn repository() -> Option<(PgPool, PostgresArticleRepository)> {
    if std::env::var("RUN_DB_INTEGRATION").unwrap_or_default() != "1" {
        eprintln!("skipping integration test: set RUN_DB_INTEGRATION=1 and DATABASE_URL to run");
        return None;
    }

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let pool = init_pool(&database_url, 4).await.expect("init pool");
    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("apply schema");

    Some((pool.clone(), PostgresArticleRepository::new(pool)))
}

/// Titles (and so slugs) unique across runs sharing one database.
fn unique_title(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix} {nanos} {}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

fn new_article(author: i64, title: &str, tags: &[&str]) -> NewArticle {
    NewArticle {
        author: user(author),
        contents: ArticleContents::new(
            ArticleTitle::new(title).unwrap(),
            ArticleDescription::new("Desc").unwrap(),
            ArticleBody::new("Body").unwrap(),
            tags.iter().map(|t| Tag::new(*t).unwrap()),
        ),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

async fn reload(repo: &PostgresArticleRepository, id: ArticleId) -> Article {
    repo.find_by_id(id)
        .await
        .expect("find_by_id")
        .expect("article exists")
}

async fn child_rows(pool: &PgPool, table: &str, id: ArticleId) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {table} WHERE article_id = $1"
    ))
    .bind(i64::from(id))
    .fetch_one(pool)
    .await
    .expect("count child rows")
}

#[tokio::test]
async fn insert_then_find_round_trips_contents_and_tags() {
    let Some((_pool, repo)) = repository().await else {
        return;
    };

    let title = unique_title("Round Trip");
    let inserted = repo
        .insert(new_article(1, &title, &["rust", "db", "rust"]))
        .await
        .expect("insert");
    assert_eq!(inserted.version(), 0);

    let by_id = reload(&repo, inserted.id()).await;
    let by_slug = repo
        .find_by_slug(inserted.contents().slug())
        .await
        .expect("find_by_slug")
        .expect("article exists");

    for found in [&by_id, &by_slug] {
        assert_eq!(found.id(), inserted.id());
        assert_eq!(found.author(), user(1));
        assert_eq!(found.contents().title().as_str(), title);
        let tags: Vec<&str> = found.contents().tags().iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, ["db", "rust"]);
        assert_eq!(found.created_at(), fixed_now());
        assert_eq!(found.comment_seq(), 0);
        assert_eq!(found.favorited_count(), 0);
    }

    repo.delete_by_id(inserted.id()).await.expect("cleanup");
}

#[tokio::test]
async fn save_persists_and_removes_favorites_and_comments() {
    let Some((_pool, repo)) = repository().await else {
        return;
    };

    let id = repo
        .insert(new_article(1, &unique_title("Saved"), &[]))
        .await
        .expect("insert")
        .id();

    let mut article = reload(&repo, id).await;
    article.after_user_favorites_article(user(2));
    article.after_user_favorites_article(user(3));
    let first = article
        .add_comment(user(2), CommentBody::new("first").unwrap(), fixed_now())
        .id;
    article.add_comment(user(3), CommentBody::new("second").unwrap(), fixed_now());
    repo.save(&mut article).await.expect("save additions");
    assert_eq!(article.version(), 1);

    let stored = reload(&repo, id).await;
    assert_eq!(stored.favorited_count(), 2);
    assert_eq!(stored.comments().len(), 2);
    assert_eq!(stored.version(), 1);

    // The saved copy carries the new version and can be saved again.
    article.after_user_unfavorites_article(user(2));
    article.remove_comment_by_user(user(1), first).expect("author removes");
    repo.save(&mut article).await.expect("save removals");

    let mut stored = reload(&repo, id).await;
    assert!(!stored.update_favorite_by_user(user(2)).is_favorited());
    assert!(stored.update_favorite_by_user(user(3)).is_favorited());
    let ids: Vec<CommentId> = stored.comments().iter().map(|c| c.id).collect();
    assert_eq!(ids, [CommentId(2)]);
    assert_eq!(stored.comment_seq(), 2);

    let next = stored
        .add_comment(user(4), CommentBody::new("third").unwrap(), fixed_now())
        .id;
    assert_eq!(next, CommentId(3));
    repo.save(&mut stored).await.expect("save after reload");

    let ids: Vec<CommentId> = reload(&repo, id)
        .await
        .comments()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, [CommentId(2), CommentId(3)]);

    repo.delete_by_id(id).await.expect("cleanup");
}

#[tokio::test]
async fn interleaved_saves_do_not_lose_writes() {
    let Some((_pool, repo)) = repository().await else {
        return;
    };

    let id = repo
        .insert(new_article(1, &unique_title("Contended"), &[]))
        .await
        .expect("insert")
        .id();

    let mut w1 = reload(&repo, id).await;
    let mut w2 = reload(&repo, id).await;
    w1.after_user_favorites_article(user(2));
    w1.add_comment(user(2), CommentBody::new("from user 2").unwrap(), fixed_now());
    w2.after_user_favorites_article(user(3));
    w2.add_comment(user(3), CommentBody::new("from user 3").unwrap(), fixed_now());

    repo.save(&mut w1).await.expect("first writer");
    let err = repo.save(&mut w2).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");

    let stored = reload(&repo, id).await;
    let favorited: Vec<_> = stored.favorited_by().iter().copied().collect();
    assert_eq!(favorited, [user(2)]);
    let bodies: Vec<&str> = stored.comments().iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["from user 2"]);

    let mut retry = stored;
    retry.after_user_favorites_article(user(3));
    let retried = retry
        .add_comment(user(3), CommentBody::new("from user 3").unwrap(), fixed_now())
        .id;
    repo.save(&mut retry).await.expect("retry");
    assert_eq!(retried, CommentId(2));

    let stored = reload(&repo, id).await;
    assert_eq!(stored.favorited_count(), 2);
    let bodies: Vec<&str> = stored.comments().iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["from user 2", "from user 3"]);

    repo.delete_by_id(id).await.expect("cleanup");
}

#[tokio::test]
async fn delete_removes_children_and_unknown_id_is_not_found() {
    let Some((pool, repo)) = repository().await else {
        return;
    };

    let id = repo
        .insert(new_article(1, &unique_title("Doomed"), &["gone"]))
        .await
        .expect("insert")
        .id();
    let mut article = reload(&repo, id).await;
    article.after_user_favorites_article(user(2));
    article.add_comment(user(2), CommentBody::new("bye").unwrap(), fixed_now());
    repo.save(&mut article).await.expect("save");

    repo.delete_by_id(id).await.expect("delete");

    for table in ["comments", "article_favorites", "article_tags"] {
        assert_eq!(child_rows(&pool, table, id).await, 0, "{table}");
    }
    assert!(repo.find_by_id(id).await.expect("find").is_none());

    let err = repo.delete_by_id(id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    let err = repo.save(&mut article).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_slug_is_conflict() {
    let Some((_pool, repo)) = repository().await else {
        return;
    };

    let title = unique_title("Taken");
    let first = repo
        .insert(new_article(1, &title, &[]))
        .await
        .expect("insert");
    let err = repo.insert(new_article(2, &title, &[])).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");

    let other = repo
        .insert(new_article(2, &unique_title("Other"), &[]))
        .await
        .expect("insert other");
    let mut moved = reload(&repo, other.id()).await;
    moved.update_article(
        conduit_core::domain::article::ArticleUpdateRequest::builder()
            .title(ArticleTitle::new(title.as_str()).unwrap())
            .build(),
    );
    let err = repo.save(&mut moved).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {err:?}");

    repo.delete_by_id(first.id()).await.expect("cleanup");
    repo.delete_by_id(other.id()).await.expect("cleanup");
}
