// tests/support/helpers.rs
use std::sync::Arc;

use conduit_core::application::ports::time::Clock;
use conduit_core::application::services::ApplicationServices;
use conduit_core::domain::article::ArticleRepository;

use super::mocks::{FixedClock, InMemoryArticleRepository};

/// Services backed by `repo` and a fixed clock.
pub fn build_services(repo: Arc<InMemoryArticleRepository>) -> ApplicationServices {
    let repo: Arc<dyn ArticleRepository> = repo;
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    ApplicationServices::new(repo, clock)
}
