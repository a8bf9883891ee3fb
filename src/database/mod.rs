pub mod manager;
pub mod repository;

use std::sync::Arc;

use crate::entities::{
    Article, HelpRequest, MenuItemReview, RecommendationRequest, UcsbDiningCommonsMenuItem,
    UcsbOrganization,
};

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{MemoryRepository, PgRepository, PgTable, Repository};

/// One repository per resource, shared by the router.
#[derive(Clone)]
pub struct Repositories {
    pub articles: Arc<dyn Repository<Article>>,
    pub help_requests: Arc<dyn Repository<HelpRequest>>,
    pub recommendation_requests: Arc<dyn Repository<RecommendationRequest>>,
    pub menu_items: Arc<dyn Repository<UcsbDiningCommonsMenuItem>>,
    pub organizations: Arc<dyn Repository<UcsbOrganization>>,
    pub menu_item_reviews: Arc<dyn Repository<MenuItemReview>>,
    /// Present when backed by Postgres; used by `/health`.
    pub database: Option<DatabaseManager>,
}

impl Repositories {
    pub fn postgres(database: DatabaseManager) -> Self {
        let pool = database.pool();
        Self {
            articles: Arc::new(PgRepository::new(pool.clone())),
            help_requests: Arc::new(PgRepository::new(pool.clone())),
            recommendation_requests: Arc::new(PgRepository::new(pool.clone())),
            menu_items: Arc::new(PgRepository::new(pool.clone())),
            organizations: Arc::new(PgRepository::new(pool.clone())),
            menu_item_reviews: Arc::new(PgRepository::new(pool)),
            database: Some(database),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            articles: Arc::new(MemoryRepository::new()),
            help_requests: Arc::new(MemoryRepository::new()),
            recommendation_requests: Arc::new(MemoryRepository::new()),
            menu_items: Arc::new(MemoryRepository::new()),
            organizations: Arc::new(MemoryRepository::new()),
            menu_item_reviews: Arc::new(MemoryRepository::new()),
            database: None,
        }
    }
}
