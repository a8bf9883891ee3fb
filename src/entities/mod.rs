//! Resource records served under `/api/<resource>`.
//!
//! Every resource is an independent table with a single key. The generic
//! controller in `handlers::resource` works against the [`Entity`] trait, so
//! adding a resource means adding a struct, its create parameters and the two
//! trait impls (`Entity` and `PgTable`).

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;

pub mod articles;
pub mod help_request;
pub mod menu_item_review;
pub mod recommendation_request;
pub mod timestamp;
pub mod ucsb_dining_commons_menu_item;
pub mod ucsb_organization;

pub use articles::{Article, ArticleParams};
pub use help_request::{HelpRequest, HelpRequestParams};
pub use menu_item_review::{MenuItemReview, MenuItemReviewParams};
pub use recommendation_request::{RecommendationRequest, RecommendationRequestParams};
pub use ucsb_dining_commons_menu_item::{UcsbDiningCommonsMenuItem, UcsbDiningCommonsMenuItemParams};
pub use ucsb_organization::{UcsbOrganization, UcsbOrganizationParams};

pub trait Entity:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    type Key: Clone + Debug + Display + FromStr + Ord + Send + Sync + 'static;

    /// Query parameters accepted by `POST /api/<resource>/post`.
    type Params: DeserializeOwned + Send + 'static;

    /// Name used in not-found and delete messages.
    const NAME: &'static str;

    /// URL segment under `/api`.
    const RESOURCE: &'static str;

    /// Query parameter carrying the key on get/put/delete.
    const KEY_PARAM: &'static str = "id";

    /// `None` until the store has assigned a generated key.
    fn key(&self) -> Option<Self::Key>;

    /// Store a generated key. Natural-key entities keep the default.
    fn assign_id(&mut self, _id: i64) {}

    fn from_params(params: Self::Params) -> Self;

    /// Overwrite every non-key field of `self` with `incoming`.
    fn replace_fields(self, incoming: Self) -> Self;
}
