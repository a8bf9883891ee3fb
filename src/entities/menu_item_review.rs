use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use super::{timestamp, Entity};
use crate::database::PgTable;

/// A student's star rating of a dining commons menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReview {
    #[serde(default)]
    pub id: Option<i64>,
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReviewParams {
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl Entity for MenuItemReview {
    type Key = i64;
    type Params = MenuItemReviewParams;

    const NAME: &'static str = "MenuItemReview";
    const RESOURCE: &'static str = "menuitemreviews";

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_params(params: MenuItemReviewParams) -> Self {
        Self {
            id: None,
            item_id: params.item_id,
            reviewer_email: params.reviewer_email,
            stars: params.stars,
            date_reviewed: params.date_reviewed,
            comments: params.comments,
        }
    }

    fn replace_fields(self, incoming: Self) -> Self {
        Self { id: self.id, ..incoming }
    }
}

impl PgTable for MenuItemReview {
    const TABLE: &'static str = "menuitemreviews";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["item_id", "reviewer_email", "stars", "date_reviewed", "comments"];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(self.item_id)
            .bind(&self.reviewer_email)
            .bind(self.stars)
            .bind(self.date_reviewed)
            .bind(&self.comments)
    }
}
