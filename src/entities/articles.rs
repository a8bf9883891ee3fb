use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use super::{timestamp, Entity};
use crate::database::PgTable;

/// A link to an article submitted by a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub submitter_email: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_added: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleParams {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub submitter_email: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_added: NaiveDateTime,
}

impl Entity for Article {
    type Key = i64;
    type Params = ArticleParams;

    const NAME: &'static str = "Articles";
    const RESOURCE: &'static str = "articles";

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_params(params: ArticleParams) -> Self {
        Self {
            id: None,
            title: params.title,
            url: params.url,
            explanation: params.explanation,
            submitter_email: params.submitter_email,
            date_added: params.date_added,
        }
    }

    fn replace_fields(self, incoming: Self) -> Self {
        Self { id: self.id, ..incoming }
    }
}

impl PgTable for Article {
    const TABLE: &'static str = "articles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["title", "url", "explanation", "submitter_email", "date_added"];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.title)
            .bind(&self.url)
            .bind(&self.explanation)
            .bind(&self.submitter_email)
            .bind(self.date_added)
    }
}
