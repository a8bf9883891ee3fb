use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use super::{timestamp, Entity};
use crate::database::PgTable;

/// A student's request for a letter of recommendation from a professor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_requested: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequestParams {
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_requested: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl Entity for RecommendationRequest {
    type Key = i64;
    type Params = RecommendationRequestParams;

    const NAME: &'static str = "RecommendationRequests";
    const RESOURCE: &'static str = "recommendationrequests";

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_params(params: RecommendationRequestParams) -> Self {
        Self {
            id: None,
            requester_email: params.requester_email,
            professor_email: params.professor_email,
            explanation: params.explanation,
            date_requested: params.date_requested,
            date_needed: params.date_needed,
            done: params.done,
        }
    }

    fn replace_fields(self, incoming: Self) -> Self {
        Self { id: self.id, ..incoming }
    }
}

impl PgTable for RecommendationRequest {
    const TABLE: &'static str = "recommendationrequests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "professor_email",
        "explanation",
        "date_requested",
        "date_needed",
        "done",
    ];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.requester_email)
            .bind(&self.professor_email)
            .bind(&self.explanation)
            .bind(self.date_requested)
            .bind(self.date_needed)
            .bind(self.done)
    }
}
