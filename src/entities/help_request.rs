use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use super::{timestamp, Entity};
use crate::database::PgTable;

/// A team's request for help during a lab section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestParams {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

impl Entity for HelpRequest {
    type Key = i64;
    type Params = HelpRequestParams;

    const NAME: &'static str = "HelpRequest";
    const RESOURCE: &'static str = "helprequests";

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_params(params: HelpRequestParams) -> Self {
        Self {
            id: None,
            requester_email: params.requester_email,
            team_id: params.team_id,
            table_or_breakout_room: params.table_or_breakout_room,
            request_time: params.request_time,
            explanation: params.explanation,
            solved: params.solved,
        }
    }

    fn replace_fields(self, incoming: Self) -> Self {
        Self { id: self.id, ..incoming }
    }
}

impl PgTable for HelpRequest {
    const TABLE: &'static str = "helprequests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "team_id",
        "table_or_breakout_room",
        "request_time",
        "explanation",
        "solved",
    ];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.requester_email)
            .bind(&self.team_id)
            .bind(&self.table_or_breakout_room)
            .bind(self.request_time)
            .bind(&self.explanation)
            .bind(self.solved)
    }
}
