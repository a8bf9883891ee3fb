use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use super::Entity;
use crate::database::PgTable;

/// A dish served at one station of a dining commons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UcsbDiningCommonsMenuItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsbDiningCommonsMenuItemParams {
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl Entity for UcsbDiningCommonsMenuItem {
    type Key = i64;
    type Params = UcsbDiningCommonsMenuItemParams;

    const NAME: &'static str = "UCSBDiningCommonsMenuItem";
    const RESOURCE: &'static str = "ucsbdiningcommonsmenuitems";

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_params(params: UcsbDiningCommonsMenuItemParams) -> Self {
        Self {
            id: None,
            dining_commons_code: params.dining_commons_code,
            name: params.name,
            station: params.station,
        }
    }

    fn replace_fields(self, incoming: Self) -> Self {
        Self { id: self.id, ..incoming }
    }
}

impl PgTable for UcsbDiningCommonsMenuItem {
    const TABLE: &'static str = "ucsbdiningcommonsmenuitems";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["dining_commons_code", "name", "station"];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.dining_commons_code)
            .bind(&self.name)
            .bind(&self.station)
    }
}
