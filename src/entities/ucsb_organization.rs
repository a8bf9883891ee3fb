use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, Postgres};

use super::Entity;
use crate::database::PgTable;

/// A student organization, keyed by its registrar code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UcsbOrganization {
    /// Taken from the `orgCode` query parameter on update, so optional in bodies.
    #[serde(default)]
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsbOrganizationParams {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl Entity for UcsbOrganization {
    type Key = String;
    type Params = UcsbOrganizationParams;

    const NAME: &'static str = "UCSBOrganization";
    const RESOURCE: &'static str = "ucsborganizations";
    const KEY_PARAM: &'static str = "orgCode";

    fn key(&self) -> Option<String> {
        Some(self.org_code.clone())
    }

    fn from_params(params: UcsbOrganizationParams) -> Self {
        Self {
            org_code: params.org_code,
            org_translation_short: params.org_translation_short,
            org_translation: params.org_translation,
            inactive: params.inactive,
        }
    }

    fn replace_fields(self, incoming: Self) -> Self {
        Self {
            org_code: self.org_code,
            ..incoming
        }
    }
}

impl PgTable for UcsbOrganization {
    const TABLE: &'static str = "ucsborganizations";
    const KEY_COLUMN: &'static str = "org_code";
    const COLUMNS: &'static [&'static str] =
        &["org_translation_short", "org_translation", "inactive"];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.org_translation_short)
            .bind(&self.org_translation)
            .bind(self.inactive)
    }
}
