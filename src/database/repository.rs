use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, PgPool, Postgres,
};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::entities::Entity;

/// Persistence capabilities for one entity type.
///
/// `save` inserts when the entity has no key yet and overwrites the stored
/// row otherwise; it returns the row as stored, key included.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError>;

    async fn find_by_id(&self, id: &E::Key) -> Result<Option<E>, DatabaseError>;

    async fn save(&self, entity: E) -> Result<E, DatabaseError>;

    async fn delete(&self, entity: &E) -> Result<(), DatabaseError>;
}

/// Table layout of an entity stored in Postgres.
pub trait PgTable: Entity + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;

    /// Non-key columns, in the order `bind_columns` binds them.
    const COLUMNS: &'static [&'static str];

    fn bind_columns<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments>;
}

fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn insert_sql(table: &str, columns: &[&str]) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table,
        columns.join(", "),
        placeholders(1, columns.len())
    )
}

pub(crate) fn upsert_sql(table: &str, key_column: &str, columns: &[&str]) -> String {
    let updates = columns
        .iter()
        .map(|c| format!("{} = EXCLUDED.{}", c, c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}, {}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {} RETURNING *",
        table,
        key_column,
        columns.join(", "),
        placeholders(1, columns.len() + 1),
        key_column,
        updates
    )
}

pub struct PgRepository<E> {
    pool: PgPool,
    _phantom: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<E> Repository<E> for PgRepository<E>
where
    E: PgTable,
    E::Key: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres>,
{
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", E::TABLE, E::KEY_COLUMN);
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: &E::Key) -> Result<Option<E>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE {} = $1", E::TABLE, E::KEY_COLUMN);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id.clone())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, entity: E) -> Result<E, DatabaseError> {
        let key = entity.key();
        let sql = match key {
            Some(_) => upsert_sql(E::TABLE, E::KEY_COLUMN, E::COLUMNS),
            None => insert_sql(E::TABLE, E::COLUMNS),
        };

        let mut query = sqlx::query_as::<_, E>(&sql);
        if let Some(key) = key {
            query = query.bind(key);
        }
        let saved = entity.bind_columns(query).fetch_one(&self.pool).await?;
        tracing::debug!("Saved {} with id {:?}", E::NAME, saved.key());
        Ok(saved)
    }

    async fn delete(&self, entity: &E) -> Result<(), DatabaseError> {
        let key = entity.key().ok_or(DatabaseError::KeyNotAssigned(E::NAME))?;
        let sql = format!("DELETE FROM {} WHERE {} = $1", E::TABLE, E::KEY_COLUMN);
        sqlx::query(&sql).bind(key).execute(&self.pool).await?;
        Ok(())
    }
}

/// Process-local store for development without Postgres and for tests.
pub struct MemoryRepository<E: Entity> {
    rows: RwLock<BTreeMap<E::Key, E>>,
    sequence: AtomicI64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &E::Key) -> Result<Option<E>, DatabaseError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn save(&self, mut entity: E) -> Result<E, DatabaseError> {
        let key = match entity.key() {
            Some(key) => key,
            None => {
                let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
                entity.assign_id(id);
                entity.key().ok_or(DatabaseError::KeyNotAssigned(E::NAME))?
            }
        };
        self.rows.write().await.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, entity: &E) -> Result<(), DatabaseError> {
        if let Some(key) = entity.key() {
            self.rows.write().await.remove(&key);
        }
        Ok(())
    }
}
