//! Category repository over the `categories` table.

use crate::modules::catalog::adapters::outbound::inventory_postgres::decode_error;
use crate::modules::categories::adapters::outbound::category_store::CategoryStore;
use crate::modules::categories::core::category::Category;
use crate::shared::core::primitives::CategoryId;
use crate::shared::infrastructure::database::StoreError;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const RENAME_CATEGORY_SQL: &str = include_str!("sql/rename_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");

#[derive(Debug, Clone, Copy, Default)]
pub struct PgCategoryStore;

impl PgCategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CategoryStore<Transaction<'static, Postgres>> for PgCategoryStore {
    async fn list_categories(
        &self,
        tx: &mut Transaction<'static, Postgres>,
    ) -> Result<Vec<Category>, StoreError> {
        let categories = query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await?;
        Ok(categories)
    }

    async fn get_category(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        let category = query_as::<Postgres, Category>(GET_CATEGORY_SQL)
            .bind(category_id.get())
            .fetch_optional(&mut **tx)
            .await?;
        Ok(category)
    }

    async fn create_category(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        name: String,
    ) -> Result<Category, StoreError> {
        let category = query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;
        Ok(category)
    }

    async fn rename_category(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        category_id: CategoryId,
        name: String,
    ) -> Result<Option<Category>, StoreError> {
        let category = query_as::<Postgres, Category>(RENAME_CATEGORY_SQL)
            .bind(category_id.get())
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(category)
    }

    async fn delete_category(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        category_id: CategoryId,
    ) -> Result<bool, StoreError> {
        let result = query(DELETE_CATEGORY_SQL)
            .bind(category_id.get())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let id: i64 = row.try_get("id")?;

        Ok(Self {
            id: CategoryId::new(id).map_err(|e| decode_error("id", e))?,
            name: row.try_get("name")?,
        })
    }
}
