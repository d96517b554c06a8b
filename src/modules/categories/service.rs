use crate::modules::categories::adapters::outbound::category_store::CategoryStore;
use crate::modules::categories::core::category::{Category, CategoryError, category_name};
use crate::shared::core::primitives::{CategoryId, InvalidId};
use crate::shared::infrastructure::database::{
    StoreError, TransactionError, UnitOfWork, run_in_transaction,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("category {0} not found")]
    NotFound(CategoryId),

    #[error("internal error")]
    Internal,
}

impl From<CategoryError> for CategoryServiceError {
    fn from(err: CategoryError) -> Self {
        CategoryServiceError::InvalidInput(err.to_string())
    }
}

impl From<InvalidId> for CategoryServiceError {
    fn from(err: InvalidId) -> Self {
        CategoryServiceError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for CategoryServiceError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "category store failed");
        CategoryServiceError::Internal
    }
}

impl From<TransactionError<CategoryServiceError>> for CategoryServiceError {
    fn from(err: TransactionError<CategoryServiceError>) -> Self {
        match err {
            TransactionError::Work(inner) => inner,
            other => {
                tracing::error!(error = %other, "category transaction failed");
                CategoryServiceError::Internal
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError>;

    async fn get_category(&self, category_id: i64) -> Result<Category, CategoryServiceError>;

    async fn create_category(&self, name: String) -> Result<Category, CategoryServiceError>;

    async fn rename_category(
        &self,
        category_id: i64,
        name: String,
    ) -> Result<Category, CategoryServiceError>;

    async fn delete_category(&self, category_id: i64) -> Result<(), CategoryServiceError>;
}

pub struct StoreCategoryService<TDb, TCategories>
where
    TDb: UnitOfWork + 'static,
    TCategories: CategoryStore<TDb::Tx> + 'static,
{
    db: Arc<TDb>,
    categories: Arc<TCategories>,
}

impl<TDb, TCategories> StoreCategoryService<TDb, TCategories>
where
    TDb: UnitOfWork + 'static,
    TCategories: CategoryStore<TDb::Tx> + 'static,
{
    pub fn new(db: Arc<TDb>, categories: Arc<TCategories>) -> Self {
        Self { db, categories }
    }
}

#[async_trait]
impl<TDb, TCategories> CategoryService for StoreCategoryService<TDb, TCategories>
where
    TDb: UnitOfWork + 'static,
    TCategories: CategoryStore<TDb::Tx> + 'static,
{
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        let categories = Arc::clone(&self.categories);

        let all = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                Ok::<_, CategoryServiceError>(categories.list_categories(tx).await?)
            })
        })
        .await?;
        Ok(all)
    }

    async fn get_category(&self, category_id: i64) -> Result<Category, CategoryServiceError> {
        let category_id = CategoryId::new(category_id)?;
        let categories = Arc::clone(&self.categories);

        let category = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                categories
                    .get_category(tx, category_id)
                    .await?
                    .ok_or(CategoryServiceError::NotFound(category_id))
            })
        })
        .await?;
        Ok(category)
    }

    async fn create_category(&self, name: String) -> Result<Category, CategoryServiceError> {
        let name = category_name(&name)?;
        let categories = Arc::clone(&self.categories);

        let created = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                Ok::<_, CategoryServiceError>(categories.create_category(tx, name).await?)
            })
        })
        .await?;

        tracing::info!(category_id = %created.id, "category created");
        Ok(created)
    }

    async fn rename_category(
        &self,
        category_id: i64,
        name: String,
    ) -> Result<Category, CategoryServiceError> {
        let category_id = CategoryId::new(category_id)?;
        let name = category_name(&name)?;
        let categories = Arc::clone(&self.categories);

        let renamed = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                categories
                    .rename_category(tx, category_id, name)
                    .await?
                    .ok_or(CategoryServiceError::NotFound(category_id))
            })
        })
        .await?;

        tracing::info!(category_id = %category_id, "category renamed");
        Ok(renamed)
    }

    async fn delete_category(&self, category_id: i64) -> Result<(), CategoryServiceError> {
        let category_id = CategoryId::new(category_id)?;
        let categories = Arc::clone(&self.categories);

        run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                if categories.delete_category(tx, category_id).await? {
                    Ok(())
                } else {
                    Err(CategoryServiceError::NotFound(category_id))
                }
            })
        })
        .await?;

        tracing::info!(category_id = %category_id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod store_category_service_tests {
    use super::*;
    use crate::modules::categories::adapters::outbound::category_store_in_memory::InMemoryCategoryStore;
    use crate::shared::infrastructure::database::in_memory::InMemoryDatabase;
    use rstest::{fixture, rstest};

    type InMemoryCategories = StoreCategoryService<InMemoryDatabase, InMemoryCategoryStore>;

    #[fixture]
    fn before_each() -> (Arc<InMemoryDatabase>, InMemoryCategories) {
        let db = Arc::new(InMemoryDatabase::new());
        let service = StoreCategoryService::new(db.clone(), Arc::new(InMemoryCategoryStore::new()));
        (db, service)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_create_rename_and_list(
        before_each: (Arc<InMemoryDatabase>, InMemoryCategories),
    ) {
        let (_db, service) = before_each;

        let fiction = service.create_category(" Fiction ".into()).await.unwrap();
        service.create_category("History".into()).await.unwrap();
        let renamed = service
            .rename_category(fiction.id.get(), "Novels".into())
            .await
            .unwrap();

        assert_eq!(fiction.name, "Fiction");
        assert_eq!(renamed.name, "Novels");
        assert_eq!(service.get_category(fiction.id.get()).await, Ok(renamed.clone()));
        let names: Vec<String> = service
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Novels", "History"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_missing_and_invalid_categories(
        before_each: (Arc<InMemoryDatabase>, InMemoryCategories),
    ) {
        let (_db, service) = before_each;
        let missing = CategoryId::new(3).unwrap();

        assert_eq!(
            service.get_category(3).await,
            Err(CategoryServiceError::NotFound(missing))
        );
        assert_eq!(
            service.rename_category(3, "Plays".into()).await,
            Err(CategoryServiceError::NotFound(missing))
        );
        assert_eq!(
            service.delete_category(3).await,
            Err(CategoryServiceError::NotFound(missing))
        );
        assert_eq!(
            service.get_category(0).await,
            Err(CategoryServiceError::InvalidInput(
                "category id must be positive, got 0".into()
            ))
        );
        assert_eq!(
            service.create_category("  ".into()).await,
            Err(CategoryServiceError::InvalidInput(
                "category name must not be empty".into()
            ))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_a_category_once(
        before_each: (Arc<InMemoryDatabase>, InMemoryCategories),
    ) {
        let (_db, service) = before_each;
        let poetry = service.create_category("Poetry".into()).await.unwrap();

        assert_eq!(service.delete_category(poetry.id.get()).await, Ok(()));
        assert_eq!(
            service.delete_category(poetry.id.get()).await,
            Err(CategoryServiceError::NotFound(poetry.id))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hide_storage_failures(
        before_each: (Arc<InMemoryDatabase>, InMemoryCategories),
    ) {
        let (db, service) = before_each;
        db.set_offline(true);

        assert_eq!(
            service.list_categories().await,
            Err(CategoryServiceError::Internal)
        );
    }
}
