use crate::modules::categories::adapters::outbound::category_store::CategoryStore;
use crate::modules::categories::core::category::Category;
use crate::shared::core::primitives::CategoryId;
use crate::shared::infrastructure::database::StoreError;
use crate::shared::infrastructure::database::in_memory::InMemoryTx;

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryCategoryStore;

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CategoryStore<InMemoryTx> for InMemoryCategoryStore {
    async fn list_categories(&self, tx: &mut InMemoryTx) -> Result<Vec<Category>, StoreError> {
        Ok(tx.tables().categories.values().cloned().collect())
    }

    async fn get_category(
        &self,
        tx: &mut InMemoryTx,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        Ok(tx.tables().categories.get(&category_id).cloned())
    }

    async fn create_category(
        &self,
        tx: &mut InMemoryTx,
        name: String,
    ) -> Result<Category, StoreError> {
        let tables = tx.tables_mut();
        let id = CategoryId::new(tables.last_category_id + 1)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tables.last_category_id = id.get();

        let category = Category { id, name };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn rename_category(
        &self,
        tx: &mut InMemoryTx,
        category_id: CategoryId,
        name: String,
    ) -> Result<Option<Category>, StoreError> {
        let Some(category) = tx.tables_mut().categories.get_mut(&category_id) else {
            return Ok(None);
        };
        category.name = name;
        Ok(Some(category.clone()))
    }

    async fn delete_category(
        &self,
        tx: &mut InMemoryTx,
        category_id: CategoryId,
    ) -> Result<bool, StoreError> {
        Ok(tx.tables_mut().categories.remove(&category_id).is_some())
    }
}
