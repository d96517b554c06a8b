use crate::modules::categories::core::category::Category;
use crate::shared::core::primitives::CategoryId;
use crate::shared::infrastructure::database::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryStore<Tx: Send>: Send + Sync {
    /// Every category, by ascending id.
    async fn list_categories(&self, tx: &mut Tx) -> Result<Vec<Category>, StoreError>;

    async fn get_category(
        &self,
        tx: &mut Tx,
        category_id: CategoryId,
    ) -> Result<Option<Category>, StoreError>;

    async fn create_category(&self, tx: &mut Tx, name: String) -> Result<Category, StoreError>;

    /// Returns `None` if the category does not exist.
    async fn rename_category(
        &self,
        tx: &mut Tx,
        category_id: CategoryId,
        name: String,
    ) -> Result<Option<Category>, StoreError>;

    /// Returns whether a category was deleted. Books keep their category id.
    async fn delete_category(&self, tx: &mut Tx, category_id: CategoryId)
    -> Result<bool, StoreError>;
}
