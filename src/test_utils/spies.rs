//! Repositories that record their calls and keep their rows in memory.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    Error, Resource,
    category::{Category, CategoryChanges, CategoryRepository},
    transaction::{Transaction, TransactionChanges, TransactionRepository},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct SpyCategoryRepository {
    // Use Arc Mutex so that clones of the repository share state and can be
    // passed into use cases while the test keeps a handle for assertions.
    create_calls: Arc<Mutex<Vec<Category>>>,
    update_calls: Arc<Mutex<Vec<(String, CategoryChanges)>>>,
    delete_calls: Arc<Mutex<Vec<String>>>,
    categories: Arc<Mutex<Vec<Category>>>,
}

impl SpyCategoryRepository {
    pub(crate) fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(Mutex::new(categories)),
            ..Default::default()
        }
    }

    pub(crate) fn create_calls(&self) -> Vec<Category> {
        self.create_calls.lock().unwrap().clone()
    }

    pub(crate) fn update_calls(&self) -> Vec<(String, CategoryChanges)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategoryRepository for SpyCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, Error> {
        self.create_calls.lock().unwrap().push(category.clone());
        self.categories.lock().unwrap().push(category.clone());

        Ok(category)
    }

    async fn find_all(&self) -> Result<Vec<Category>, Error> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, Error> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }

    async fn update(&self, id: &str, changes: CategoryChanges) -> Result<Category, Error> {
        self.update_calls
            .lock()
            .unwrap()
            .push((id.to_owned(), changes.clone()));

        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(|| Error::NotFound {
                resource: Resource::Category,
                id: id.to_owned(),
            })?;
        *category = category.clone().apply(&changes);

        Ok(category.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.delete_calls.lock().unwrap().push(id.to_owned());

        let mut categories = self.categories.lock().unwrap();
        let count_before = categories.len();
        categories.retain(|category| category.id != id);

        if categories.len() == count_before {
            return Err(Error::NotFound {
                resource: Resource::Category,
                id: id.to_owned(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpyTransactionRepository {
    create_calls: Arc<Mutex<Vec<Transaction>>>,
    update_calls: Arc<Mutex<Vec<(String, TransactionChanges)>>>,
    delete_calls: Arc<Mutex<Vec<String>>>,
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl SpyTransactionRepository {
    pub(crate) fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
            ..Default::default()
        }
    }

    pub(crate) fn create_calls(&self) -> Vec<Transaction> {
        self.create_calls.lock().unwrap().clone()
    }

    pub(crate) fn update_calls(&self) -> Vec<(String, TransactionChanges)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for SpyTransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction, Error> {
        self.create_calls.lock().unwrap().push(transaction.clone());
        self.transactions.lock().unwrap().push(transaction.clone());

        Ok(transaction)
    }

    async fn find_all(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, Error> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|transaction| transaction.id == id)
            .cloned())
    }

    async fn update(&self, id: &str, changes: TransactionChanges) -> Result<Transaction, Error> {
        self.update_calls
            .lock()
            .unwrap()
            .push((id.to_owned(), changes.clone()));

        let mut transactions = self.transactions.lock().unwrap();
        let transaction = transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or_else(|| Error::NotFound {
                resource: Resource::Transaction,
                id: id.to_owned(),
            })?;
        *transaction = transaction.clone().apply(&changes);

        Ok(transaction.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.delete_calls.lock().unwrap().push(id.to_owned());

        let mut transactions = self.transactions.lock().unwrap();
        let count_before = transactions.len();
        transactions.retain(|transaction| transaction.id != id);

        if transactions.len() == count_before {
            return Err(Error::NotFound {
                resource: Resource::Transaction,
                id: id.to_owned(),
            });
        }

        Ok(())
    }
}
