//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState,
    category::{
        CategoryRepository, create_category_endpoint, delete_category_endpoint,
        get_categories_endpoint, get_category_endpoint, update_category_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        TransactionRepository, create_transaction_endpoint, delete_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<C, T>(state: AppState<C, T>) -> Router
where
    C: CategoryRepository + Clone + 'static,
    T: TransactionRepository + Clone + 'static,
{
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint::<C>).post(create_category_endpoint::<C>),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint::<C>)
                .patch(update_category_endpoint::<C>)
                .delete(delete_category_endpoint::<C>),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<T>)
                .patch(update_transaction_endpoint::<T>)
                .delete(delete_transaction_endpoint::<T>),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
