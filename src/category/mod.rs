//! Categories for grouping transactions.

mod db;
mod domain;
mod endpoints;
mod repository;
mod usecase;

pub use db::{SQLiteCategoryRepository, create_category_table};
pub use domain::{Category, CategoryBuilder, CategoryChanges, CategoryId};
pub use endpoints::{
    CategoriesController, create_category_endpoint, delete_category_endpoint,
    get_categories_endpoint, get_category_endpoint, update_category_endpoint,
};
pub use repository::CategoryRepository;
pub use usecase::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, FindCategoryUseCase,
    GetCategoriesUseCase, UpdateCategoryInput, UpdateCategoryUseCase,
};
