//! The HTTP handlers for the category API.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{
    AppState, Error,
    category::{
        Category, CategoryId, CategoryRepository, CreateCategoryInput, CreateCategoryUseCase,
        DeleteCategoryUseCase, FindCategoryUseCase, GetCategoriesUseCase, UpdateCategoryInput,
        UpdateCategoryUseCase,
    },
};

/// The use cases behind the category routes.
#[derive(Debug, Clone)]
pub struct CategoriesController<R> {
    create: CreateCategoryUseCase<R>,
    get: GetCategoriesUseCase<R>,
    find: FindCategoryUseCase<R>,
    update: UpdateCategoryUseCase<R>,
    delete: DeleteCategoryUseCase<R>,
}

impl<R: CategoryRepository + Clone> CategoriesController<R> {
    /// Build every category use case on top of `repository`.
    pub fn new(repository: R) -> Self {
        Self {
            create: CreateCategoryUseCase::new(repository.clone()),
            get: GetCategoriesUseCase::new(repository.clone()),
            find: FindCategoryUseCase::new(repository.clone()),
            update: UpdateCategoryUseCase::new(repository.clone()),
            delete: DeleteCategoryUseCase::new(repository),
        }
    }
}

impl<C: Clone, T> FromRef<AppState<C, T>> for CategoriesController<C> {
    fn from_ref(state: &AppState<C, T>) -> Self {
        state.categories.clone()
    }
}

/// A route handler for creating a new category.
///
/// Responds with 201 and the created category.
pub async fn create_category_endpoint<R>(
    State(controller): State<CategoriesController<R>>,
    WithRejection(Json(input), _): WithRejection<Json<CreateCategoryInput>, Error>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    R: CategoryRepository + Clone,
{
    if input.name.trim().is_empty() {
        return Err(Error::InvalidBody("name cannot be empty".to_owned()));
    }

    let category = controller.create.execute(input).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// A route handler for listing all categories.
pub async fn get_categories_endpoint<R>(
    State(controller): State<CategoriesController<R>>,
) -> Result<Json<Vec<Category>>, Error>
where
    R: CategoryRepository + Clone,
{
    controller.get.execute().await.map(Json)
}

/// A route handler for getting a category by its ID.
///
/// Responds with 404 if there is no such category.
pub async fn get_category_endpoint<R>(
    State(controller): State<CategoriesController<R>>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Category>, Error>
where
    R: CategoryRepository + Clone,
{
    controller.find.execute(&category_id).await.map(Json)
}

/// A route handler for partially updating a category.
///
/// Responds with 404 if there is no such category.
pub async fn update_category_endpoint<R>(
    State(controller): State<CategoriesController<R>>,
    Path(category_id): Path<CategoryId>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateCategoryInput>, Error>,
) -> Result<Json<Category>, Error>
where
    R: CategoryRepository + Clone,
{
    if input.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(Error::InvalidBody("name cannot be empty".to_owned()));
    }

    controller.update.execute(&category_id, input).await.map(Json)
}

/// A route handler for deleting a category.
///
/// Responds with 204 on success and 404 if there is no such category.
pub async fn delete_category_endpoint<R>(
    State(controller): State<CategoriesController<R>>,
    Path(category_id): Path<CategoryId>,
) -> Result<StatusCode, Error>
where
    R: CategoryRepository + Clone,
{
    controller.delete.execute(&category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
