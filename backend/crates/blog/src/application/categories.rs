//! Category Use Cases

use std::sync::Arc;

use kernel::error::violation::FieldViolation;

use crate::domain::entity::category::{CATEGORY_NAME_MAX_LENGTH, Category, NewCategory};
use crate::domain::repository::CategoryRepository;
use crate::error::{BlogError, BlogResult, CATEGORY_EXISTS};

pub struct ListCategoriesUseCase<B>
where
    B: CategoryRepository,
{
    repo: Arc<B>,
}

impl<B> ListCategoriesUseCase<B>
where
    B: CategoryRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    /// All categories sorted by name
    pub async fn execute(&self) -> BlogResult<Vec<Category>> {
        self.repo.list_categories().await
    }
}

pub struct CreateCategoryUseCase<B>
where
    B: CategoryRepository,
{
    repo: Arc<B>,
}

impl<B> CreateCategoryUseCase<B>
where
    B: CategoryRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, name: Option<String>) -> BlogResult<Category> {
        let name = name.unwrap_or_default().trim().to_string();

        if name.is_empty() {
            return Err(BlogError::Validation(vec![FieldViolation::new(
                "name",
                "Name is required",
            )]));
        }
        if name.chars().count() > CATEGORY_NAME_MAX_LENGTH {
            return Err(BlogError::Validation(vec![FieldViolation::new(
                "name",
                format!("Name must be at most {CATEGORY_NAME_MAX_LENGTH} characters"),
            )]));
        }

        if self.repo.exists_category_name(&name).await? {
            return Err(BlogError::Conflict(CATEGORY_EXISTS));
        }

        let category = self
            .repo
            .insert_category(NewCategory { name })
            .await
            .map_err(|e| match e {
                BlogError::DuplicateKey => BlogError::Conflict(CATEGORY_EXISTS),
                other => other,
            })?;

        tracing::info!(category_id = %category.category_id, name = %category.name, "Category created");

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryBlogRepository;

    #[tokio::test]
    async fn test_create_and_list_sorted() {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let create = CreateCategoryUseCase::new(repo.clone());

        create.execute(Some("Travel".into())).await.unwrap();
        let tech = create.execute(Some("  Tech  ".into())).await.unwrap();
        assert_eq!(tech.name, "Tech");

        let names: Vec<String> = ListCategoriesUseCase::new(repo)
            .execute()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Tech", "Travel"]);
    }

    #[tokio::test]
    async fn test_name_required() {
        let uc = CreateCategoryUseCase::new(Arc::new(InMemoryBlogRepository::new()));

        for name in [None, Some(String::new()), Some("   ".into())] {
            let err = uc.execute(name).await.unwrap_err();
            assert!(matches!(err, BlogError::Validation(ref v) if v[0].field == "name"));
        }

        let too_long = "x".repeat(CATEGORY_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            uc.execute(Some(too_long)).await,
            Err(BlogError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let uc = CreateCategoryUseCase::new(Arc::new(InMemoryBlogRepository::new()));
        uc.execute(Some("Tech".into())).await.unwrap();

        let err = uc.execute(Some("Tech".into())).await.unwrap_err();
        assert!(matches!(err, BlogError::Conflict(CATEGORY_EXISTS)));
    }
}
