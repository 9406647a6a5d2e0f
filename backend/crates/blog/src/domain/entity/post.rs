//! Post Entity
//!
//! The author is fixed at creation. It has a getter but no setter, and
//! [`Post::apply`] only touches content fields.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    post_id: PostId,
    author: UserId,
    pub title: String,
    pub content: String,
    pub category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Content changes for an existing post. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl Post {
    /// Create a new post owned by `author`
    pub fn new(
        author: UserId,
        title: String,
        content: String,
        category_id: CategoryId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id: PostId::new(),
            author,
            title,
            content,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Restore from storage
    pub fn restore(
        post_id: PostId,
        author: UserId,
        title: String,
        content: String,
        category_id: CategoryId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id,
            author,
            title,
            content,
            category_id,
            created_at,
            updated_at,
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    /// Owner of the post
    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply content changes and bump `updated_at`
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_apply_keeps_author_and_unset_fields() {
        let author = UserId::new();
        let t0 = Utc::now();
        let mut post = Post::new(author, "t".into(), "c".into(), CategoryId::new(), t0);
        let original_category = post.category_id;

        post.apply(
            PostChanges {
                title: Some("new title".into()),
                ..Default::default()
            },
            t0 + Duration::seconds(5),
        );

        assert_eq!(post.title, "new title");
        assert_eq!(post.content, "c");
        assert_eq!(post.category_id, original_category);
        assert_eq!(*post.author(), author);
        assert_eq!(post.created_at(), t0);
        assert_eq!(post.updated_at(), t0 + Duration::seconds(5));
    }
}
