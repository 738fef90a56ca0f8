use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::{
    dto::{AddPostRequest, ListPostsQuery, PostPage, UpdatePostRequest, validate_uuid},
    errors::ApiError,
    models::{NewPost, Post, PostChanges},
    store::{FindManyArgs, PostStore, StoreError},
};

pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Post operations on top of an injected record store.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// One page of posts plus the cursor for the next page, if any.
    ///
    /// Fetches one record past the page; that record's id becomes
    /// `next_cursor` and is the first item of the following page.
    pub async fn list(&self, query: ListPostsQuery) -> Result<PostPage, ApiError> {
        query
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT) as usize;

        let mut records = self
            .store
            .find_many(FindManyArgs {
                take: limit + 1,
                // An empty cursor means "start from the newest post"
                cursor: query.cursor.filter(|cursor| !cursor.is_empty()),
            })
            .await?;

        let next_cursor = if records.len() > limit {
            records.pop().map(|record| record.id)
        } else {
            None
        };

        let items: Vec<Post> = records.into_iter().rev().map(Post::from).collect();

        debug!(limit, returned = items.len(), has_more = next_cursor.is_some(), "Listed posts");

        Ok(PostPage { items, next_cursor })
    }

    pub async fn by_id(&self, id: &str) -> Result<Post, ApiError> {
        self.store
            .find_unique(id)
            .await?
            .map(Post::from)
            .ok_or_else(|| ApiError::NotFound(format!("No post with id '{}'", id)))
    }

    pub async fn add(&self, payload: AddPostRequest) -> Result<Post, ApiError> {
        payload
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        let record = self
            .store
            .create(NewPost {
                id: payload.id,
                title: payload.title,
                text: payload.text,
            })
            .await?;

        info!(post_id = %record.id, "Post created");

        Ok(record.into())
    }

    pub async fn update(&self, id: &str, payload: UpdatePostRequest) -> Result<Post, ApiError> {
        validate_uuid(id).map_err(|e| ApiError::ValidationError(format!("id: {}", e)))?;
        payload
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        let changes = PostChanges {
            title: payload.title,
            text: payload.text,
        };

        let record = self.store.update(id, changes).await.map_err(|e| match e {
            StoreError::NotFound(_) => {
                ApiError::NotFound(format!("No post with id '{}' to update", id))
            }
            other => other.into(),
        })?;

        info!(post_id = %record.id, "Post updated");

        Ok(record.into())
    }

    pub async fn count(&self) -> Result<usize, ApiError> {
        Ok(self.store.count().await?)
    }
}
