use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::{FindManyArgs, PostStore, StoreError};
use crate::models::{NewPost, PostChanges, PostRecord};

/// In-memory record store.
///
/// `DashMap` shards its locks internally, so each call below is atomic
/// for the record it touches without a global mutex.
#[derive(Clone, Default)]
pub struct MemoryPostStore {
    posts: Arc<DashMap<String, PostRecord>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<PostRecord, StoreError> {
        let id = post.id.unwrap_or_else(|| Uuid::new_v4().to_string());

        match self.posts.entry(id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(id)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let record = PostRecord {
                    id,
                    title: post.title,
                    text: post.text,
                    created_at: now,
                    updated_at: now,
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_unique(&self, id: &str) -> Result<Option<PostRecord>, StoreError> {
        Ok(self.posts.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_many(&self, args: FindManyArgs) -> Result<Vec<PostRecord>, StoreError> {
        let mut posts: Vec<PostRecord> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        // Newest first
        posts.sort_by_key(|post| Reverse((post.created_at, post.seq)));

        let start = match args.cursor.as_deref() {
            Some(cursor) => match posts.iter().position(|post| post.id == cursor) {
                Some(index) => index,
                None => return Ok(Vec::new()),
            },
            None => 0,
        };

        Ok(posts.into_iter().skip(start).take(args.take).collect())
    }

    async fn update(&self, id: &str, changes: PostChanges) -> Result<PostRecord, StoreError> {
        let mut entry = self
            .posts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let record = entry.value_mut();
        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(text) = changes.text {
            record.text = text;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.posts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            id: None,
            title: title.to_string(),
            text: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_generates_uuid_id() {
        let store = MemoryPostStore::new();

        let record = store.create(new_post("first")).await.unwrap();

        assert!(Uuid::parse_str(&record.id).is_ok());
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let store = MemoryPostStore::new();
        let id = Uuid::new_v4().to_string();

        let mut post = new_post("original");
        post.id = Some(id.clone());
        store.create(post).await.unwrap();

        let mut duplicate = new_post("duplicate");
        duplicate.id = Some(id.clone());
        let err = store.create(duplicate).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict(conflict) if conflict == id));
        let kept = store.find_unique(&id).await.unwrap().unwrap();
        assert_eq!(kept.title, "original");
    }

    #[tokio::test]
    async fn test_find_many_orders_newest_first_from_cursor() {
        let store = MemoryPostStore::new();
        let mut ids = Vec::new();
        for title in ["a", "b", "c", "d"] {
            ids.push(store.create(new_post(title)).await.unwrap().id);
        }

        let all = store
            .find_many(FindManyArgs { take: 10, cursor: None })
            .await
            .unwrap();
        let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["d", "c", "b", "a"]);

        let from_b = store
            .find_many(FindManyArgs {
                take: 10,
                cursor: Some(ids[1].clone()),
            })
            .await
            .unwrap();
        let titles: Vec<_> = from_b.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["b", "a"]);
    }

    #[tokio::test]
    async fn test_find_many_unknown_cursor_is_empty() {
        let store = MemoryPostStore::new();
        store.create(new_post("a")).await.unwrap();

        let page = store
            .find_many(FindManyArgs {
                take: 10,
                cursor: Some("missing".to_string()),
            })
            .await
            .unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryPostStore::new();
        let created = store.create(new_post("before")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = store
            .update(
                &created.id,
                PostChanges {
                    title: Some("after".to_string()),
                    text: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.text, "body");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryPostStore::new();

        let err = store
            .update("nope", PostChanges::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
