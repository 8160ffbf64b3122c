//! Shared per-resource cache with explicit loading and error states.
//!
//! A failed refresh never discards data: the last good value is kept as
//! `stale` next to the error.

use std::future::Future;
use std::sync::Arc;

use assetrack_core::search::{filter_by_search, Searchable};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};

use crate::error::ClientError;
use crate::rest::RestClient;

/// Where a cache is in its load cycle.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Never loaded.
    Idle,
    Loading {
        stale: Option<Arc<T>>,
    },
    Ready {
        data: Arc<T>,
        loaded_at: DateTime<Utc>,
    },
    Failed {
        error: String,
        stale: Option<Arc<T>>,
    },
}

// Manual impl: cloning only touches the `Arc`s, so `T: Clone` is not needed.
impl<T> Clone for LoadState<T> {
    fn clone(&self) -> Self {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading { stale } => LoadState::Loading {
                stale: stale.clone(),
            },
            LoadState::Ready { data, loaded_at } => LoadState::Ready {
                data: Arc::clone(data),
                loaded_at: *loaded_at,
            },
            LoadState::Failed { error, stale } => LoadState::Failed {
                error: error.clone(),
                stale: stale.clone(),
            },
        }
    }
}

impl<T> LoadState<T> {
    /// Current data if any, including stale data kept across a failure.
    pub fn data(&self) -> Option<Arc<T>> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading { stale } | LoadState::Failed { stale, .. } => stale.clone(),
            LoadState::Ready { data, .. } => Some(Arc::clone(data)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;

/// One cache per resource, shared behind an `Arc` by every consumer.
pub struct ResourceCache<T> {
    table: String,
    loader: Loader<T>,
    state: RwLock<LoadState<T>>,
    /// Serializes refreshes so concurrent callers do not stampede the API.
    refresh_lock: Mutex<()>,
}

impl<T> ResourceCache<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Cache `GET path` (e.g. `/assets`) for change events on `table`.
    pub fn from_rest(
        client: RestClient,
        table: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self::with_loader(table, move || {
            let client = client.clone();
            let path = path.clone();
            async move { client.get::<T>(&path).await }
        })
    }
}

impl<T> ResourceCache<T>
where
    T: Send + Sync + 'static,
{
    /// Cache whatever `loader` produces.
    pub fn with_loader<F, Fut>(table: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self {
            table: table.into(),
            loader: Box::new(move || loader().boxed()),
            state: RwLock::new(LoadState::Idle),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Table whose change events should trigger a refresh.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub async fn state(&self) -> LoadState<T> {
        self.state.read().await.clone()
    }

    pub async fn data(&self) -> Option<Arc<T>> {
        self.state.read().await.data()
    }

    /// Load fresh data, moving through `Loading` to `Ready` or `Failed`.
    pub async fn refresh(&self) -> Result<Arc<T>, ClientError> {
        let _guard = self.refresh_lock.lock().await;

        {
            let mut state = self.state.write().await;
            let stale = state.data();
            *state = LoadState::Loading { stale };
        }

        let result = (self.loader)().await;

        let mut state = self.state.write().await;
        match result {
            Ok(value) => {
                let data = Arc::new(value);
                *state = LoadState::Ready {
                    data: Arc::clone(&data),
                    loaded_at: Utc::now(),
                };
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(table = %self.table, error = %e, "Cache refresh failed");
                let stale = state.data();
                *state = LoadState::Failed {
                    error: e.to_string(),
                    stale,
                };
                Err(e)
            }
        }
    }

    /// Cached data, loading it first if the cache has never succeeded.
    pub async fn get_or_load(&self) -> Result<Arc<T>, ClientError> {
        if let LoadState::Ready { data, .. } = &*self.state.read().await {
            return Ok(Arc::clone(data));
        }
        self.refresh().await
    }
}

impl<R> ResourceCache<Vec<R>>
where
    R: Searchable + Clone + Send + Sync + 'static,
{
    /// Cached records matching `term`, ignoring case, in cached order.
    ///
    /// Works on stale data too; `None` until something has loaded.
    pub async fn search(&self, term: &str) -> Option<Vec<R>> {
        let data = self.data().await?;
        Some(filter_by_search(&data, term).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Loader that succeeds with an increasing counter unless `fail_on` matches.
    fn counting_cache(fail_on: &'static [usize]) -> (ResourceCache<usize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = ResourceCache::with_loader("assets", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if fail_on.contains(&n) {
                    Err(ClientError::Http {
                        status: 500,
                        code: Some("INTERNAL_ERROR".into()),
                        message: "boom".into(),
                    })
                } else {
                    Ok(n)
                }
            }
        });
        (cache, calls)
    }

    #[tokio::test]
    async fn starts_idle() {
        let (cache, _) = counting_cache(&[]);
        assert_matches!(cache.state().await, LoadState::Idle);
        assert!(cache.data().await.is_none());
    }

    #[tokio::test]
    async fn refresh_moves_to_ready() {
        let (cache, _) = counting_cache(&[]);
        let data = cache.refresh().await.unwrap();
        assert_eq!(*data, 1);
        assert_matches!(cache.state().await, LoadState::Ready { data, .. } if *data == 1);
    }

    #[tokio::test]
    async fn failure_keeps_stale_data() {
        let (cache, _) = counting_cache(&[2]);
        cache.refresh().await.unwrap();
        assert!(cache.refresh().await.is_err());

        let state = cache.state().await;
        assert!(state.error().unwrap().contains("boom"));
        assert_eq!(state.data().as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn first_failure_has_no_stale_data() {
        let (cache, _) = counting_cache(&[1]);
        assert!(cache.refresh().await.is_err());
        assert_matches!(cache.state().await, LoadState::Failed { stale: None, .. });
    }

    #[tokio::test]
    async fn recovers_after_failure() {
        let (cache, _) = counting_cache(&[1]);
        assert!(cache.refresh().await.is_err());
        assert_eq!(*cache.refresh().await.unwrap(), 2);
        assert!(cache.state().await.error().is_none());
    }

    #[tokio::test]
    async fn get_or_load_reuses_ready_data() {
        let (cache, calls) = counting_cache(&[]);
        cache.get_or_load().await.unwrap();
        cache.get_or_load().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: String,
        category: Option<String>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![Some(&self.name), self.category.as_deref()]
        }
    }

    fn row(name: &str, category: Option<&str>) -> Row {
        Row {
            name: name.into(),
            category: category.map(Into::into),
        }
    }

    fn row_cache() -> ResourceCache<Vec<Row>> {
        ResourceCache::with_loader("assets", || async {
            Ok(vec![
                row("MacBook Pro", Some("Laptop")),
                row("Dell U2720Q", Some("Monitor")),
                row("ThinkPad X1", Some("LAPTOP")),
            ])
        })
    }

    #[tokio::test]
    async fn search_before_load_is_none() {
        assert!(row_cache().search("laptop").await.is_none());
    }

    #[tokio::test]
    async fn search_filters_loaded_rows_ignoring_case() {
        let cache = row_cache();
        cache.refresh().await.unwrap();

        let names: Vec<_> = cache
            .search("Laptop")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["MacBook Pro", "ThinkPad X1"]);

        let monitors = cache.search("u27").await.unwrap();
        assert_eq!(monitors, vec![row("Dell U2720Q", Some("Monitor"))]);
        assert!(cache.search("printer").await.unwrap().is_empty());
        assert_eq!(cache.search("  ").await.unwrap().len(), 3);
    }
}
