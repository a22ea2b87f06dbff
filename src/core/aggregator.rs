use crate::domain::model::{Address, Aggregate, Identifier};
use crate::domain::ports::ResourceFetcher;
use crate::utils::error::AggregateError;
use futures::future::join_all;

/// 取得人物後，同時抓取其所有電影並合併成一個 Aggregate
pub struct FanoutAggregator<'a, F: ResourceFetcher> {
    fetcher: &'a F,
    base_url: &'a str,
}

impl<'a, F: ResourceFetcher> FanoutAggregator<'a, F> {
    pub fn new(fetcher: &'a F, base_url: &'a str) -> Self {
        Self { fetcher, base_url }
    }

    pub fn root_address(&self, id: Identifier) -> Address {
        Address::root(self.base_url, id)
    }

    /// 任一電影失敗則整個聚合失敗；已送出的請求不會被取消
    pub async fn aggregate(&self, id: Identifier) -> Result<Aggregate, AggregateError> {
        let root = self.root_address(id);
        tracing::debug!("👤 Fetching person {} from {}", id, root);

        let person = self
            .fetcher
            .fetch_primary(&root)
            .await
            .map_err(|source| AggregateError::RootFetch {
                id: id.get(),
                source,
            })?;

        if person.films.is_empty() {
            tracing::warn!("⚠️ Person {} ({}) references no films", id, person.name);
            return Err(AggregateError::NoDependents { id: id.get() });
        }

        tracing::debug!(
            "🎬 Fetching {} films for person {} concurrently",
            person.films.len(),
            id
        );

        // join_all 等全部完成，結果順序與 films 相同
        let results = join_all(
            person
                .films
                .iter()
                .map(|address| self.fetcher.fetch_dependent(address)),
        )
        .await;

        let mut titles = Vec::with_capacity(results.len());
        for (address, result) in person.films.iter().zip(results) {
            match result {
                Ok(film) => titles.push(film.title),
                Err(source) => {
                    tracing::warn!("❌ Film {} for person {} failed: {}", address, id, source);
                    return Err(AggregateError::DependentFetch {
                        id: id.get(),
                        address: address.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(Aggregate {
            name: person.name,
            titles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DependentRecord, PrimaryRecord};
    use crate::utils::error::{AggregateReason, FetchError, FetchErrorKind};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct MockFetcher {
        people: HashMap<String, Result<PrimaryRecord, FetchError>>,
        films: HashMap<String, (u64, Result<DependentRecord, FetchError>)>,
        film_calls: AtomicUsize,
    }

    impl MockFetcher {
        fn person(mut self, address: &str, name: &str, films: &[&str]) -> Self {
            self.people.insert(
                address.to_string(),
                Ok(PrimaryRecord {
                    name: name.to_string(),
                    films: films.iter().map(|f| Address::new(*f)).collect(),
                }),
            );
            self
        }

        fn film(mut self, address: &str, delay_ms: u64, title: &str) -> Self {
            self.films.insert(
                address.to_string(),
                (
                    delay_ms,
                    Ok(DependentRecord {
                        title: title.to_string(),
                    }),
                ),
            );
            self
        }

        fn failing_film(mut self, address: &str, delay_ms: u64, code: u16) -> Self {
            self.films.insert(
                address.to_string(),
                (
                    delay_ms,
                    Err(FetchError::Status {
                        address: address.to_string(),
                        code,
                    }),
                ),
            );
            self
        }
    }

    #[async_trait]
    impl ResourceFetcher for MockFetcher {
        async fn fetch_primary(&self, address: &Address) -> Result<PrimaryRecord, FetchError> {
            self.people
                .get(address.as_str())
                .cloned()
                .unwrap_or_else(|| {
                    Err(FetchError::Status {
                        address: address.to_string(),
                        code: 404,
                    })
                })
        }

        async fn fetch_dependent(&self, address: &Address) -> Result<DependentRecord, FetchError> {
            self.film_calls.fetch_add(1, Ordering::SeqCst);
            let (delay_ms, result) = self.films.get(address.as_str()).cloned().unwrap_or((
                0,
                Err(FetchError::Status {
                    address: address.to_string(),
                    code: 404,
                }),
            ));
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            result
        }
    }

    fn id(value: u64) -> Identifier {
        Identifier::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_aggregate_luke() {
        let fetcher = MockFetcher::default()
            .person("http://api/people/1", "Luke Skywalker", &["f1", "f2"])
            .film("f1", 0, "A")
            .film("f2", 0, "B");

        let aggregator = FanoutAggregator::new(&fetcher, "http://api");
        let aggregate = aggregator.aggregate(id(1)).await.unwrap();

        assert_eq!(
            aggregate,
            Aggregate {
                name: "Luke Skywalker".to_string(),
                titles: vec!["A".to_string(), "B".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_titles_keep_film_order_when_completion_order_differs() {
        let fetcher = MockFetcher::default()
            .person("http://api/people/1", "Luke Skywalker", &["f1", "f2", "f3"])
            .film("f1", 60, "A New Hope")
            .film("f2", 5, "The Empire Strikes Back")
            .film("f3", 30, "Return of the Jedi");

        let aggregator = FanoutAggregator::new(&fetcher, "http://api");
        let aggregate = aggregator.aggregate(id(1)).await.unwrap();

        assert_eq!(
            aggregate.titles,
            vec![
                "A New Hope".to_string(),
                "The Empire Strikes Back".to_string(),
                "Return of the Jedi".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_one_failing_film_fails_whole_aggregate() {
        let fetcher = MockFetcher::default()
            .person("http://api/people/1", "Luke Skywalker", &["f1", "f2", "f3"])
            .film("f1", 0, "A")
            .failing_film("f2", 0, 500)
            .film("f3", 20, "C");

        let aggregator = FanoutAggregator::new(&fetcher, "http://api");
        let err = aggregator.aggregate(id(1)).await.unwrap_err();

        assert_eq!(err.reason(), AggregateReason::FetchFailed);
        match &err {
            AggregateError::DependentFetch { id, address, source } => {
                assert_eq!(*id, 1);
                assert_eq!(address, "f2");
                assert_eq!(source.kind(), FetchErrorKind::Status);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // 失敗不會取消其他已送出的請求
        assert_eq!(fetcher.film_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_films_is_no_dependents() {
        let fetcher = MockFetcher::default().person("http://api/people/7", "Yoda", &[]);

        let aggregator = FanoutAggregator::new(&fetcher, "http://api");
        let err = aggregator.aggregate(id(7)).await.unwrap_err();

        assert_eq!(err, AggregateError::NoDependents { id: 7 });
        assert_eq!(fetcher.film_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_root_failure_carries_identifier() {
        let fetcher = MockFetcher::default();

        let aggregator = FanoutAggregator::new(&fetcher, "http://api/");
        let err = aggregator.aggregate(id(42)).await.unwrap_err();

        match err {
            AggregateError::RootFetch { id, source } => {
                assert_eq!(id, 42);
                assert_eq!(source.address(), "http://api/people/42");
                assert_eq!(source.status_code(), Some(404));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
