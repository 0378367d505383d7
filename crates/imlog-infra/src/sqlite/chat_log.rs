//! SQLite chat log store implementation.
//!
//! Implements `ChatLogStore` from `imlog-core` using sqlx with split read/write
//! pools. Every chat is a set of rows in `chat_log` keyed by `chat`, ordered by
//! `send_time` and, for equal send times, by insertion (`id`).

use chrono::Utc;
use imlog_core::repository::chat_log::ChatLogStore;
use imlog_types::error::StoreError;
use imlog_types::storage::{LogEntry, RangeSlice};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatLogStore`.
#[derive(Clone)]
pub struct SqliteChatLogStore {
    pool: DatabasePool,
}

impl SqliteChatLogStore {
    /// Create a new chat log store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_sqlx(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

impl ChatLogStore for SqliteChatLogStore {
    async fn append(&self, chat: &str, entry: LogEntry) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO chat_log (chat, send_time, payload, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(chat)
        .bind(entry.score)
        .bind(&entry.payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn range_from(
        &self,
        chat: &str,
        cursor: i64,
        limit: u32,
    ) -> Result<RangeSlice, StoreError> {
        // Count and range share one read transaction, i.e. one WAL snapshot.
        let mut tx = self.pool.reader.begin().await.map_err(map_sqlx)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_log WHERE chat = ? AND send_time >= ?")
                .bind(chat)
                .bind(cursor)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx)?;

        let rows = sqlx::query(
            "SELECT send_time, payload FROM chat_log
             WHERE chat = ? AND send_time >= ?
             ORDER BY send_time ASC, id ASC
             LIMIT ?",
        )
        .bind(chat)
        .bind(cursor)
        .bind(i64::from(limit) + 1)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            entries.push(LogEntry {
                score: row
                    .try_get("send_time")
                    .map_err(|e| StoreError::Query(e.to_string()))?,
                payload: row
                    .try_get("payload")
                    .map_err(|e| StoreError::Query(e.to_string()))?,
            });
        }

        Ok(RangeSlice {
            entries,
            total_matching: u64::try_from(total)
                .map_err(|_| StoreError::Query(format!("negative row count: {total}")))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{DatabasePool, database_url};
    use imlog_core::service::im::ImService;
    use imlog_types::message::Message;
    use imlog_types::page::PullQuery;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn entry(score: i64, payload: &str) -> LogEntry {
        LogEntry {
            score,
            payload: payload.as_bytes().to_vec(),
        }
    }

    fn scores(slice: &RangeSlice) -> Vec<i64> {
        slice.entries.iter().map(|e| e.score).collect()
    }

    #[tokio::test]
    async fn test_append_then_range() {
        let store = SqliteChatLogStore::new(test_pool().await);
        store.append("a:b", entry(1, "one")).await.unwrap();

        let slice = store.range_from("a:b", 0, 10).await.unwrap();
        assert_eq!(slice.entries, vec![entry(1, "one")]);
        assert_eq!(slice.total_matching, 1);
    }

    #[tokio::test]
    async fn test_range_orders_by_score_not_arrival() {
        let store = SqliteChatLogStore::new(test_pool().await);
        for score in [4, 1, 2] {
            store.append("a:b", entry(score, "x")).await.unwrap();
        }

        let slice = store.range_from("a:b", 0, 10).await.unwrap();
        assert_eq!(scores(&slice), vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_range_peeks_one_past_limit_and_counts_all() {
        let store = SqliteChatLogStore::new(test_pool().await);
        for score in 1..=6 {
            store.append("a:b", entry(score, "x")).await.unwrap();
        }

        let slice = store.range_from("a:b", 3, 2).await.unwrap();
        assert_eq!(scores(&slice), vec![3, 4, 5]);
        assert_eq!(slice.total_matching, 4);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_insertion_order() {
        let store = SqliteChatLogStore::new(test_pool().await);
        store.append("a:b", entry(5, "first")).await.unwrap();
        store.append("a:b", entry(5, "second")).await.unwrap();

        let slice = store.range_from("a:b", 5, 10).await.unwrap();
        assert_eq!(slice.entries, vec![entry(5, "first"), entry(5, "second")]);
    }

    #[tokio::test]
    async fn test_duplicate_append_is_not_deduplicated() {
        let store = SqliteChatLogStore::new(test_pool().await);
        store.append("a:b", entry(1, "same")).await.unwrap();
        store.append("a:b", entry(1, "same")).await.unwrap();

        let slice = store.range_from("a:b", 0, 10).await.unwrap();
        assert_eq!(slice.total_matching, 2);
    }

    #[tokio::test]
    async fn test_chat_isolation() {
        let store = SqliteChatLogStore::new(test_pool().await);
        store.append("a:b", entry(1, "ab")).await.unwrap();
        store.append("c:d", entry(2, "cd")).await.unwrap();

        let slice = store.range_from("a:b", 0, 10).await.unwrap();
        assert_eq!(slice.entries, vec![entry(1, "ab")]);
    }

    #[tokio::test]
    async fn test_unknown_chat_is_empty() {
        let store = SqliteChatLogStore::new(test_pool().await);
        let slice = store.range_from("nobody", 0, 10).await.unwrap();
        assert!(slice.entries.is_empty());
        assert_eq!(slice.total_matching, 0);
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let pool = test_pool().await;
        let store = SqliteChatLogStore::new(pool.clone());
        pool.close().await;

        let err = store.append("a:b", entry(1, "x")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        let err = store.range_from("a:b", 0, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_count_and_range_agree_under_concurrent_appends() {
        const WRITERS: i64 = 4;
        const PER_WRITER: i64 = 25;
        const LIMIT: u32 = 10;

        let store = SqliteChatLogStore::new(test_pool().await);

        let mut writers = Vec::new();
        for w in 0..WRITERS {
            let store = store.clone();
            writers.push(tokio::spawn(async move {
                for i in 0..PER_WRITER {
                    // Interleaved scores so new rows land inside the range.
                    let score = i * WRITERS + w;
                    store.append("a:b", entry(score, "x")).await.unwrap();
                    tokio::task::yield_now().await;
                }
            }));
        }

        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                let mut last_total = 0;
                for _ in 0..30 {
                    let slice = store.range_from("a:b", 0, LIMIT).await.unwrap();
                    let got = scores(&slice);

                    assert!(got.windows(2).all(|w| w[0] <= w[1]), "not ascending: {got:?}");
                    assert!(got.len() <= LIMIT as usize + 1);
                    if got.len() <= LIMIT as usize {
                        // No peek: the range returned everything the count saw.
                        assert_eq!(slice.total_matching, got.len() as u64);
                    } else {
                        assert!(slice.total_matching >= got.len() as u64);
                    }
                    assert!(slice.total_matching >= last_total, "snapshot went backwards");
                    last_total = slice.total_matching;
                    tokio::task::yield_now().await;
                }
            }));
        }

        for handle in writers.into_iter().chain(readers) {
            handle.await.unwrap();
        }

        let slice = store.range_from("a:b", 0, LIMIT).await.unwrap();
        assert_eq!(slice.total_matching, (WRITERS * PER_WRITER) as u64);
        assert_eq!(scores(&slice), (0..=LIMIT as i64).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_service_paginates_over_sqlite() {
        let service = ImService::new(SqliteChatLogStore::new(test_pool().await));
        for t in [1, 2, 4] {
            service
                .send_message(&Message::new("a:b", "a", format!("m{t}"), t))
                .await
                .unwrap();
        }

        let page = service
            .pull_page(&PullQuery::new("a:b", 0, 2))
            .await
            .unwrap();
        let times: Vec<i64> = page.messages.iter().map(|m| m.send_time).collect();
        assert_eq!(times, vec![1, 2]);
        assert!(page.has_more);
        assert_eq!(page.next_cursor, Some(4));

        let rest = service
            .pull_page(&PullQuery::new("a:b", 4, 2))
            .await
            .unwrap();
        assert_eq!(rest.messages.len(), 1);
        assert_eq!(rest.messages[0].text, "m4");
        assert!(!rest.has_more);
    }
}
