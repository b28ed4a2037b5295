//! Insert and query operations for the `sentiment_messages` table.

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::DbError;

/// One scored message ready for insertion.
#[derive(Debug, Clone)]
pub struct NewSentimentMessage {
    pub ticker: String,
    pub platform: String,
    pub content: String,
    pub message_ts: NaiveDateTime,
    pub lexicon_score: f64,
    pub vader_score: f64,
    pub fused_score: f64,
    pub category: String,
}

/// A stored message row, as read back from the table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentMessageRow {
    pub id: i64,
    pub ticker: String,
    pub platform: String,
    pub content: String,
    pub message_ts: NaiveDateTime,
    pub lexicon_score: f64,
    pub vader_score: f64,
    pub fused_score: f64,
    pub category: String,
}

/// Insert a batch of scored messages in a single transaction.
///
/// An empty batch is a no-op that returns 0. The batch either lands in full
/// or not at all.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction or insert fails.
pub async fn bulk_insert_messages(
    pool: &PgPool,
    messages: &[NewSentimentMessage],
) -> Result<u64, DbError> {
    if messages.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO sentiment_messages \
         (ticker, platform, content, message_ts, lexicon_score, vader_score, fused_score, category) ",
    );
    builder.push_values(messages, |mut b, m| {
        b.push_bind(&m.ticker)
            .push_bind(&m.platform)
            .push_bind(&m.content)
            .push_bind(m.message_ts)
            .push_bind(m.lexicon_score)
            .push_bind(m.vader_score)
            .push_bind(m.fused_score)
            .push_bind(&m.category);
    });

    let mut tx = pool.begin().await?;
    let result = builder.build().execute(&mut *tx).await?;
    tx.commit().await?;

    let inserted = result.rows_affected();
    tracing::debug!(rows = inserted, "bulk insert committed");
    Ok(inserted)
}

/// Fetch the most recent stored messages for a ticker, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn fetch_recent_messages(
    pool: &PgPool,
    ticker: &str,
    limit: i64,
) -> Result<Vec<SentimentMessageRow>, DbError> {
    let rows = sqlx::query_as::<_, SentimentMessageRow>(
        "SELECT id, ticker, platform, content, message_ts, \
                lexicon_score, vader_score, fused_score, category \
         FROM sentiment_messages \
         WHERE ticker = $1 \
         ORDER BY message_ts DESC \
         LIMIT $2",
    )
    .bind(ticker)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
