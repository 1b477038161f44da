//! Daily document number allocation.
//!
//! Counters live in the document_sequences table, one row per
//! (prefix, seq_date). Allocation is an atomic upsert so concurrent callers
//! inside separate transactions always receive distinct values.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseTransaction, DbBackend, DbErr, Statement};
use uuid::Uuid;

use ledgerkit_core::sequence::{DEFAULT_COUNTER_WIDTH, format_document_number};

const ALLOCATE_SQL: &str = r"
INSERT INTO document_sequences (id, prefix, seq_date, last_value, updated_at)
VALUES ($1, $2, $3, 1, NOW())
ON CONFLICT (prefix, seq_date)
DO UPDATE SET last_value = document_sequences.last_value + 1, updated_at = NOW()
RETURNING last_value
";

/// Allocates the next document number for a prefix and date.
///
/// Must be called inside the transaction that persists the document, so a
/// rolled-back insert releases its number slot along with everything else.
///
/// # Errors
///
/// Returns an error if the allocation statement fails.
pub async fn next_document_number(
    txn: &DatabaseTransaction,
    prefix: &str,
    date: NaiveDate,
) -> Result<String, DbErr> {
    let row = txn
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            ALLOCATE_SQL,
            [Uuid::new_v4().into(), prefix.into(), date.into()],
        ))
        .await?
        .ok_or_else(|| DbErr::Custom("Sequence allocation returned no row".to_string()))?;

    let last_value: i64 = row.try_get("", "last_value")?;
    let counter = u32::try_from(last_value)
        .map_err(|_| DbErr::Custom(format!("Sequence counter out of range: {last_value}")))?;

    Ok(format_document_number(prefix, date, counter, DEFAULT_COUNTER_WIDTH))
}
