//! Unit of work: one request-scoped persistence session.

use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewStock, Stock, UpdateStock};
use crate::repositories::StockRepository;

type PooledConn = PooledConnection<'static, AsyncPgConnection>;

/// One staged mutation, recorded by a repository and replayed by `save`.
#[derive(Debug, Clone)]
pub(crate) enum StagedChange {
    Insert(NewStock),
    Update { stock_id: i32, changes: UpdateStock },
    Delete { stock_id: i32 },
}

/// What a committed unit of work did.
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Rows produced by staged inserts, in staging order
    pub created: Vec<Stock>,
    /// Rows affected by staged updates
    pub updated: usize,
    /// Rows affected by staged deletes
    pub deleted: usize,
}

/// Request-scoped session owning one pooled connection and the changes
/// staged against it.
///
/// Constructed at the start of request processing, never shared between
/// requests. `save` consumes the session, so a unit of work commits at most
/// once and cannot be reused afterwards; dropping it without saving discards
/// the staged changes.
pub struct UnitOfWork {
    conn: PooledConn,
    staged: Vec<StagedChange>,
}

impl UnitOfWork {
    /// Check a connection out of the pool and open an empty session on it.
    pub async fn begin(pool: &AsyncDbPool) -> AppResult<Self> {
        let conn = pool.get_owned().await?;
        Ok(Self {
            conn,
            staged: Vec::new(),
        })
    }

    /// Repository over the `stocks` table, bound to this session.
    pub fn stocks(&mut self) -> StockRepository<'_> {
        StockRepository::new(&mut self.conn, &mut self.staged)
    }

    /// Whether any mutations have been staged and not yet committed.
    pub fn has_pending(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Commit every staged change in one database transaction.
    ///
    /// Changes are replayed in staging order. On any failure the transaction
    /// rolls back and nothing is visible in the store.
    pub async fn save(mut self) -> AppResult<SaveReport> {
        if self.staged.is_empty() {
            return Ok(SaveReport::default());
        }

        let staged = std::mem::take(&mut self.staged);
        self.conn
            .transaction::<SaveReport, AppError, _>(|conn| {
                async move {
                    let mut report = SaveReport::default();
                    for change in staged {
                        apply(conn, change, &mut report).await?;
                    }
                    Ok(report)
                }
                .scope_boxed()
            })
            .await
    }
}

async fn apply(
    conn: &mut AsyncPgConnection,
    change: StagedChange,
    report: &mut SaveReport,
) -> AppResult<()> {
    use crate::schema::stocks::dsl::*;

    match change {
        StagedChange::Insert(draft) => {
            let created = diesel::insert_into(stocks)
                .values(&draft)
                .returning(Stock::as_returning())
                .get_result(conn)
                .await
                .map_err(|e| DatabaseErrorConverter::convert(e, "insert stock"))?;
            report.created.push(created);
        }
        StagedChange::Update { stock_id, changes } => {
            let count = diesel::update(stocks.filter(id.eq(stock_id)))
                .set(&changes)
                .execute(conn)
                .await
                .map_err(|e| DatabaseErrorConverter::convert(e, "update stock"))?;
            report.updated += count;
        }
        StagedChange::Delete { stock_id } => {
            let count = diesel::delete(stocks.filter(id.eq(stock_id)))
                .execute(conn)
                .await
                .map_err(|e| DatabaseErrorConverter::convert(e, "delete stock"))?;
            report.deleted += count;
        }
    }

    Ok(())
}
