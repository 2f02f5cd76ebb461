//! Stock repository bound to a unit-of-work session.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{NewStock, Stock, UpdateStock};
use crate::repositories::Repository;
use crate::repositories::unit_of_work::StagedChange;

/// Repository over the `stocks` table.
///
/// Borrows the owning session's connection for reads and its staging buffer
/// for mutations, so one `save` on the session commits everything this value
/// staged.
pub struct StockRepository<'a> {
    conn: &'a mut AsyncPgConnection,
    staged: &'a mut Vec<StagedChange>,
}

impl<'a> StockRepository<'a> {
    pub(crate) fn new(
        conn: &'a mut AsyncPgConnection,
        staged: &'a mut Vec<StagedChange>,
    ) -> Self {
        Self { conn, staged }
    }
}

#[async_trait]
impl Repository for StockRepository<'_> {
    type Entity = Stock;
    type Draft = NewStock;
    type Changes = UpdateStock;
    type Id = i32;

    async fn find_all(&mut self) -> AppResult<Vec<Stock>> {
        use crate::schema::stocks::dsl::*;

        stocks
            .select(Stock::as_select())
            .load(&mut *self.conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert(e, "list stocks"))
    }

    async fn find_by_id(&mut self, stock_id: i32) -> AppResult<Option<Stock>> {
        use crate::schema::stocks::dsl::*;

        stocks
            .filter(id.eq(stock_id))
            .select(Stock::as_select())
            .first(&mut *self.conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert(e, "find stock by id"))
    }

    fn create(&mut self, draft: NewStock) {
        self.staged.push(StagedChange::Insert(draft));
    }

    fn update(&mut self, stock_id: i32, changes: UpdateStock) {
        self.staged.push(StagedChange::Update { stock_id, changes });
    }

    fn delete(&mut self, entity: &Stock) {
        self.staged.push(StagedChange::Delete {
            stock_id: entity.id,
        });
    }
}
