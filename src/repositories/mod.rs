//! Persistence layer: repository contract plus the unit-of-work session.
//!
//! Repositories are deliberately thin. Reads execute immediately against the
//! session's connection; mutations are only *staged* against the owning
//! `UnitOfWork` and become durable when its `save` commits them in a single
//! transaction. Repositories know nothing about transactions.

mod stock_repo;
mod unit_of_work;

pub use stock_repo::StockRepository;
pub use unit_of_work::{SaveReport, UnitOfWork};

use async_trait::async_trait;

use crate::error::AppResult;

/// Contract implemented by every per-entity repository.
///
/// `Draft` is the insertable shape (no store-assigned id yet), `Changes` the
/// full replacement applied by `update`. The staging methods are synchronous:
/// they record work without touching the database.
#[async_trait]
pub trait Repository {
    type Entity;
    type Draft;
    type Changes;
    type Id;

    /// Every stored record, in store-defined order.
    async fn find_all(&mut self) -> AppResult<Vec<Self::Entity>>;

    /// The record with the given id, if any.
    async fn find_by_id(&mut self, id: Self::Id) -> AppResult<Option<Self::Entity>>;

    /// Stage an insert.
    fn create(&mut self, draft: Self::Draft);

    /// Stage a full replacement of the record with the given id. Callers are
    /// expected to have confirmed existence; no guard is applied here.
    fn update(&mut self, id: Self::Id, changes: Self::Changes);

    /// Stage removal of the given record.
    fn delete(&mut self, entity: &Self::Entity);
}
