use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

/// Stock model for reading from the database.
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stock {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewStock model for inserting new records.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::stocks)]
pub struct NewStock {
    pub name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub category: Option<String>,
}

/// UpdateStock model for full in-place replacement keyed by id.
///
/// `treat_none_as_null` makes a `None` category clear the column instead of
/// skipping it, so applying this changeset is a full replace of the business
/// attributes.
#[derive(Debug, AsChangeset, Deserialize, Clone)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateStock {
    pub name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub category: Option<String>,
}
