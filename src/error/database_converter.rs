use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::AppError;

/// Converts diesel errors into structured `AppError` variants.
///
/// Unique-constraint violations are parsed into `Duplicate` with the entity,
/// field, and offending value pulled out of the PostgreSQL error text; every
/// other database failure is surfaced as `Database` with the operation that
/// was running.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::NotFound => AppError::NotFound {
                entity: "record".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let message = info.message().to_string();
                match extract_key_value(&message) {
                    Some((field, value)) => {
                        let entity = info
                            .constraint_name()
                            .and_then(parse_constraint_entity)
                            .unwrap_or_else(|| "record".to_string());
                        AppError::Duplicate {
                            entity,
                            field,
                            value,
                        }
                    }
                    None => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::anyhow!("unique constraint violation: {message}"),
                    },
                }
            }
            DieselError::DatabaseError(_, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("database error: {}", info.message()),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::new(other),
            },
        }
    }
}

/// Pulls the table name out of a conventional constraint name such as
/// `stocks_name_key`.
fn parse_constraint_entity(constraint: &str) -> Option<String> {
    let trimmed = constraint.strip_suffix("_key")?;
    let (entity, _field) = trimmed.split_once('_')?;
    Some(entity.to_string())
}

/// Parses the `Key (field)=(value)` detail line PostgreSQL appends to
/// constraint-violation messages.
fn extract_key_value(message: &str) -> Option<(String, String)> {
    let rest = message.split_once("Key (")?.1;
    let (field, rest) = rest.split_once(")=(")?;
    let (value, _) = rest.split_once(')')?;
    Some((field.to_string(), value.to_string()))
}
