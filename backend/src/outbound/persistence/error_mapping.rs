//! Diesel and pool error mapping shared by the storefront repositories.
//!
//! Each repository passes the constructors of its own port error so the
//! classification (connection versus query failure) stays in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure to the repository's connection error.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure to the repository's query or connection error.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced row does not exist")
        }
        _ => query("database error"),
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside `ILIKE`.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `ILIKE` pattern matching `raw` anywhere in a column.
pub(crate) fn contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error(error, Mapped::Query, |message| {
            Mapped::Connection(message.to_owned())
        })
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(Info("server closed the connection")),
        );
        assert_eq!(
            map(error),
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(Info("dup"))),
        "unique constraint violated"
    )]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] expected: &'static str) {
        assert_eq!(map(error), Mapped::Query(expected));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped: Mapped = map_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    #[case("Ryzen", "%Ryzen%")]
    #[case("100%", "%100\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_patterns_escape_wildcards(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(raw), expected);
    }
}
