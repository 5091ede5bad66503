use sqlx::error::ErrorKind;

/// A storage constraint that rejected a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// `column` is `table.column`, e.g. `users.email`.
    Unique { column: String },
    ForeignKey,
    Check,
    NotNull,
}

impl ConstraintViolation {
    pub fn is_unique_on(&self, table_column: &str) -> bool {
        matches!(self, ConstraintViolation::Unique { column } if column == table_column)
    }
}

/// Classifies a database error as a constraint violation, if it is one.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };

    match db_err.kind() {
        ErrorKind::UniqueViolation => Some(ConstraintViolation::Unique {
            column: violated_columns(db_err.message()),
        }),
        ErrorKind::ForeignKeyViolation => Some(ConstraintViolation::ForeignKey),
        ErrorKind::CheckViolation => Some(ConstraintViolation::Check),
        ErrorKind::NotNullViolation => Some(ConstraintViolation::NotNull),
        _ => None,
    }
}

// SQLite reports "UNIQUE constraint failed: users.email"
fn violated_columns(message: &str) -> String {
    message
        .rsplit_once(": ")
        .map(|(_, cols)| cols.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_unique_message() {
        assert_eq!(violated_columns("UNIQUE constraint failed: users.email"), "users.email");
        assert_eq!(violated_columns("garbled"), "");
    }

    #[test]
    fn non_database_errors_are_not_constraints() {
        assert_eq!(constraint_violation(&sqlx::Error::RowNotFound), None);
    }

    #[test]
    fn unique_column_match() {
        let violation = ConstraintViolation::Unique { column: "departments.name".into() };
        assert!(violation.is_unique_on("departments.name"));
        assert!(!violation.is_unique_on("users.username"));
        assert!(!ConstraintViolation::ForeignKey.is_unique_on("departments.name"));
    }
}
