//! Helpers for interpreting SQLite write failures.

use ecam_core::ServiceError;

/// The `table.column` a unique constraint failure points at, if `err` is one.
///
/// SQLite reports these as `UNIQUE constraint failed: persons.email`.
pub fn unique_violation_target(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Some(
            db_err
                .message()
                .rsplit(": ")
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        ),
        _ => None,
    }
}

/// Maps a unique violation on a role code column (`students.student_id`,
/// `teachers.teacher_id`) to a validation error naming the wire field.
/// Anything else becomes a storage error with `context`.
pub fn map_code_conflict(
    err: sqlx::Error,
    column: &str,
    wire_name: &str,
    value: Option<&str>,
    context: &'static str,
) -> ServiceError {
    match unique_violation_target(&err) {
        Some(target) if target == column => ServiceError::validation(format!(
            "{} '{}' is already in use",
            wire_name,
            value.unwrap_or_default()
        )),
        _ => ServiceError::Storage(anyhow::Error::new(err).context(context)),
    }
}

/// Escapes `%`, `_` and `\` so user text matches literally inside a
/// `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Trims optional codes; blank codes are stored as NULL.
pub fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
