//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe bindings that cannot be formed at all.
///
/// The hierarchy builder itself never fails; these only arise while turning
/// raw result rows into [`Binding`](crate::domain::Binding)s.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("result row {row} has no value for mandatory variable '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("unsupported result format: {0}")]
    UnsupportedFormat(String),
}
