pub(crate) mod require_returns_check;

pub use require_returns_check::require_returns_check::RequireReturnsCheckOptions;
