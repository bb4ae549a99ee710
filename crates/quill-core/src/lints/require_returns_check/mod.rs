pub(crate) mod require_returns_check;
