//! Integration tests for GameHub live under `tests/`.
