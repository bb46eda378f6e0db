//! Integration test suite; all tests live under `tests/`
