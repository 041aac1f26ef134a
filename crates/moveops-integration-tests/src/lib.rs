//! End-to-end integration tests for the MoveOps gateway
//!
//! The tests under `tests/` wire the typed API modules, the request client,
//! and the reverse proxy together against a mocked upstream API.
