//! Unit tests for chain records and the in-memory store.
