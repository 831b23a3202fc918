//! Unit tests for request composition and dispatch.
