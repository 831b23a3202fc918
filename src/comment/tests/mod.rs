//! Unit tests for reply classification.
