//! Unit tests for reputation, profiles and sessions.
