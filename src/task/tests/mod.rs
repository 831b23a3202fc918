//! Unit tests for task records, the codec and the read services.
