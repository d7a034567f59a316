//! Unit tests for the family context.
