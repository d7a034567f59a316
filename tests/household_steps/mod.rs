//! Step definitions for household behaviour scenarios.
