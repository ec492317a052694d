//! Step definitions for server matching scenarios.
