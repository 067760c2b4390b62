//! Cross-module tests: full-year scenarios against the bundled ephemeris.
