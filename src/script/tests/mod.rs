//! Unit tests for script management.

mod service_tests;
