//! Unit tests for the process catalogue.

mod domain_tests;
mod service_tests;
