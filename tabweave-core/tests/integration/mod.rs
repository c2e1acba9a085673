//! Integration test modules

mod config_tests;
