//! Unit tests for hostspec CLI
//!
//! These tests use fake transports and run fast without remote I/O.


mod checkfile_tests;
