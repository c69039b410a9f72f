//! Shared test utilities used across the DBSCAN crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so tests can assert
//! instrumentation, and [`ci::property_test_profile`] reads the proptest
//! tuning overrides from the environment.

pub mod ci;
pub mod tracing;
