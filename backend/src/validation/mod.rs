//! Validation rules for request payloads.

pub mod rules;
