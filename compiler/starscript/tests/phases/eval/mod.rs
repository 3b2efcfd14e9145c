//! Evaluation phase tests.
//!
//! End-to-end rendering through `star_eval`:
//! - Host scenarios (dotted globals, suppliers, removal)
//! - Section splitting
//! - Runtime errors
//! - Text round-trip properties

mod errors;
mod properties;
mod scenarios;
mod sections;
