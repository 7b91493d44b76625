//! # Policy data model
//!
//! Records and wire-format handling for fabric switch packet-filter
//! policies.
//!
//! The management API speaks a hyphenated attribute naming convention
//! (`is-policy-active`) and may return either a single object or a list
//! for a collection of one. This crate collapses both quirks at the
//! boundary:
//!
//! - [`normalize`] decodes a fetch response into a uniform sequence of
//!   [`PolicyRecord`] with canonical (underscored) attribute names.
//! - [`wire`] translates canonical records back into the hyphenated wire
//!   form for submission, validating them in the process.
//!
//! Everything in this crate is pure data transformation; no I/O happens
//! here.

pub mod error;
pub mod normalize;
pub mod record;
pub mod value;
pub mod wire;

pub use error::{PolicyError, PolicyResult};
pub use record::{PolicyRecord, ATTR_IS_ACTIVE, ATTR_NAME};
pub use value::{AttributeMap, AttributeValue};
