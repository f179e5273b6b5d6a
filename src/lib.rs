//! Photo-order resolution for property listings.
//!
//! A property's gallery order comes from one of three sources, in precedence
//! order: an unsaved in-session reorder, a persisted manual order, or a
//! computed ordering that keeps upload batches together. The [`photo`]
//! module decides which applies, mutates orders consistently, and normalizes
//! payloads on their way to storage.

pub mod photo;
pub mod telemetry;
