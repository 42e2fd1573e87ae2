//! The verification transform and its components.
//!
//! Submitted wikitext passes through here before it is committed: new
//! factual claims are flagged as proposed pending human review, while
//! previously-accepted content, structural markup, and exempt pages pass
//! through untouched. Everything in this module is pure and synchronous;
//! baseline fetching happens in the hook layer.

pub mod baseline;
pub mod braces;
pub mod infobox;
pub mod markers;
pub mod namespace;
pub mod segment;
pub mod transform;
pub mod wrapper;

pub use baseline::BaselineIndex;
pub use transform::{transform_text, TransformOutcome, TransformOutput, REVIEW_NOTE};
