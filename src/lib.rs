//! Job-application pipeline: issue-form intake into a Notion tracker, and
//! model-generated apply packs (tailored resume plus outreach) from a master
//! LaTeX template.
//!
//! The two pipelines are independent and share no runtime state; each run is
//! a single synchronous pass with at most one outbound call sequence.

pub mod applypack;
pub mod core;
pub mod error;
pub mod intake;
pub mod utils;

pub use error::PipelineError;
