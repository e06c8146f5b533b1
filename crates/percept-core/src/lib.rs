#![forbid(unsafe_code)]

//! Survey model for perceptual positioning maps (headless).
//!
//! Holds the tagged project records (brands, attributes, responses), the validation boundary
//! that turns them into an index-addressed [`Survey`], the Aggregator that reduces responses to
//! a [`PerformanceMatrix`] of mean ratings, benchmark ("ideal" brand) resolution, and the
//! loosely-typed [`PerceptConfig`] settings tree.

pub mod aggregate;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod model;
pub mod survey;

pub use aggregate::{PerformanceMatrix, aggregate_performance, aggregate_preference};
pub use benchmark::{IDEAL_MARKER, resolve_benchmark};
pub use config::PerceptConfig;
pub use error::{Error, Result};
pub use model::{Attribute, Brand, Lang, Project, Response};
pub use survey::{MAX_RATING, MIN_RATING, NEUTRAL_RATING, RatingRecord, Survey};
