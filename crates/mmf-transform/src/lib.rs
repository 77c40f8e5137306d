//! Feature table transformations.
//!
//! Every stage takes a [`mmf_model::FeatureTable`] by reference and returns a
//! new one:
//!
//! - [`preprocess`]: drop empty rows, impute gaps with mean or mode
//! - [`normalize`]: min-max scale numeric, non-identity columns
//! - [`synthesize`]: seeded placeholder tables for absent modalities
//! - [`align`]: subsample or repeat to the primary row count
//! - [`namespace`] and [`fuse`]: prefix secondary columns and concatenate

mod align;
mod error;
mod fuse;
mod normalize;
mod preprocess;
mod synthesize;

pub use align::{align, alignment_indices};
pub use error::{FusionError, Result, TransformError};
pub use fuse::{FusionPart, fuse, namespace};
pub use normalize::{min_max, normalize};
pub use preprocess::{mean, mode, preprocess};
pub use synthesize::synthesize;
