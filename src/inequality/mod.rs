//! Inequality coefficients for ranked samples.

pub mod gini;

pub use gini::{
    corrected_gini, gini_pairwise, gini_sorted, score_sample, score_samples, GiniMethod,
};
