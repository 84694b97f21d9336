//! Face classification against a labeled gallery of pre-cropped face images.
//!
//! The gallery directory holds grayscale face crops named
//! `<label>-<anything>.{jpg,pgm,png}`. One run builds a training set from the
//! gallery, fits a subspace-projection model (fisherface or eigenface
//! family), and predicts the label of a single query image by nearest
//! neighbor in the projected space. Nothing is persisted between runs.

pub mod gallery;
pub mod pipeline;
pub mod recognition;
pub mod shared;
pub mod storage;
