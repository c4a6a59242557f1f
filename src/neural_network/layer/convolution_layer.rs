use super::*;
use ndarray::{Array3, Array4, Axis, s};
use rand::Rng;
use rand_distr::StandardNormal;

/// 2D Convolutional Layer
pub mod conv_2d;
/// Input validation functions for convolutional layers
mod input_validation_function;

pub use conv_2d::*;
use input_validation_function::*;
