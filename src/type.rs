use std::fmt::Debug;

use num_traits::Float;

/// The scalar type tree coordinates are measured in.
///
/// Implemented for `f32` and `f64`. The `Pod` bound keeps coordinate buffers
/// castable to and from raw bytes.
pub trait IndexableFloat: Float + Debug + Send + Sync + 'static + bytemuck::Pod {}

impl IndexableFloat for f32 {}

impl IndexableFloat for f64 {}
