use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::r#type::IndexableFloat;

/// A fixed-dimension coordinate tuple.
///
/// The tree reasons about geometry exclusively through this trait and
/// [`Aabb`][crate::geometry::Aabb]. The blanket implementation covers
/// `[N; D]` for every [`IndexableFloat`] scalar; other vector types only need
/// the four accessors plus `zip_with`, the rest of the componentwise algebra
/// is provided.
pub trait Vector: Copy + PartialEq + Debug + Send + Sync + 'static {
    type Scalar: IndexableFloat;

    /// Number of dimensions.
    const DIM: usize;

    /// Component at `axis`, which must be in `[0, DIM)`.
    fn get(&self, axis: usize) -> Self::Scalar;

    /// Overwrite the component at `axis`.
    fn set(&mut self, axis: usize, value: Self::Scalar);

    /// A vector with every component equal to `value`.
    fn splat(value: Self::Scalar) -> Self;

    /// Combine two vectors component by component.
    fn zip_with<F: Fn(Self::Scalar, Self::Scalar) -> Self::Scalar>(
        &self,
        other: &Self,
        op: F,
    ) -> Self;

    fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    fn mul_scalar(&self, scalar: Self::Scalar) -> Self {
        self.zip_with(&Self::splat(scalar), |a, b| a * b)
    }

    fn div_scalar(&self, scalar: Self::Scalar) -> Self {
        self.zip_with(&Self::splat(scalar), |a, b| a / b)
    }

    fn min_componentwise(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a.min(b))
    }

    fn max_componentwise(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a.max(b))
    }

    fn dot(&self, other: &Self) -> Self::Scalar {
        let mut acc = Self::Scalar::zero();
        for axis in 0..Self::DIM {
            acc = acc + self.get(axis) * other.get(axis);
        }
        acc
    }

    fn length_squared(&self) -> Self::Scalar {
        self.dot(self)
    }

    fn distance_squared(&self, other: &Self) -> Self::Scalar {
        let mut acc = Self::Scalar::zero();
        for axis in 0..Self::DIM {
            let d = self.get(axis) - other.get(axis);
            acc = acc + d * d;
        }
        acc
    }
}

impl<N: IndexableFloat, const D: usize> Vector for [N; D] {
    type Scalar = N;

    const DIM: usize = D;

    #[inline]
    fn get(&self, axis: usize) -> N {
        self[axis]
    }

    #[inline]
    fn set(&mut self, axis: usize, value: N) {
        self[axis] = value;
    }

    #[inline]
    fn splat(value: N) -> Self {
        [value; D]
    }

    #[inline]
    fn zip_with<F: Fn(N, N) -> N>(&self, other: &Self, op: F) -> Self {
        let mut out = *self;
        for axis in 0..D {
            out[axis] = op(self[axis], other[axis]);
        }
        out
    }
}
