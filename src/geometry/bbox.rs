use geo_traits::{CoordTrait, RectTrait};
use num_traits::{Float, One};

use crate::geometry::Vector;
use crate::r#type::IndexableFloat;

/// An axis-aligned bounding box, or the empty box.
///
/// The empty state is encoded by NaN corners, so that expanding an empty box
/// by any point or box yields that point or box. All empty boxes compare
/// equal.
#[derive(Clone, Copy, Debug)]
pub struct Aabb<V: Vector> {
    min: V,
    max: V,
}

impl<V: Vector> Aabb<V> {
    /// A box from ordered corners. Debug builds check `min[i] <= max[i]`.
    pub fn new(min: V, max: V) -> Self {
        debug_assert!(
            (0..V::DIM).all(|axis| min.get(axis) <= max.get(axis)),
            "box corners out of order"
        );
        Self { min, max }
    }

    /// The box spanned by two arbitrary corners.
    pub fn bound(a: V, b: V) -> Self {
        Self {
            min: a.min_componentwise(&b),
            max: a.max_componentwise(&b),
        }
    }

    /// The degenerate box covering a single point.
    pub fn from_point(point: V) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// The bounding box of a point sequence; empty for an empty sequence.
    pub fn from_points<I: IntoIterator<Item = V>>(points: I) -> Self {
        let mut result = Self::empty();
        for point in points {
            result.expand(&point);
        }
        result
    }

    pub fn empty() -> Self {
        Self {
            min: V::splat(V::Scalar::nan()),
            max: V::splat(V::Scalar::nan()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.get(0).is_nan()
    }

    pub fn min(&self) -> V {
        self.min
    }

    pub fn max(&self) -> V {
        self.max
    }

    pub fn center(&self) -> V {
        let two = V::Scalar::one() + V::Scalar::one();
        self.min.add(&self.max).div_scalar(two)
    }

    /// Extent along every axis.
    pub fn sizes(&self) -> V {
        self.max.sub(&self.min)
    }

    /// Extent along one axis.
    pub fn size(&self, axis: usize) -> V::Scalar {
        self.max.get(axis) - self.min.get(axis)
    }

    /// Grow to cover `point`. The box may be empty, the point may not be NaN;
    /// hence the inverted comparisons, which treat NaN corners as "replace".
    pub fn expand(&mut self, point: &V) {
        debug_assert!((0..V::DIM).all(|axis| !point.get(axis).is_nan()));
        self.min = self.min.zip_with(point, |a, b| if !(a <= b) { b } else { a });
        self.max = self.max.zip_with(point, |a, b| if !(a >= b) { b } else { a });
    }

    /// Grow to cover `other`; expanding by an empty box is a no-op.
    pub fn expand_box(&mut self, other: &Self) {
        if !other.is_empty() {
            self.expand(&other.min);
            self.expand(&other.max);
        }
    }

    /// Closed-interval overlap test: boxes sharing only an edge do overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        for axis in 0..V::DIM {
            if self.max.get(axis) < other.min.get(axis)
                || self.min.get(axis) > other.max.get(axis)
            {
                return false;
            }
        }

        true
    }

    /// Closed-interval containment: boundary points are inside.
    pub fn contains_point(&self, point: &V) -> bool {
        for axis in 0..V::DIM {
            if point.get(axis) < self.min.get(axis) || point.get(axis) > self.max.get(axis) {
                return false;
            }
        }

        true
    }

    /// The componentwise intersection, or the empty box for disjoint inputs.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..V::DIM {
            if min.get(axis) > other.max.get(axis) || max.get(axis) < other.min.get(axis) {
                return Self::empty();
            }

            if min.get(axis) < other.min.get(axis) {
                min.set(axis, other.min.get(axis));
            }

            if max.get(axis) > other.max.get(axis) {
                max.set(axis, other.max.get(axis));
            }
        }

        Self { min, max }
    }

    /// The point of the box closest to `point`: a componentwise clamp.
    pub fn closest_point(&self, point: &V) -> V {
        point
            .max_componentwise(&self.min)
            .min_componentwise(&self.max)
    }

    /// Squared distance from `point` to the box; zero when the point is inside.
    pub fn distance_squared_to_point(&self, point: &V) -> V::Scalar {
        self.closest_point(point).distance_squared(point)
    }
}

impl<V: Vector> PartialEq for Aabb<V> {
    fn eq(&self, other: &Self) -> bool {
        self.is_empty() && other.is_empty() || self.min == other.min && self.max == other.max
    }
}

impl<N: IndexableFloat> Aabb<[N; 2]> {
    /// Convert from anything implementing [`RectTrait`].
    pub fn from_rect(rect: &impl RectTrait<T = N>) -> Self {
        Self::bound(
            [rect.min().x(), rect.min().y()],
            [rect.max().x(), rect.max().y()],
        )
    }
}

/// A single coordinate.
///
/// Used in the implementation of [`RectTrait`] for [`Aabb`].
pub struct Coord<N: IndexableFloat> {
    x: N,
    y: N,
}

impl<N: IndexableFloat> CoordTrait for Coord<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

impl<N: IndexableFloat> RectTrait for Aabb<[N; 2]> {
    type T = N;
    type CoordType<'a>
        = Coord<N>
    where
        Self: 'a;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn min(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.min[0],
            y: self.min[1],
        }
    }

    fn max(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.max[0],
            y: self.max[1],
        }
    }
}
