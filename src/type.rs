use std::fmt::Debug;

use num_traits::{Float, NumCast, ToPrimitive};

/// A trait for types that can be used for stored coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only floating point types
/// are supported, since latitudes and longitudes are fractional degrees and the unbounded search
/// region relies on infinities.
pub trait CoordNum:
    private::Sealed + Float + NumCast + ToPrimitive + Default + Debug + Send + Sync + 'static
{
    /// Smallest valid latitude, in degrees.
    const MIN_LAT: Self;
    /// Largest valid latitude, in degrees.
    const MAX_LAT: Self;
    /// Smallest valid longitude, in degrees.
    const MIN_LON: Self;
    /// Largest valid longitude, in degrees.
    const MAX_LON: Self;

    /// Lossless widening used when reporting values in errors.
    fn as_f64(self) -> f64;
}

impl CoordNum for f32 {
    const MIN_LAT: Self = -90.0;
    const MAX_LAT: Self = 90.0;
    const MIN_LON: Self = -180.0;
    const MAX_LON: Self = 180.0;

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl CoordNum for f64 {
    const MIN_LAT: Self = -90.0;
    const MAX_LAT: Self = 90.0;
    const MIN_LON: Self = -180.0;
    const MAX_LON: Self = 180.0;

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
