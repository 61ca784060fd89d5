//! Coordinate value types shared by the index: points, cutting dimensions and query regions.

use std::cmp::Ordering;

use geo_traits::{CoordTrait, Dimensions, RectTrait};

use crate::error::{GeoKdSetError, Result};
use crate::r#type::CoordNum;

/// A latitude/longitude pair, in degrees.
///
/// Two locations are the same point if and only if both coordinates compare equal. There is no
/// tolerance and no longitude wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Location<N: CoordNum = f64> {
    /// Latitude, in `[-90, 90]`.
    pub lat: N,
    /// Longitude, in `[-180, 180]`.
    pub lon: N,
}

impl<N: CoordNum> Location<N> {
    /// Create a new location.
    ///
    /// The coordinates are expected to be valid (see [`Location::is_valid`]); this is only
    /// checked in debug builds. Use [`Location::try_new`] for untrusted input.
    pub fn new(lat: N, lon: N) -> Self {
        let loc = Self { lat, lon };
        debug_assert!(loc.is_valid(), "invalid location {:?}", loc);
        loc
    }

    /// Create a new location, returning an error if the coordinates are non-finite or out of
    /// range.
    pub fn try_new(lat: N, lon: N) -> Result<Self> {
        let loc = Self { lat, lon };
        if loc.is_valid() {
            Ok(loc)
        } else {
            Err(GeoKdSetError::InvalidLocation {
                lat: lat.as_f64(),
                lon: lon.as_f64(),
            })
        }
    }

    /// Returns `true` if both coordinates are finite and within the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat >= N::MIN_LAT
            && self.lat <= N::MAX_LAT
            && self.lon >= N::MIN_LON
            && self.lon <= N::MAX_LON
    }

    /// Returns `true` if both coordinates of `self` are strictly greater than those of `other`.
    pub fn is_strictly_northeast_of(&self, other: &Self) -> bool {
        self.lat > other.lat && self.lon > other.lon
    }
}

impl<N: CoordNum> From<(N, N)> for Location<N> {
    /// Interpret the tuple as `(lat, lon)`.
    fn from((lat, lon): (N, N)) -> Self {
        Self::new(lat, lon)
    }
}

impl<N: CoordNum> CoordTrait for Location<N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.lon
    }

    fn y(&self) -> Self::T {
        self.lat
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.lon,
            1 => self.lat,
            _ => panic!("Invalid index of coord"),
        }
    }
}

#[cfg(feature = "use-geo_0_31")]
impl<N: CoordNum + geo_0_31::CoordNum> From<geo_0_31::Coord<N>> for Location<N> {
    fn from(coord: geo_0_31::Coord<N>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

#[cfg(feature = "use-geo_0_31")]
impl<N: CoordNum + geo_0_31::CoordNum> From<Location<N>> for geo_0_31::Coord<N> {
    fn from(loc: Location<N>) -> Self {
        geo_0_31::Coord {
            x: loc.lon,
            y: loc.lat,
        }
    }
}

/// The axis a tree node splits its subtree on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Split on latitude. This is the dimension of the root.
    #[default]
    Latitude,
    /// Split on longitude.
    Longitude,
}

impl Dimension {
    /// The dimension used by the root of every tree.
    pub const ROOT: Self = Self::Latitude;

    /// The dimension used one level further down the tree.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Self::Latitude => Self::Longitude,
            Self::Longitude => Self::Latitude,
        }
    }

    /// The coordinate of `loc` along this dimension.
    #[inline]
    pub fn value<N: CoordNum>(self, loc: &Location<N>) -> N {
        match self {
            Self::Latitude => loc.lat,
            Self::Longitude => loc.lon,
        }
    }

    /// Compare two locations along this dimension.
    ///
    /// Ties on this dimension's coordinate are broken by the other coordinate, so two locations
    /// compare `Equal` only if they are the same point.
    #[inline]
    pub fn compare<N: CoordNum>(self, a: &Location<N>, b: &Location<N>) -> Ordering {
        cmp_coord(self.value(a), self.value(b))
            .then_with(|| cmp_coord(self.next().value(a), self.next().value(b)))
    }
}

// Valid locations never hold NaN.
#[inline]
fn cmp_coord<N: CoordNum>(a: N, b: N) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// A closed, axis-aligned rectangle in latitude/longitude space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Region<N: CoordNum = f64> {
    /// South-west corner.
    pub sw: Location<N>,
    /// North-east corner.
    pub ne: Location<N>,
}

impl<N: CoordNum> Region<N> {
    /// Create a new region from its corners without validation.
    pub fn new(sw: Location<N>, ne: Location<N>) -> Self {
        Self { sw, ne }
    }

    /// Create a new query region, returning an error unless `ne` is strictly north-east of `sw`.
    pub fn try_new(sw: Location<N>, ne: Location<N>) -> Result<Self> {
        if ne.is_strictly_northeast_of(&sw) {
            Ok(Self { sw, ne })
        } else {
            Err(GeoKdSetError::InvalidRegion {
                sw_lat: sw.lat.as_f64(),
                sw_lon: sw.lon.as_f64(),
                ne_lat: ne.lat.as_f64(),
                ne_lon: ne.lon.as_f64(),
            })
        }
    }

    /// The unbounded region covering every possible coordinate.
    pub fn everything() -> Self {
        Self {
            sw: Location {
                lat: N::neg_infinity(),
                lon: N::neg_infinity(),
            },
            ne: Location {
                lat: N::infinity(),
                lon: N::infinity(),
            },
        }
    }

    /// Returns `true` if the region contains no coordinates at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sw.lon > self.ne.lon || self.sw.lat > self.ne.lat
    }

    /// The region covered by both `self` and `other`. May be empty.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            sw: Location {
                lat: self.sw.lat.max(other.sw.lat),
                lon: self.sw.lon.max(other.sw.lon),
            },
            ne: Location {
                lat: self.ne.lat.min(other.ne.lat),
                lon: self.ne.lon.min(other.ne.lon),
            },
        }
    }

    /// Returns `true` if `self` and `other` share at least one coordinate.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Returns `true` if `loc` lies inside the region or on its border.
    #[inline]
    pub fn contains(&self, loc: &Location<N>) -> bool {
        loc.lat >= self.sw.lat
            && loc.lat <= self.ne.lat
            && loc.lon >= self.sw.lon
            && loc.lon <= self.ne.lon
    }

    /// Split this region at `loc` along `dim`, returning the `(lower, upper)` halves.
    ///
    /// Both halves include the splitting coordinate.
    #[inline]
    pub(crate) fn split(&self, dim: Dimension, loc: &Location<N>) -> (Self, Self) {
        let mut lower = *self;
        let mut upper = *self;
        match dim {
            Dimension::Latitude => {
                lower.ne.lat = loc.lat;
                upper.sw.lat = loc.lat;
            }
            Dimension::Longitude => {
                lower.ne.lon = loc.lon;
                upper.sw.lon = loc.lon;
            }
        }
        (lower, upper)
    }
}

impl<N: CoordNum> geo_traits::GeometryTrait for Region<N> {
    type T = N;
    type PointType<'b>
        = geo_traits::UnimplementedPoint<N>
    where
        Self: 'b;
    type LineStringType<'b>
        = geo_traits::UnimplementedLineString<N>
    where
        Self: 'b;
    type PolygonType<'b>
        = geo_traits::UnimplementedPolygon<N>
    where
        Self: 'b;
    type MultiPointType<'b>
        = geo_traits::UnimplementedMultiPoint<N>
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = geo_traits::UnimplementedMultiLineString<N>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = geo_traits::UnimplementedMultiPolygon<N>
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = geo_traits::UnimplementedGeometryCollection<N>
    where
        Self: 'b;
    type RectType<'b>
        = Self
    where
        Self: 'b;
    type TriangleType<'b>
        = geo_traits::UnimplementedTriangle<N>
    where
        Self: 'b;
    type LineType<'b>
        = geo_traits::UnimplementedLine<N>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> geo_traits::GeometryType<
        '_,
        Self::PointType<'_>,
        Self::LineStringType<'_>,
        Self::PolygonType<'_>,
        Self::MultiPointType<'_>,
        Self::MultiLineStringType<'_>,
        Self::MultiPolygonType<'_>,
        Self::GeometryCollectionType<'_>,
        Self::RectType<'_>,
        Self::TriangleType<'_>,
        Self::LineType<'_>,
    > {
        geo_traits::GeometryType::Rect(self)
    }
}

impl<N: CoordNum> RectTrait for Region<N> {
    type CoordType<'a>
        = Location<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        self.sw
    }

    fn max(&self) -> Self::CoordType<'_> {
        self.ne
    }
}
