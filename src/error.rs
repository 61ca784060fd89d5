use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoKdSetError {
    /// A coordinate was non-finite or outside of `[-90, 90]` x `[-180, 180]`.
    #[error("Invalid location: lat {lat}, lon {lon}")]
    InvalidLocation { lat: f64, lon: f64 },

    /// The north-east corner of a query rectangle was not strictly north-east of its south-west
    /// corner.
    #[error(
        "Invalid region: sw ({sw_lat}, {sw_lon}) is not strictly south-west of ne ({ne_lat}, {ne_lon})"
    )]
    InvalidRegion {
        sw_lat: f64,
        sw_lon: f64,
        ne_lat: f64,
        ne_lon: f64,
    },
}

pub type Result<T> = std::result::Result<T, GeoKdSetError>;
