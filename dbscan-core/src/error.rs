//! Error types for the DBSCAN core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling a [`crate::PointSet`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PointSetError {
    /// A row had a different number of coordinates than the first row.
    #[error("row {row} has {actual} coordinates but {expected} were expected")]
    DimensionMismatch {
        /// Index of the offending row.
        row: usize,
        /// Dimension fixed by the first row.
        expected: usize,
        /// Dimension of the offending row.
        actual: usize,
    },
    /// Points must carry at least one coordinate.
    #[error("points must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("row {row} has a non-finite coordinate at column {column}")]
    NonFinite {
        /// Index of the offending row.
        row: usize,
        /// Index of the offending coordinate within the row.
        column: usize,
    },
    /// A flat coordinate buffer could not be split into whole points.
    #[error("buffer of {len} coordinates is not a multiple of dimension {dimensions}")]
    RaggedBuffer {
        /// Length of the supplied buffer.
        len: usize,
        /// Requested dimension.
        dimensions: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PointSetError`] variants.
    enum PointSetErrorCode for PointSetError {
        /// A row had a different number of coordinates than the first row.
        DimensionMismatch => DimensionMismatch { .. } => "POINT_SET_DIMENSION_MISMATCH",
        /// Points must carry at least one coordinate.
        ZeroDimension => ZeroDimension => "POINT_SET_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "POINT_SET_NON_FINITE",
        /// A flat coordinate buffer could not be split into whole points.
        RaggedBuffer => RaggedBuffer { .. } => "POINT_SET_RAGGED_BUFFER",
    }
}

/// Error type produced when constructing or running [`crate::Dbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DbscanError {
    /// Parallel engines need at least one worker thread.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The invalid thread count supplied by the caller.
        got: usize,
    },
    /// The worker pool for a parallel run could not be created.
    #[error("failed to build a pool of {threads} worker threads: {message}")]
    ThreadPool {
        /// Requested number of workers.
        threads: usize,
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`DbscanError`] variants.
    enum DbscanErrorCode for DbscanError {
        /// Parallel engines need at least one worker thread.
        InvalidThreadCount => InvalidThreadCount { .. } => "DBSCAN_INVALID_THREAD_COUNT",
        /// The worker pool for a parallel run could not be created.
        ThreadPool => ThreadPool { .. } => "DBSCAN_THREAD_POOL",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DbscanError>;
