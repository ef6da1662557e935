//! Range-checked numeric conversions.
//!
//! [`cast`] converts between primitive numeric types and fails with a
//! [`CastError`] — carrying the attempted value and the destination
//! type's bounds — whenever the source value is out of the
//! destination's range. Unlike `as`, nothing is silently truncated or
//! saturated; unlike `TryFrom`, float conversions are covered and the
//! error says what went wrong.
//!
//! ```
//! use haft_num::{cast, CastError};
//!
//! assert_eq!(cast::<u8, _>(200i32), Ok(200u8));
//! assert!(matches!(cast::<u8, _>(-1i32), Err(CastError::OutOfRange { .. })));
//! ```
//!
//! Conversion rules, in the order they are checked:
//! - integer → integer: exact or [`CastError::OutOfRange`];
//! - float → float: NaN passes through, values beyond the destination's
//!   finite range (including infinities) are rejected;
//! - integer → float: rejected only when beyond the destination's
//!   finite range (precision loss is allowed, as in a plain widening);
//! - float → integer: NaN is [`CastError::NanToIntegral`]; the value
//!   must be at least the destination minimum and strictly below
//!   2^bits, both exactly representable, so a value that only *rounds*
//!   into range (`u32::MAX as f32`) is still rejected. The fractional
//!   part, if any, truncates toward zero.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::fmt;

/// Why a [`cast`] failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastError {
    /// The source value cannot be represented in the destination type.
    OutOfRange {
        /// The attempted value, formatted.
        value: String,
        /// Name of the destination type.
        target: &'static str,
        /// The destination type's minimum, formatted.
        min: String,
        /// The destination type's maximum, formatted.
        max: String,
    },
    /// NaN was converted to an integer type.
    NanToIntegral {
        /// Name of the destination type.
        target: &'static str,
    },
}

impl CastError {
    fn out_of_range(
        value: impl fmt::Display,
        target: &'static str,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            target,
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                value,
                target,
                min,
                max,
            } => {
                write!(f, "value {value} out of range for {target} ({min}..={max})")
            }
            Self::NanToIntegral { target } => write!(f, "can't convert NaN to {target}"),
        }
    }
}

impl Error for CastError {}

/// Conversion into `Self` from a source numeric type, with range checks.
///
/// Implemented for every primitive integer and float pairing. Usually
/// invoked through [`cast`].
pub trait CastFrom<S>: Sized {
    /// Convert `value`, or report why it does not fit.
    fn cast_from(value: S) -> Result<Self, CastError>;
}

/// Convert `value` to `D`, failing with a [`CastError`] when the value
/// cannot be represented.
pub fn cast<D: CastFrom<S>, S>(value: S) -> Result<D, CastError> {
    D::cast_from(value)
}

/// One past the largest magnitude an integer type can hold, as an exact
/// f64: 2^value-bits. Built by repeated doubling so no rounding is
/// involved.
fn exact_pow2(value_bits: u32) -> f64 {
    let mut result = 1.0f64;
    for _ in 0..value_bits {
        result *= 2.0;
    }
    result
}

macro_rules! int_to_int {
    ($src:ty => $($dst:ty),+ $(,)?) => {$(
        impl CastFrom<$src> for $dst {
            fn cast_from(value: $src) -> Result<Self, CastError> {
                <$dst>::try_from(value).map_err(|_| {
                    CastError::out_of_range(value, stringify!($dst), <$dst>::MIN, <$dst>::MAX)
                })
            }
        }
    )+};
}

macro_rules! int_matrix {
    ($($src:ty),+ $(,)?) => {$(
        int_to_int!($src => u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);
    )+};
}

int_matrix!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);

macro_rules! float_to_float {
    ($src:ty => $($dst:ty),+ $(,)?) => {$(
        impl CastFrom<$src> for $dst {
            fn cast_from(value: $src) -> Result<Self, CastError> {
                if value.is_nan() {
                    return Ok(value as $dst);
                }
                let wide = value as f64;
                if wide < <$dst>::MIN as f64 || wide > <$dst>::MAX as f64 {
                    return Err(CastError::out_of_range(
                        value,
                        stringify!($dst),
                        <$dst>::MIN,
                        <$dst>::MAX,
                    ));
                }
                Ok(value as $dst)
            }
        }
    )+};
}

float_to_float!(f32 => f32, f64);
float_to_float!(f64 => f32, f64);

macro_rules! int_to_float {
    ($src:ty => $($dst:ty),+ $(,)?) => {$(
        impl CastFrom<$src> for $dst {
            fn cast_from(value: $src) -> Result<Self, CastError> {
                let wide = value as f64;
                if wide < <$dst>::MIN as f64 || wide > <$dst>::MAX as f64 {
                    return Err(CastError::out_of_range(
                        value,
                        stringify!($dst),
                        <$dst>::MIN,
                        <$dst>::MAX,
                    ));
                }
                Ok(value as $dst)
            }
        }
    )+};
}

int_to_float!(u8 => f32, f64);
int_to_float!(i8 => f32, f64);
int_to_float!(u16 => f32, f64);
int_to_float!(i16 => f32, f64);
int_to_float!(u32 => f32, f64);
int_to_float!(i32 => f32, f64);
int_to_float!(u64 => f32, f64);
int_to_float!(i64 => f32, f64);
int_to_float!(u128 => f32, f64);
int_to_float!(i128 => f32, f64);
int_to_float!(usize => f32, f64);
int_to_float!(isize => f32, f64);

macro_rules! float_to_int {
    ($src:ty => $($dst:ty),+ $(,)?) => {$(
        impl CastFrom<$src> for $dst {
            fn cast_from(value: $src) -> Result<Self, CastError> {
                if value.is_nan() {
                    return Err(CastError::NanToIntegral {
                        target: stringify!($dst),
                    });
                }
                let wide = value as f64;
                let lowest = <$dst>::MIN as f64;
                let value_bits = <$dst>::BITS - ((<$dst>::MIN != 0) as u32);
                if wide >= lowest && wide < exact_pow2(value_bits) {
                    Ok(value as $dst)
                } else {
                    Err(CastError::out_of_range(
                        value,
                        stringify!($dst),
                        <$dst>::MIN,
                        <$dst>::MAX,
                    ))
                }
            }
        }
    )+};
}

float_to_int!(f32 => u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);
float_to_int!(f64 => u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);
