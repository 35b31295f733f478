//! Best-effort entry point for dynamically typed host values
//!
//! A host hands over a sequence of `Scalar`s whose element type is not known
//! up front. The first element picks where the attempts start; the attempts
//! themselves always run in the same order (narrow integer, then 64-bit
//! float) and the first one that accepts every element wins. When none does,
//! the caller gets `SortError::UnsupportedElementType` and the input is left
//! untouched.

use crate::element::{ElementType, NumericBuffer};
use crate::error::{SortError, SortResult};
use crate::quicksort::Sorter;
use std::fmt;

/// A dynamically typed host value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Classify a text token: integer, then float, otherwise text
    pub fn parse(token: &str) -> Self {
        if let Ok(value) = token.parse::<i64>() {
            Scalar::Int(value)
        } else if let Ok(value) = token.parse::<f64>() {
            Scalar::Float(value)
        } else {
            Scalar::Text(token.to_string())
        }
    }

    /// Exact conversion to a narrow integer; floats are never truncated
    pub fn as_narrow_int(&self) -> Option<i32> {
        match self {
            Scalar::Int(value) => i32::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Coercion attempt, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    NarrowInt,
    Double,
}

const ATTEMPTS: [Attempt; 2] = [Attempt::NarrowInt, Attempt::Double];

impl Attempt {
    fn element_type(self) -> ElementType {
        match self {
            Attempt::NarrowInt => ElementType::Int32,
            Attempt::Double => ElementType::Float64,
        }
    }

    /// Convert every value, or report the first one that does not fit
    fn convert(self, values: &[Scalar]) -> Result<NumericBuffer, usize> {
        match self {
            Attempt::NarrowInt => collect_or_index(values, Scalar::as_narrow_int)
                .map(NumericBuffer::Int32),
            Attempt::Double => {
                collect_or_index(values, Scalar::as_double).map(NumericBuffer::Float64)
            }
        }
    }
}

fn collect_or_index<T>(
    values: &[Scalar],
    convert: impl Fn(&Scalar) -> Option<T>,
) -> Result<Vec<T>, usize> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| convert(value).ok_or(index))
        .collect()
}

/// Coerce `values` into a typed buffer without sorting.
///
/// An empty sequence becomes an empty narrow-integer buffer.
pub fn coerce(values: &[Scalar]) -> SortResult<NumericBuffer> {
    let start = match values.first() {
        None => return Ok(NumericBuffer::Int32(Vec::new())),
        Some(Scalar::Float(_)) => 1,
        Some(_) => 0,
    };

    let mut rejected = 0;
    for attempt in &ATTEMPTS[start..] {
        match attempt.convert(values) {
            Ok(buffer) => {
                tracing::debug!(len = values.len(), element_type = %attempt.element_type(), "coerced host values");
                return Ok(buffer);
            }
            Err(index) => {
                tracing::debug!(
                    index,
                    found = values[index].type_name(),
                    element_type = %attempt.element_type(),
                    "coercion attempt rejected"
                );
                rejected = index;
            }
        }
    }

    let value = &values[rejected];
    Err(SortError::unsupported_element_type(
        rejected,
        &format!("{} '{}'", value.type_name(), value),
    ))
}

/// Sort host values in place, choosing the element width by best effort.
///
/// On success every position holds the sorted value re-expressed in the
/// chosen width (`Scalar::Int` for narrow integers, `Scalar::Float` for
/// 64-bit floats) and that width is returned. On failure nothing is moved.
pub fn sort_values(values: &mut [Scalar], sorter: &mut Sorter) -> SortResult<ElementType> {
    let mut buffer = coerce(values)?;
    buffer.sort(sorter)?;
    write_back(&buffer, values);
    Ok(buffer.element_type())
}

fn write_back(buffer: &NumericBuffer, values: &mut [Scalar]) {
    match buffer {
        NumericBuffer::Int32(sorted) => {
            for (slot, &value) in values.iter_mut().zip(sorted) {
                *slot = Scalar::from(value);
            }
        }
        NumericBuffer::Float32(sorted) => {
            for (slot, &value) in values.iter_mut().zip(sorted) {
                *slot = Scalar::from(f64::from(value));
            }
        }
        NumericBuffer::Float64(sorted) => {
            for (slot, &value) in values.iter_mut().zip(sorted) {
                *slot = Scalar::from(value);
            }
        }
    }
}
