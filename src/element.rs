//! Element widths supported by the typed entry points
//!
//! The sort is defined the same way for every width; this module only adds
//! the per-width plumbing: a type tag, token parsing, the NaN check that
//! guards the total-order precondition, and a flat typed buffer.

use crate::error::{SortError, SortResult};
use crate::quicksort::{first_disorder, sort, Sorter};
use crate::text::write_values;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Fixed element width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Narrow signed integer
    Int32,
    Float32,
    Float64,
}

impl ElementType {
    /// Size of one element in bytes
    pub fn width(&self) -> usize {
        match self {
            ElementType::Int32 | ElementType::Float32 => 4,
            ElementType::Float64 => 8,
        }
    }
}

impl FromStr for ElementType {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" | "i32" | "integer" | "int32" => Ok(ElementType::Int32),
            "f32" | "float" | "float32" => Ok(ElementType::Float32),
            "f64" | "double" | "float64" => Ok(ElementType::Float64),
            _ => Err(SortError::parse_error(&format!("unknown element type: {s}"))),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Int32 => "i32",
            ElementType::Float32 => "f32",
            ElementType::Float64 => "f64",
        };
        write!(f, "{name}")
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Primitive numeric element accepted by the checked entry points.
///
/// Only implemented for `i32`, `f32` and `f64`. Every bit pattern of these
/// types is a valid value, which `mapped` relies on when it views raw file
/// bytes as a typed slice.
pub trait SortElement:
    sealed::Sealed + PartialOrd + Copy + fmt::Display + fmt::Debug + 'static
{
    const ELEMENT_TYPE: ElementType;

    /// False for values outside the total order (NaN)
    fn is_ordered(&self) -> bool;

    fn parse_token(token: &str) -> Option<Self>;
}

impl SortElement for i32 {
    const ELEMENT_TYPE: ElementType = ElementType::Int32;

    fn is_ordered(&self) -> bool {
        true
    }

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl SortElement for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::Float32;

    fn is_ordered(&self) -> bool {
        !self.is_nan()
    }

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl SortElement for f64 {
    const ELEMENT_TYPE: ElementType = ElementType::Float64;

    fn is_ordered(&self) -> bool {
        !self.is_nan()
    }

    fn parse_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

/// Sort a narrow-integer sequence in place
pub fn sort_i32(v: &mut [i32]) {
    sort(v);
}

/// Sort a 32-bit float sequence in place. NaN leaves the order unspecified.
pub fn sort_f32(v: &mut [f32]) {
    sort(v);
}

/// Sort a 64-bit float sequence in place. NaN leaves the order unspecified.
pub fn sort_f64(v: &mut [f64]) {
    sort(v);
}

/// Sort `v` after verifying that every element is ordered.
///
/// Nothing is moved when an unordered value is found.
pub fn sort_checked<T: SortElement>(v: &mut [T], sorter: &mut Sorter) -> SortResult<()> {
    ensure_ordered(v)?;
    let element_type = T::ELEMENT_TYPE;
    tracing::trace!(len = v.len(), %element_type, pivot = %sorter.strategy(), "sorting");
    sorter.sort(v);
    Ok(())
}

/// Fail with `UnorderedValue` at the first NaN in `v`
pub fn ensure_ordered<T: SortElement>(v: &[T]) -> SortResult<()> {
    match v.iter().position(|x| !x.is_ordered()) {
        Some(index) => Err(SortError::unordered_value(index)),
        None => Ok(()),
    }
}

/// Fail with `UnorderedValue` on NaN, or `NotSorted` at the first element
/// smaller than its predecessor.
pub fn ensure_sorted<T: SortElement>(v: &[T]) -> SortResult<()> {
    ensure_ordered(v)?;
    match first_disorder(v) {
        Some(index) => Err(SortError::not_sorted(index, &v[index].to_string())),
        None => Ok(()),
    }
}

fn parse_all<T: SortElement, S: AsRef<str>>(tokens: &[S]) -> SortResult<Vec<T>> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            T::parse_token(token)
                .ok_or_else(|| SortError::invalid_token(token, &T::ELEMENT_TYPE.to_string()))
        })
        .collect()
}

/// Flat buffer of fixed-width numeric values
#[derive(Debug, Clone, PartialEq)]
pub enum NumericBuffer {
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl NumericBuffer {
    /// Parse every token as `element_type`
    pub fn parse<S: AsRef<str>>(tokens: &[S], element_type: ElementType) -> SortResult<Self> {
        Ok(match element_type {
            ElementType::Int32 => NumericBuffer::Int32(parse_all(tokens)?),
            ElementType::Float32 => NumericBuffer::Float32(parse_all(tokens)?),
            ElementType::Float64 => NumericBuffer::Float64(parse_all(tokens)?),
        })
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            NumericBuffer::Int32(_) => ElementType::Int32,
            NumericBuffer::Float32(_) => ElementType::Float32,
            NumericBuffer::Float64(_) => ElementType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericBuffer::Int32(v) => v.len(),
            NumericBuffer::Float32(v) => v.len(),
            NumericBuffer::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort the buffer in place
    pub fn sort(&mut self, sorter: &mut Sorter) -> SortResult<()> {
        match self {
            NumericBuffer::Int32(v) => sort_checked(v, sorter),
            NumericBuffer::Float32(v) => sort_checked(v, sorter),
            NumericBuffer::Float64(v) => sort_checked(v, sorter),
        }
    }

    /// Index and rendered value of the first out-of-order element
    pub fn first_disorder(&self) -> Option<(usize, String)> {
        match self {
            NumericBuffer::Int32(v) => first_disorder(v).map(|i| (i, v[i].to_string())),
            NumericBuffer::Float32(v) => first_disorder(v).map(|i| (i, v[i].to_string())),
            NumericBuffer::Float64(v) => first_disorder(v).map(|i| (i, v[i].to_string())),
        }
    }

    /// Verify the buffer is in non-decreasing order without sorting it
    pub fn ensure_sorted(&self) -> SortResult<()> {
        match self {
            NumericBuffer::Int32(v) => ensure_sorted(v),
            NumericBuffer::Float32(v) => ensure_sorted(v),
            NumericBuffer::Float64(v) => ensure_sorted(v),
        }
    }

    /// Write one value per line and flush
    pub fn write_lines<W: Write + ?Sized>(&self, out: &mut W) -> SortResult<()> {
        match self {
            NumericBuffer::Int32(v) => write_values(out, v),
            NumericBuffer::Float32(v) => write_values(out, v),
            NumericBuffer::Float64(v) => write_values(out, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_entry_points() {
        let mut ints = vec![5, 4, 3, 2, 1];
        sort_i32(&mut ints);
        assert_eq!(ints, vec![1, 2, 3, 4, 5]);

        let mut floats = vec![-3.5f32, 1.25, -2.75, 0.0, 1.75];
        sort_f32(&mut floats);
        assert_eq!(floats, vec![-3.5, -2.75, 0.0, 1.25, 1.75]);

        let mut doubles = vec![64.0, 34.0, 25.0, 12.0, 22.0, 11.0, 90.0];
        sort_f64(&mut doubles);
        assert_eq!(doubles, vec![11.0, 12.0, 22.0, 25.0, 34.0, 64.0, 90.0]);
    }

    #[test]
    fn test_sort_checked_rejects_nan_without_moving() {
        let mut data = vec![3.0, f64::NAN, 1.0];
        let err = sort_checked(&mut data, &mut Sorter::default()).unwrap_err();
        assert!(matches!(err, SortError::UnorderedValue { index: 1 }));
        assert_eq!(data[0], 3.0);
        assert_eq!(data[2], 1.0);
    }

    #[test]
    fn test_parse_buffer() {
        let buffer = NumericBuffer::parse(&["3", "-1", "2"], ElementType::Int32)
            .expect("Failed to parse integers");
        assert_eq!(buffer, NumericBuffer::Int32(vec![3, -1, 2]));
        assert_eq!(buffer.element_type(), ElementType::Int32);
        assert_eq!(buffer.len(), 3);

        let err = NumericBuffer::parse(&["1", "2.5"], ElementType::Int32).unwrap_err();
        assert_eq!(err.to_string(), "Invalid i32 value: '2.5'");
    }

    #[test]
    fn test_buffer_sort_and_write() {
        let mut buffer = NumericBuffer::parse(&["2.5", "-1", "0.25"], ElementType::Float32)
            .expect("Failed to parse floats");
        assert_eq!(buffer.first_disorder(), Some((1, "-1".to_string())));

        buffer.sort(&mut Sorter::default()).expect("Failed to sort buffer");
        assert_eq!(buffer.first_disorder(), None);

        let mut out = Vec::new();
        buffer.write_lines(&mut out).expect("Failed to write buffer");
        assert_eq!(String::from_utf8(out).expect("Output is UTF-8"), "-1\n0.25\n2.5\n");
    }

    #[test]
    fn test_ensure_sorted_rejects_nan() {
        // every comparison with NaN is false, so the disorder scan alone passes this
        let buffer = NumericBuffer::Float64(vec![1.0, f64::NAN, 0.0]);
        assert_eq!(buffer.first_disorder(), None);
        let err = buffer.ensure_sorted().unwrap_err();
        assert!(matches!(err, SortError::UnorderedValue { index: 1 }));

        let err = NumericBuffer::Int32(vec![1, 3, 2]).ensure_sorted().unwrap_err();
        assert!(matches!(err, SortError::NotSorted { index: 2, ref value } if value == "2"));

        assert!(NumericBuffer::Float32(vec![-1.0, 0.5, 0.5]).ensure_sorted().is_ok());
    }

    #[test]
    fn test_write_lines_failure_names_output() {
        struct FullDisk;

        impl Write for FullDisk {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = NumericBuffer::Int32(vec![1, 2]).write_lines(&mut FullDisk).unwrap_err();
        assert_eq!(err.to_string(), "I/O error: writing output: no space left");
    }

    #[test]
    fn test_element_type_names() {
        assert_eq!("double".parse::<ElementType>().expect("Failed to parse"), ElementType::Float64);
        assert_eq!("int".parse::<ElementType>().expect("Failed to parse"), ElementType::Int32);
        assert!("u8".parse::<ElementType>().is_err());
        assert_eq!(ElementType::Float64.width(), 8);
        assert_eq!(ElementType::Float32.to_string(), "f32");
    }
}
