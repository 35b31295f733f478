//! In-place partition-exchange sort for numeric sequences
//!
//! The core is a generic Lomuto quicksort ([`quicksort::sort`]). Around it
//! sit explicit typed entry points for narrow integers, 32-bit floats and
//! 64-bit floats ([`element`]), a best-effort entry point for dynamically
//! typed values ([`coerce`]), in-place sorting of flat buffer files
//! ([`mapped`]) and the text front end used by the `numsort` binary.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

pub mod quicksort;
pub mod pivot;
pub mod element;
pub mod coerce;
pub mod mapped;
pub mod text;

// Re-export commonly used types
pub use coerce::{sort_values, Scalar};
pub use config::{ElementMode, SortConfig, SortConfigBuilder};
pub use element::{sort_f32, sort_f64, sort_i32, ElementType, NumericBuffer, SortElement};
pub use error::{SortError, SortResult};
pub use mapped::sort_file_in_place;
pub use pivot::PivotStrategy;
pub use quicksort::{sort, Sorter};

use std::path::Path;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Main entry point: process input according to configuration
pub fn run(config: &SortConfig) -> SortResult<i32> {
    config.validate()?;
    let mut sorter = config.sorter();
    tracing::debug!(
        element_mode = %config.element_mode,
        pivot = %config.pivot,
        check = config.check,
        binary = config.binary,
        to_stdout = config.writing_to_stdout(),
        "starting"
    );

    if config.binary {
        let ElementMode::Fixed(element_type) = config.element_mode else {
            return Err(SortError::conflicting_options(
                "--binary requires an explicit --type",
            ));
        };
        for file in &config.input_files {
            sort_file_in_place(Path::new(file), element_type, &mut sorter)?;
        }
        return Ok(EXIT_SUCCESS);
    }

    let tokens = text::read_tokens(&config.input_files)?;
    tracing::debug!(count = tokens.len(), "read input tokens");

    match config.element_mode {
        ElementMode::Auto => {
            let mut values: Vec<Scalar> = tokens.iter().map(|t| Scalar::parse(t)).collect();
            if config.check {
                coerce::coerce(&values)?.ensure_sorted()?;
                return Ok(EXIT_SUCCESS);
            }
            let element_type = sort_values(&mut values, &mut sorter)?;
            tracing::debug!(%element_type, "sorted with best-effort element type");

            let mut output = text::open_output(config.output_file.as_deref())?;
            text::write_values(&mut output, &values)?;
        }
        ElementMode::Fixed(element_type) => {
            let mut buffer = NumericBuffer::parse(&tokens, element_type)?;
            if config.check {
                buffer.ensure_sorted()?;
                return Ok(EXIT_SUCCESS);
            }
            buffer.sort(&mut sorter)?;

            let mut output = text::open_output(config.output_file.as_deref())?;
            buffer.write_lines(&mut output)?;
        }
    }

    Ok(EXIT_SUCCESS)
}
