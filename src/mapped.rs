//! In-place sorting of flat numeric buffers stored in files
//!
//! A buffer file is a plain array of native-endian fixed-width values with no
//! header. It is mapped writable and sorted through the mapping, so the file
//! keeps its identity and no copy of its contents is made.

use crate::element::{ElementType, SortElement, sort_checked};
use crate::error::{SortContext, SortError, SortResult};
use crate::quicksort::Sorter;
use memmap2::MmapMut;
use std::fs::OpenOptions;
use std::path::Path;

/// Sort the buffer file at `path` in place, returning the element count.
pub fn sort_file_in_place(
    path: &Path,
    element_type: ElementType,
    sorter: &mut Sorter,
) -> SortResult<usize> {
    let name = path.to_string_lossy();
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .with_file_context(&name)?;

    let width = element_type.width();
    let count = element_count(&name, file.metadata().with_file_context(&name)?.len(), width)?;
    if count == 0 {
        return Ok(0);
    }

    // SAFETY: the mapping is private to this call; concurrent modification of
    // the file by another process is outside our contract.
    let mut map = unsafe { MmapMut::map_mut(&file) }.with_file_context(&name)?;

    match element_type {
        ElementType::Int32 => sort_bytes::<i32>(&mut map, sorter, &name)?,
        ElementType::Float32 => sort_bytes::<f32>(&mut map, sorter, &name)?,
        ElementType::Float64 => sort_bytes::<f64>(&mut map, sorter, &name)?,
    }

    map.flush().with_file_context(&name)?;
    tracing::debug!(file = %name, count, %element_type, "sorted buffer file in place");
    Ok(count)
}

/// Number of `width`-byte elements in a file of `file_len` bytes.
///
/// The length must be a whole number of elements and addressable in memory.
fn element_count(name: &str, file_len: u64, width: usize) -> SortResult<usize> {
    let len = usize::try_from(file_len)
        .map_err(|_| SortError::invalid_buffer_length(name, file_len, width))?;
    if len % width != 0 {
        return Err(SortError::invalid_buffer_length(name, file_len, width));
    }
    Ok(len / width)
}

/// View `bytes` as a slice of `T` and sort it.
fn sort_bytes<T: SortElement>(bytes: &mut [u8], sorter: &mut Sorter, name: &str) -> SortResult<()> {
    // SAFETY: `SortElement` is only implemented for primitive numeric types,
    // for which every bit pattern is a valid value.
    let (prefix, values, suffix) = unsafe { bytes.align_to_mut::<T>() };
    if !prefix.is_empty() || !suffix.is_empty() {
        return Err(SortError::misaligned_buffer(name));
    }
    sort_checked(values, sorter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_i32s(path: &Path, values: &[i32]) {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        fs::write(path, bytes).expect("Failed to write test buffer");
    }

    fn read_i32s(path: &Path) -> Vec<i32> {
        fs::read(path)
            .expect("Failed to read test buffer")
            .chunks_exact(4)
            .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_sort_i32_file_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("data.bin");
        write_i32s(&path, &[-5, -2, -8, 1, 3, -1, 0]);

        let count = sort_file_in_place(&path, ElementType::Int32, &mut Sorter::default())
            .expect("Failed to sort buffer file");

        assert_eq!(count, 7);
        assert_eq!(read_i32s(&path), vec![-8, -5, -2, -1, 0, 1, 3]);
    }

    #[test]
    fn test_sort_f64_file_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("data.f64");
        let bytes: Vec<u8> = [3.5f64, 1.25, 2.75, 0.5]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        fs::write(&path, bytes).expect("Failed to write test buffer");

        sort_file_in_place(&path, ElementType::Float64, &mut Sorter::default())
            .expect("Failed to sort buffer file");

        let sorted: Vec<f64> = fs::read(&path)
            .expect("Failed to read test buffer")
            .chunks_exact(8)
            .map(|c| f64::from_ne_bytes(c.try_into().expect("chunk is 8 bytes")))
            .collect();
        assert_eq!(sorted, vec![0.5, 1.25, 2.75, 3.5]);
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("empty.bin");
        fs::write(&path, b"").expect("Failed to write test buffer");

        let count = sort_file_in_place(&path, ElementType::Float32, &mut Sorter::default())
            .expect("Failed to sort empty file");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_truncated_buffer_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("odd.bin");
        fs::write(&path, [1u8, 2, 3, 4, 5, 6]).expect("Failed to write test buffer");

        let err = sort_file_in_place(&path, ElementType::Int32, &mut Sorter::default())
            .unwrap_err();
        assert!(matches!(err, SortError::InvalidBufferLength { len: 6, width: 4, .. }));
        assert_eq!(fs::read(&path).expect("Failed to read"), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count("data.bin", 0, 4).expect("Failed to count"), 0);
        assert_eq!(element_count("data.bin", 24, 8).expect("Failed to count"), 3);
        let err = element_count("data.bin", 10, 4).unwrap_err();
        assert!(matches!(err, SortError::InvalidBufferLength { len: 10, width: 4, .. }));
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_element_count_beyond_address_space() {
        let file_len = 1u64 << 40;
        let err = element_count("huge.bin", file_len, 4).unwrap_err();
        assert!(matches!(err, SortError::InvalidBufferLength { len, .. } if len == file_len));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing.bin");
        let err = sort_file_in_place(&path, ElementType::Int32, &mut Sorter::default())
            .unwrap_err();
        assert!(matches!(err, SortError::FileNotFound { .. }));
    }
}
