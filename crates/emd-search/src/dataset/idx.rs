//! Reading and writing images and labels in the IDX format used by MNIST.
//!
//! All header fields are big-endian `u32`s:
//!
//! * images: magic `0x00000803`, count, rows, columns, then `u8` pixels in
//!   row-major order.
//! * labels: magic `0x00000801`, count, then one `u8` label per image.

use std::path::Path;

use super::ImageBatch;
use crate::Error;

/// The magic number of an IDX file of `u8` images.
pub const IMAGES_MAGIC: u32 = 0x0000_0803;

/// The magic number of an IDX file of `u8` labels.
pub const LABELS_MAGIC: u32 = 0x0000_0801;

/// Reads a big-endian `u32` from a byte slice and increments the offset.
fn read_u32(bytes: &[u8], offset: &mut usize) -> Result<u32, Error> {
    let end = *offset + 4;
    let field = bytes
        .get(*offset..end)
        .ok_or_else(|| Error::Format(format!("header ends after {} bytes", bytes.len())))?;
    let mut buf = [0; 4];
    buf.copy_from_slice(field);
    *offset = end;
    Ok(u32::from_be_bytes(buf))
}

/// Reads a header field that holds a count or a dimension.
fn read_usize(bytes: &[u8], offset: &mut usize) -> Result<usize, Error> {
    let value = read_u32(bytes, offset)?;
    usize::try_from(value).map_err(|e| Error::Format(e.to_string()))
}

/// Checks the magic number at the start of the file.
fn check_magic(bytes: &[u8], offset: &mut usize, expected: u32) -> Result<(), Error> {
    let magic = read_u32(bytes, offset)?;
    if magic == expected {
        Ok(())
    } else {
        Err(Error::Format(format!(
            "magic number {magic:#010x} does not match {expected:#010x}"
        )))
    }
}

/// Returns the body of the file after checking that it holds `len` bytes.
fn body(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
    let available = bytes.len() - offset;
    if available < len {
        return Err(Error::Format(format!(
            "expected {len} bytes of data, found {available}"
        )));
    }
    Ok(&bytes[offset..offset + len])
}

/// Decodes an IDX image file.
///
/// # Errors
///
/// * If the magic number is not [`IMAGES_MAGIC`].
/// * If either dimension is zero.
/// * If the size the header claims overflows.
/// * If the file is shorter than its header claims.
pub fn decode_images(bytes: &[u8]) -> Result<ImageBatch, Error> {
    let mut offset = 0;
    check_magic(bytes, &mut offset, IMAGES_MAGIC)?;
    let count = read_usize(bytes, &mut offset)?;
    let rows = read_usize(bytes, &mut offset)?;
    let columns = read_usize(bytes, &mut offset)?;
    if rows == 0 || columns == 0 {
        return Err(Error::Format(format!("images are {rows}x{columns}")));
    }

    let num_pixels = rows
        .checked_mul(columns)
        .ok_or_else(|| Error::Format(format!("{rows}x{columns} images are too large")))?;
    let len = count
        .checked_mul(num_pixels)
        .ok_or_else(|| Error::Format(format!("{count} images of {num_pixels} pixels are too large")))?;
    let images = body(bytes, offset, len)?
        .chunks_exact(num_pixels)
        .map(<[u8]>::to_vec)
        .collect();

    ImageBatch::new(rows, columns, images)
}

/// Decodes an IDX label file.
///
/// # Errors
///
/// * If the magic number is not [`LABELS_MAGIC`].
/// * If the file is shorter than its header claims.
pub fn decode_labels(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let mut offset = 0;
    check_magic(bytes, &mut offset, LABELS_MAGIC)?;
    let count = read_usize(bytes, &mut offset)?;
    body(bytes, offset, count).map(<[u8]>::to_vec)
}

/// Converts a count or dimension to a header field.
fn header_field(value: usize) -> Result<[u8; 4], Error> {
    u32::try_from(value)
        .map(u32::to_be_bytes)
        .map_err(|e| Error::Format(e.to_string()))
}

/// Encodes a batch of images in the IDX format.
///
/// # Errors
///
/// If the number of images or either dimension does not fit in a `u32`.
pub fn encode_images(batch: &ImageBatch) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(16 + batch.len() * batch.num_pixels());
    bytes.extend_from_slice(&IMAGES_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&header_field(batch.len())?);
    bytes.extend_from_slice(&header_field(batch.rows())?);
    bytes.extend_from_slice(&header_field(batch.columns())?);
    for image in batch.iter() {
        bytes.extend_from_slice(image);
    }
    Ok(bytes)
}

/// Encodes labels in the IDX format.
///
/// # Errors
///
/// If the number of labels does not fit in a `u32`.
pub fn encode_labels(labels: &[u8]) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(8 + labels.len());
    bytes.extend_from_slice(&LABELS_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&header_field(labels.len())?);
    bytes.extend_from_slice(labels);
    Ok(bytes)
}

/// Reads an IDX image file.
///
/// # Errors
///
/// * If the file cannot be read.
/// * See [`decode_images`].
pub fn read_images<P: AsRef<Path>>(path: P) -> Result<ImageBatch, Error> {
    let path = path.as_ref();
    let batch = decode_images(&std::fs::read(path)?)?;
    ftlog::debug!(
        "Read {} images of {}x{} pixels from {path:?}",
        batch.len(),
        batch.rows(),
        batch.columns()
    );
    Ok(batch)
}

/// Reads an IDX label file.
///
/// # Errors
///
/// * If the file cannot be read.
/// * See [`decode_labels`].
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let labels = decode_labels(&std::fs::read(path)?)?;
    ftlog::debug!("Read {} labels from {path:?}", labels.len());
    Ok(labels)
}

/// Writes a batch of images to an IDX file.
///
/// # Errors
///
/// * If the file cannot be written.
/// * See [`encode_images`].
pub fn write_images<P: AsRef<Path>>(path: P, batch: &ImageBatch) -> Result<(), Error> {
    std::fs::write(path, encode_images(batch)?).map_err(Error::from)
}

/// Writes labels to an IDX file.
///
/// # Errors
///
/// * If the file cannot be written.
/// * See [`encode_labels`].
pub fn write_labels<P: AsRef<Path>>(path: P, labels: &[u8]) -> Result<(), Error> {
    std::fs::write(path, encode_labels(labels)?).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{decode_images, decode_labels, encode_images, encode_labels};
    use crate::{Error, ImageBatch};

    /// An image file header with no pixel data after it.
    fn header(count: u32, rows: u32, columns: u32) -> Vec<u8> {
        [0x0803, count, rows, columns]
            .into_iter()
            .flat_map(u32::to_be_bytes)
            .collect()
    }

    #[test]
    fn header_layout() {
        let batch = ImageBatch::square(2, vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]).unwrap();
        let bytes = encode_images(&batch).unwrap();
        assert_eq!(&bytes[..16], &[0, 0, 8, 3, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 2]);
        assert_eq!(&bytes[16..], &[1, 2, 3, 4, 5, 6, 7, 8]);

        let bytes = encode_labels(&[3, 9]).unwrap();
        assert_eq!(bytes, vec![0, 0, 8, 1, 0, 0, 0, 2, 3, 9]);
    }

    #[test]
    fn rejects_swapped_magic() {
        let labels = encode_labels(&[1, 2, 3]).unwrap();
        assert!(matches!(decode_images(&labels), Err(Error::Format(_))));

        let batch = ImageBatch::square(1, vec![vec![0]]).unwrap();
        let images = encode_images(&batch).unwrap();
        assert!(matches!(decode_labels(&images), Err(Error::Format(_))));
    }

    #[test]
    fn rejects_truncated_files() {
        let batch = ImageBatch::square(2, vec![vec![1, 2, 3, 4]; 3]).unwrap();
        let bytes = encode_images(&batch).unwrap();
        assert!(matches!(decode_images(&bytes[..bytes.len() - 1]), Err(Error::Format(_))));
        assert!(matches!(decode_images(&bytes[..10]), Err(Error::Format(_))));

        let bytes = encode_labels(&[1, 2, 3]).unwrap();
        assert!(matches!(decode_labels(&bytes[..9]), Err(Error::Format(_))));
    }

    #[test]
    fn reads_single_row_images() {
        let mut bytes = header(2, 1, 3);
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        let batch = decode_images(&bytes).unwrap();
        assert_eq!((batch.rows(), batch.columns()), (1, 3));
        assert_eq!(batch.side(), None);
        assert_eq!(batch.images(), &[vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(encode_images(&batch).unwrap(), bytes);
    }

    #[test_case(u32::MAX, 0, 0 ; "zero_by_zero")]
    #[test_case(3, 0, 28 ; "zero_rows")]
    #[test_case(3, 28, 0 ; "zero_columns")]
    #[test_case(65_536, 1 << 24, 1 << 24 ; "pixels_overflow")]
    #[test_case(u32::MAX, 1 << 16, 1 << 16 ; "body_too_large")]
    #[test_case(u32::MAX, 28, 28 ; "huge_count")]
    fn rejects_impossible_headers(count: u32, rows: u32, columns: u32) {
        assert!(matches!(decode_images(&header(count, rows, columns)), Err(Error::Format(_))));
    }
}
