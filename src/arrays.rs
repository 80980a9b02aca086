//! Typed numeric array selection
//!
//! Parsers and downstream consumers pick concrete numeric storage by element
//! kind: a kind tag names the element type, [`TypedArray`] carries the
//! matching buffer. Requesting an unrecognized kind tag is a programmer
//! error, not a data error, and fails with [`ArrayError::UnsupportedArrayKind`].

use std::str::FromStr;

/// Errors for typed array requests.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// The element kind tag names no known numeric type.
    #[error("unsupported array kind: {0}")]
    UnsupportedArrayKind(String),
}

/// Element kind of a typed numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    Float32,
    Float64,
}

impl ArrayKind {
    /// Byte size of one element.
    pub fn byte_size(&self) -> usize {
        match self {
            ArrayKind::Int8 | ArrayKind::UInt8 => 1,
            ArrayKind::Int16 | ArrayKind::UInt16 => 2,
            ArrayKind::Int32 | ArrayKind::UInt32 | ArrayKind::Float32 => 4,
            ArrayKind::Float64 => 8,
        }
    }
}

impl FromStr for ArrayKind {
    type Err = ArrayError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "int8" => Ok(ArrayKind::Int8),
            "int16" => Ok(ArrayKind::Int16),
            "int32" => Ok(ArrayKind::Int32),
            "uint8" => Ok(ArrayKind::UInt8),
            "uint16" => Ok(ArrayKind::UInt16),
            "uint32" => Ok(ArrayKind::UInt32),
            "float32" => Ok(ArrayKind::Float32),
            "float64" => Ok(ArrayKind::Float64),
            other => Err(ArrayError::UnsupportedArrayKind(other.to_string())),
        }
    }
}

/// A numeric buffer with its element kind fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl TypedArray {
    /// Allocate a zero-filled array of `len` elements of the given kind.
    pub fn zeroed(kind: ArrayKind, len: usize) -> Self {
        match kind {
            ArrayKind::Int8 => TypedArray::Int8(vec![0; len]),
            ArrayKind::Int16 => TypedArray::Int16(vec![0; len]),
            ArrayKind::Int32 => TypedArray::Int32(vec![0; len]),
            ArrayKind::UInt8 => TypedArray::UInt8(vec![0; len]),
            ArrayKind::UInt16 => TypedArray::UInt16(vec![0; len]),
            ArrayKind::UInt32 => TypedArray::UInt32(vec![0; len]),
            ArrayKind::Float32 => TypedArray::Float32(vec![0.0; len]),
            ArrayKind::Float64 => TypedArray::Float64(vec![0.0; len]),
        }
    }

    /// Unsigned index storage wide enough to address `max_value`: u16 when it
    /// fits, u32 otherwise.
    pub fn zeroed_uint_for_max(len: usize, max_value: u64) -> Self {
        if max_value > u64::from(u16::MAX) {
            TypedArray::UInt32(vec![0; len])
        } else {
            TypedArray::UInt16(vec![0; len])
        }
    }

    /// Element kind of this array.
    pub fn kind(&self) -> ArrayKind {
        match self {
            TypedArray::Int8(_) => ArrayKind::Int8,
            TypedArray::Int16(_) => ArrayKind::Int16,
            TypedArray::Int32(_) => ArrayKind::Int32,
            TypedArray::UInt8(_) => ArrayKind::UInt8,
            TypedArray::UInt16(_) => ArrayKind::UInt16,
            TypedArray::UInt32(_) => ArrayKind::UInt32,
            TypedArray::Float32(_) => ArrayKind::Float32,
            TypedArray::Float64(_) => ArrayKind::Float64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::UInt8(v) => v.len(),
            TypedArray::UInt16(v) => v.len(),
            TypedArray::UInt32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
        }
    }

    /// True if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_parse_to_matching_kinds() {
        for (tag, kind) in [
            ("int8", ArrayKind::Int8),
            ("int16", ArrayKind::Int16),
            ("int32", ArrayKind::Int32),
            ("uint8", ArrayKind::UInt8),
            ("uint16", ArrayKind::UInt16),
            ("uint32", ArrayKind::UInt32),
            ("float32", ArrayKind::Float32),
            ("float64", ArrayKind::Float64),
        ] {
            assert_eq!(tag.parse::<ArrayKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let err = "float16".parse::<ArrayKind>().unwrap_err();
        assert!(matches!(err, ArrayError::UnsupportedArrayKind(tag) if tag == "float16"));
    }

    #[test]
    fn zeroed_allocates_requested_length_and_kind() {
        let array = TypedArray::zeroed(ArrayKind::Float32, 8);
        assert_eq!(array.kind(), ArrayKind::Float32);
        assert_eq!(array.len(), 8);
        assert_eq!(array, TypedArray::Float32(vec![0.0; 8]));
    }

    #[test]
    fn uint_storage_width_follows_max_value() {
        assert_eq!(
            TypedArray::zeroed_uint_for_max(4, 1000).kind(),
            ArrayKind::UInt16
        );
        assert_eq!(
            TypedArray::zeroed_uint_for_max(4, 100_000).kind(),
            ArrayKind::UInt32
        );
    }

    #[test]
    fn byte_sizes() {
        assert_eq!(ArrayKind::UInt8.byte_size(), 1);
        assert_eq!(ArrayKind::Int16.byte_size(), 2);
        assert_eq!(ArrayKind::Float32.byte_size(), 4);
        assert_eq!(ArrayKind::Float64.byte_size(), 8);
    }
}
