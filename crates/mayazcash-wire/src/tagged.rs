use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::WireCodec;
use crate::error::{Result, WireError};
use crate::primitive::WireReader;

/// A closed family of error variants, each carrying a message.
///
/// On the wire an error is a `u32` discriminant followed by a
/// length-prefixed message string.
pub trait TaggedError: Sized {
    /// Name reported when a discriminant is not part of the family.
    const TYPE_NAME: &'static str;

    /// Build the variant selected by `tag`, or `None` if the tag is unknown.
    fn from_tag(tag: u32, message: String) -> Option<Self>;

    /// Discriminant of this variant.
    fn tag(&self) -> u32;

    /// Message carried by this variant.
    fn message(&self) -> &str;
}

/// Decode a complete error payload.
pub fn read_tagged<E: TaggedError>(payload: &[u8]) -> Result<E> {
    let mut src = WireReader::new(payload);
    let tag = src.read_u32(E::TYPE_NAME)?;
    let message = String::read(&mut src)?;
    src.finish()?;
    E::from_tag(tag, message).ok_or(WireError::UnknownDiscriminant {
        type_name: E::TYPE_NAME,
        value: i64::from(tag),
    })
}

/// Encode an error as a complete payload.
pub fn write_tagged<E: TaggedError>(error: &E) -> Result<Bytes> {
    let mut dst = BytesMut::new();
    dst.put_u32(error.tag());
    error.message().to_owned().write(&mut dst)?;
    Ok(dst.freeze())
}
