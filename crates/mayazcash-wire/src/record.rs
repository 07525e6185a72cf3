//! Declarative codecs for records and plain enumerations.
//!
//! A record is the concatenation of its fields' encodings in declaration
//! order; reading visits the fields in the same order. Enumerations are a
//! signed 32-bit discriminant.

/// Declare a struct and derive its [`WireCodec`](crate::WireCodec) impl.
///
/// Attributes on the struct and on each field pass through unchanged, so
/// derives and `cfg_attr` work as usual.
///
/// ```
/// use mayazcash_wire::{bytes::Bytes, wire_record, WireCodec};
///
/// wire_record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Height {
///         pub number: u32,
///         pub hash: Bytes,
///     }
/// }
///
/// let height = Height { number: 7, hash: Bytes::from_static(&[1, 2]) };
/// let wire = height.to_wire().unwrap();
/// assert_eq!(Height::from_wire(&wire).unwrap(), height);
/// ```
#[macro_export]
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::WireCodec for $name {
            #[allow(unused_variables)]
            fn write(&self, dst: &mut $crate::bytes::BytesMut) -> $crate::Result<()> {
                $( $crate::WireCodec::write(&self.$field, dst)?; )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn read(src: &mut $crate::WireReader<'_>) -> $crate::Result<Self> {
                // Struct literal fields evaluate in source order.
                Ok(Self {
                    $( $field: <$ty as $crate::WireCodec>::read(src)?, )*
                })
            }
        }
    };
}

/// Declare a fieldless enum with explicit discriminants and derive its
/// [`WireCodec`](crate::WireCodec) impl.
///
/// Decoding a discriminant outside the declared set is
/// [`WireError::UnknownDiscriminant`](crate::WireError::UnknownDiscriminant).
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $disc:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $disc,
            )+
        }

        impl $name {
            /// Discriminant as written on the wire.
            pub fn discriminant(&self) -> i32 {
                match self {
                    $( Self::$variant => $disc, )+
                }
            }

            /// Look up a variant by its wire discriminant.
            pub fn from_discriminant(value: i32) -> Option<Self> {
                match value {
                    $( $disc => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl $crate::WireCodec for $name {
            fn write(&self, dst: &mut $crate::bytes::BytesMut) -> $crate::Result<()> {
                $crate::bytes::BufMut::put_i32(dst, self.discriminant());
                Ok(())
            }

            fn read(src: &mut $crate::WireReader<'_>) -> $crate::Result<Self> {
                let value = src.read_i32(stringify!($name))?;
                Self::from_discriminant(value).ok_or($crate::WireError::UnknownDiscriminant {
                    type_name: stringify!($name),
                    value: i64::from(value),
                })
            }
        }
    };
}
