//! Small code-generation helpers for the constant tables under
//! [`crate::consts`].
//!
//! Mirrors the shape of a generated C enum binding: each table is a
//! Rust enum plus bidirectional conversions to/from its wire scalar
//! type, with an `UnrecognizedVariant` catch-all so that a value this
//! crate doesn't know about round-trips instead of panicking.

/// Declare an enum over a wire scalar (`u8`, `u16`, or `u32`) with a
/// catch-all `UnrecognizedVariant` arm and `From` impls in both
/// directions.
macro_rules! nl_enum {
    (
        $(#[$outer:meta])*
        $name:ident, $ty:ty,
        $( $(#[$vmeta:meta])* $var:ident => $val:expr ),+ $(,)?
    ) => {
        $(#[$outer])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $var,
            )+
            /// Value not present in this crate's known table.
            UnrecognizedVariant($ty),
        }

        impl From<$ty> for $name {
            fn from(v: $ty) -> Self {
                match v {
                    $( i if i == $val => $name::$var, )+
                    i => $name::UnrecognizedVariant(i),
                }
            }
        }

        impl From<$name> for $ty {
            fn from(v: $name) -> Self {
                match v {
                    $( $name::$var => $val, )+
                    $name::UnrecognizedVariant(i) => i,
                }
            }
        }

        impl<'a> From<&'a $name> for $ty {
            fn from(v: &'a $name) -> Self {
                match *v {
                    $( $name::$var => $val, )+
                    $name::UnrecognizedVariant(i) => i,
                }
            }
        }
    };
}

pub(crate) use nl_enum;
