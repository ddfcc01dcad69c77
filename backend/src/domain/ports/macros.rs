//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `#[error]` message and a snake_case constructor whose
//! parameters accept `impl Into<T>`, so call sites can pass `&str` for
//! `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ShelfPortError {
            Unreachable => "shelf store unreachable",
            Missing { id: String } => "listing {id} not found",
            Stale { id: String, attempts: u32 } => "listing {id} changed after {attempts} reads",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ShelfPortError::unreachable(), ShelfPortError::Unreachable);
        assert_eq!(
            ShelfPortError::unreachable().to_string(),
            "shelf store unreachable"
        );
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ShelfPortError::missing("l-1");
        assert_eq!(err.to_string(), "listing l-1 not found");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = ShelfPortError::stale(String::from("l-2"), 3_u32);
        assert_eq!(err.to_string(), "listing l-2 changed after 3 reads");
    }
}
