//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant gets a `thiserror` message and a constructor whose `String`
//! fields accept anything `Into<String>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
    //! Constructors and messages of the repository port errors.
    use crate::domain::ports::{ProfilePersistenceError, UserPersistenceError};
    use rstest::rstest;

    #[rstest]
    #[case(
        ProfilePersistenceError::connection("pool exhausted"),
        "profile repository connection failed: pool exhausted"
    )]
    #[case(
        ProfilePersistenceError::query(String::from("record not found")),
        "profile repository query failed: record not found"
    )]
    #[case(
        ProfilePersistenceError::conflict("unique constraint violated"),
        "profile repository write conflicted: unique constraint violated"
    )]
    fn profile_errors_render_their_messages(
        #[case] error: ProfilePersistenceError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn user_error_constructors_build_struct_variants() {
        assert_eq!(
            UserPersistenceError::query("bad row"),
            UserPersistenceError::Query {
                message: "bad row".to_owned()
            }
        );
        assert_eq!(
            UserPersistenceError::connection("refused").to_string(),
            "user repository connection failed: refused"
        );
    }
}
