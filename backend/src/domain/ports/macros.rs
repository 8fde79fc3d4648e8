//! `define_port_error!` generates the error enum of a driven port.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor that
//! carries the variant's own doc comment. Constructor parameters take
//! `impl Into<T>`, so adapters can pass `&str` or a formatted `String` for
//! message fields.

macro_rules! define_port_error {
    (@constructor [$($attr:tt)*] $variant:ident) => {
        ::paste::paste! {
            $($attr)*
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor [$($attr:tt)*] $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@fields [$($attr)*] $variant [] [] $( $field : $ty, )*);
    };

    (@fields [$($attr:tt)*] $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            $($attr)*
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (
        @fields [$($attr:tt)*] $variant:ident [$($params:tt)*] [$($inits:tt)*]
        $field:ident : $ty:ty, $($rest:tt)*
    ) => {
        define_port_error!(
            @fields [$($attr)*] $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };

    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
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
                define_port_error!(
                    @constructor [$(#[$variant_meta])*] $variant $( { $($field : $ty),* } )?
                );
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::ports::{SessionStoreError, UserPersistenceError};

    #[test]
    fn unit_variant_gets_a_nullary_constructor() {
        let err = UserPersistenceError::duplicate_email();
        assert_eq!(err, UserPersistenceError::DuplicateEmail);
        assert_eq!(err.to_string(), "user repository rejected duplicate email");
    }

    #[test]
    fn field_constructors_accept_borrowed_and_owned_text() {
        let borrowed = SessionStoreError::connection("pool timed out");
        let owned = SessionStoreError::connection(format!("pool {}", "timed out"));
        assert_eq!(borrowed, owned);
        assert_eq!(
            borrowed,
            SessionStoreError::Connection {
                message: "pool timed out".to_owned()
            }
        );
    }

    #[test]
    fn messages_interpolate_fields() {
        assert_eq!(
            SessionStoreError::query("relation missing").to_string(),
            "session store query failed: relation missing"
        );
        assert_eq!(
            UserPersistenceError::connection("refused").to_string(),
            "user repository connection failed: refused"
        );
    }
}
