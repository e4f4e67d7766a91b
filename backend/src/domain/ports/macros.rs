//! Helper macros for generating port and service error enums.
//!
//! `define_port_error!` derives `thiserror::Error` and adds one snake_case
//! constructor per variant whose fields accept `impl Into<T>`.
//! `define_service_error!` builds on it and also emits `reason()`, the
//! stable string key handlers expose to clients.

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

macro_rules! define_service_error {
    (@pattern $variant:ident) => {
        Self::$variant
    };

    (@pattern $variant:ident { $($field:ident),* }) => {
        Self::$variant { .. }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $message:expr, reason = $reason:literal
            ),* $(,)?
        }
    ) => {
        define_port_error! {
            $(#[$outer])*
            pub enum $name {
                $(
                    $(#[$variant_meta])*
                    $variant $( { $($field : $ty),* } )? => $message
                ),*
            }
        }

        impl $name {
            /// Stable string key identifying the failure.
            pub fn reason(&self) -> &'static str {
                match self {
                    $(
                        define_service_error!(@pattern $variant $( { $($field),* } )?) => $reason,
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
pub(crate) use define_service_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors and reasons.

    define_port_error! {
        pub enum LedgerPortError {
            Offline { message: String } => "offline: {message}",
            Retry { attempts: u32 } => "retry: {attempts}",
            Mixed { message: String, attempts: u32 } => "mixed: {message} ({attempts})",
        }
    }

    define_service_error! {
        pub enum LedgerServiceError {
            Missing => "missing", reason = "ERR_MISSING",
            Broken { message: String } => "broken: {message}", reason = "ERR_BROKEN",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LedgerPortError::offline("socket closed");
        assert_eq!(err.to_string(), "offline: socket closed");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = LedgerPortError::retry(3_u32);
        assert_eq!(err.to_string(), "retry: 3");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = LedgerPortError::mixed("socket closed", 3_u32);
        assert_eq!(err.to_string(), "mixed: socket closed (3)");
    }

    #[test]
    fn service_errors_expose_reasons() {
        assert_eq!(LedgerServiceError::missing().reason(), "ERR_MISSING");
        let broken = LedgerServiceError::broken("disk");
        assert_eq!(broken.reason(), "ERR_BROKEN");
        assert_eq!(broken.to_string(), "broken: disk");
    }
}
