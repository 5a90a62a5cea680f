//! Macro generating port error enums with snake_case constructors.

/// Every variant carries named fields; each gets a constructor taking
/// `impl Into<FieldType>` per field, so adapters can pass `&str` or `String`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for port error enums.
    define_port_error! {
        pub enum SamplePortError {
            Rejected { constraint: String } => "rejected by {constraint}",
            Slow { operation: String, millis: u64 } => "{operation} took {millis}ms",
        }
    }

    #[test]
    fn constructors_build_the_named_variant() {
        assert_eq!(
            SamplePortError::rejected(String::from("city_date")),
            SamplePortError::Rejected {
                constraint: "city_date".to_owned()
            }
        );
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::rejected("states_pkey");
        assert_eq!(err.to_string(), "rejected by states_pkey");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::slow("insert", 250_u64);
        assert_eq!(err.to_string(), "insert took 250ms");
    }
}
