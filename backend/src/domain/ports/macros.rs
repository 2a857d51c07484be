//! Defines the helper macro for generating domain port error enums.

/// Generates a port error enum whose variants all carry a `message` field,
/// together with one constructor per variant. The constructor name sits in
/// parentheses after the variant.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident ($ctor:ident) => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                pub fn $ctor(message: impl Into<String>) -> Self {
                    Self::$variant {
                        message: message.into(),
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExampleStoreError {
            Connection (connection) => "example store connection failed: {message}",
            Conflict (conflict) => "example store write conflicted: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_messages() {
        let err = ExampleStoreError::connection("socket closed");
        assert_eq!(
            err.to_string(),
            "example store connection failed: socket closed"
        );
    }

    #[test]
    fn variants_compare_by_message() {
        assert_eq!(
            ExampleStoreError::conflict("duplicate"),
            ExampleStoreError::Conflict {
                message: "duplicate".to_owned()
            }
        );
    }
}
