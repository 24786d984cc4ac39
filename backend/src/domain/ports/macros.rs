//! `port_error!`: declares a driven-port error enum.
//!
//! Every variant carries the adapter's `message` and gets a snake_case
//! constructor taking `impl Into<String>`, so adapters write
//! `ListingRepositoryError::query(err.to_string())`.

macro_rules! port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $display:literal ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )+
        }
    };
}

pub(crate) use port_error;
