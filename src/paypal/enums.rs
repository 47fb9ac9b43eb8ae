use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Declares a string enum whose value space is open: the known values are exposed as
/// associated constants, anything else the service sends is kept verbatim.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            $(
                $(#[$variant_meta])*
                pub const $variant: Self = Self(Cow::Borrowed($value));
            )+

            /// Every value known at compile time.
            pub const KNOWN: &'static [&'static str] = &[$($value),+];

            pub fn new(value: impl Into<String>) -> Self {
                Self(Cow::Owned(value.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this is one of the values listed in [`Self::KNOWN`].
            pub fn is_known(&self) -> bool {
                Self::KNOWN.contains(&self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

open_enum! {
    /// How the payer funds the payment.
    PaymentMethod {
        PAYPAL = "paypal",
        CREDIT_CARD = "credit_card",
    }
}

open_enum! {
    /// The payment intent requested when creating a payment.
    PaymentIntent {
        /// Capture immediately.
        SALE = "sale",
        /// Authorize now, capture later.
        AUTHORIZE = "authorize",
        ORDER = "order",
    }
}

open_enum! {
    /// Lifecycle state of a payment, set by the service.
    PaymentState {
        CREATED = "created",
        APPROVED = "approved",
        FAILED = "failed",
    }
}

open_enum! {
    /// Lifecycle state of a sale.
    SaleState {
        COMPLETED = "completed",
        PARTIALLY_REFUNDED = "partially_refunded",
        PENDING = "pending",
        REFUNDED = "refunded",
        DENIED = "denied",
    }
}

#[cfg(test)]
mod test {
    use color_eyre::eyre::Result;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_value() -> Result<()> {
        let state = serde_json::from_str::<SaleState>(r#""partially_refunded""#)?;
        assert_eq!(SaleState::PARTIALLY_REFUNDED, state);
        assert!(state.is_known());
        Ok(())
    }

    #[test]
    fn unknown_value_passes_through() -> Result<()> {
        let intent = serde_json::from_str::<PaymentIntent>(r#""subscription""#)?;
        assert_eq!("subscription", intent.as_str());
        assert!(!intent.is_known());
        assert_eq!(r#""subscription""#, serde_json::to_string(&intent)?);
        Ok(())
    }

    #[test]
    fn constant_equals_owned() {
        assert_eq!(PaymentMethod::PAYPAL, PaymentMethod::from("paypal"));
        assert_ne!(PaymentMethod::PAYPAL, PaymentMethod::CREDIT_CARD);
        assert_eq!("credit_card", PaymentMethod::CREDIT_CARD.to_string());
    }

    #[test]
    fn default_is_empty() {
        assert_eq!("", PaymentState::default().as_str());
        assert!(!PaymentState::default().is_known());
    }
}
