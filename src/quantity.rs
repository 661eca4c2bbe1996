//! Device readings as unit-carrying newtypes.
//!
//! The device is trusted, so none of these are range-checked.

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(
            ::derive_more::From,
            ::serde::Deserialize,
            ::serde::Serialize,
            ::std::clone::Clone,
            ::std::marker::Copy,
            ::std::cmp::PartialEq,
            ::std::cmp::PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, formatter)?;
                write!(formatter, " {}", $unit)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, formatter)?;
                write!(formatter, "{}", $unit)
            }
        }

        impl From<$name> for f64 {
            fn from(quantity: $name) -> Self {
                quantity.0
            }
        }
    };
}

quantity!(
    /// Battery state of charge.
    Percent,
    "%"
);

quantity!(
    /// Estimated time until the battery is full or empty, as reported by the device.
    Minutes,
    "min"
);

quantity!(Watts, "W");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_ok() {
        assert_eq!(Percent(85.0).to_string(), "85 %");
        assert_eq!(Minutes(120.0).to_string(), "120 min");
        assert_eq!(format!("{:?}", Watts(300.5)), "300.5W");
    }

    #[test]
    fn deserialize_integer_ok() -> crate::prelude::Result {
        assert_eq!(serde_json::from_str::<Percent>("85")?, Percent(85.0));
        Ok(())
    }
}
