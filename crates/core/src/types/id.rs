//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are opaque strings assigned by the upstream catalog
//! service. Use the `define_id!` macro to wrap them so a product ID can't be
//! passed where some other identifier is expected.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use pantry_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(SupplierId);
///
/// let warehouse = WarehouseId::new("north");
/// let supplier = SupplierId::new("north");
///
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = supplier;
/// assert_eq!(warehouse.as_str(), supplier.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything convertible to a `String`.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the underlying `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("sku-123");
        assert_eq!(id.to_string(), "sku-123");
        assert_eq!(id.as_str(), "sku-123");
    }

    #[test]
    fn test_product_id_conversions() {
        let from_str = ProductId::from("A");
        let from_string = ProductId::from("A".to_string());
        assert_eq!(from_str, from_string);
        assert_eq!(String::from(from_str), "A");
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new("A");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"A\"");
    }
}
