/// Defines a newtype ID wrapper around an integer-like scalar (typically `i64`)
/// and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)
/// - `Display`
/// - `From<$inner> for $name` and `From<$name> for $inner`
///
/// Ids serialize as the bare scalar, so `DogId(3)` is `3` on the wire.
///
/// Usage:
///   define_id_type!(i64, DogId);
#[macro_export]
macro_rules! define_id_type {
    ($inner:ty, $name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }

            /// The id following this one, used by id allocators.
            pub fn next(&self) -> Self {
                $name(self.0 + 1)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    define_id_type!(i64, WidgetId);

    #[test]
    fn test_id_roundtrip_and_display() {
        let id = WidgetId::new(41);
        assert_eq!(id.value(), 41);
        assert_eq!(id.next(), WidgetId(42));
        assert_eq!(id.to_string(), "41");
        assert_eq!(i64::from(id), 41);
        assert_eq!(WidgetId::from(7), WidgetId(7));
    }

    #[test]
    fn test_id_serializes_as_scalar() {
        let json = serde_json::to_string(&WidgetId(9)).unwrap();
        assert_eq!(json, "9");
        let back: WidgetId = serde_json::from_str("12").unwrap();
        assert_eq!(back, WidgetId(12));
    }
}
