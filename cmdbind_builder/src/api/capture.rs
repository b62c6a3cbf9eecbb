use crate::model::{TypeTag, Value, Width};

/// Behaviour to extract an explicit type `T` from a converted [`Value`].
///
/// Handlers read their parameters through this trait, so the compiler maintains each parameter's type.
/// Implementations exist for `bool`, the integer primitives, `f32`, `f64`, `char`, and `String`.
pub trait Argument: Sized {
    /// The declared type for arguments of this type.
    fn type_tag() -> TypeTag;

    /// Narrow the value into this type, if it fits.
    fn from_value(value: &Value) -> Option<Self>;
}

impl Argument for bool {
    fn type_tag() -> TypeTag {
        TypeTag::Bool
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

macro_rules! signed_argument {
    ($t:ty, $width:expr) => {
        impl Argument for $t {
            fn type_tag() -> TypeTag {
                TypeTag::Integer($width)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Integer(v) => <$t>::try_from(*v).ok(),
                    Value::Unsigned(v) => <$t>::try_from(*v).ok(),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! unsigned_argument {
    ($t:ty, $width:expr) => {
        impl Argument for $t {
            fn type_tag() -> TypeTag {
                TypeTag::Unsigned($width)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Unsigned(v) => <$t>::try_from(*v).ok(),
                    Value::Integer(v) => <$t>::try_from(*v).ok(),
                    _ => None,
                }
            }
        }
    };
}

signed_argument!(i8, Width::W8);
signed_argument!(i16, Width::W16);
signed_argument!(i32, Width::W32);
signed_argument!(i64, Width::W64);
signed_argument!(isize, Width::Size);
unsigned_argument!(u8, Width::W8);
unsigned_argument!(u16, Width::W16);
unsigned_argument!(u32, Width::W32);
unsigned_argument!(u64, Width::W64);
unsigned_argument!(usize, Width::Size);

impl Argument for f32 {
    fn type_tag() -> TypeTag {
        TypeTag::Float(Width::W32)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v as f32),
            _ => None,
        }
    }
}

impl Argument for f64 {
    fn type_tag() -> TypeTag {
        TypeTag::Float(Width::W64)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl Argument for char {
    fn type_tag() -> TypeTag {
        TypeTag::Char
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }
}

impl Argument for String {
    fn type_tag() -> TypeTag {
        TypeTag::Text
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Extract `T` from the value.
///
/// Text is re-converted through `T`'s type tag, so values from schema-less commands (which are always text) can still be read as numbers.
pub(crate) fn extract<T: Argument>(value: &Value) -> Option<T> {
    T::from_value(value).or_else(|| match value {
        Value::Text(text) => T::type_tag()
            .convert(text)
            .ok()
            .and_then(|converted| T::from_value(&converted)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn type_tags() {
        assert_eq!(bool::type_tag(), TypeTag::Bool);
        assert_eq!(i32::type_tag(), TypeTag::Integer(Width::W32));
        assert_eq!(usize::type_tag(), TypeTag::Unsigned(Width::Size));
        assert_eq!(f32::type_tag(), TypeTag::Float(Width::W32));
        assert_eq!(String::type_tag(), TypeTag::Text);
    }

    #[rstest]
    #[case(Value::Integer(5), Some(5))]
    #[case(Value::Integer(-5), Some(-5))]
    #[case(Value::Integer(300), None)]
    #[case(Value::Unsigned(7), Some(7))]
    #[case(Value::Text("12".to_string()), Some(12))]
    #[case(Value::Text("x".to_string()), None)]
    #[case(Value::Bool(true), None)]
    fn extract_i8(#[case] value: Value, #[case] expected: Option<i8>) {
        assert_eq!(extract::<i8>(&value), expected);
    }

    #[rstest]
    #[case(Value::Unsigned(5), Some(5))]
    #[case(Value::Integer(-1), None)]
    #[case(Value::Text("3".to_string()), Some(3))]
    fn extract_usize(#[case] value: Value, #[case] expected: Option<usize>) {
        assert_eq!(extract::<usize>(&value), expected);
    }

    #[test]
    fn extract_other() {
        assert_eq!(extract::<bool>(&Value::Text("TRUE".to_string())), Some(true));
        assert_eq!(extract::<f64>(&Value::Float(0.5)), Some(0.5));
        assert_eq!(extract::<char>(&Value::Text("c".to_string())), Some('c'));
        assert_eq!(
            extract::<String>(&Value::Text("abc".to_string())),
            Some("abc".to_string())
        );
        assert_eq!(extract::<String>(&Value::Integer(1)), None);
    }
}
