#[cfg(test)]
mod tests {
    use sluice_core::{
        AsValue, Bindable, Coercion, Error, NativeBindType, Param, ParamType, Value,
    };

    const ALL_TYPES: [ParamType; 7] = [
        ParamType::Int,
        ParamType::Bool,
        ParamType::Float,
        ParamType::String,
        ParamType::Text,
        ParamType::Blob,
        ParamType::Binary,
    ];

    #[test]
    fn explicit_types() {
        let coercion = Coercion::default();
        assert_eq!(coercion.coerce_type(ParamType::Int).unwrap(), NativeBindType::Integer);
        assert_eq!(coercion.coerce_type(ParamType::Bool).unwrap(), NativeBindType::Boolean);
        assert_eq!(coercion.coerce_type(ParamType::Float).unwrap(), NativeBindType::String);
        assert_eq!(coercion.coerce_type(ParamType::String).unwrap(), NativeBindType::String);
        assert_eq!(coercion.coerce_type(ParamType::Text).unwrap(), NativeBindType::String);
        assert_eq!(
            coercion.coerce_type(ParamType::Blob).unwrap(),
            NativeBindType::LargeObject
        );
    }

    #[test]
    fn only_binary_is_unsupported() {
        for coercion in [Coercion::new(true), Coercion::new(false)] {
            for param_type in ALL_TYPES {
                let result = coercion.coerce_type(param_type);
                if param_type == ParamType::Binary {
                    assert!(matches!(result, Err(Error::UnsupportedType(ParamType::Binary))));
                } else {
                    assert!(result.is_ok(), "{param_type} should be supported");
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let coercion = Coercion::default();
        for param_type in ALL_TYPES.into_iter().filter(|v| *v != ParamType::Binary) {
            let first = coercion.coerce_type(param_type).unwrap();
            for _ in 0..10 {
                assert_eq!(coercion.coerce_type(param_type).unwrap(), first);
            }
        }
    }

    #[test]
    fn boolean_fallback() {
        let coercion = Coercion::new(false);
        assert_eq!(coercion.coerce_type(ParamType::Bool).unwrap(), NativeBindType::Integer);
        assert_eq!(
            coercion.coerce_value(&true.as_value()),
            NativeBindType::Integer
        );
    }

    #[test]
    fn inferred_types() {
        let coercion = Coercion::default();
        assert_eq!(coercion.coerce_value(&false.as_value()), NativeBindType::Boolean);
        assert_eq!(coercion.coerce_value(&5i8.as_value()), NativeBindType::Integer);
        assert_eq!(coercion.coerce_value(&5u64.as_value()), NativeBindType::Integer);
        assert_eq!(coercion.coerce_value(&Value::Int32(None)), NativeBindType::Integer);
        assert_eq!(coercion.coerce_value(&1.5f64.as_value()), NativeBindType::String);
        assert_eq!(coercion.coerce_value(&"x".into()), NativeBindType::String);
        assert_eq!(
            coercion.coerce_value(&Value::Blob(Some([1u8].into()))),
            NativeBindType::String
        );
        assert_eq!(coercion.coerce_value(&Value::Null), NativeBindType::String);
    }

    #[test]
    fn descriptors() {
        let coercion = Coercion::default();
        let tagged = Bindable::from(Param::new("42").with_type(ParamType::Int));
        assert_eq!(coercion.coerce(&tagged).unwrap(), NativeBindType::Integer);
        let untagged = Bindable::from(Param::new(42));
        assert_eq!(coercion.coerce(&untagged).unwrap(), NativeBindType::Integer);
        let lazy = Bindable::from(Param::lazy(vec!["a", "b"]));
        assert_eq!(coercion.coerce(&lazy).unwrap(), NativeBindType::String);
        let lazy_blob = Bindable::from(Param::lazy(vec![vec![0u8]]).with_type(ParamType::Blob));
        assert_eq!(coercion.coerce(&lazy_blob).unwrap(), NativeBindType::LargeObject);
        let raw = Bindable::from(7i64);
        assert_eq!(coercion.coerce(&raw).unwrap(), NativeBindType::Integer);
        let binary = Bindable::from(Param::new(Value::Blob(None)).with_type(ParamType::Binary));
        assert!(coercion.coerce(&binary).is_err());
    }
}
