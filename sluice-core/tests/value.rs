#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sluice_core::{AsValue, Error, Value};
    use std::borrow::Cow;
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some("".into())).is_null());
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert!(bool::try_from_value(val).unwrap());
        assert!(bool::try_from_value(1i64.as_value()).unwrap());
        assert!(!bool::try_from_value(0u8.as_value()).unwrap());
        assert!(bool::try_from_value(0.5f64.as_value()).is_err());
        assert!(bool::try_from_value(Value::UInt64(Some(u64::MAX))).unwrap());
        assert!(!bool::try_from_value(Value::UInt64(Some(0))).unwrap());
        assert!(matches!(
            bool::try_from_value(Value::Int64(None)),
            Err(Error::Conversion { .. })
        ));
        assert_eq!(Option::<bool>::try_from_value(Value::Int64(None)).unwrap(), None);
    }

    #[test]
    fn value_integers() {
        let val: Value = 127i8.into();
        assert_eq!(val, Value::Int8(Some(127)));
        assert_eq!(i64::try_from_value(val.clone()).unwrap(), 127);
        assert_eq!(u8::try_from_value(val).unwrap(), 127);
        assert_eq!(i64::try_from_value(Value::Varchar(Some(" 42 ".into()))).unwrap(), 42);
        assert!(matches!(
            i8::try_from_value(300i64.as_value()),
            Err(Error::Conversion { target: "i8", .. })
        ));
        assert!(u32::try_from_value((-1i32).as_value()).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("12a".into()))).is_err());
    }

    #[test]
    fn value_floats_and_decimal() {
        assert_eq!(f64::try_from_value(1.5f32.as_value()).unwrap(), 1.5);
        assert_eq!(f64::try_from_value(7i32.as_value()).unwrap(), 7.0);
        assert_eq!(f32::try_from_value(0.25f64.as_value()).unwrap(), 0.25);
        assert_eq!(
            Decimal::try_from_value(Value::Varchar(Some("12.50".into()))).unwrap(),
            Decimal::new(1250, 2)
        );
        assert_eq!(Decimal::try_from_value(3i16.as_value()).unwrap(), Decimal::from(3));
        assert!(matches!(
            Decimal::try_from_value(Value::Varchar(Some("twelve".into()))),
            Err(Error::Conversion { value, .. }) if value == "twelve"
        ));
    }

    #[test]
    fn value_text_and_bytes() {
        assert_eq!(
            String::try_from_value(Value::Varchar(Some("hello".into()))).unwrap(),
            "hello"
        );
        assert_eq!(String::try_from_value(15u64.as_value()).unwrap(), "15");
        assert!(String::try_from_value(Value::Blob(Some([1u8, 2].into()))).is_err());
        assert_eq!(
            Vec::<u8>::try_from_value(Value::Varchar(Some("ab".into()))).unwrap(),
            b"ab".to_vec()
        );
        let uuid = Uuid::parse_str("6f1e2a4c-5b8d-4e0f-9a7b-3c2d1e0f4a5b").unwrap();
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(uuid.to_string()))).unwrap(),
            uuid
        );
        assert!(matches!(
            Uuid::try_from_value(Value::Varchar(Some("not-a-uuid".into()))),
            Err(Error::Conversion { value, .. }) if value == "not-a-uuid"
        ));
    }

    #[test]
    fn value_option() {
        assert_eq!(Option::<i32>::None.as_value(), Value::Int32(None));
        assert_eq!(Some(5i32).as_value(), Value::Int32(Some(5)));
        assert_eq!(Option::<String>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i64>::try_from_value(9i64.as_value()).unwrap(),
            Some(9)
        );
    }

    #[test]
    fn value_text_form() {
        assert_eq!(Value::Boolean(Some(true)).to_text(), Some(Cow::Borrowed("1")));
        assert_eq!(Value::Float64(Some(2.5)).to_text().as_deref(), Some("2.5"));
        assert_eq!(Value::Blob(Some([0u8].into())).to_text(), None);
        assert_eq!(Value::Int64(None).to_text(), None);
        assert_eq!(Value::Varchar(Some("17".into())).to_i64(), Some(17));
        assert_eq!(Value::UInt64(Some(u64::MAX)).to_i64(), None);
        assert_eq!(
            Value::Int32(Some(7)).to_bytes().as_deref(),
            Some(b"7".as_slice())
        );
    }

    #[test]
    fn value_render() {
        assert_eq!(Value::Null.render(), "NULL");
        assert_eq!(Value::Varchar(None).render(), "NULL");
        assert_eq!(Value::Int64(Some(-3)).render(), "-3");
        assert_eq!(Value::Varchar(Some("abc".into())).render(), "abc");
        assert_eq!(Value::Blob(Some([1u8, 2, 3].into())).render(), "[Blob]");
        assert_eq!(Value::Blob(Some([1u8].into())).to_string(), "[Blob]");
    }
}
