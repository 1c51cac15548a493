#[cfg(test)]
mod tests {
    use spread_core::{AsValue, RowLabeled, Value};
    use std::sync::Arc;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float64(Some(1.0)), Value::Null);
        assert!(Value::Int64(None).is_null());
        assert!(!Value::Int64(Some(0)).is_null());
    }

    #[test]
    fn value_integers() {
        let val: Value = 127i8.as_value();
        assert_eq!(val, Value::Int32(Some(127)));
        assert_eq!(i32::try_from_value(Value::Int64(Some(29))).unwrap(), 29);
        assert_eq!(i64::try_from_value(Value::Int32(Some(-3))).unwrap(), -3);
        assert_eq!(u8::try_from_value(Value::Int64(Some(255))).unwrap(), 255);
        assert!(u8::try_from_value(Value::Int64(Some(256))).is_err());
        assert!(i32::try_from_value(Value::Int64(Some(i64::MAX))).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("1".into()))).is_err());
        assert_eq!(u32::MAX.as_value(), Value::Int64(Some(u32::MAX as i64)));
    }

    #[test]
    fn value_bool() {
        assert_eq!(true.as_value(), Value::Boolean(Some(true)));
        assert_eq!(bool::try_from_value(Value::Int64(Some(1))).unwrap(), true);
        assert_eq!(bool::try_from_value(Value::Int32(Some(0))).unwrap(), false);
        assert!(bool::try_from_value(Value::Float64(Some(0.5))).is_err());
    }

    #[test]
    fn value_text_and_blob() {
        assert_eq!("abc".as_value(), Value::Varchar(Some("abc".into())));
        assert_eq!(
            String::try_from_value(Value::Varchar(Some("abc".into()))).unwrap(),
            "abc"
        );
        assert!(<&str>::try_from_value(Value::Varchar(Some("abc".into()))).is_err());
        let blob = vec![1u8, 2, 255].as_value();
        assert_eq!(blob.to_string(), "X'0102FF'");
        assert_eq!(Vec::<u8>::try_from_value(blob).unwrap(), [1, 2, 255]);
    }

    #[test]
    fn value_option() {
        assert_eq!(None::<i64>.as_value(), Value::Int64(None));
        assert_eq!(Some(5i64).as_value(), Value::Int64(Some(5)));
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int64(Some(4))).unwrap(),
            Some(4)
        );
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Varchar(Some("it's".into())).to_string(), "'it''s'");
        assert_eq!(Value::Int32(None).to_string(), "NULL");
        assert_eq!(Value::Float64(Some(1.5)).to_string(), "1.5");
    }

    #[test]
    fn row_get() {
        let row = RowLabeled::new(
            Arc::from(["id".to_string(), "name".to_string()]),
            Box::new([Value::Int64(Some(21)), Value::Varchar(Some("xx".into()))]),
        );
        assert_eq!(row.get::<i64>("id").unwrap(), 21);
        assert_eq!(row.get::<i32>("id").unwrap(), 21);
        assert_eq!(row.get::<String>("name").unwrap(), "xx");
        assert!(row.get::<i64>("age").is_err());
        assert!(row.get::<i64>("name").is_err());
    }
}
