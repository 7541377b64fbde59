use super::value::{ArrayValue, DataType, Value, ValueKind};

#[test]
fn test_scalar_defaults() {
    assert_eq!(DataType::Integer.default_value(), Some(Value::Integer(0)));
    assert_eq!(DataType::Real.default_value(), Some(Value::Real(0.0)));
    assert_eq!(DataType::Boolean.default_value(), Some(Value::Boolean(false)));
    assert_eq!(DataType::Char.default_value(), Some(Value::Char('\0')));
}

#[test]
fn test_array_default_is_filled_with_element_defaults() {
    let ty = DataType::array(1, 3, DataType::Boolean);

    let Some(Value::Array(array)) = ty.default_value() else {
        panic!("expected an array default");
    };
    assert_eq!(array.low(), 1);
    assert_eq!(array.high(), 3);
    assert_eq!(array.len(), 3);
    assert_eq!(array.get(&[Value::Integer(2)]).unwrap(), &Value::Boolean(false));
}

#[test]
fn test_empty_range_has_no_default() {
    assert_eq!(DataType::array(5, 4, DataType::Integer).default_value(), None);
}

#[test]
fn test_overflowing_range_has_no_default() {
    assert_eq!(DataType::array(-5, i64::MAX, DataType::Integer).default_value(), None);
    assert_eq!(DataType::array(i64::MIN, 0, DataType::Integer).default_value(), None);
    assert_eq!(DataType::array(i64::MIN, i64::MAX, DataType::Boolean).default_value(), None);
}

#[test]
fn test_bounds_near_the_integer_limits() {
    let mut array = ArrayValue::new(i64::MAX - 1, vec![Value::Integer(0); 2]);
    assert_eq!(array.high(), i64::MAX);

    array.set(&[Value::Integer(i64::MAX)], Value::Integer(9)).unwrap();
    assert_eq!(array.get(&[Value::Integer(i64::MAX)]).unwrap(), &Value::Integer(9));
    assert!(array.get(&[Value::Integer(i64::MIN)]).is_err());

    let low = ArrayValue::new(i64::MIN, vec![Value::Integer(0)]);
    assert_eq!(low.high(), i64::MIN);
    assert!(low.get(&[Value::Integer(i64::MAX)]).is_err());
}

#[test]
fn test_multi_dimensional_set_and_get() {
    let ty = DataType::array(0, 2, DataType::array(1, 2, DataType::Integer));
    let Some(Value::Array(mut grid)) = ty.default_value() else {
        panic!("expected an array default");
    };

    grid.set(&[Value::Integer(2), Value::Integer(1)], Value::Integer(7)).unwrap();

    assert_eq!(grid.get(&[Value::Integer(2), Value::Integer(1)]).unwrap(), &Value::Integer(7));
    assert_eq!(grid.get(&[Value::Integer(2), Value::Integer(2)]).unwrap(), &Value::Integer(0));
    assert_eq!(grid.get(&[Value::Integer(0), Value::Integer(1)]).unwrap(), &Value::Integer(0));
}

#[test]
fn test_out_of_bounds_index() {
    let mut array = ArrayValue::new(1, vec![Value::Integer(0); 3]);

    let error = array.set(&[Value::Integer(4)], Value::Integer(1)).err().unwrap();
    assert_eq!(error.get_error_name(), "IndexError");
    assert!(array.get(&[Value::Integer(0)]).is_err());
}

#[test]
fn test_non_integer_and_surplus_indices() {
    let mut array = ArrayValue::new(1, vec![Value::Integer(0); 3]);

    assert!(array.set(&[Value::Char('a')], Value::Integer(1)).is_err());
    assert!(array.set(&[Value::Integer(1), Value::Integer(1)], Value::Integer(1)).is_err());
    assert!(array.get(&[]).is_err());
}

#[test]
fn test_value_kind_and_display() {
    assert_eq!(Value::Real(1.5).kind(), ValueKind::Real);
    assert_eq!(Value::Char('x').to_string(), "'x'");

    let array = Value::Array(ArrayValue::new(0, vec![Value::Integer(1), Value::Integer(2)]));
    assert_eq!(array.kind(), ValueKind::Array);
    assert_eq!(array.to_string(), "[1, 2]");
    assert_eq!(DataType::array(1, 10, DataType::Char).to_string(), "array[1..10] of char");
}
