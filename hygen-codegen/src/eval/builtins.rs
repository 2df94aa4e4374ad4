//! Functions every [`Interpreter`](super::Interpreter) starts with.

use hygen_runtime::{Bounds, Collector, Value};

use super::{EvalError, EvalResult, Interpreter};

pub(super) fn install(interp: &mut Interpreter) {
    interp
        .register("+", add)
        .register("list", |args| Ok(Value::list(args.iter().cloned())))
        .register("vector", |args| Ok(Value::vector(args.iter().cloned())))
        .register("slice", slice);
}

fn add(args: &[Value]) -> EvalResult<Value> {
    let mut sum: i64 = 0;
    for arg in args {
        let n = arg
            .as_int()
            .ok_or_else(|| EvalError::host("+", format!("expected int, got {}", arg.kind())))?;
        sum = sum
            .checked_add(n)
            .ok_or_else(|| EvalError::host("+", "integer overflow"))?;
    }
    Ok(Value::Int(sum))
}

/// `(slice target start [end])`: the elements of `target` in `start..end`,
/// in the same shape as `target`.
fn slice(args: &[Value]) -> EvalResult<Value> {
    let (target, start, end) = match args {
        [target, start] => (target, start, None),
        [target, start, end] => (target, start, Some(end)),
        _ => {
            return Err(EvalError::host(
                "slice",
                format!("expected 2 or 3 arguments, got {}", args.len()),
            ));
        }
    };
    let offset = |value: &Value| {
        value
            .as_int()
            .ok_or_else(|| EvalError::host("slice", format!("expected int, got {}", value.kind())))
    };
    let bounds = Bounds::from_signed(offset(start)?, end.map(offset).transpose()?)?;

    let mut picked = Collector::new();
    bounds.traverse(target, |item: &Value| picked.append(item.clone()))?;

    Ok(match target {
        Value::List(_) => Value::list(picked.into_vec()),
        _ => Value::vector(picked.into_vec()),
    })
}

#[cfg(test)]
mod tests {
    use hygen_core::Error;

    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(add(&ints(&[1, 2, 3])).unwrap(), Value::Int(6));
        assert_eq!(add(&[]).unwrap(), Value::Int(0));
        assert!(matches!(
            add(&[Value::Nil]).unwrap_err(),
            EvalError::Host { .. }
        ));
    }

    #[test]
    fn test_slice_keeps_shape() {
        let items = ints(&[10, 20, 30, 40, 50]);
        let vector = Value::vector(items.clone());
        let list = Value::list(items);

        let from_vector = slice(&[vector, Value::Int(1), Value::Int(4)]).unwrap();
        let from_list = slice(&[list, Value::Int(1), Value::Int(4)]).unwrap();

        assert_eq!(from_vector, Value::vector(ints(&[20, 30, 40])));
        assert_eq!(from_list, Value::list(ints(&[20, 30, 40])));
    }

    #[test]
    fn test_slice_errors() {
        let vector = Value::vector(ints(&[1, 2]));

        let err = slice(&[vector.clone(), Value::Int(-1)]).unwrap_err();
        assert!(matches!(err, EvalError::Runtime(ref e) if matches!(**e, Error::NegativeBound { .. })));

        let err = slice(&[vector, Value::Int(3)]).unwrap_err();
        assert!(matches!(err, EvalError::Runtime(ref e) if matches!(**e, Error::Range { .. })));

        let err = slice(&[Value::Int(5), Value::Int(0)]).unwrap_err();
        assert!(matches!(err, EvalError::Runtime(ref e) if matches!(**e, Error::UnsupportedTarget { .. })));
    }
}
