//! Collectors and traversal used together, the way generated code uses them.

use hygen_core::{Error, NameContext};
use hygen_runtime::{Bounds, Collector, CollectorScope, ConsList, Value, traverse};

#[test]
fn test_collect_visited_elements_from_both_shapes() {
    let items: Vec<Value> = [10, 20, 30, 40, 50].into_iter().map(Value::Int).collect();
    let vector = Value::vector(items.clone());
    let list = Value::list(items);

    let mut scope = CollectorScope::new(["vector", "list"]).unwrap();
    for (name, target) in [("vector", &vector), ("list", &list)] {
        let mut picked = Vec::new();
        traverse(target, 1, Some(4), |v: &Value| picked.push(v.clone())).unwrap();
        for v in picked {
            scope.append(name, v).unwrap();
        }
    }

    let all = scope.into_finalized();
    assert_eq!(all["vector"], all["list"]);
    assert_eq!(
        all["vector"],
        vec![Value::Int(20), Value::Int(30), Value::Int(40)]
    );
}

#[test]
fn test_partition_into_scope() {
    let numbers: ConsList<i64> = (1..=10).collect();
    let mut scope = CollectorScope::new(["small", "large"]).unwrap();

    let mut routed = Vec::new();
    traverse(&numbers, 0, None, |n: &i64| routed.push(*n)).unwrap();
    for n in routed {
        let name = if n <= 5 { "small" } else { "large" };
        scope.append(name, n).unwrap();
    }

    assert_eq!(scope.finalize("small").unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(scope.finalize("large").unwrap(), vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_snapshots_are_independent_of_later_appends() {
    let mut c = Collector::new();
    c.extend([3, 1, 4]);
    let before = c.finalize();
    c.extend([1, 5]);

    assert_eq!(before, vec![3, 1, 4]);
    assert_eq!(c.finalize(), vec![3, 1, 4, 1, 5]);
}

#[test]
fn test_errors_are_reported_before_visiting() {
    let list: ConsList<i32> = [1, 2, 3].into_iter().collect();
    let mut visited = 0;
    let err = traverse(&list, 4, None, |_: &i32| visited += 1).unwrap_err();
    assert!(matches!(*err, Error::Range { start: 4, len: 3, .. }));
    assert_eq!(visited, 0);

    let err = CollectorScope::<i32>::new(["dup", "dup"]).unwrap_err();
    assert!(matches!(
        *err,
        Error::DuplicateName {
            context: NameContext::CollectorScope,
            ..
        }
    ));
}

#[test]
fn test_signed_bounds_from_generated_code() {
    let v = vec!['a', 'b', 'c', 'd'];
    let mut seen = String::new();
    Bounds::from_signed(1, Some(3))
        .unwrap()
        .traverse(&v, |c: &char| seen.push(*c))
        .unwrap();
    assert_eq!(seen, "bc");

    assert!(Bounds::from_signed(2, Some(-1)).is_err());
}
