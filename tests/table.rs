use pandatex::{
    BoolMatrix, CompareOp, CondValue, Filter, Frame, Key, KeySet, Reducer, Role, SharedGroup,
    Table, TableError, TableGroup, Value,
};

/// 5x4 frame holding 0..19 row-major, columns a..d.
fn frame() -> Frame {
    let rows = (0..5)
        .map(|r| (0..4).map(|c| Value::Int(r * 4 + c)).collect())
        .collect();
    Frame::new(["a", "b", "c", "d"], rows).unwrap()
}

fn table() -> Table {
    Table::new(frame(), ["a", "b"], "c", "d").unwrap()
}

fn keys(names: &[&str]) -> Vec<Key> {
    names.iter().map(|n| Key::from(*n)).collect()
}

#[test]
fn init_variants() {
    let cases: Vec<(KeySet, KeySet, KeySet, [Vec<Key>; 3])> = vec![
        (
            vec!["a"].into(),
            vec!["c", "d"].into(),
            vec!["b"].into(),
            [keys(&["a"]), keys(&["c", "d"]), keys(&["b"])],
        ),
        (
            vec!["a"].into(),
            vec!["b"].into(),
            vec!["c"].into(),
            [keys(&["a"]), keys(&["b"]), keys(&["c"])],
        ),
        (
            vec!["a", "c"].into(),
            vec!["d"].into(),
            "b".into(),
            [keys(&["a", "c"]), keys(&["d"]), keys(&["b"])],
        ),
        (
            "a".into(),
            "b".into(),
            "c".into(),
            [keys(&["a"]), keys(&["b"]), keys(&["c"])],
        ),
    ];
    for (columns, index, values, [ec, ei, ev]) in cases {
        let t = Table::new(frame(), columns, index, values).unwrap();
        assert_eq!(t.columns(), ec.as_slice());
        assert_eq!(t.index(), ei.as_slice());
        assert_eq!(t.values(), ev.as_slice());
    }
}

#[test]
fn init_missing_keys() {
    let cases: Vec<(KeySet, KeySet)> = vec![
        (vec!["a", "b", "c"].into(), "d".into()),
        (vec!["a", "b"].into(), vec!["c", "d"].into()),
        (vec!["c"].into(), vec!["a", "b", "c"].into()),
    ];
    let missing = |role| TableError::MissingKey {
        role,
        key: Key::from("e"),
    };
    for (first, second) in cases {
        assert_eq!(
            Table::new(frame(), "e", first.clone(), second.clone()).unwrap_err(),
            missing(Role::Columns)
        );
        assert_eq!(
            Table::new(frame(), first.clone(), "e", second.clone()).unwrap_err(),
            missing(Role::Index)
        );
        assert_eq!(
            Table::new(frame(), first, second, "e").unwrap_err(),
            missing(Role::Values)
        );
    }
}

#[test]
fn missing_key_message() {
    let err = Table::new(frame(), "a", "e", "b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "all specified indexes must be present in the frame; \"e\" is missing"
    );
}

#[test]
fn init_overlapping_roles() {
    let cases: Vec<(KeySet, KeySet, KeySet, Role, Role, &str)> = vec![
        (
            vec!["a", "b"].into(),
            vec!["c", "d"].into(),
            vec!["a"].into(),
            Role::Columns,
            Role::Values,
            "a",
        ),
        (
            vec!["a"].into(),
            vec!["b", "c"].into(),
            vec!["c"].into(),
            Role::Index,
            Role::Values,
            "c",
        ),
        (
            vec!["a", "b", "c"].into(),
            vec!["c"].into(),
            "d".into(),
            Role::Columns,
            Role::Index,
            "c",
        ),
    ];
    for (columns, index, values, first, second, key) in cases {
        assert_eq!(
            Table::new(frame(), columns, index, values).unwrap_err(),
            TableError::OverlappingRoles {
                first,
                second,
                key: Key::from(key),
            }
        );
    }
}

#[test]
fn init_duplicate_keys() {
    let dup = |role| TableError::DuplicateKey {
        role,
        key: Key::from("a"),
    };
    assert_eq!(
        Table::new(frame(), ["a", "a"], "c", "d").unwrap_err(),
        dup(Role::Columns)
    );
    assert_eq!(
        Table::new(frame(), "c", ["a", "a"], "d").unwrap_err(),
        dup(Role::Index)
    );
    assert_eq!(
        Table::new(frame(), "c", "d", ["a", "a"]).unwrap_err(),
        dup(Role::Values)
    );
}

#[test]
fn init_empty_roles() {
    let none: Vec<&str> = Vec::new();
    assert_eq!(
        Table::new(frame(), "a", none.clone(), "b").unwrap_err(),
        TableError::EmptyRole { role: Role::Index }
    );
    assert_eq!(
        Table::new(frame(), "a", "b", none).unwrap_err(),
        TableError::EmptyRole { role: Role::Values }
    );
}

fn matrix(rows: [[u8; 4]; 5]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|row| row.iter().map(|&b| b == 1).collect())
        .collect()
}

#[test]
fn each_comparisons() {
    let t = table();
    let cases: [(CompareOp, i64, i64, [[u8; 4]; 5]); 6] = [
        (
            CompareOp::Lt,
            5,
            2,
            [[1, 1, 1, 1], [1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        (
            CompareOp::Gt,
            6,
            7,
            [[0, 0, 0, 0], [0, 0, 0, 1], [1, 1, 1, 1], [1, 1, 1, 1], [1, 1, 1, 1]],
        ),
        (
            CompareOp::Eq,
            9,
            9,
            [[0, 0, 0, 0], [0, 0, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        (
            CompareOp::Neq,
            3,
            8,
            [[1, 1, 1, 0], [1, 1, 1, 1], [1, 1, 1, 1], [1, 1, 1, 1], [1, 1, 1, 1]],
        ),
        (
            CompareOp::Lte,
            4,
            4,
            [[1, 1, 1, 1], [1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        (
            CompareOp::Gte,
            11,
            18,
            [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 1], [1, 1, 1, 1], [1, 1, 1, 1]],
        ),
    ];
    for (op, operand, make_true, expected) in cases {
        let f = t.each().compare(op, operand);
        let (v, c, r) = (Value::Int(make_true), Key::from("a"), Key::Int(0));
        assert!(f.matches(&pandatex::Cell::new(&v, &c, &r)).unwrap(), "{op}");
        assert_eq!(t.indexer(&f).unwrap().to_rows(), matrix(expected), "{op}");
    }
}

#[test]
fn comparison_correctness() {
    let t = table();
    let below_two: BoolMatrix = t.indexer(&t.each().lt(2_i64)).unwrap();
    assert_eq!(below_two.positions().collect::<Vec<_>>(), vec![(0, 0), (0, 1)]);

    let top = t.indexer(&t.each().ge(18_i64)).unwrap();
    assert_eq!(top.positions().collect::<Vec<_>>(), vec![(4, 2), (4, 3)]);

    let nine = t.indexer(&t.each().eq(9_i64)).unwrap();
    assert_eq!(nine.count(), 1);
    assert_eq!(nine.get_by_key(&Key::Int(2), &Key::from("b")), Some(true));
}

#[test]
fn table_group_feeds_conditional_value() {
    let shared = table().into_shared();
    // max of column "a" is 16
    let column_a = TableGroup::new(shared.clone(), Filter::new().col("a"));
    let f = Filter::new().gt(CondValue::new(column_a, Reducer::Max));

    let before = shared.read().indexer(&f).unwrap();
    assert_eq!(before.positions().collect::<Vec<_>>(), vec![(4, 1), (4, 2), (4, 3)]);

    shared
        .write()
        .set_value(&Key::from("a"), &Key::Int(4), Value::Int(0))
        .unwrap();
    // max of "a" is now 12
    let after = shared.read().indexer(&f).unwrap();
    assert_eq!(after.count(), 6);
    assert_eq!(after.get_by_key(&Key::Int(4), &Key::from("a")), Some(false));
}

#[test]
fn shared_group_freshness_between_passes() {
    let t = table();
    let group = SharedGroup::new(vec![Value::Int(1), Value::Int(3)]);
    let f = t.each().le(CondValue::new(group.clone(), Reducer::Sum));

    let first = t.indexer(&f).unwrap();
    assert_eq!(first.count(), 5);
    assert_eq!(t.indexer(&f).unwrap(), first);

    group.push(Value::Int(6));
    assert_eq!(t.indexer(&f).unwrap().count(), 11);
}

#[test]
fn mask_values_follow_declared_order() {
    let t = table();
    let f = t.each().col("d").or(&t.each().row(0_i64));
    assert_eq!(
        t.mask_values(&f).unwrap(),
        [0, 1, 2, 3, 7, 11, 15, 19]
            .into_iter()
            .map(Value::Int)
            .collect::<Vec<_>>()
    );
}
