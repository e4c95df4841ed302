
use pandatex::{EvalOptions, Filter, Frame, Key, Value};
use proptest::prelude::*;
use strategies::{arb_frame, arb_node, model_matrix, GenNode, COLUMNS, OPS};

fn rows(filter: &Filter, frame: &Frame) -> Vec<Vec<bool>> {
    filter.evaluate(frame).unwrap().to_rows()
}

// ---------------------------------------------------------------------------
// Invariant 1: Model agreement
//
// A filter built through the combinators computes the same matrix as the
// plain boolean model of the tree.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn combinators_match_model(node in arb_node(), frame in arb_frame()) {
        prop_assert_eq!(rows(&node.filter(), &frame), model_matrix(&node, &frame));
    }

    #[test]
    fn lazy_operands_match_scalars(node in arb_node(), frame in arb_frame()) {
        prop_assert_eq!(rows(&node.lazy_filter(), &frame), rows(&node.filter(), &frame));
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Algebra
//
// Identity, idempotence, commutativity and associativity of AND/OR, judged
// by the matrices they produce.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn and_identity(node in arb_node(), frame in arb_frame()) {
        let f = node.filter();
        prop_assert_eq!(rows(&Filter::new().and(&f), &frame), rows(&f, &frame));
        prop_assert_eq!(rows(&f.and(&Filter::new()), &frame), rows(&f, &frame));
    }

    #[test]
    fn idempotence(node in arb_node(), frame in arb_frame()) {
        let f = node.filter();
        prop_assert_eq!(rows(&f.and(&f), &frame), rows(&f, &frame));
        prop_assert_eq!(rows(&f.or(&f), &frame), rows(&f, &frame));
    }

    #[test]
    fn commutativity(a in arb_node(), b in arb_node(), frame in arb_frame()) {
        let (fa, fb) = (a.filter(), b.filter());
        prop_assert_eq!(rows(&fa.and(&fb), &frame), rows(&fb.and(&fa), &frame));
        prop_assert_eq!(rows(&fa.or(&fb), &frame), rows(&fb.or(&fa), &frame));
    }

    #[test]
    fn associativity(
        a in arb_node(),
        b in arb_node(),
        c in arb_node(),
        frame in arb_frame(),
    ) {
        let (fa, fb, fc) = (a.filter(), b.filter(), c.filter());
        prop_assert_eq!(
            rows(&fa.and(&fb).and(&fc), &frame),
            rows(&fa.and(&fb.and(&fc)), &frame)
        );
        prop_assert_eq!(
            rows(&fa.or(&fb).or(&fc), &frame),
            rows(&fa.or(&fb.or(&fc)), &frame)
        );
    }

    #[test]
    fn operators_match_methods(a in arb_node(), b in arb_node(), frame in arb_frame()) {
        let (fa, fb) = (a.filter(), b.filter());
        prop_assert_eq!(rows(&(&fa & &fb), &frame), rows(&fa.and(&fb), &frame));
        prop_assert_eq!(rows(&(&fa | &fb), &frame), rows(&fa.or(&fb), &frame));
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Non-aliasing
//
// Extending a filter after combining it never changes the combination.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn combination_unaffected_by_later_edits(
        a in arb_node(),
        b in arb_node(),
        frame in arb_frame(),
    ) {
        let fa = a.filter();
        let fb = b.filter();
        let combined = fa.or(&fb);
        let before = rows(&combined, &frame);

        let _fa = fa.lt(-100_i64);
        let _fb = fb.col("nowhere");
        prop_assert_eq!(rows(&combined, &frame), before);
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Evaluation modes
//
// Parallel and hoisted passes agree with the default sequential pass.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    #[test]
    fn parallel_matches_sequential(node in arb_node(), frame in arb_frame()) {
        let f = node.lazy_filter();
        let seq = f.evaluate(&frame).unwrap();
        let par = f.evaluate_with(&frame, &EvalOptions::new().parallel(true)).unwrap();
        prop_assert_eq!(seq, par);
    }

    #[test]
    fn hoisting_is_transparent_for_static_groups(node in arb_node(), frame in arb_frame()) {
        let f = node.lazy_filter();
        let live = f.evaluate(&frame).unwrap();
        let hoisted = f
            .evaluate_with(&frame, &EvalOptions::new().hoist_conditional_values(true))
            .unwrap();
        prop_assert_eq!(live, hoisted);
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Text form
//
// A filter without custom predicates or lazy operands prints as text that
// parses back to an equivalent filter.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn display_round_trips(node in arb_node(), frame in arb_frame()) {
        let f = node.filter();
        let text = f.to_string();
        let reparsed = Filter::from_dsl(&text)
            .unwrap_or_else(|e| panic!("'{text}' failed to parse: {e}"));
        prop_assert_eq!(rows(&reparsed, &frame), rows(&f, &frame));
    }

    #[test]
    fn display_round_trips_float_operands(
        node in arb_node(),
        op in prop::sample::select(OPS),
        threshold in any::<f64>().prop_filter("finite", |v| v.is_finite()),
        frame in arb_frame(),
    ) {
        let f = node.filter().and(&Filter::new().compare(op, threshold));
        let text = f.to_string();
        let reparsed = Filter::from_dsl(&text)
            .unwrap_or_else(|e| panic!("'{text}' failed to parse: {e}"));
        prop_assert_eq!(rows(&reparsed, &frame), rows(&f, &frame));
    }

    #[test]
    fn display_round_trips_tuple_keys(
        columns in prop::collection::vec((prop::sample::select(COLUMNS), 0_i64..3), 0..3),
        row in (prop::sample::select(COLUMNS), 0_i64..3),
    ) {
        let mut f = Filter::new().row(row);
        for column in columns {
            f = f.or(&Filter::new().col(column));
        }
        let text = f.to_string();
        let reparsed = Filter::from_dsl(&text)
            .unwrap_or_else(|e| panic!("'{text}' failed to parse: {e}"));
        let frame = tuple_frame();
        prop_assert_eq!(rows(&reparsed, &frame), rows(&f, &frame));
    }
}

fn tuple_frame() -> Frame {
    let columns: Vec<Key> = ["a", "b"]
        .iter()
        .flat_map(|name| (0_i64..3).map(move |i| Key::from((*name, i))))
        .collect();
    let index: Vec<Key> = ["a", "c"]
        .iter()
        .flat_map(|name| (0_i64..2).map(move |i| Key::from((*name, i))))
        .collect();
    let rows = (0..index.len())
        .map(|_| (0..columns.len()).map(|c| Value::Int(c as i64)).collect())
        .collect();
    Frame::new(columns, rows).unwrap().with_index(index).unwrap()
}

// ---------------------------------------------------------------------------
// Invariant: the `col` and `row` shorthands agree with the equivalent custom
// predicates on every cell.
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn col_and_row_match_predicates(
        frame in arb_frame(),
        column in prop::sample::select(COLUMNS),
        row in 0_i64..7,
    ) {
        let column_key = Key::from(column);
        let by_rule = Filter::new().rule(move |cell| cell.column == &column_key);
        prop_assert_eq!(rows(&Filter::new().col(column), &frame), rows(&by_rule, &frame));

        let row_key = Key::Int(row);
        let by_rule = Filter::new().rule(move |cell| cell.row == &row_key);
        prop_assert_eq!(rows(&Filter::new().row(row), &frame), rows(&by_rule, &frame));
    }
}

#[test]
fn model_sanity() {
    let node = GenNode::And(vec![GenNode::Col("a"), GenNode::Row(0)]);
    assert!(node.model(0, "a", 0));
    assert!(!node.model(0, "b", 0));
    assert!(!GenNode::Or(Vec::new()).model(0, "a", 0));
}
