use pandatex::{Filter, Frame, Value};

fn main() {
    let dsl = r#"
# small values in column b, or anything in the last row
(value < 10 and col == "b") or row == 4
"#;
    let filter = Filter::from_dsl(dsl).expect("failed to parse filter");
    println!("{filter}");

    let rows = (0..5)
        .map(|r| (0..4).map(|c| Value::Int(r * 4 + c)).collect())
        .collect();
    let frame = Frame::new(["a", "b", "c", "d"], rows).expect("rows should be rectangular");

    let mask = filter.evaluate(&frame).expect("evaluation failed");
    for (row, column) in mask.positions() {
        println!("match at row {row}, column {column}");
    }

    match Filter::from_dsl("value <") {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("error: {e}"),
    }
}
