use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pandatex::{CondValue, EvalOptions, Filter, Frame, Reducer, Table, TableGroup, Value};

fn main() {
    let columns: Vec<String> = (0..8).map(|c| format!("c{c}")).collect();
    let rows = (0..1_000_i64)
        .map(|r| (0..8).map(|c| Value::Int((r * 37 + c * 11) % 500)).collect())
        .collect();
    let frame = Frame::new(columns, rows).expect("rows should be rectangular");
    let shared = Table::new(frame, "c0", "c1", ["c2", "c3"])
        .expect("roles should be valid")
        .into_shared();

    // Cells at or above the mean of column c2, read live from the table
    let mean_c2 = TableGroup::new(Arc::clone(&shared), Filter::new().col("c2"))
        .lock_timeout(Duration::from_secs(1));
    let filter = Arc::new(Filter::new().ge(CondValue::new(mean_c2, Reducer::Mean)));
    let options = EvalOptions::new().num_threads(4);

    let before = shared
        .read()
        .indexer_with(&filter, &options)
        .expect("evaluation failed");
    println!("before write: {} cells", before.count());

    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            let mut table = shared.write();
            for row in 0..1_000_i64 {
                table
                    .set_value(&"c2".into(), &row.into(), Value::Int(0))
                    .expect("cell should exist");
            }
        })
    };
    writer.join().expect("writer panicked");

    let after = shared
        .read()
        .indexer_with(&filter, &options)
        .expect("evaluation failed");
    println!("after write: {} cells", after.count());
}
