use pandatex::{Frame, Table, Value};

fn main() {
    let rows = (0..5)
        .map(|r| (0..4).map(|c| Value::Int(r * 4 + c)).collect())
        .collect();
    let frame = Frame::new(["a", "b", "c", "d"], rows).expect("rows should be rectangular");
    let table = Table::new(frame, ["a", "b"], "c", "d").expect("roles should be valid");

    // Small values, or anything in column d
    let small = table.each().lt(10_i64);
    let in_d = table.each().col("d");
    let filter = &small | &in_d;
    println!("{filter}");

    let mask = table.indexer(&filter).expect("evaluation failed");
    for row in mask.to_rows() {
        let line: Vec<&str> = row.iter().map(|&m| if m { "x" } else { "." }).collect();
        println!("{}", line.join(" "));
    }
    println!("{} of 20 cells match", mask.count());
}
