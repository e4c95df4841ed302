use std::borrow::Cow;
use std::time::Instant;

use rayon::prelude::*;

use crate::logging::pandatex_log;
use crate::{BoolMatrix, Cell, CellSource, EvalOptions, Filter, FilterError};

pub(crate) fn evaluate<S: CellSource + ?Sized>(
    source: &S,
    filter: &Filter,
    options: &EvalOptions,
) -> Result<BoolMatrix, FilterError> {
    let started = Instant::now();
    let filter = if options.hoists_conditional_values() {
        Cow::Owned(filter.resolved()?)
    } else {
        Cow::Borrowed(filter)
    };

    let (rows, columns) = source.shape();
    let data = if options.is_parallel() {
        match options.threads() {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                pool.install(|| eval_parallel(source, &filter, rows, columns))?
            }
            None => eval_parallel(source, &filter, rows, columns)?,
        }
    } else {
        eval_sequential(source, &filter, rows, columns)?
    };

    pandatex_log!(
        log::Level::Debug,
        "matrix_evaluated",
        "rows={} columns={} parallel={} hoisted={} elapsed_us={}",
        rows,
        columns,
        options.is_parallel(),
        options.hoists_conditional_values(),
        started.elapsed().as_micros(),
    );

    Ok(BoolMatrix::new(
        source.row_keys().to_vec(),
        source.column_keys().to_vec(),
        data,
    ))
}

fn eval_sequential<S: CellSource + ?Sized>(
    source: &S,
    filter: &Filter,
    rows: usize,
    columns: usize,
) -> Result<Vec<bool>, FilterError> {
    let mut data = Vec::with_capacity(rows * columns);
    for r in 0..rows {
        for c in 0..columns {
            data.push(eval_cell(source, filter, r, c)?);
        }
    }
    Ok(data)
}

fn eval_parallel<S: CellSource + ?Sized>(
    source: &S,
    filter: &Filter,
    rows: usize,
    columns: usize,
) -> Result<Vec<bool>, FilterError> {
    let per_row: Vec<Vec<bool>> = (0..rows)
        .into_par_iter()
        .map(|r| {
            (0..columns)
                .map(|c| eval_cell(source, filter, r, c))
                .collect::<Result<Vec<bool>, FilterError>>()
        })
        .collect::<Result<_, _>>()?;
    Ok(per_row.into_iter().flatten().collect())
}

fn eval_cell<S: CellSource + ?Sized>(
    source: &S,
    filter: &Filter,
    row: usize,
    column: usize,
) -> Result<bool, FilterError> {
    let out_of_bounds = || FilterError::CellOutOfBounds { row, column };
    let value = source.value_at(row, column).ok_or_else(out_of_bounds)?;
    let column_key = source.column_keys().get(column).ok_or_else(out_of_bounds)?;
    let row_key = source.row_keys().get(row).ok_or_else(out_of_bounds)?;
    filter.matches(&Cell::new(value, column_key, row_key))
}
