//! Reading and writing the text grid format.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use relax_core::{Grid, GridError};
use tracing::info;

use crate::error::OutputError;

/// Write the logical rows of `grid`, one line per row.
pub fn write_grid<W: Write>(writer: &mut W, grid: &Grid) -> Result<(), OutputError> {
    for row in grid.iter_rows() {
        for (x, value) in row.iter().enumerate() {
            if x > 0 {
                writer.write_all(b" ")?;
            }
            write!(writer, "{value:.6}")?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// `result_<process_count>.txt`.
pub fn result_file_name(process_count: usize) -> String {
    format!("result_{process_count}.txt")
}

/// Write `grid` to `dir/result_<process_count>.txt` and return the path.
pub fn write_result_file(
    dir: impl AsRef<Path>,
    grid: &Grid,
    process_count: usize,
) -> Result<PathBuf, OutputError> {
    let path = dir.as_ref().join(result_file_name(process_count));
    let file = File::create(&path).map_err(|source| OutputError::Open {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_grid(&mut writer, grid)?;
    writer.flush()?;
    info!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "result written");
    Ok(path)
}

/// Parse a grid written by [`write_grid`]. Blank lines are skipped.
pub fn read_grid<R: BufRead>(reader: R) -> Result<Grid, OutputError> {
    let mut data = Vec::new();
    let mut rows = 0;
    let mut cols = None;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| OutputError::Parse {
                line: index + 1,
                reason: e.to_string(),
            })?;
        match cols {
            None => cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(OutputError::Parse {
                    line: index + 1,
                    reason: format!("expected {expected} values, found {}", row.len()),
                });
            }
            Some(_) => {}
        }
        data.extend(row);
        rows += 1;
    }
    let cols = cols.ok_or(GridError::Empty)?;
    Ok(Grid::from_vec(rows, cols, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relax_test_utils::{heat_grid, random_interior};

    fn render(grid: &Grid) -> String {
        let mut out = Vec::new();
        write_grid(&mut out, grid).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn six_decimals_single_spaces() {
        let grid = heat_grid(3, 3);
        assert_eq!(
            render(&grid),
            "100.000000 200.000000 300.000000\n\
             100.000000 250.000000 300.000000\n\
             100.000000 400.000000 300.000000\n"
        );
    }

    #[test]
    fn padding_is_not_written() {
        let grid = heat_grid(3, 3);
        assert_eq!(render(&grid.padded(6).unwrap()), render(&grid));
    }

    #[test]
    fn file_name_encodes_process_count() {
        assert_eq!(result_file_name(1), "result_1.txt");
        assert_eq!(result_file_name(12), "result_12.txt");
    }

    #[test]
    fn read_back_within_print_precision() {
        let grid = random_interior(5, 7, 11);
        let parsed = read_grid(render(&grid).as_bytes()).unwrap();
        assert_eq!((parsed.rows(), parsed.cols()), (5, 7));
        assert!(parsed.max_abs_diff(&grid).unwrap() <= 1e-6);
    }

    #[test]
    fn ragged_input_rejected() {
        let err = read_grid("1 2 3\n4 5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, OutputError::Parse { line: 2, .. }));
        let err = read_grid("1 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, OutputError::Parse { line: 1, .. }));
        assert!(matches!(
            read_grid("\n\n".as_bytes()).unwrap_err(),
            OutputError::Shape(GridError::Empty)
        ));
    }

    #[test]
    fn write_result_file_names_failing_path() {
        let missing = std::env::temp_dir()
            .join("relax-io-missing-dir")
            .join("nested");
        let err = write_result_file(&missing, &heat_grid(3, 3), 4).unwrap_err();
        match err {
            OutputError::Open { path, .. } => assert_eq!(path, missing.join("result_4.txt")),
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn write_result_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("relax-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let grid = heat_grid(4, 5);
        let path = write_result_file(&dir, &grid, 2).unwrap();
        assert!(path.ends_with("result_2.txt"));
        let file = std::io::BufReader::new(File::open(&path).unwrap());
        assert_eq!(read_grid(file).unwrap(), grid);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
