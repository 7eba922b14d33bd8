use crate::sample::Sample;
use crate::scanner::{resolve_paths, SampleFormat};
use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use binscope_common::{BinscopeError, Result};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where a sample comes from. `column`/`weight_column` select parquet columns and are
/// ignored for text and JSON inputs.
#[derive(Debug, Clone, Default)]
pub struct SampleSource {
    pub path: String,
    pub column: Option<String>,
    pub weight_column: Option<String>,
}

impl SampleSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: None,
            weight_column: None,
        }
    }
}

/// Load a sample, expanding glob patterns and reading matched files in parallel.
pub fn load_sample(source: &SampleSource) -> Result<Sample> {
    let paths = resolve_paths(&source.path)?;
    let parts: Vec<Sample> = paths
        .par_iter()
        .map(|p| read_sample_file(p, source))
        .collect::<Result<Vec<_>>>()?;
    let sample = Sample::concat(parts)?;
    tracing::info!(
        source = %source.path,
        files = paths.len(),
        events = sample.len(),
        weighted = sample.is_weighted(),
        "loaded sample"
    );
    Ok(sample)
}

pub fn read_sample_file(path: &Path, source: &SampleSource) -> Result<Sample> {
    match SampleFormat::detect(path) {
        SampleFormat::Parquet => read_parquet_sample(
            path,
            source.column.as_deref(),
            source.weight_column.as_deref(),
        ),
        SampleFormat::Json => read_json_sample(path),
        SampleFormat::Text => {
            if source.column.is_some() || source.weight_column.is_some() {
                tracing::warn!(path = %path.display(), "column selection ignored for text input");
            }
            read_text_sample(path)
        }
    }
}

#[derive(Deserialize)]
struct JsonSample {
    values: Vec<f64>,
    #[serde(default)]
    weights: Option<Vec<f64>>,
}

pub fn read_json_sample(path: &Path) -> Result<Sample> {
    let content = std::fs::read_to_string(path)?;
    let raw: JsonSample = serde_json::from_str(&content)?;
    Sample::new(raw.values, raw.weights)
}

/// one event per line: `value` or `value,weight` (commas or whitespace); `#` starts a comment
pub fn read_text_sample(path: &Path) -> Result<Sample> {
    let content = std::fs::read_to_string(path)?;
    parse_text_sample(path, &content)
}

/// A header names columns: nothing parses and nothing starts like a number.
fn is_header(fields: &[&str]) -> bool {
    fields.iter().all(|f| {
        f.parse::<f64>().is_err()
            && !f.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
    })
}

fn parse_text_sample(path: &Path, content: &str) -> Result<Sample> {
    let parse_err = |line: usize, message: String| BinscopeError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };
    let mut values = Vec::new();
    let mut weights = Vec::new();
    let mut weighted: Option<bool> = None;
    let mut seen_data = false;
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() > 2 {
            return Err(parse_err(
                line_no,
                format!("expected 1 or 2 fields, found {}", fields.len()),
            ));
        }
        let first_data_line = !seen_data;
        seen_data = true;
        if first_data_line && is_header(&fields) {
            tracing::debug!(path = %path.display(), line = line_no, header = line, "skipping header row");
            continue;
        }
        let value: f64 = fields[0]
            .parse()
            .map_err(|_| parse_err(line_no, format!("not a number: {}", fields[0])))?;
        let has_weight = fields.len() == 2;
        match weighted {
            None => weighted = Some(has_weight),
            Some(w) if w != has_weight => {
                return Err(BinscopeError::MalformedWeights(format!(
                    "{}:{line_no}: weight column present on some lines only",
                    path.display()
                )));
            }
            Some(_) => {}
        }
        values.push(value);
        if has_weight {
            let w: f64 = fields[1]
                .parse()
                .map_err(|_| parse_err(line_no, format!("not a number: {}", fields[1])))?;
            weights.push(w);
        }
    }
    let weights = (weighted == Some(true)).then_some(weights);
    Sample::new(values, weights)
}

fn to_f64(array: &ArrayRef, name: &str) -> Result<Float64Array> {
    if array.null_count() > 0 {
        return Err(BinscopeError::Other(format!(
            "column {name} contains {} nulls",
            array.null_count()
        )));
    }
    let casted = cast(array, &DataType::Float64)?;
    casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .ok_or_else(|| BinscopeError::Other(format!("column {name} is not numeric")))
}

pub fn read_parquet_sample(
    path: &Path,
    column: Option<&str>,
    weight_column: Option<&str>,
) -> Result<Sample> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let value_name = match column {
        Some(c) => c.to_owned(),
        None => schema
            .fields()
            .iter()
            .find(|f| f.data_type().is_numeric())
            .map(|f| f.name().clone())
            .ok_or_else(|| {
                BinscopeError::Other(format!("{}: no numeric column", path.display()))
            })?,
    };
    let mut wanted = vec![value_name.clone()];
    wanted.extend(weight_column.map(str::to_owned));
    let mut indices = Vec::with_capacity(wanted.len());
    for name in &wanted {
        let idx = schema
            .fields()
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| {
                BinscopeError::Other(format!("{}: no column named {name}", path.display()))
            })?;
        indices.push(idx);
    }
    let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
    let reader = builder.with_projection(mask).with_batch_size(65536).build()?;

    let mut values = Vec::new();
    let mut weights = weight_column.map(|_| Vec::new());
    for batch in reader {
        let batch = batch?;
        let v = batch
            .column_by_name(&value_name)
            .ok_or_else(|| BinscopeError::Other(format!("column {value_name} missing in batch")))?;
        values.extend(to_f64(v, &value_name)?.values().iter().copied());
        if let (Some(all), Some(wname)) = (weights.as_mut(), weight_column) {
            let w = batch
                .column_by_name(wname)
                .ok_or_else(|| BinscopeError::Other(format!("column {wname} missing in batch")))?;
            all.extend(to_f64(w, wname)?.values().iter().copied());
        }
    }
    Sample::new(values, weights)
}

/// Every file a source expands to; used by `inspect` for reporting.
pub fn source_files(source: &SampleSource) -> Result<Vec<PathBuf>> {
    resolve_paths(&source.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Sample> {
        parse_text_sample(Path::new("mem.txt"), content)
    }

    #[test]
    fn text_values_only() {
        let s = parse("1.5\n2\n\n# comment\n3e0 # trailing\n").unwrap();
        assert_eq!(s.values(), &[1.5, 2.0, 3.0]);
        assert!(!s.is_weighted());
    }

    #[test]
    fn text_with_weights_and_header() {
        let s = parse("mass,weight\n1.0,0.5\n2.0 2.0\n").unwrap();
        assert_eq!(s.values(), &[1.0, 2.0]);
        assert_eq!(s.weights(), Some(&[0.5, 2.0][..]));
    }

    #[test]
    fn text_mixed_weights_is_malformed() {
        let err = parse("1.0,1.0\n2.0\n").unwrap_err();
        assert!(matches!(err, BinscopeError::MalformedWeights(_)));
    }

    #[test]
    fn text_bad_number_reports_line() {
        let err = parse("1.0\nabc\n").unwrap_err();
        match err {
            BinscopeError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn text_typo_in_first_value_is_reported() {
        let err = parse("1.O\n2.0\n").unwrap_err();
        match err {
            BinscopeError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse("-x\n2.0\n").is_err());
    }

    #[test]
    fn text_header_only_on_first_line() {
        let s = parse("# run 12\nmass\n4.5\n").unwrap();
        assert_eq!(s.values(), &[4.5]);
        assert!(parse("4.5\nmass\n").is_err());
    }

    #[test]
    fn text_too_many_fields() {
        assert!(parse("1,2,3\n").is_err());
    }

    #[test]
    fn json_sample_round_trip_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, r#"{"values":[1,2,3],"weights":[1,0.5,0]}"#).unwrap();
        let s = read_json_sample(&path).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.weight(1), 0.5);
    }

    #[test]
    fn json_weight_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, r#"{"values":[1,2,3],"weights":[1]}"#).unwrap();
        assert!(matches!(
            read_json_sample(&path).unwrap_err(),
            BinscopeError::MalformedWeights(_)
        ));
    }
}
