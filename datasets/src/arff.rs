//! Reader for datasets in the attribute-relation file format (ARFF)
//!
//! A file starts with a header naming the relation and declaring one attribute per line, either
//! nominal with its categories in braces or numeric. The `@data` line is followed by one example
//! per line with comma separated values, `?` marks a missing value.
//!
//! ```text
//! @relation weather
//! @attribute outlook {sunny, overcast, rainy}
//! @attribute temperature numeric
//! @attribute play {yes, no}
//! @data
//! sunny,85,no
//! overcast,?,yes
//! ```
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use arbol::{Attribute, AttributeKind, Dataset};
use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use ndarray::Array2;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data section: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },
}

impl From<ReadError> for arbol::Error {
    fn from(err: ReadError) -> Self {
        arbol::Error::DatasetFormat(err.to_string())
    }
}

fn format_error<S: Into<String>>(line: usize, message: S) -> ReadError {
    ReadError::Format {
        line,
        message: message.into(),
    }
}

/// Strips a pair of enclosing single or double quotes
fn unquote(token: &str) -> &str {
    let token = token.trim();
    for quote in &['\'', '"'] {
        if token.len() >= 2 && token.starts_with(*quote) && token.ends_with(*quote) {
            return &token[1..token.len() - 1];
        }
    }

    token
}

/// Splits a leading, possibly quoted, name from the rest of a header line
fn split_name(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.trim_start();
    let first = rest.chars().next()?;

    if first == '\'' || first == '"' {
        let end = rest[1..].find(first)? + 1;
        Some((&rest[1..end], &rest[end + 1..]))
    } else {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '{')
            .unwrap_or_else(|| rest.len());
        Some((&rest[..end], &rest[end..]))
    }
}

/// Splits a category list like the data section, commas inside quotes do not separate
fn parse_categories(line: usize, name: &str, list: &str) -> Result<Vec<String>, ReadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quote(b'\'')
        .trim(Trim::All)
        .from_reader(list.as_bytes());

    let record = match reader.records().next() {
        Some(record) => record?,
        None => {
            return Err(format_error(
                line,
                format!("nominal attribute `{}` without categories", name),
            ))
        }
    };

    record
        .iter()
        .map(unquote)
        .map(|category| {
            if category.is_empty() {
                Err(format_error(
                    line,
                    format!("empty category of attribute `{}`", name),
                ))
            } else {
                Ok(category.to_string())
            }
        })
        .collect()
}

fn parse_attribute(line: usize, rest: &str) -> Result<Attribute, ReadError> {
    let (name, kind) =
        split_name(rest).ok_or_else(|| format_error(line, "attribute without name"))?;
    let kind = kind.trim();

    if kind.starts_with('{') {
        let end = kind
            .rfind('}')
            .ok_or_else(|| format_error(line, format!("unterminated categories of `{}`", name)))?;
        let categories = parse_categories(line, name, &kind[1..end])?;

        return Ok(Attribute::nominal(name, categories));
    }

    match kind.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Attribute::numeric(name)),
        other => Err(format_error(
            line,
            format!("unsupported type `{}` of attribute `{}`", other, name),
        )),
    }
}

fn parse_value(line: usize, field: &str, attribute: &Attribute) -> Result<f64, ReadError> {
    let field = unquote(field);
    if field == "?" {
        return Ok(f64::NAN);
    }

    match attribute.kind() {
        AttributeKind::Nominal(_) => attribute
            .category_index(field)
            .map(|idx| idx as f64)
            .ok_or_else(|| {
                format_error(
                    line,
                    format!(
                        "unknown category `{}` of attribute `{}`",
                        field,
                        attribute.name()
                    ),
                )
            }),
        AttributeKind::Numeric => match field.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(format_error(
                line,
                format!("invalid number `{}` of attribute `{}`", field, attribute.name()),
            )),
        },
    }
}

/// Parses the data section, `first_line` is the line number preceding it
fn parse_data(
    data: &str,
    attributes: &[Attribute],
    first_line: usize,
) -> Result<Array2<f64>, ReadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'%'))
        .quote(b'\'')
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut values = Vec::new();
    let mut nsamples = 0;

    for record in reader.records() {
        let record = record?;
        let line = first_line
            + record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or(0);

        if record.get(0).map(|field| field.starts_with('{')).unwrap_or(false) {
            return Err(format_error(line, "sparse rows are not supported"));
        }
        if record.len() != attributes.len() {
            return Err(format_error(
                line,
                format!(
                    "expected {} values, found {}",
                    attributes.len(),
                    record.len()
                ),
            ));
        }

        for (field, attribute) in record.iter().zip(attributes) {
            values.push(parse_value(line, field, attribute)?);
        }
        nsamples += 1;
    }

    Array2::from_shape_vec((nsamples, attributes.len()), values)
        .map_err(|err| format_error(first_line, err.to_string()))
}

/// Parses an ARFF document
///
/// No class attribute is designated, see [`Dataset::with_class_index`].
pub fn parse_arff(text: &str) -> Result<Dataset, ReadError> {
    let mut relation = String::new();
    let mut attributes = Vec::new();
    let mut data_start = None;
    let mut offset = 0;
    let mut line = 0;

    for raw in text.split_inclusive('\n') {
        line += 1;
        offset += raw.len();

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or_else(|| trimmed.len());
        let (keyword, rest) = trimmed.split_at(end);

        match keyword.to_ascii_lowercase().as_str() {
            "@relation" => {
                relation = split_name(rest)
                    .map(|(name, _)| name.to_string())
                    .unwrap_or_default()
            }
            "@attribute" => attributes.push(parse_attribute(line, rest)?),
            "@data" => {
                data_start = Some((offset, line));
                break;
            }
            _ => {
                return Err(format_error(
                    line,
                    format!("unexpected header line `{}`", trimmed),
                ))
            }
        }
    }

    let (offset, data_line) =
        data_start.ok_or_else(|| format_error(line, "missing @data section"))?;
    if attributes.is_empty() {
        return Err(format_error(data_line, "no attributes declared"));
    }

    let records = parse_data(&text[offset..], &attributes, data_line)?;

    tracing::debug!(
        relation = relation.as_str(),
        nattributes = attributes.len(),
        nsamples = records.nrows(),
        "parsed ARFF dataset"
    );

    Dataset::new(attributes, records)
        .map(|dataset| dataset.with_relation(relation))
        .map_err(|err| format_error(data_line, err.to_string()))
}

/// Reads an ARFF dataset
pub fn read_arff<R: Read>(mut reader: R) -> Result<Dataset, ReadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    parse_arff(&text)
}

/// Reads a gzip compressed ARFF dataset
pub fn read_arff_gz<R: Read>(reader: R) -> Result<Dataset, ReadError> {
    read_arff(GzDecoder::new(reader))
}

/// Reads an ARFF dataset from a file, files ending in `.gz` are decompressed
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, ReadError> {
    let path = path.as_ref();
    let gzipped = path.extension().map(|ext| ext == "gz").unwrap_or(false);
    tracing::info!(path = %path.display(), gzipped, "reading dataset");

    let file = BufReader::new(File::open(path)?);
    if gzipped {
        read_arff_gz(file)
    } else {
        read_arff(file)
    }
}
