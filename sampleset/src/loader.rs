//! Reading samples from whitespace-delimited text.
//!
//! Every non-blank line is one sample. Values are separated by whitespace and
//! must parse as `f64`; the resulting vector is then validated by
//! [`Sample::new`].

use crate::error::{Error, Result};
use crate::sample::Sample;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Log and skip lines that fail to parse or validate, rather than failing
    /// the whole load.
    pub skip_invalid: bool,
}

/// Parse one line of input. Blank lines yield `None`.
pub fn parse_line(line: &str, lineno: usize) -> Result<Option<Vec<f64>>> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| Error::Parse {
                line: lineno,
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.is_empty() {
        Ok(None)
    } else {
        Ok(Some(values))
    }
}

fn parse_sample(line: &str, lineno: usize, label: &str) -> Result<Option<Sample>> {
    match parse_line(line, lineno)? {
        None => Ok(None),
        Some(values) => Sample::new(label, values)
            .map(Some)
            .map_err(|reason| Error::InvalidLine {
                line: lineno,
                reason: Box::new(reason),
            }),
    }
}

pub fn load_reader<R: BufRead>(mut reader: R, label: &str, options: &LoadOptions) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    let mut buf = Vec::new();
    let mut lineno = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;

        let parsed = std::str::from_utf8(&buf)
            .map_err(|_| Error::Encoding { line: lineno })
            .and_then(|line| parse_sample(line, lineno, label));
        match parsed {
            Ok(Some(sample)) => samples.push(sample),
            Ok(None) => {}
            Err(e) if options.skip_invalid => {
                tracing::warn!(line = lineno, error = %e, "skipping invalid sample");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(samples)
}

pub fn load_file(path: impl AsRef<Path>, label: &str, options: &LoadOptions) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;

    let samples = load_reader(BufReader::new(file), label, options)?;
    tracing::debug!(path = %path.display(), samples = samples.len(), "loaded file");
    Ok(samples)
}

#[test]
fn parses_mixed_whitespace() {
    let values = parse_line(" 1\t2.5   3e2 ", 1).unwrap();
    assert_eq!(values, Some(vec![1.0, 2.5, 300.0]));
}

#[test]
fn blank_lines_are_skipped() {
    let input = "1 2 3\n\n   \n4 5\n";
    let samples = load_reader(input.as_bytes(), "v1.5.0", &LoadOptions::default()).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].values(), &[1.0, 2.0, 3.0]);
    assert_eq!(samples[1].values(), &[4.0, 5.0]);
    assert!(samples.iter().all(|s| s.label() == "v1.5.0"));
}

#[test]
fn bad_token_reports_line() {
    let input = "1 2\n3 four 5\n";
    match load_reader(input.as_bytes(), "v", &LoadOptions::default()) {
        Err(Error::Parse { line, token }) => {
            assert_eq!(line, 2);
            assert_eq!(token, "four");
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn negative_value_rejects_load() {
    let input = "1 2\n3 -4\n";
    let err = load_reader(input.as_bytes(), "v", &LoadOptions::default()).unwrap_err();

    assert!(matches!(
        &err,
        Error::InvalidLine { line: 2, reason } if matches!(**reason, Error::NegativeValue { index: 1, .. })
    ));
    assert_eq!(
        err.to_string(),
        "line 2: negative value -4 at position 1 is not allowed in a data sample"
    );
}

#[test]
fn skip_invalid_keeps_good_lines() {
    let input = "1 2\n3 -4\nx\n5 6\nnan 1\n";
    let options = LoadOptions { skip_invalid: true };
    let samples = load_reader(input.as_bytes(), "v", &options).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].values(), &[5.0, 6.0]);
}

#[test]
fn missing_file() {
    let err = load_file("definitely/not/here.txt", "v", &LoadOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Open { .. }));
    assert!(err.to_string().starts_with("Cannot open file: "));
}

#[test]
fn invalid_utf8_line() {
    let input: &[u8] = b"1 2\n3 \xff 4\n5 6\n";

    match load_reader(input, "v", &LoadOptions::default()) {
        Err(Error::Encoding { line }) => assert_eq!(line, 2),
        other => panic!("expected Encoding error, got {:?}", other),
    }

    let samples = load_reader(input, "v", &LoadOptions { skip_invalid: true }).unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].values(), &[5.0, 6.0]);
}

#[test]
fn crlf_and_missing_final_newline() {
    let samples = load_reader(&b"1 2\r\n3 4"[..], "v", &LoadOptions::default()).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].values(), &[3.0, 4.0]);
}
