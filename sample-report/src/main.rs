use docopt::Docopt;
use sampleset::{Collection, LoadOptions, Report};
use serde::Deserialize;
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &'static str = "
Summarize numeric samples read from text files.

Each non-blank line of an input file is one sample: a whitespace-separated list
of non-negative numbers. For every sample we compute the mean, the population
standard deviation and the maximum. The report counts the samples whose maximum
is more than three times their mean, and shows the sample with the highest mean.

Files are loaded in the order given. A file that cannot be loaded is reported
and skipped; the report covers whatever did load, and the program then exits
with an error status.

Usage:
  sample-report [options] <file>...

Options:
  --label <LABEL>   Version label attached to each loaded sample. [default: v1.0.0]
  --skip-invalid    Skip malformed or negative samples instead of rejecting
                    the whole file.
  --json            Print the report as JSON.
  --quiet           Only log errors.
";

#[derive(Debug, Deserialize)]
struct Args {
    arg_file: Vec<String>,
    flag_label: String,
    flag_skip_invalid: bool,
    flag_json: bool,
    flag_quiet: bool,
}

fn init_tracing(quiet: bool) {
    let level = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load every file in order into one collection. A file that fails is logged
/// and skipped. Returns the collection and the number of failed files.
fn load_all(files: &[String], label: &str, options: &LoadOptions) -> (Collection, usize) {
    let mut collection = Collection::new();
    let mut failed = 0;
    for file in files {
        match collection.load(file, label, options) {
            Ok(count) => tracing::info!(file = %file, samples = count, "loaded"),
            Err(e) => {
                tracing::error!(file = %file, error = %error_chain(&e), "load failed");
                failed += 1;
            }
        }
    }
    (collection, failed)
}

/// `e` and each of its sources, joined with ": ".
fn error_chain(e: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(e), |&e| e.source())
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

fn render(report: &Report, json: bool) -> Result<String, serde_json::Error> {
    if json {
        Ok(serde_json::to_string_pretty(report)? + "\n")
    } else {
        Ok(report.to_string())
    }
}

fn check_failures(failed: usize, total: usize) -> Result<(), String> {
    if failed > 0 {
        Err(format!("{} of {} files could not be loaded", failed, total))
    } else {
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_tracing(args.flag_quiet);

    let options = LoadOptions { skip_invalid: args.flag_skip_invalid };
    let (collection, failed) = load_all(&args.arg_file, &args.flag_label, &options);

    print!("{}", render(&collection.report(), args.flag_json)?);

    check_failures(failed, args.arg_file.len())?;
    Ok(())
}

#[cfg(test)]
fn parse(argv: &[&str]) -> Result<Args, docopt::Error> {
    Docopt::new(USAGE).and_then(|d| d.argv(argv.iter().copied()).deserialize())
}

#[test]
fn defaults() {
    let args = parse(&["sample-report", "input.txt"]).unwrap();

    assert_eq!(args.arg_file, vec!["input.txt"]);
    assert_eq!(args.flag_label, sampleset::DEFAULT_LABEL);
    assert!(!args.flag_skip_invalid);
    assert!(!args.flag_json);
    assert!(!args.flag_quiet);
}

#[test]
fn all_options() {
    let args = parse(&["sample-report", "--label", "v1.5.0", "--skip-invalid", "--json",
                       "--quiet", "wrong_input.txt", "input_datarecords.txt"]).unwrap();

    assert_eq!(args.arg_file, vec!["wrong_input.txt", "input_datarecords.txt"]);
    assert_eq!(args.flag_label, "v1.5.0");
    assert!(args.flag_skip_invalid);
    assert!(args.flag_json);
    assert!(args.flag_quiet);
}

#[test]
fn requires_a_file() {
    assert!(parse(&["sample-report"]).is_err());
}

#[cfg(test)]
const DEMO_INPUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/input_datarecords.txt");

#[test]
fn failed_file_is_skipped_and_later_files_load() {
    let files = vec!["wrong_input.txt".to_owned(), DEMO_INPUT.to_owned(), DEMO_INPUT.to_owned()];
    let (collection, failed) = load_all(&files, "v1.5.0", &LoadOptions::default());

    assert_eq!(failed, 1);
    assert_eq!(collection.len(), 8);
    assert!(collection.iter().all(|s| s.label() == "v1.5.0"));
    // the first file's samples come first
    assert_eq!(collection.samples()[0].values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(collection.samples()[4].values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);

    assert_eq!(
        check_failures(failed, files.len()).unwrap_err(),
        "1 of 3 files could not be loaded"
    );
}

#[test]
fn demo_input_text_report() {
    let (collection, failed) = load_all(&[DEMO_INPUT.to_owned()], "v1.5.0", &LoadOptions::default());
    assert_eq!(failed, 0);
    assert!(check_failures(failed, 1).is_ok());

    let text = render(&collection.report(), false).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Count of TripleMeanSamples: 1"));
    assert_eq!(lines.next(), Some("Details of sample with the max mean:"));
    let details = lines.next().unwrap();
    assert!(details.starts_with("Data version: v1.5.0 | Maximum value: 11 | Mean value: 10.33"),
            "{}", details);
    assert_eq!(lines.next(), None);
}

#[test]
fn json_output() {
    let (collection, _) = load_all(&[DEMO_INPUT.to_owned()], "v1.5.0", &LoadOptions::default());

    let text = render(&collection.report(), true).unwrap();
    assert!(text.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["sample_count"], 4);
    assert_eq!(value["triple_mean_count"], 1);
    assert_eq!(value["best"]["label"], "v1.5.0");
    assert_eq!(value["best"]["max"], 11.0);
}

#[test]
fn error_chain_includes_io_cause() {
    let err = Collection::new()
        .load("wrong_input.txt", "v", &LoadOptions::default())
        .unwrap_err();

    let chain = error_chain(&err);
    assert!(chain.starts_with("Cannot open file: wrong_input.txt: "), "{}", chain);
    assert!(chain.len() > err.to_string().len());
}
