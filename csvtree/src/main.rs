//! # csvtree
//!
//! A CLI tool that renders a tree-structured CSV file as a text table with
//! the number of direct children of every row.
//!
//! ## Overview
//!
//! csvtree is built on top of csvtreelib. The hierarchy columns, given top
//! level first, decide each row's depth: a row sits at the level of the
//! first hierarchy column it fills. Rows must already be in depth-first
//! order.
//!
//! ## Usage
//!
//! ```bash
//! # Table with the hierarchy columns and a trailing "nodes" column
//! csvtree org.csv -d division,department,team
//!
//! # Keep every source column
//! csvtree org.csv -d division,department,team --all-columns
//! csvtree org.csv -d division,department,team --columns all
//!
//! # JSON instead of a table
//! csvtree org.csv -d division,department,team --output json
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use csvtreelib::{
    count_nodes, read_csv, ColumnSelection, CountOptions, CountResult, HierarchySpec,
    DEFAULT_DELIMITER,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("csvtree")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render a tree-structured CSV file to a text table with node counts")
        .arg(
            Arg::new("csv_file")
                .value_name("CSV_FILE")
                .required(true)
                .help("Path to the CSV file containing the tree structure"),
        )
        .arg(
            Arg::new("hierarchy")
                .short('d')
                .long("hierarchy")
                .required(true)
                .value_name("COLUMNS")
                .help("Comma separated list of columns forming the tree hierarchy (top to bottom)"),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .value_name("SELECTION")
                .default_value("hierarchy")
                .help("Columns to show before nodes: hierarchy or all"),
        )
        .arg(
            Arg::new("all-columns")
                .short('a')
                .long("all-columns")
                .action(ArgAction::SetTrue)
                .help("Show every column of the file (same as --columns all)"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .default_value(DEFAULT_DELIMITER)
                .help("Separator placed between table cells"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v, -vv, -vvv)"),
        )
}

/// Install a stderr subscriber; RUST_LOG overrides the -v level.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build count options from matches
fn build_options(matches: &ArgMatches) -> Result<CountOptions, anyhow::Error> {
    let hierarchy = matches
        .get_one::<String>("hierarchy")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let hierarchy: HierarchySpec = hierarchy.parse()?;

    let columns = if matches.get_flag("all-columns") {
        ColumnSelection::All
    } else {
        matches
            .get_one::<String>("columns")
            .map(|s| s.parse::<ColumnSelection>())
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default()
    };

    Ok(CountOptions::new(hierarchy).columns(columns))
}

/// JSON view of a result: rows hold only the result columns
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    columns: &'a [String],
    rows: Vec<Map<String, Value>>,
}

impl<'a> JsonReport<'a> {
    fn new(result: &'a CountResult) -> Self {
        let rows: Vec<Map<String, Value>> = result
            .records()
            .into_iter()
            .map(|cells| {
                result
                    .columns
                    .iter()
                    .cloned()
                    .zip(cells.into_iter().map(Value::String))
                    .collect::<Map<String, Value>>()
            })
            .collect();

        Self {
            columns: &result.columns,
            rows,
        }
    }
}

/// Run the pipeline and return the text to print
fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    // Configuration is validated before the file is touched
    let options = build_options(matches)?;

    let path = matches
        .get_one::<String>("csv_file")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let set = read_csv(path)?;
    debug!(path, rows = set.len(), "read input");

    let result = count_nodes(&set, &options)?;

    let output = match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => serde_json::to_string_pretty(&JsonReport::new(&result))
            .context("failed to serialize result")?,
        _ => {
            let delimiter = matches
                .get_one::<String>("delimiter")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_DELIMITER);
            result.to_table().render(delimiter)
        }
    };

    Ok(output)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    setup_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let style = Style::new().red().for_stderr();
            eprintln!("{}", style.apply_to(format!("Error: {e}")));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvtreelib::RowSet;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["csvtree"];
        argv.extend(args);
        build_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_build_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_hierarchy_is_required() {
        let result = build_command().try_get_matches_from(["csvtree", "file.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_options() {
        let options = build_options(&matches(&["f.csv", "-d", "A, B", "-a"])).unwrap();
        assert_eq!(options.hierarchy.columns(), &["A", "B"]);
        assert_eq!(options.columns, ColumnSelection::All);
    }

    #[test]
    fn test_build_options_columns_selection() {
        let options = build_options(&matches(&["f.csv", "-d", "A", "--columns", "all"])).unwrap();
        assert_eq!(options.columns, ColumnSelection::All);

        let options = build_options(&matches(&["f.csv", "-d", "A"])).unwrap();
        assert_eq!(options.columns, ColumnSelection::Hierarchy);

        let err = build_options(&matches(&["f.csv", "-d", "A", "--columns", "some"])).unwrap_err();
        assert!(err.to_string().contains("Invalid column selection"));
    }

    #[test]
    fn test_build_options_rejects_reserved_name() {
        let err = build_options(&matches(&["f.csv", "-d", "A,nodes"])).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_reserved_name_reported_before_missing_file() {
        let err = run(&matches(&["/nonexistent/tree.csv", "-d", "nodes"])).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_json_report_keeps_result_columns() {
        let set = RowSet::from_reader("A,B,x\nroot,,1\n,c,2\n".as_bytes()).unwrap();
        let options = CountOptions::new("A,B".parse().unwrap());
        let result = count_nodes(&set, &options).unwrap();

        let value = serde_json::to_value(JsonReport::new(&result)).unwrap();
        assert_eq!(value["columns"], serde_json::json!(["A", "B", "nodes"]));
        assert_eq!(value["rows"][0]["nodes"], "1");
        assert_eq!(value["rows"][1]["B"], "c");
        assert!(value["rows"][0].get("x").is_none());
    }
}
