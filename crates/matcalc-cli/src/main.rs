use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use matcalc_cli::commands::{build_operation, run_operation, run_request_file, OperandFiles};
use matcalc_cli::config::resolve_kernel_config;
use matcalc_cli::output::{write_json, write_response, Response};
use matcalc_kernel::{Kernel, OperationKind};

fn matrix_arg(id: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .value_name(value_name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn single_matrix_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("matrix_a", "MATRIX", "Matrix file (*.csv, *.tsv or *.json)"))
}

fn two_matrix_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("matrix_a", "MATRIX_A", "First matrix file (*.csv, *.tsv or *.json)"))
        .arg(matrix_arg("matrix_b", "MATRIX_B", "Second matrix file (*.csv, *.tsv or *.json)"))
}

fn build_cli() -> Command {
    Command::new("matcalc")
        .version(clap::crate_version!())
        .about("matcalc - dense matrix calculator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a JSON kernel configuration file (pivot tolerance settings)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .global(true)
                .help(
                    "Write the response to this file instead of stdout. Matrix results are \
                     written as CSV/TSV when the path ends in .csv or .tsv.",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(single_matrix_command("determinant", "Determinant of a square matrix"))
        .subcommand(single_matrix_command("inverse", "Inverse of a square matrix"))
        .subcommand(single_matrix_command("rank", "Rank of a matrix"))
        .subcommand(single_matrix_command("transpose", "Transpose of a matrix"))
        .subcommand(two_matrix_command("add", "Element-wise sum A + B"))
        .subcommand(two_matrix_command("subtract", "Element-wise difference A - B"))
        .subcommand(two_matrix_command("multiply", "Matrix product A x B"))
        .subcommand(
            single_matrix_command("scale", "Multiply every entry of a matrix by a scalar")
                .arg(
                    Arg::new("scalar")
                        .short('k')
                        .long("scalar")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Scalar factor")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solve the linear system A x = b")
                .arg(matrix_arg(
                    "matrix_a",
                    "COEFFICIENTS",
                    "Square coefficient matrix file (*.csv, *.tsv or *.json)",
                ))
                .arg(matrix_arg(
                    "vector",
                    "CONSTANTS",
                    "Right-hand side file: JSON array, or CSV/TSV single row or column",
                )),
        )
        .subcommand(
            Command::new("run")
                .about("Execute a JSON request file holding one operation or an array of operations")
                .arg(matrix_arg(
                    "request",
                    "REQUEST",
                    "JSON request file, e.g. {\"operation\": \"determinant\", \"matrix\": [[1, 2], [3, 4]]}",
                )),
        )
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATCALC_LOG", "error,matcalc=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some((name, sub_m)) => handle_operation(name, sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn path_arg<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a Path> {
    matches
        .try_get_one::<PathBuf>(id)
        .ok()
        .flatten()
        .map(PathBuf::as_path)
}

fn kernel_from(matches: &ArgMatches) -> Result<Kernel> {
    let config = resolve_kernel_config(path_arg(matches, "config"))?;
    Ok(Kernel::new(config)?)
}

fn handle_operation(name: &str, matches: &ArgMatches) -> Result<()> {
    let kind = OperationKind::from_str(name).map_err(anyhow::Error::msg)?;
    let kernel = kernel_from(matches)?;
    let files = OperandFiles {
        matrix_a: path_arg(matches, "matrix_a"),
        matrix_b: path_arg(matches, "matrix_b"),
        vector: path_arg(matches, "vector"),
        scalar: matches.try_get_one::<f64>("scalar").ok().flatten().copied(),
    };

    log::info!("[matcalc] Running {}", kind);
    let operation = build_operation(kind, &files)?;
    let response = run_operation(&kernel, &operation);
    write_response(&response, path_arg(matches, "output"))?;

    if let Response::Failure { error, .. } = &response {
        log::error!("{} failed: {}", kind, error);
        std::process::exit(1)
    }
    Ok(())
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let kernel = kernel_from(matches)?;
    let request_path = path_arg(matches, "request")
        .ok_or_else(|| anyhow::anyhow!("run requires a request file"))?;

    log::info!("[matcalc] Executing requests from {:?}", request_path);
    let responses = run_request_file(&kernel, request_path)?;
    write_json(&responses, path_arg(matches, "output"))?;

    if !responses.all_succeeded() {
        log::error!("One or more requests in {:?} failed", request_path);
        std::process::exit(1)
    }
    Ok(())
}
