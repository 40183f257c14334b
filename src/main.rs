use anyhow::{Context, Result};
use clap::Parser;
use recsv::cli::{self, CliArgs, Output, RunPlan};
use recsv::{CsvReader, CsvWriter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    recsv::tracing::init();

    let args = CliArgs::parse();
    let plan = match args.into_plan() {
        Ok(plan) => plan,
        Err(message) => {
            eprintln!("recsv: {message}");
            return ExitCode::from(2);
        }
    };

    match run(plan) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("recsv: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Runs the plan, returning whether the input tokenized cleanly.
fn run(plan: RunPlan) -> Result<bool> {
    let input: Box<dyn Read> = match &plan.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let mut reader = CsvReader::from_reader(BufReader::new(input));
    reader.options = plan.read;

    match &plan.output {
        None => {
            let report = cli::run_check(&mut reader);
            if plan.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
            Ok(report.is_clean())
        }
        Some(target) => {
            let output: Box<dyn Write> = match target {
                Output::Stdout => Box::new(io::stdout().lock()),
                Output::File(path) => Box::new(
                    File::create(path)
                        .with_context(|| format!("cannot create {}", path.display()))?,
                ),
            };
            let mut writer = CsvWriter::from_writer(BufWriter::new(output));
            writer.options = plan.write;

            let rows = cli::run_recode(&mut reader, &mut writer, plan.masking)?;
            tracing::debug!(rows, "recode complete");
            Ok(true)
        }
    }
}
