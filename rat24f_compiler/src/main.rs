use rat24f_compiler::config::RuntimeConfig;
use rat24f_compiler::logging::codes;
use rat24f_compiler::{logging, pipeline, PipelineOutput};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    tokens: bool,
    config: Option<PathBuf>,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("rat24f");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <file>... [options]", program);
            eprintln!("       {} --help", program);
            std::process::exit(1);
        }
    };

    if options.help {
        print_help(program);
        return Ok(());
    }

    if options.inputs.is_empty() {
        eprintln!("Usage: {} <file>... [options]", program);
        eprintln!("       {} --help", program);
        std::process::exit(1);
    }

    match run(&options) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(error) => {
            logging::safe_log_error(codes::system::INTERNAL_ERROR, &error.to_string());
            std::process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    println!("Rat24F recognizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes Rat24F sources and checks them against the Rat24F grammar");
    println!();
    println!("USAGE:");
    println!("    {} <file>... [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --output <file>     Write the report to a file instead of stdout");
    println!("    --json              Emit the report as JSON");
    println!("    --tokens            List every token before the parse trace");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!("    --help              Show this help message");
    println!();
    println!("OUTPUT:");
    println!("    For each file: the productions applied and tokens matched, in order,");
    println!("    ending with acceptance or the first syntax error.");
    println!("    Exit status is 1 if any file could not be read or was rejected.");
    println!();
    println!("BUILD CONFIGURATION:");
    println!("    {}", rat24f_compiler::config::build_info::source_info());
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--tokens" => options.tokens = true,
            "--output" | "-o" => {
                let path = iter.next().ok_or("--output requires a file path")?;
                options.output = Some(PathBuf::from(path));
            }
            "--config" => {
                let path = iter.next().ok_or("--config requires a file path")?;
                options.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("Unknown option '{}'", flag));
            }
            input => options.inputs.push(PathBuf::from(input)),
        }
    }

    Ok(options)
}

/// Install the global logger unless one is already running
fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    if logging::is_initialized() {
        return Ok(());
    }

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()
}

/// Process every input in order; returns whether all of them were accepted
fn run(options: &CliOptions) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = match &options.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    config.report.json_output |= options.json;
    config.report.include_token_listing |= options.tokens;

    init_logging(&config)?;
    pipeline::validate_pipeline()?;

    let mut writer: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut all_accepted = true;
    let mut json_reports = Vec::new();

    for (file_id, input) in options.inputs.iter().enumerate() {
        let display = input.display().to_string();

        match pipeline::process_file_with_config(input, &config, file_id) {
            Ok(result) => {
                all_accepted &= result.is_accepted();
                if config.report.json_output {
                    let output = PipelineOutput::new(&display, &result, &config.report);
                    json_reports.push(serde_json::to_value(output)?);
                } else {
                    writeln!(
                        writer,
                        "{}",
                        pipeline::render_text(&display, &result, &config.report)
                    )?;
                }
            }
            Err(error) => {
                all_accepted = false;
                if config.report.json_output {
                    json_reports.push(serde_json::json!({
                        "file": display,
                        "accepted": false,
                        "failure": error.to_string(),
                        "code": error.error_code().as_str(),
                    }));
                } else {
                    writeln!(writer, "Processing file: {}", display)?;
                    writeln!(writer, "Error: {}\n", error)?;
                }
            }
        }
    }

    if config.report.json_output {
        serde_json::to_writer_pretty(&mut writer, &json_reports)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(all_accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&[
            "a.rat",
            "--tokens",
            "b.rat",
            "--output",
            "out.txt",
            "--json",
            "--config",
            "prefs.toml",
        ]))
        .unwrap();

        assert_eq!(
            options.inputs,
            vec![PathBuf::from("a.rat"), PathBuf::from("b.rat")]
        );
        assert_eq!(options.output, Some(PathBuf::from("out.txt")));
        assert_eq!(options.config, Some(PathBuf::from("prefs.toml")));
        assert!(options.tokens);
        assert!(options.json);
        assert!(!options.help);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["a.rat", "--output"])).is_err());
        assert!(parse_args(&args(&["--threads", "4"])).is_err());
        assert!(parse_args(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_parse_args_rejects_single_dash_typos() {
        let error = parse_args(&args(&["a.rat", "-j"])).unwrap_err();
        assert!(error.contains("'-j'"));
        assert!(parse_args(&args(&["-x", "a.rat"])).is_err());

        let options = parse_args(&args(&["-", "-o", "out.txt"])).unwrap();
        assert_eq!(options.inputs, vec![PathBuf::from("-")]);
        assert_eq!(options.output, Some(PathBuf::from("out.txt")));
    }

    // `run` installs process-wide logging; keep its tests from overlapping
    static RUN_LOCK: Mutex<()> = Mutex::new(());

    struct Inputs {
        dir: TempDir,
        paths: Vec<PathBuf>,
    }

    fn write_inputs() -> Inputs {
        let dir = tempfile::tempdir().unwrap();
        let accepted = dir.path().join("accepted.rat");
        fs::write(&accepted, "@ integer a;\na = 1;\n@\n").unwrap();
        let rejected = dir.path().join("rejected.rat");
        fs::write(&rejected, "@ integer a b; @\n").unwrap();
        let missing = dir.path().join("missing.rat");

        Inputs {
            paths: vec![accepted, rejected, missing],
            dir,
        }
    }

    fn run_to_file(inputs: &Inputs, json: bool) -> (bool, String) {
        let _guard = RUN_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let output = inputs.dir.path().join(if json { "report.json" } else { "report.txt" });
        let options = CliOptions {
            inputs: inputs.paths.clone(),
            output: Some(output.clone()),
            json,
            ..CliOptions::default()
        };

        let all_accepted = run(&options).unwrap();
        (all_accepted, fs::read_to_string(output).unwrap())
    }

    #[test]
    fn test_run_text_report_covers_every_input_in_order() {
        let inputs = write_inputs();
        let (all_accepted, report) = run_to_file(&inputs, false);

        assert!(!all_accepted);

        let headers: Vec<&str> = report
            .lines()
            .filter(|line| line.starts_with("Processing file: "))
            .collect();
        assert_eq!(headers.len(), 3);
        for (header, path) in headers.iter().zip(&inputs.paths) {
            assert_eq!(*header, format!("Processing file: {}", path.display()));
        }

        let accepted_at = report.find("Parse complete: input accepted").unwrap();
        let rejected_at = report.find("Parsing Error:").unwrap();
        let missing_header = format!("Processing file: {}", inputs.paths[2].display());
        let missing_at = report.find(&missing_header).unwrap();
        assert!(accepted_at < rejected_at);
        assert!(rejected_at < missing_at);
        assert!(report[missing_at..]
            .lines()
            .nth(1)
            .is_some_and(|line| line.starts_with("Error: ")));
    }

    #[test]
    fn test_run_json_report_is_one_array() {
        let inputs = write_inputs();
        let (all_accepted, report) = run_to_file(&inputs, true);

        assert!(!all_accepted);

        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0]["accepted"], true);
        assert!(entries[0]["error"].is_null());
        assert_eq!(entries[1]["accepted"], false);
        assert_eq!(entries[1]["error"]["kind"], "unexpected_token");
        assert_eq!(entries[2]["accepted"], false);
        assert_eq!(entries[2]["code"], "E005");
        assert_eq!(entries[2]["file"], inputs.paths[2].display().to_string());
    }

    #[test]
    fn test_run_accepts_when_every_input_parses() {
        let inputs = write_inputs();
        let accepted_only = Inputs {
            paths: vec![inputs.paths[0].clone()],
            dir: tempfile::tempdir().unwrap(),
        };

        let (all_accepted, report) = run_to_file(&accepted_only, false);
        assert!(all_accepted);
        assert!(!report.contains("Error"));
    }
}
