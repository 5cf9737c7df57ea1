use anyhow::{Context, Result, bail, format_err};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dialoguer::Confirm;
use indoc::indoc;
use log::{Level, debug, error, info};
use serde_json::{Map, Value as JsonValue};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use cpe_wfn::Cpe;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CpeOutputFormat {
    Uri,
    FormattedString,
    Json,
    JsonLines,
}

#[derive(Debug)]
enum CpeInput {
    Arguments(Vec<String>),
    File(PathBuf),
    Stdin,
}

type Lines = Box<dyn Iterator<Item = io::Result<String>>>;

struct CpeDump {
    input: CpeInput,
    output_format: CpeOutputFormat,
    output: Box<dyn Write>,
    stop_after_error: bool,
    verbosity_level: Level,
}

impl CpeDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let input = match (
            matches.get_one::<String>("input"),
            matches.get_many::<String>("CPE"),
        ) {
            (Some(_), Some(_)) => bail!("Pass either `--input` or CPE arguments, not both"),
            (Some(path), None) if path == "-" => CpeInput::Stdin,
            (Some(path), None) => CpeInput::File(PathBuf::from(path)),
            (None, Some(cpes)) => CpeInput::Arguments(cpes.cloned().collect()),
            (None, None) => CpeInput::Stdin,
        };

        let output_format = match matches
            .get_one::<String>("output-format")
            .map(String::as_str)
            .unwrap_or("formatted")
        {
            "uri" => CpeOutputFormat::Uri,
            "json" => CpeOutputFormat::Json,
            "jsonl" => CpeOutputFormat::JsonLines,
            _ => CpeOutputFormat::FormattedString,
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => Level::Error,
            1 => Level::Info,
            2 => Level::Debug,
            3 => Level::Trace,
            _ => {
                eprintln!("using more than  -vvv does not affect verbosity level");
                Level::Trace
            }
        };

        let output: Box<dyn Write> = match matches.get_one::<String>("output-target") {
            Some(path) => {
                let file =
                    Self::create_output_file(path, !matches.get_flag("no-confirm-overwrite"))
                        .with_context(|| {
                            format!("An error occurred while creating output file at `{path}`")
                        })?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };

        Ok(CpeDump {
            input,
            output_format,
            output,
            stop_after_error: matches.get_flag("stop-after-error"),
            verbosity_level,
        })
    }

    /// Main entry point for `CpeDump`, returns the number of names which failed to parse.
    pub fn run(&mut self) -> Result<usize> {
        self.try_to_initialize_logging();

        let mut failed = 0;

        for (line_no, line) in self.lines()?.enumerate() {
            let line = line.context("Failed to read input")?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Cpe::from_string(line) {
                Ok(cpe) => self.dump_cpe(&cpe)?,
                Err(e) if self.stop_after_error => {
                    return Err(e).with_context(|| format!("Failed to parse line {}", line_no + 1));
                }
                Err(e) => {
                    error!("Failed to parse line {}: {}", line_no + 1, e);
                    failed += 1;
                }
            }
        }

        self.output.flush().context("Failed to flush output")?;
        info!("Done, {} name(s) failed to parse", failed);

        Ok(failed)
    }

    fn lines(&self) -> Result<Lines> {
        let lines: Lines = match &self.input {
            CpeInput::Arguments(cpes) => Box::new(cpes.clone().into_iter().map(Ok)),
            CpeInput::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open file {}", path.display()))?;
                Box::new(BufReader::new(file).lines())
            }
            CpeInput::Stdin => Box::new(io::stdin().lock().lines()),
        };

        debug!("Reading names from {:?}", self.input);
        Ok(lines)
    }

    fn dump_cpe(&mut self, cpe: &Cpe) -> Result<()> {
        match self.output_format {
            CpeOutputFormat::Uri => writeln!(self.output, "{}", cpe.as_uri_binding())?,
            CpeOutputFormat::FormattedString => {
                writeln!(self.output, "{}", cpe.as_formatted_string_binding())?
            }
            CpeOutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.output, &cpe_to_json(cpe)?)?;
                writeln!(self.output)?;
            }
            CpeOutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.output, &cpe_to_json(cpe)?)?;
                writeln!(self.output)?;
            }
        }

        Ok(())
    }

    /// If `prompt` is passed, will display a confirmation prompt before overwriting files.
    fn create_output_file(path: impl AsRef<Path>, prompt: bool) -> Result<File> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!(
                "There is a directory at {}, refusing to overwrite",
                p.display()
            );
        }

        if p.exists() {
            if prompt {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to override output file at {}",
                        p.display()
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| {
                        format_err!("Failed to write confirmation prompt to term caused by\n{e}")
                    })?;

                if !confirmed {
                    bail!("Cancelled");
                }
            }

            return Ok(File::create(p)?);
        }

        // Ok to assume p is not an existing directory
        match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent)?;
                Ok(File::create(p)?)
            }
            Some(_) => Ok(File::create(p)?),
            None => bail!("Output file cannot be root."),
        }
    }

    fn try_to_initialize_logging(&self) {
        if let Err(e) = TermLogger::init(
            self.verbosity_level.to_level_filter(),
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ) {
            eprintln!("Failed to initialize logging: {e:?}");
        }
    }
}

fn cpe_to_json(cpe: &Cpe) -> Result<JsonValue> {
    let mut record = Map::new();

    record.insert("cpe".to_string(), cpe.to_string().into());
    record.insert("uri".to_string(), cpe.as_uri_binding().into());
    record.insert(
        "formatted_string".to_string(),
        cpe.as_formatted_string_binding().into(),
    );
    record.insert(
        "has_extended_attribute".to_string(),
        cpe.has_extended_attribute().into(),
    );
    record.insert("part".to_string(), serde_json::to_value(cpe.part())?);

    for (name, value) in cpe.attributes() {
        record.insert(
            name.to_string(),
            value.unquoted().map(Cow::into_owned).into(),
        );
    }

    Ok(JsonValue::Object(record))
}

fn cli() -> Command {
    Command::new("cpe_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to parse and convert CPE names")
        .long_about(indoc!(
            r#"
            Parses Common Platform Enumeration (CPE) names and prints them in the requested binding.

            Names are read from the CPE arguments, from the file given with `--input`
            or from stdin, one name per line. Empty lines and lines starting with `#` are skipped.
        "#
        ))
        .arg(
            Arg::new("CPE")
                .num_args(1..)
                .help("CPE names in URI (`cpe:/`) or formatted string (`cpe:2.3:`) binding."),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("PATH")
                .help("Reads names from the file specified, one per line. Pass `-` to read from stdin."),
        )
        .arg(
            Arg::new("output-format")
                .short('o')
                .long("output-format")
                .value_parser(["uri", "formatted", "json", "jsonl"])
                .default_value("formatted")
                .help("Sets the output format")
                .long_help(indoc!(
                    r#"
                    Sets the output format:
                        "uri"       - CPE 2.2 URI binding (`cpe:/...`).
                        "formatted" - CPE 2.3 formatted string binding (`cpe:2.3:...`).
                        "json"      - pretty printed JSON object with all attributes.
                        "jsonl"     - same as json, one object per line.
                "#
                )),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .action(ArgAction::Set)
                .help(indoc!("Writes output to the file specified instead of stdout, errors will still be printed to stderr.
                       Will ask for confirmation before overwriting files, to allow overwriting, pass `--no-confirm-overwrite`
                       Will create parent directories if needed.")),
        )
        .arg(
            Arg::new("no-confirm-overwrite")
                .long("no-confirm-overwrite")
                .action(ArgAction::SetTrue)
                .help("When set, will not ask for confirmation before overwriting files, useful for automation"),
        )
        .arg(
            Arg::new("stop-after-error")
                .long("stop-after-error")
                .action(ArgAction::SetTrue)
                .help("When set, exits on the first name that fails to parse instead of skipping it."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help(indoc!(r#"
                -v - info, -vv - debug, -vvv - trace
                NOTE: trace output is only available in debug builds, as it is extremely verbose."#)),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let mut app = CpeDump::from_cli_matches(&matches)?;

    if app.run()? > 0 {
        exit(1);
    }

    Ok(())
}
