//! `jsobfuscate` CLI: reads a JavaScript source (file, `-`, or stdin), runs it through
//! [`jsobfuscate::obfuscate`], and writes the obfuscated source (and, if requested, its source
//! map) back out.

use std::io::{self, Error as IoError, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::fs;

use clap::Parser;
use jsobfuscate::config::{Options, SourceMapSourcesMode};

#[derive(Parser, Debug)]
#[command(name = "jsobfuscate", version, about = "Staged, dependency-ordered JavaScript obfuscation pipeline")]
struct Cli {
    /// Input JavaScript file. Omit or pass `-` to read from stdin.
    input: Option<PathBuf>,

    /// Output file. Omitted writes to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a Source Map V3 document alongside the output.
    #[arg(long)]
    source_map: bool,

    /// Embed the original source in the emitted map instead of just referencing its file name.
    #[arg(long)]
    source_map_sources_content: bool,

    /// Collapse non-essential whitespace in the output. Default on; pass `--no-compact` to
    /// pretty-print instead.
    #[arg(long, default_value_t = true)]
    compact: bool,
    #[arg(long)]
    no_compact: bool,

    /// Seed the PRNG collaborator for reproducible identifier/string-array shuffling.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    dead_code_injection: bool,
    #[arg(long)]
    control_flow_flattening: bool,
    #[arg(long)]
    rename_properties: bool,
    #[arg(long)]
    simplify: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let (source, input_file_name) = read_input(cli.input.as_deref())?;

    let options = Options {
        compact: cli.compact && !cli.no_compact,
        control_flow_flattening: cli.control_flow_flattening,
        dead_code_injection: cli.dead_code_injection,
        rename_properties: cli.rename_properties,
        simplify: cli.simplify,
        source_map: cli.source_map,
        source_map_sources_mode: if cli.source_map_sources_content {
            SourceMapSourcesMode::SourcesContent
        } else {
            SourceMapSourcesMode::Sources
        },
        input_file_name,
        seed: cli.seed,
    };

    let result = jsobfuscate::obfuscate(&source, &options)?;

    write_output(cli.output.as_deref(), &result.code)?;

    if cli.source_map && !result.map.is_empty() {
        match cli.output.as_deref() {
            Some(output) => fs::write(map_path_for(output), result.map)?,
            None => println!("{}", result.map),
        }
    }

    Ok(())
}

/// Missing or unreadable input is treated as empty source with a warning, rather than a fatal
/// CLI error, matching the language-neutral coercion rule this crate's core deliberately opts out
/// of at the API boundary.
fn read_input(path: Option<&Path>) -> io::Result<(String, Option<String>)> {
    match path {
        None => Ok((read_stdin()?, None)),
        Some(path) if path == Path::new("-") => Ok((read_stdin()?, None)),
        Some(path) => {
            let name = path.to_string_lossy().into_owned();
            match fs::read_to_string(path) {
                Ok(source) => Ok((source, Some(name))),
                Err(error) => {
                    tracing::warn!(path = %name, error = %error, "input file unreadable, treating as empty source");
                    Ok((String::new(), Some(name)))
                }
            }
        }
    }
}

fn read_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn write_output(path: Option<&Path>, code: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, code),
        None => io::stdout().write_all(code.as_bytes()).map_err(IoError::from),
    }
}

fn map_path_for(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".map");
    PathBuf::from(name)
}
