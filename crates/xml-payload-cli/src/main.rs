//! `xmlp` CLI — convert JSON to and from XML payload documents.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to a payload document (stdin → stdout)
//! echo '{"name":"Alice","active":true}' | xmlp encode
//!
//! # Encode from file to file, with a custom root and no indentation
//! xmlp encode -i record.json -o record.xml --root PAYLOAD --indent 0
//!
//! # Refuse to write illegal element names
//! xmlp encode --strict-names -i record.json
//!
//! # Decode a payload document back to pretty-printed JSON
//! xmlp decode -i record.xml
//!
//! # Show size statistics
//! xmlp stats -i record.json
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` or pass `-v`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use xml_payload::{DecodeOptions, Decoder, EncodeOptions, Encoder, Value, ROOT_ELEMENT};

#[derive(Parser)]
#[command(name = "xmlp", version, about = "XML payload codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to a payload document
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Name of the root element
        #[arg(long, default_value = ROOT_ELEMENT)]
        root: String,
        /// Spaces per nesting level (0 for a single line)
        #[arg(long, default_value_t = 2)]
        indent: usize,
        /// Fail instead of writing illegal element names
        #[arg(long)]
        strict_names: bool,
    },
    /// Decode a payload document to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        /// Deepest element nesting accepted
        #[arg(long, default_value_t = xml_payload::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Show encoding statistics (sizes, element count, name faults)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            root,
            indent,
            strict_names,
        } => {
            let value = read_json(input.as_deref())?;
            let options = EncodeOptions::default()
                .with_root(root)
                .with_indent(indent)
                .with_strict_names(strict_names);
            let encoded = Encoder::new(options)
                .encode(&value)
                .context("Failed to encode JSON to XML")?;
            // name faults were already logged at warn level by the encoder
            write_output(output.as_deref(), &encoded.xml)?;
        }
        Commands::Decode {
            input,
            output,
            compact,
            max_depth,
        } => {
            let xml = read_input(input.as_deref())?;
            let decoder = Decoder::new(DecodeOptions::default().with_max_depth(max_depth));
            let value = decoder
                .decode_properties(&xml)
                .context("Failed to decode XML to JSON")?;
            let json = if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse JSON input")?;
            let encoded = Encoder::default()
                .encode(&Value::from(value))
                .context("Failed to encode JSON to XML")?;
            let json_bytes = json.len();
            let xml_bytes = encoded.xml.len();
            let ratio = if json_bytes > 0 {
                xml_bytes as f64 / json_bytes as f64
            } else {
                0.0
            };
            println!("JSON size:  {} bytes", json_bytes);
            println!("XML size:   {} bytes", xml_bytes);
            println!("Growth:     {:.2}x", ratio);
            println!("Elements:   {}", encoded.elements);
            println!("Faults:     {}", encoded.faults.len());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_json(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).context("Failed to parse JSON input")?;
    Ok(Value::from(json))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
