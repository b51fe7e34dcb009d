//! Command-line argument definitions for the `jelly` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::options::LookupPreset;
use crate::serialize::DEFAULT_FRAME_SIZE;

#[derive(Debug, Parser)]
#[command(
    name = "jelly",
    version,
    about = "Convert between RDF files and the Jelly binary stream format"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read N-Triples/N-Quads files and write a Jelly stream.
    Serialize {
        /// Input files (.nt or .nq; any .nq input makes it a quads stream).
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// JSON file with stream options (table sizes, frame size, ...).
        #[arg(long)]
        options: Option<PathBuf>,
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Read a Jelly stream and write N-Triples/N-Quads.
    Parse {
        /// Input Jelly file.
        input: PathBuf,
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Pretty-print per-frame row histograms and stream options.
    Inspect {
        /// Input Jelly file.
        input: PathBuf,
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Stream options document accepted by `serialize --options`.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializeConfig {
    pub stream_name: String,
    pub max_name_table_size: u32,
    pub max_prefix_table_size: u32,
    pub max_datatype_table_size: u32,
    pub frame_size: usize,
    pub delimited: bool,
    pub generalized_statements: bool,
    pub rdf_star: bool,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        let preset = LookupPreset::default();
        SerializeConfig {
            stream_name: String::new(),
            max_name_table_size: preset.max_names,
            max_prefix_table_size: preset.max_prefixes,
            max_datatype_table_size: preset.max_datatypes,
            frame_size: DEFAULT_FRAME_SIZE,
            delimited: true,
            generalized_statements: false,
            rdf_star: false,
        }
    }
}

impl SerializeConfig {
    pub fn lookup_preset(&self) -> LookupPreset {
        LookupPreset {
            max_names: self.max_name_table_size,
            max_prefixes: self.max_prefix_table_size,
            max_datatypes: self.max_datatype_table_size,
        }
    }
}
