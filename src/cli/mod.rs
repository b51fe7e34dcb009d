//! Implementation of the `jelly` command-line tool: `serialize`, `parse`
//! and `inspect` subcommands over the library's streaming API.

pub mod args;
pub mod inspect;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::generic::nt::{NtLine, NtReader};
use crate::generic::FlatEvent;
use crate::model::Statement;
use crate::options::StreamParameters;
use crate::pb::PhysicalStreamType;
use crate::serialize::{FrameFlow, FrameWriter, SerializerOptions, StreamEncoder};

use args::{Cli, Command, SerializeConfig};

/// Boxed output sink: a file when `--out` is given, stdout otherwise.
fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn is_quads_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "nq")
}

fn load_config(path: Option<&Path>) -> Result<SerializeConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            let config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid options file {}", path.display()))?;
            Ok(config)
        }
        None => Ok(SerializeConfig::default()),
    }
}

fn run_serialize(inputs: &[PathBuf], options: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let config = load_config(options)?;
    let quads = inputs.iter().any(|path| is_quads_file(path));
    let physical_type = if quads {
        PhysicalStreamType::Quads
    } else {
        PhysicalStreamType::Triples
    };
    let flow = if !config.delimited {
        FrameFlow::manual()
    } else if quads {
        FrameFlow::flat_quads(Some(config.frame_size))
    } else {
        FrameFlow::flat_triples(Some(config.frame_size))
    };
    let serializer_options = SerializerOptions {
        lookup_preset: config.lookup_preset(),
        params: StreamParameters {
            stream_name: config.stream_name.clone(),
            generalized_statements: config.generalized_statements,
            rdf_star: config.rdf_star,
            ..Default::default()
        },
    };
    let mut encoder = StreamEncoder::new(physical_type, flow, serializer_options)?;
    let mut writer = FrameWriter::new(open_output(out)?, config.delimited);

    for path in inputs {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let reader = NtReader::new(BufReader::new(file), is_quads_file(path));
        for line in reader {
            let frame = match line? {
                NtLine::Statement(statement) => {
                    if quads {
                        encoder.quad(&statement.into_quad())?
                    } else {
                        match statement {
                            Statement::Triple(triple) => encoder.triple(&triple)?,
                            Statement::Quad(_) => unreachable!("triples input produced a quad"),
                        }
                    }
                }
                NtLine::Prefix { name, iri } => encoder.namespace_declaration(&name, &iri)?,
            };
            if let Some(frame) = frame {
                writer.write_frame(&frame)?;
            }
        }
    }
    if let Some(frame) = encoder.flush() {
        writer.write_frame(&frame)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_parse(input: &Path, out: Option<&Path>) -> Result<()> {
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let parser = crate::generic::parse_flat(BufReader::new(file))?;
    let mut out = open_output(out)?;
    for event in parser {
        match event? {
            FlatEvent::Statement(statement) => writeln!(out, "{statement}")?,
            FlatEvent::Namespace { prefix, iri } => {
                writeln!(out, "@prefix {prefix}: {iri} .")?
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn run_inspect(input: &Path, out: Option<&Path>, verbose: bool) -> Result<()> {
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let mut out = open_output(out)?;
    inspect::inspect(BufReader::new(file), &mut out, verbose)?;
    out.flush()?;
    Ok(())
}

/// Dispatches a parsed command line. Any error maps to a non-zero exit.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Serialize {
            inputs,
            options,
            out,
        } => run_serialize(inputs, options.as_deref(), out.as_deref()),
        Command::Parse { input, out } => run_parse(input, out.as_deref()),
        Command::Inspect { input, out } => {
            run_inspect(input, out.as_deref(), cli.verbose > 0)
        }
    }
}
