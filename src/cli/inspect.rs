//! `jelly inspect`: per-frame row histograms and stream options.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use anyhow::Result;

use crate::options::ParserOptions;
use crate::parse::options_and_frames;
use crate::pb::RdfStreamFrame;

fn print_options<W: Write>(out: &mut W, options: &ParserOptions) -> Result<()> {
    writeln!(out, "stream options:")?;
    if !options.params.stream_name.is_empty() {
        writeln!(out, "  stream name:         {}", options.params.stream_name)?;
    }
    writeln!(
        out,
        "  physical type:       {}",
        options.stream_types.physical_type.as_str_name()
    )?;
    writeln!(
        out,
        "  logical type:        {}",
        options.stream_types.logical_type.as_str_name()
    )?;
    writeln!(
        out,
        "  name table size:     {}",
        options.lookup_preset.max_names
    )?;
    writeln!(
        out,
        "  prefix table size:   {}",
        options.lookup_preset.max_prefixes
    )?;
    writeln!(
        out,
        "  datatype table size: {}",
        options.lookup_preset.max_datatypes
    )?;
    writeln!(out, "  version:             {}", options.params.version)?;
    writeln!(
        out,
        "  generalized:         {}",
        options.params.generalized_statements
    )?;
    writeln!(out, "  rdf-star:            {}", options.params.rdf_star)?;
    writeln!(
        out,
        "  framing:             {}",
        if options.delimited {
            "delimited"
        } else {
            "non-delimited"
        }
    )?;
    Ok(())
}

fn print_frame<W: Write>(
    out: &mut W,
    index: usize,
    frame: &RdfStreamFrame,
    verbose: bool,
) -> Result<()> {
    // Histogram keyed by row kind, insertion-independent ordering.
    let mut histogram: BTreeMap<&'static str, usize> = BTreeMap::new();
    for row in &frame.rows {
        if let Some(kind) = &row.row {
            *histogram.entry(kind.kind_name()).or_default() += 1;
        }
    }
    let summary = histogram
        .iter()
        .map(|(kind, count)| format!("{kind}={count}"))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "frame {index}: {} rows ({summary})", frame.rows.len())?;
    if !frame.metadata.is_empty() {
        let mut keys: Vec<_> = frame.metadata.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(out, "  metadata {key}: {:02x?}", frame.metadata[key])?;
        }
    }
    if verbose {
        for row in &frame.rows {
            writeln!(out, "  {row:?}")?;
        }
    }
    Ok(())
}

/// Reads `input` and writes a frame-by-frame report to `out`.
pub fn inspect<R: Read, W: Write>(input: R, out: &mut W, verbose: bool) -> Result<()> {
    let (options, frames) = options_and_frames(input)?;
    print_options(out, &options)?;
    let mut count = 0usize;
    for frame in frames {
        let frame = frame?;
        print_frame(out, count, &frame, verbose)?;
        count += 1;
    }
    writeln!(out, "{count} frames total")?;
    Ok(())
}
