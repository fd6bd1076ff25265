//! YAML emission helpers for the template writer.
//!
//! Values go through `serde_yaml`, which quotes anything that would not read back
//! as the same string. The helpers only place the serialized lines at the right
//! indentation inside the template.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::error::ExportResult;

/// Serialize `value` as a mapping key.
pub(crate) fn key(value: &str) -> ExportResult<String> {
    Ok(serde_yaml::to_string(value)?.trim_end().to_string())
}

/// Write `key: value` indented by `indent` spaces.
pub(crate) fn write_entry<W, T>(out: &mut W, indent: usize, key: &str, value: &T) -> ExportResult<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let text = serde_yaml::to_string(&BTreeMap::from([(key, value)]))?;
    let pad = " ".repeat(indent);
    write_lines(out, &text, &pad, &pad)
}

/// Write `- key: value`, opening a sequence item at `indent`.
pub(crate) fn write_item_entry<W, T>(
    out: &mut W,
    indent: usize,
    key: &str,
    value: &T,
) -> ExportResult<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let text = serde_yaml::to_string(&BTreeMap::from([(key, value)]))?;
    let pad = " ".repeat(indent);
    write_lines(out, &text, &format!("{pad}- "), &format!("{pad}  "))
}

/// Write pre-formatted text (a policy document) with every line indented.
pub(crate) fn write_block<W: Write + ?Sized>(
    out: &mut W,
    indent: usize,
    text: &str,
) -> ExportResult<()> {
    let pad = " ".repeat(indent);
    write_lines(out, text, &pad, &pad)
}

fn write_lines<W: Write + ?Sized>(
    out: &mut W,
    text: &str,
    first: &str,
    rest: &str,
) -> ExportResult<()> {
    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            writeln!(out)?;
        } else {
            let prefix = if i == 0 { first } else { rest };
            writeln!(out, "{prefix}{line}")?;
        }
    }
    Ok(())
}
