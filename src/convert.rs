//! File-level decryption: open, convert, atomically persist

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use unable_aifc::chunk::Chunk;
use unable_aifc::{Decryption, FormChunk};

use crate::config::OutputConfig;

/// Extension of every written file
pub const OUTPUT_EXTENSION: &str = "aif";

/// Where the decrypted copy of `input` goes
///
/// `<stem><suffix>.aif`, inside `output.dir` when set, otherwise next to the input.
pub fn output_path_for(input: &Path, output: &OutputConfig) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("Input path has no file name: {:?}", input))?;

    let mut name = stem.to_os_string();
    name.push(&output.suffix);
    name.push(".");
    name.push(OUTPUT_EXTENSION);

    let dir = match &output.dir {
        Some(dir) => dir.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok(dir.join(name))
}

/// Decrypt `input` into `output`
///
/// The file is written to a temporary sibling of `output` and only moved into
/// place once the whole conversion succeeded.
pub fn decrypt_file(input: &Path, output: &Path, overwrite: bool) -> Result<Decryption> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    if output.exists() {
        if !overwrite {
            anyhow::bail!(
                "Output file already exists: {:?} (use --force to replace it)",
                output
            );
        }
        if same_file(input, output)? {
            anyhow::bail!("Output would replace the input file: {:?}", input);
        }
    }

    let file =
        File::open(input).with_context(|| format!("Failed to open input file: {:?}", input))?;
    let mut reader = BufReader::new(file);

    let mut form = FormChunk::new();
    let outcome = form
        .read(&mut reader)
        .with_context(|| format!("Failed to read {:?}", input))?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let mut temp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        form.write(&mut writer)
            .with_context(|| format!("Failed to write {:?}", output))?;
        writer.flush()?;
    }

    if overwrite {
        temp.persist(output)
    } else {
        temp.persist_noclobber(output)
    }
    .with_context(|| format!("Failed to move output into place: {:?}", output))?;

    tracing::info!("Wrote {:?} ({:?})", output, outcome);
    Ok(outcome)
}

fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(a.canonicalize()? == b.canonicalize()?)
}
