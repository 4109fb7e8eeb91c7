//! Dummy PDF reports padded to an exact byte size.

mod document;

pub use document::render;

use crate::{console::Console, session::UserError};
use anyhow::{Context, Result};
use std::{fs, path::Path};

const BYTES_PER_MB: f64 = 1_000_000.0;
const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
/// Reports are rendered in memory, so larger sizes are rejected.
pub const MAX_SIZE_MB: f64 = 2000.0;
/// Share of the target filled with real pages before padding takes over.
const FILL_RATIO: f64 = 0.97;

pub const SIZE_PROMPT: &str =
    "Enter target file sizes in MB (comma-separated, e.g., 1.2, 3.4, 2.0): ";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedSizes {
    pub valid: Vec<f64>,
    pub invalid: Vec<String>,
}

/// Split a comma-separated list of megabyte sizes. Empty entries are ignored;
/// anything that is not a positive number up to [`MAX_SIZE_MB`] is collected
/// as invalid.
pub fn parse_sizes(input: &str) -> ParsedSizes {
    let mut parsed = ParsedSizes::default();
    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<f64>() {
            Ok(mb) if mb > 0.0 && mb <= MAX_SIZE_MB => parsed.valid.push(mb),
            _ => parsed.invalid.push(entry.to_string()),
        }
    }
    parsed
}

pub fn file_name(mb: f64) -> String {
    format!("Pdf_{mb:.1}_MB.pdf")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn target_bytes(mb: f64) -> u64 {
    (mb * BYTES_PER_MB).floor() as u64
}

/// A rendered report and whether it came out larger than requested.
#[derive(Debug)]
pub struct SizedReport {
    pub bytes: Vec<u8>,
    pub oversized: bool,
}

/// Render a report of exactly `target` bytes, or the smallest report possible
/// when even that exceeds `target`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn build_to_size(target: u64) -> Result<SizedReport> {
    let target_len = usize::try_from(target).context("target size does not fit in memory")?;
    let base = render(0)?;
    if base.len() >= target_len {
        return Ok(SizedReport {
            oversized: base.len() > target_len,
            bytes: base,
        });
    }

    let per_page = render(1)?.len().saturating_sub(base.len()).max(1);
    let budget = target as f64 * FILL_RATIO - base.len() as f64;
    let mut pages = (budget.max(0.0) / per_page as f64).floor() as usize;
    log::debug!(
        "target {target} bytes: base {} bytes, {per_page} bytes per page, {pages} filler pages",
        base.len()
    );

    let mut bytes = render(pages)?;
    while bytes.len() > target_len && pages > 0 {
        pages -= 1;
        bytes = render(pages)?;
    }
    bytes.resize(target_len, b' ');
    Ok(SizedReport {
        bytes,
        oversized: false,
    })
}

fn report(console: &mut Console, name: &str, path: &Path, len: usize) {
    #[allow(clippy::cast_precision_loss)]
    let len = len as f64;
    let absolute = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    console.blank();
    console.success(&format!("PDF generated: {name}"));
    console.line(&format!("   File size (decimal): {:.2} MB", len / BYTES_PER_MB));
    console.line(&format!("   File size (binary): {:.2} MiB", len / BYTES_PER_MIB));
    console.line(&format!("   Path: {}", absolute.display()));
}

/// Generate one report per size into `output_dir`.
pub fn generate(console: &mut Console, sizes: &[f64], output_dir: &Path) -> Result<()> {
    for &mb in sizes {
        let name = file_name(mb);
        let path = output_dir.join(&name);
        if path.exists()
            && !console.confirm(&format!("File '{name}' already exists. Overwrite?"))?
        {
            console.info(&format!("Skipping {name}"));
            continue;
        }

        let target = target_bytes(mb);
        let sized = build_to_size(target)?;
        fs::write(&path, &sized.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {} ({} bytes)", path.display(), sized.bytes.len());
        if sized.oversized {
            console.warning(&format!(
                "{name} cannot be made as small as {target} bytes; written unpadded."
            ));
        }
        report(console, &name, &path, sized.bytes.len());
    }
    console.blank();
    console.success("All PDFs done!");
    Ok(())
}

/// Entry point for `toolshed pdf`: sizes come from `args`, or from a prompt
/// when none were given.
pub fn run_pdf(console: &mut Console, args: &[String], output_dir: &Path) -> Result<()> {
    let input = if args.is_empty() {
        console.read_line(SIZE_PROMPT)?
    } else {
        args.join(",")
    };

    let parsed = parse_sizes(&input);
    for entry in &parsed.invalid {
        console.warning(&format!("Invalid input '{entry}' skipped."));
    }
    if parsed.valid.is_empty() {
        return Err(UserError("No valid sizes provided".to_string()).into());
    }
    generate(console, &parsed.valid, output_dir)
}
