//! Parser for FASTA sequence files.

use std::io::BufRead;

use crate::error::Error;

/// Reads FASTA from a buffered reader and yields (name, sequence) pairs.
///
/// The name is the first whitespace-delimited token after `>`. Sequence bases are uppercased.
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut results: Vec<(String, Vec<u8>)> = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_sequence: Vec<u8> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(name) = current_name.take() {
                results.push((name, std::mem::take(&mut current_sequence)));
            }
            let name = header.split_whitespace().next().unwrap_or("");
            if name.is_empty() {
                return Err(Error::Parse(format!("empty FASTA header: {line}")));
            }
            current_name = Some(name.to_string());
        } else if current_name.is_some() {
            let trimmed = line.trim();
            let start = current_sequence.len();
            current_sequence.extend_from_slice(trimmed.as_bytes());
            current_sequence[start..].make_ascii_uppercase();
        } else if !line.trim().is_empty() {
            return Err(Error::Format(
                "FASTA sequence data before first header".to_string(),
            ));
        }
    }

    if let Some(name) = current_name {
        results.push((name, current_sequence));
    }

    Ok(results)
}
