//! GFF3 line tokenizer and attribute value decoding.

use crate::contig::Position;
use crate::error::Error;
use crate::strand::Strand;

use super::entry::{Attributes, Gff3Record};

/// Result of parsing a single GFF3 line.
#[derive(Debug)]
pub enum ParsedLine<'a> {
    Record(Gff3Record<'a>),
    Comment,
    /// `##FASTA` directive: everything after it is sequence data.
    EndOfFeatures,
}

/// Parse a single GFF3 line into a record.
pub fn parse_line(line: &str) -> Result<ParsedLine<'_>, Error> {
    // Comments and directives
    if line.starts_with('#') {
        if line.starts_with("##FASTA") {
            return Ok(ParsedLine::EndOfFeatures);
        }
        return Ok(ParsedLine::Comment);
    }

    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(ParsedLine::Comment);
    }

    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != 9 {
        return Err(Error::Parse(format!(
            "GFF3 line has {} columns, expected 9",
            columns.len()
        )));
    }

    let seqid = columns[0];
    if seqid.is_empty() {
        return Err(Error::Parse("GFF3 line has empty seqid".to_string()));
    }

    let start: Position = columns[3]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid start '{}': {e}", columns[3])))?;
    let end: Position = columns[4]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid end '{}': {e}", columns[4])))?;

    if columns[6].is_empty() {
        return Err(Error::Parse("GFF3 line has empty strand".to_string()));
    }
    let strand = Strand::from_gff3(columns[6]);

    if columns[8].is_empty() {
        return Err(Error::Parse("GFF3 line has empty attributes".to_string()));
    }

    Ok(ParsedLine::Record(Gff3Record {
        seqid,
        source: columns[1],
        feature_type: columns[2],
        start,
        end,
        strand,
        attributes: Attributes(columns[8]),
    }))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes into raw bytes.
///
/// A `%` not followed by two hex digits is kept literally. Decoded bytes are
/// never decoded a second time.
#[must_use]
pub fn percent_decode(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                decoded.push((high << 4) | low);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_domain_line() {
        let line = "chr17\tpfam\tprotein_domain\t7669690\t7669900\t.\t-\t.\tName=P53;gene_id=ENSG00000141510.16;gene_name=TP53";
        match parse_line(line).unwrap() {
            ParsedLine::Record(r) => {
                assert_eq!(r.seqid, "chr17");
                assert_eq!(r.source, "pfam");
                assert_eq!(r.feature_type, "protein_domain");
                assert_eq!(r.start, 7669690);
                assert_eq!(r.end, 7669900);
                assert_eq!(r.strand, Strand::Reverse);
                assert_eq!(r.attributes.get("gene_name"), Some("TP53"));
            }
            other => panic!("expected Record, got {other:?}"),
        }
    }

    #[test]
    fn comments_and_directives() {
        assert!(matches!(parse_line("# comment").unwrap(), ParsedLine::Comment));
        assert!(matches!(parse_line("##gff-version 3").unwrap(), ParsedLine::Comment));
        assert!(matches!(parse_line("###").unwrap(), ParsedLine::Comment));
        assert!(matches!(parse_line("").unwrap(), ParsedLine::Comment));
        assert!(matches!(parse_line("##FASTA").unwrap(), ParsedLine::EndOfFeatures));
    }

    #[test]
    fn malformed_lines() {
        assert!(parse_line("chr1\tsrc\tdomain\t1\t2\t.\t+\t.").is_err());
        assert!(parse_line("chr1\tsrc\tdomain\tx\t2\t.\t+\t.\tName=a").is_err());
        assert!(parse_line("chr1\tsrc\tdomain\t1\t2\t.\t\t.\tName=a").is_err());
        assert!(parse_line("chr1\tsrc\tdomain\t1\t2\t.\t+\t.\t").is_err());
        assert!(parse_line("\tsrc\tdomain\t1\t2\t.\t+\t.\tName=a").is_err());
    }

    #[test]
    fn windows_line_ending() {
        let line = "1\tsrc\tdomain\t1\t2\t.\t+\t.\tName=a\r";
        match parse_line(line).unwrap() {
            ParsedLine::Record(r) => assert_eq!(r.attributes.get("Name"), Some("a")),
            other => panic!("expected Record, got {other:?}"),
        }
    }

    #[test]
    fn percent_decode_escapes() {
        assert_eq!(percent_decode("Zinc%20finger%2C%20C2H2"), b"Zinc finger, C2H2");
        assert_eq!(percent_decode("100%25"), b"100%");
        assert_eq!(percent_decode("%7c%7C"), b"||");
    }

    #[test]
    fn percent_decode_all_byte_values() {
        for byte in 0u8..=255 {
            let encoded = format!("a%{byte:02X}b");
            assert_eq!(percent_decode(&encoded), vec![b'a', byte, b'b']);
            let encoded = format!("%{byte:02x}");
            assert_eq!(percent_decode(&encoded), vec![byte]);
        }
    }

    #[test]
    fn percent_decode_is_idempotent_on_plain_text() {
        let plain = "SH3_domain-like (1)";
        assert_eq!(percent_decode(plain), plain.as_bytes());
        let once = percent_decode("Kinase%2Cdomain");
        let once_str = String::from_utf8(once.clone()).unwrap();
        assert_eq!(percent_decode(&once_str), once);
    }

    #[test]
    fn percent_decode_invalid_escapes_kept() {
        assert_eq!(percent_decode("50%"), b"50%");
        assert_eq!(percent_decode("%4"), b"%4");
        assert_eq!(percent_decode("%zz"), b"%zz");
        assert_eq!(percent_decode("%2541"), b"%41");
    }
}
