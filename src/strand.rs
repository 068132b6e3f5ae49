//! Strand orientation and breakpoint direction.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Strand orientation of a genomic feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse from GFF3 column 7. "+" is forward; everything else is reverse.
    #[must_use]
    pub fn from_gff3(s: &str) -> Self {
        if s.starts_with('+') {
            Self::Forward
        } else {
            Self::Reverse
        }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }

    /// Parse a strand symbol where "." means the strand could not be determined.
    pub fn parse_predicted(s: &str) -> Result<Option<Self>, Error> {
        match s {
            "+" => Ok(Some(Self::Forward)),
            "-" => Ok(Some(Self::Reverse)),
            "." => Ok(None),
            _ => Err(Error::Parse(format!("invalid strand: '{s}'"))),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// Side of a breakpoint on which a fusion partner is retained.
///
/// `Upstream` keeps the part of the gene at and after the breakpoint,
/// `Downstream` keeps the part at and before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Upstream,
    Downstream,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upstream" => Ok(Self::Upstream),
            "downstream" => Ok(Self::Downstream),
            _ => Err(Error::Parse(format!("unrecognized direction: {s}"))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream => write!(f, "upstream"),
            Self::Downstream => write!(f, "downstream"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gff3() {
        assert_eq!(Strand::from_gff3("+"), Strand::Forward);
        assert_eq!(Strand::from_gff3("-"), Strand::Reverse);
        assert_eq!(Strand::from_gff3("."), Strand::Reverse);
    }

    #[test]
    fn predicted_strand() {
        assert_eq!(Strand::parse_predicted("+").unwrap(), Some(Strand::Forward));
        assert_eq!(Strand::parse_predicted("-").unwrap(), Some(Strand::Reverse));
        assert_eq!(Strand::parse_predicted(".").unwrap(), None);
        assert!(Strand::parse_predicted("x").is_err());
    }

    #[test]
    fn is_reverse() {
        assert!(!Strand::Forward.is_reverse());
        assert!(Strand::Reverse.is_reverse());
    }

    #[test]
    fn direction_from_string() {
        assert_eq!("upstream".parse::<Direction>().unwrap(), Direction::Upstream);
        assert_eq!(
            "Downstream".parse::<Direction>().unwrap(),
            Direction::Downstream
        );
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Upstream.to_string(), "upstream");
    }
}
