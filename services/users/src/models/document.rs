//! Identity document types accepted for a user

use serde::{Deserialize, Serialize};

/// Kind of identity document backing a user record.
///
/// Stored and exchanged by its short code (`CC`, `TI`, `CE`, `NIT`, `PAS`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Citizen identity card (`CC`)
    #[default]
    #[serde(rename = "CC")]
    NationalId,
    /// Identity card issued to minors (`TI`)
    #[serde(rename = "TI")]
    MinorId,
    /// Identity card issued to foreign residents (`CE`)
    #[serde(rename = "CE")]
    ForeignerId,
    /// Tax identification number (`NIT`)
    #[serde(rename = "NIT")]
    TaxId,
    /// Passport (`PAS`)
    #[serde(rename = "PAS")]
    Passport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::NationalId,
        DocumentType::MinorId,
        DocumentType::ForeignerId,
        DocumentType::TaxId,
        DocumentType::Passport,
    ];

    /// Short code used in storage and on the wire
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::NationalId => "CC",
            DocumentType::MinorId => "TI",
            DocumentType::ForeignerId => "CE",
            DocumentType::TaxId => "NIT",
            DocumentType::Passport => "PAS",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    /// Parses an already-normalized code; callers trim and upper-case first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|doc_type| doc_type.code() == s)
            .ok_or_else(|| format!("Unknown document type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for doc_type in DocumentType::ALL {
            assert_eq!(doc_type.code().parse::<DocumentType>(), Ok(doc_type));
        }
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("cc".parse::<DocumentType>().is_err());
        assert!(" CC".parse::<DocumentType>().is_err());
        assert!("DNI".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_default_is_national_id() {
        assert_eq!(DocumentType::default(), DocumentType::NationalId);
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&DocumentType::Passport).unwrap();
        assert_eq!(json, "\"PAS\"");
    }
}
