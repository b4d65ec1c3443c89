//! Line identifiers and their firmware codes.

use std::fmt;

use super::error::DomainError;

/// A line tracked by the status feed.
///
/// The set is closed: the watch firmware keeps its own copy of this table,
/// so the discriminants are the wire codes and must never be reordered.
///
/// # Examples
///
/// ```
/// use tube_bridge::domain::LineId;
///
/// let victoria = LineId::parse("victoria").unwrap();
/// assert_eq!(victoria.code().as_u8(), 15);
/// assert_eq!(victoria.as_str(), "victoria");
///
/// // Upstream ids are lowercase and hyphenated
/// assert!(LineId::parse("Victoria").is_err());
/// assert!(LineId::parse("hammersmith-city").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LineId {
    Bakerloo = 0,
    Central = 1,
    Circle = 2,
    District = 3,
    Dlr = 4,
    Elizabeth = 5,
    HammersmithCity = 6,
    Jubilee = 7,
    Liberty = 8,
    Lioness = 9,
    Metropolitan = 10,
    Mildmay = 11,
    Northern = 12,
    Piccadilly = 13,
    Suffragette = 14,
    Victoria = 15,
    WaterlooCity = 16,
    Weaver = 17,
    Windrush = 18,
}

/// Number of lines known to the firmware.
pub const LINE_COUNT: usize = 19;

impl LineId {
    /// Every line, in code order.
    pub const ALL: [LineId; LINE_COUNT] = [
        LineId::Bakerloo,
        LineId::Central,
        LineId::Circle,
        LineId::District,
        LineId::Dlr,
        LineId::Elizabeth,
        LineId::HammersmithCity,
        LineId::Jubilee,
        LineId::Liberty,
        LineId::Lioness,
        LineId::Metropolitan,
        LineId::Mildmay,
        LineId::Northern,
        LineId::Piccadilly,
        LineId::Suffragette,
        LineId::Victoria,
        LineId::WaterlooCity,
        LineId::Weaver,
        LineId::Windrush,
    ];

    /// Parse an upstream line id (e.g. `"waterloo-city"`).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let line = match s {
            "bakerloo" => LineId::Bakerloo,
            "central" => LineId::Central,
            "circle" => LineId::Circle,
            "district" => LineId::District,
            "dlr" => LineId::Dlr,
            "elizabeth" => LineId::Elizabeth,
            "hammersmith-city" => LineId::HammersmithCity,
            "jubilee" => LineId::Jubilee,
            "liberty" => LineId::Liberty,
            "lioness" => LineId::Lioness,
            "metropolitan" => LineId::Metropolitan,
            "mildmay" => LineId::Mildmay,
            "northern" => LineId::Northern,
            "piccadilly" => LineId::Piccadilly,
            "suffragette" => LineId::Suffragette,
            "victoria" => LineId::Victoria,
            "waterloo-city" => LineId::WaterlooCity,
            "weaver" => LineId::Weaver,
            "windrush" => LineId::Windrush,
            other => return Err(DomainError::UnknownLine(other.to_string())),
        };
        Ok(line)
    }

    /// The upstream id string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineId::Bakerloo => "bakerloo",
            LineId::Central => "central",
            LineId::Circle => "circle",
            LineId::District => "district",
            LineId::Dlr => "dlr",
            LineId::Elizabeth => "elizabeth",
            LineId::HammersmithCity => "hammersmith-city",
            LineId::Jubilee => "jubilee",
            LineId::Liberty => "liberty",
            LineId::Lioness => "lioness",
            LineId::Metropolitan => "metropolitan",
            LineId::Mildmay => "mildmay",
            LineId::Northern => "northern",
            LineId::Piccadilly => "piccadilly",
            LineId::Suffragette => "suffragette",
            LineId::Victoria => "victoria",
            LineId::WaterlooCity => "waterloo-city",
            LineId::Weaver => "weaver",
            LineId::Windrush => "windrush",
        }
    }

    /// Short label as shown on the watch.
    pub fn display_name(&self) -> &'static str {
        match self {
            LineId::Bakerloo => "Bakerloo",
            LineId::Central => "Central",
            LineId::Circle => "Circle",
            LineId::District => "District",
            LineId::Dlr => "DLR",
            LineId::Elizabeth => "Elizabeth",
            LineId::HammersmithCity => "H'smith & City",
            LineId::Jubilee => "Jubilee",
            LineId::Liberty => "Liberty",
            LineId::Lioness => "Lioness",
            LineId::Metropolitan => "Metropolitan",
            LineId::Mildmay => "Mildmay",
            LineId::Northern => "Northern",
            LineId::Piccadilly => "Piccadilly",
            LineId::Suffragette => "Suffragette",
            LineId::Victoria => "Victoria",
            LineId::WaterlooCity => "W'loo & City",
            LineId::Weaver => "Weaver",
            LineId::Windrush => "Windrush",
        }
    }

    /// The firmware code for this line.
    pub fn code(self) -> LineCode {
        LineCode(self as u8)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable numeric code for a line, as hardcoded in the watch firmware.
///
/// Codes come from [`LineId`] and never from a record's position in a
/// response, so the watch can use them as slot indices across polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineCode(u8);

impl LineCode {
    /// Look up the code for an upstream line id.
    ///
    /// Fails with [`DomainError::UnknownLine`] for ids outside the table.
    pub fn of(id: &str) -> Result<Self, DomainError> {
        LineId::parse(id).map(LineId::code)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_firmware() {
        let expected = [
            ("bakerloo", 0),
            ("central", 1),
            ("circle", 2),
            ("district", 3),
            ("dlr", 4),
            ("elizabeth", 5),
            ("hammersmith-city", 6),
            ("jubilee", 7),
            ("liberty", 8),
            ("lioness", 9),
            ("metropolitan", 10),
            ("mildmay", 11),
            ("northern", 12),
            ("piccadilly", 13),
            ("suffragette", 14),
            ("victoria", 15),
            ("waterloo-city", 16),
            ("weaver", 17),
            ("windrush", 18),
        ];

        for (id, code) in expected {
            assert_eq!(LineCode::of(id).unwrap().as_u8(), code, "{id}");
        }
    }

    #[test]
    fn all_is_in_code_order() {
        for (i, line) in LineId::ALL.iter().enumerate() {
            assert_eq!(line.code().as_u8() as usize, i);
        }
    }

    #[test]
    fn unknown_line_rejected() {
        assert_eq!(
            LineCode::of("thameslink"),
            Err(DomainError::UnknownLine("thameslink".into()))
        );
        assert!(LineCode::of("").is_err());
        assert!(LineCode::of("VICTORIA").is_err());
        assert!(LineCode::of(" victoria").is_err());
    }

    #[test]
    fn display_uses_upstream_id() {
        assert_eq!(LineId::WaterlooCity.to_string(), "waterloo-city");
        assert_eq!(LineId::WaterlooCity.display_name(), "W'loo & City");
        assert_eq!(LineId::Dlr.display_name(), "DLR");
    }
}
