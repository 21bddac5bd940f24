use std::fmt;

use serde::Serialize;

/// Honorary distinction awarded for a grade point average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Distinction {
    #[serde(rename = "Summa Cum Laude")]
    SummaCumLaude,
    #[serde(rename = "Magna Cum Laude")]
    MagnaCumLaude,
    #[serde(rename = "Cum Laude")]
    CumLaude,
    #[serde(rename = "High Merit")]
    HighMerit,
    #[serde(rename = "Merit")]
    Merit,
}

impl Distinction {
    pub fn label(&self) -> &'static str {
        match self {
            Distinction::SummaCumLaude => "Summa Cum Laude",
            Distinction::MagnaCumLaude => "Magna Cum Laude",
            Distinction::CumLaude => "Cum Laude",
            Distinction::HighMerit => "High Merit",
            Distinction::Merit => "Merit",
        }
    }
}

impl fmt::Display for Distinction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive lower bounds, scanned from the top. 3.7 and 3.6 both map to
/// Magna Cum Laude; the 3.7 band only matters for the dean's list message.
static THRESHOLDS: &[(f64, Distinction)] = &[
    (3.8, Distinction::SummaCumLaude),
    (3.7, Distinction::MagnaCumLaude),
    (3.6, Distinction::MagnaCumLaude),
    (3.4, Distinction::CumLaude),
    (3.2, Distinction::HighMerit),
    (3.0, Distinction::Merit),
];

/// Converts an average into the highest distinction whose threshold it
/// meets.
///
/// | Range   | Distinction     |
/// |---------|-----------------|
/// | >= 3.8  | Summa Cum Laude |
/// | >= 3.7  | Magna Cum Laude |
/// | >= 3.6  | Magna Cum Laude |
/// | >= 3.4  | Cum Laude       |
/// | >= 3.2  | High Merit      |
/// | >= 3.0  | Merit           |
/// | < 3.0   | none            |
pub fn classify_distinction(average: f64) -> Option<Distinction> {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| average >= *bound)
        .map(|(_, distinction)| *distinction)
}
