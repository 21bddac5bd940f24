//! Letter grade to grade-point lookup.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::TableError;

/// Grade table shipped with the crate.
static SMU_TABLE: &[(&str, f64)] = &[
    ("A+", 4.3),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

/// Immutable mapping from normalized letter grades (`"A+"`, `"B-"`, ...)
/// to grade points.
///
/// Keys are unique, trimmed and uppercase; values are finite and
/// non-negative. A table is validated once at construction and never
/// changes afterwards, so it can be shared freely between calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    entries: HashMap<String, f64>,
}

impl GradeTable {
    /// Builds a table from `(grade, points)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the table is empty, a key is repeated or
    /// not already normalized, or a point value is negative or not finite.
    pub fn new<I, K>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = HashMap::new();

        for (grade, points) in entries {
            let grade = grade.into();

            if grade.is_empty() || Self::normalize(&grade) != grade {
                return Err(TableError::NotNormalized(grade));
            }
            if !points.is_finite() || points < 0.0 {
                return Err(TableError::InvalidPoints { grade, points });
            }
            if map.contains_key(&grade) {
                return Err(TableError::DuplicateGrade(grade));
            }

            map.insert(grade, points);
        }

        if map.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self { entries: map })
    }

    /// The Singapore Management University scale, `A+` (4.3) down to `F` (0.0).
    pub fn smu() -> Self {
        Self {
            entries: SMU_TABLE
                .iter()
                .map(|(grade, points)| (grade.to_string(), *points))
                .collect(),
        }
    }

    /// Normalizes a user-entered grade: surrounding whitespace removed,
    /// letters uppercased.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Grade points for an already normalized grade.
    pub fn points(&self, grade: &str) -> Option<f64> {
        self.entries.get(grade).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from the highest grade point to the lowest, ties by grade.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .map(|(grade, points)| (grade.as_str(), *points))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows.into_iter()
    }
}

impl Serialize for GradeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (grade, points) in self.iter() {
            map.serialize_entry(grade, &points)?;
        }
        map.end()
    }
}

struct GradeTableVisitor;

impl<'de> Visitor<'de> for GradeTableVisitor {
    type Value = GradeTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of letter grades to grade points")
    }

    // Collected into a Vec first so repeated keys reach `GradeTable::new`
    // instead of being overwritten.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs: Vec<(String, f64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((grade, points)) = access.next_entry::<String, f64>()? {
            pairs.push((grade, points));
        }
        GradeTable::new(pairs).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for GradeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GradeTableVisitor)
    }
}
