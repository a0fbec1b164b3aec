use std::fmt;

use serde::{Deserialize, Serialize};

/// Group label used for samples or units without a scope.
pub const UNSPECIFIED_SCOPE: &str = "Sin especificar";

/// Construction intervention type of a functional unit (alcance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    New,
    SecondCarriageway,
    Improvement,
    Rehabilitation,
    Overhaul,
    Construction,
    OperationAndMaintenance,
    Other(String),
}

impl Scope {
    pub const ALL: [Scope; 7] = [
        Scope::New,
        Scope::SecondCarriageway,
        Scope::Improvement,
        Scope::Rehabilitation,
        Scope::Overhaul,
        Scope::Construction,
        Scope::OperationAndMaintenance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Scope::New => "Nuevo",
            Scope::SecondCarriageway => "Segunda calzada",
            Scope::Improvement => "Mejoramiento",
            Scope::Rehabilitation => "Rehabilitación",
            Scope::Overhaul => "Puesta a punto",
            Scope::Construction => "Construcción",
            Scope::OperationAndMaintenance => "operacion y mantenimiento",
            Scope::Other(value) => value,
        }
    }

    /// Matches catalog values ignoring case, accents and surrounding blanks.
    /// Anything else is kept verbatim as [`Scope::Other`].
    pub fn parse(value: &str) -> Scope {
        let key = normalize_key(value);
        Scope::ALL
            .iter()
            .find(|scope| normalize_key(scope.as_str()) == key)
            .cloned()
            .unwrap_or_else(|| Scope::Other(value.trim().to_string()))
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        Scope::parse(&value)
    }
}

impl From<Scope> for String {
    fn from(value: Scope) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "Urbano")]
    Urban,
    #[serde(rename = "Rural")]
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[serde(rename = "Plano")]
    Flat,
    #[serde(rename = "Ondulado")]
    Rolling,
    #[serde(rename = "Montañoso", alias = "Montanoso")]
    Mountainous,
    #[serde(rename = "Escarpado")]
    Steep,
}

/// Grouping label for a free-form scope string.
pub fn scope_label(scope: Option<&str>) -> String {
    match scope.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNSPECIFIED_SCOPE.to_string(),
    }
}

/// Lowercase, accent-free, alphanumeric-only form used to compare labels.
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .map(fold_accent)
        .flat_map(char::to_lowercase)
        .filter(|ch| ch.is_alphanumeric())
        .collect()
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' => 'A',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}
