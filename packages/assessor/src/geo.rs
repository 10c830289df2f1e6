//! Geographic extent resolution.
//!
//! Extent descriptions arrive as an ISO country code ("276"), a 12-digit
//! regional key whose first two digits identify the federal state, or free
//! text. The resolved label is only a suggestion: a reviewer confirms or
//! overrides it before it lands in the output record.

/// German federal states in the order offered to the reviewer.
pub const BUNDESLAENDER: [&str; 16] = [
    "Schleswig-Holstein",
    "Hamburg",
    "Niedersachsen",
    "Bremen",
    "Nordrhein-Westfalen",
    "Hessen",
    "Rheinland-Pfalz",
    "Baden-Württemberg",
    "Bayern",
    "Saarland",
    "Berlin",
    "Brandenburg",
    "Mecklenburg-Vorpommern",
    "Sachsen",
    "Sachsen-Anhalt",
    "Thüringen",
];

/// Look up a federal state by the leading two digits of its regional key.
pub fn state_for_code(code: &str) -> Option<&'static str> {
    match code {
        "01" => Some("Schleswig-Holstein"),
        "02" => Some("Hamburg"),
        "03" => Some("Niedersachsen"),
        "04" => Some("Bremen"),
        "05" => Some("Nordrhein-Westfalen"),
        "06" => Some("Hessen"),
        "07" => Some("Rheinland-Pfalz"),
        "08" => Some("Baden-Württemberg"),
        "09" => Some("Bayern"),
        "10" => Some("Saarland"),
        "11" => Some("Berlin"),
        "12" => Some("Brandenburg"),
        "13" => Some("Mecklenburg-Vorpommern"),
        "14" => Some("Sachsen"),
        "15" => Some("Sachsen-Anhalt"),
        "16" => Some("Thüringen"),
        _ => None,
    }
}

/// Resolve a raw extent description to a geographic label.
///
/// Priority: country code / "deutschland" mention, then 12-digit regional
/// key, then the raw text verbatim. Absent input stays absent.
pub fn resolve_geo_label(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();

    if trimmed == "276" || raw.to_lowercase().contains("deutschland") {
        return Some("Deutschland".to_string());
    }

    if trimmed.len() == 12 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        if let Some(state) = trimmed.get(..2).and_then(state_for_code) {
            return Some(state.to_string());
        }
        return Some(raw.to_string());
    }

    Some(raw.to_string())
}
