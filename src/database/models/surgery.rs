use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog entry shared by every user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Surgery {
    pub id: Uuid,
    pub name: String,
}

/// Canonical form used as the catalog key: trimmed, inner whitespace
/// collapsed, lowercased, first letter uppercased.
pub fn normalize_surgery_name(raw: &str) -> String {
    let lowered = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_spacing() {
        assert_eq!(normalize_surgery_name("  APENDICECTOMIA "), "Apendicectomia");
        assert_eq!(normalize_surgery_name("cirurgia   de\tcatarata"), "Cirurgia de catarata");
        assert_eq!(normalize_surgery_name("ÉPICO"), "Épico");
        assert_eq!(normalize_surgery_name("   "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_surgery_name("bypass GÁSTRICO");
        assert_eq!(normalize_surgery_name(&once), once);
    }
}
