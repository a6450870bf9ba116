use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::QR_SEPARATOR;

/// Static option lists offered by the booking form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub monuments: Vec<String>,
    pub slots: Vec<String>,
    pub nationalities: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            monuments: to_strings(&["Taj Mahal", "Qutub Minar", "Red Fort", "Hawa Mahal"]),
            slots: to_strings(&["Forenoon", "Afternoon", "Evening"]),
            nationalities: to_strings(&["Indian", "Foreigner", "SAARC", "BIMSTEC"]),
        }
    }
}

impl Catalog {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let catalog: Catalog = serde_json::from_str(s)?;
        check_options("monuments", &catalog.monuments)?;
        check_options("slots", &catalog.slots)?;
        check_options("nationalities", &catalog.nationalities)?;
        Ok(catalog)
    }

    pub fn has_monument(&self, name: &str) -> bool {
        self.monuments.iter().any(|m| m == name)
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s == name)
    }

    pub fn has_nationality(&self, name: &str) -> bool {
        self.nationalities.iter().any(|n| n == name)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn check_options(list: &str, options: &[String]) -> anyhow::Result<()> {
    if options.is_empty() {
        return Err(anyhow::anyhow!("{list} must not be empty"));
    }
    let mut seen = HashSet::new();
    for option in options {
        if option.trim().is_empty() {
            return Err(anyhow::anyhow!("{list} contains a blank entry"));
        }
        if option.contains(QR_SEPARATOR) {
            return Err(anyhow::anyhow!(
                "{list} entry {option:?} contains reserved character {QR_SEPARATOR:?}"
            ));
        }
        if !seen.insert(option.as_str()) {
            return Err(anyhow::anyhow!("{list} contains duplicate entry: {option}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let catalog = Catalog::default();
        assert_eq!(catalog.monuments.len(), 4);
        assert!(catalog.has_monument("Red Fort"));
        assert!(catalog.has_slot("Forenoon"));
        assert!(catalog.has_nationality("BIMSTEC"));
    }

    #[test]
    fn test_membership_is_exact() {
        let catalog = Catalog::default();
        assert!(!catalog.has_monument("taj mahal"));
        assert!(!catalog.has_slot(" Evening"));
        assert!(!catalog.has_nationality(""));
    }

    #[test]
    fn test_parse_valid_json() {
        let json = r#"{"monuments":["Konark"],"slots":["Morning"],"nationalities":["Indian"]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.monuments, vec!["Konark".to_string()]);
        assert!(catalog.has_slot("Morning"));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(Catalog::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_empty_list() {
        let json = r#"{"monuments":[],"slots":["Morning"],"nationalities":["Indian"]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_parse_duplicate_entry() {
        let json = r#"{"monuments":["Konark"],"slots":["Morning","Morning"],"nationalities":["Indian"]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_parse_blank_entry() {
        let json = r#"{"monuments":["Konark"],"slots":["Morning"],"nationalities":["  "]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_parse_separator_entry() {
        let json = r#"{"monuments":["Fort|Palace"],"slots":["Morning"],"nationalities":["Indian"]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("reserved character"));
    }

    #[test]
    fn test_default_entries_avoid_separator() {
        let catalog = Catalog::default();
        let all = catalog
            .monuments
            .iter()
            .chain(&catalog.slots)
            .chain(&catalog.nationalities);
        for entry in all {
            assert!(!entry.contains(QR_SEPARATOR), "{entry}");
        }
    }
}
