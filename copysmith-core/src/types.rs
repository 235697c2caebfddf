use serde::{Deserialize, Serialize};

/// Product details submitted for a description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub title: String,
    pub brand: String,
    pub raw_info: String,
}

impl GenerationRequest {
    pub fn new(
        title: impl Into<String>,
        brand: impl Into<String>,
        raw_info: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            brand: brand.into(),
            raw_info: raw_info.into(),
        }
    }

    /// Names of required fields that are empty, in request order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("raw_info", &self.raw_info),
            ("brand", &self.brand),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A finished description, ready for display or copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedHtml {
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_request_has_no_missing_fields() {
        let request = GenerationRequest::new("Lumen Mirror", "Lumina", "LED backlight");
        assert!(request.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let request = GenerationRequest::new("", "", "LED backlight");
        assert_eq!(request.missing_fields(), vec!["title", "brand"]);

        let request = GenerationRequest::default();
        assert_eq!(request.missing_fields(), vec!["title", "raw_info", "brand"]);
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let request = GenerationRequest::new(" ", "Lumina", "\n");
        assert!(request.missing_fields().is_empty());
    }
}
