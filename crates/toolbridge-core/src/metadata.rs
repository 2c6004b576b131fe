use crate::ExecError;
use serde::{Deserialize, Serialize};

/// Static description of a wrapped tool, supplied once per execution.
///
/// Constructed by generated wrapper code from compile-time tool descriptors
/// and never mutated afterwards. The identifying fields must be non-empty;
/// `citations` keeps its insertion order because citation order is meaningful.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolMetadata {
    pub id: String,
    pub name: String,
    pub package: String,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub container_image_tag: Option<String>,
}

impl ToolMetadata {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        package: impl Into<String>,
    ) -> Result<Self, ExecError> {
        let meta = Self {
            id: id.into(),
            name: name.into(),
            package: package.into(),
            citations: Vec::new(),
            container_image_tag: None,
        };
        for (field, value) in [
            ("id", &meta.id),
            ("name", &meta.name),
            ("package", &meta.package),
        ] {
            if value.is_empty() {
                return Err(ExecError::InvalidMetadata(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(meta)
    }

    #[must_use]
    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = citations;
        self
    }

    #[must_use]
    pub fn with_container_image_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_image_tag = Some(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_metadata() {
        let meta = ToolMetadata::new("samtools_sort", "samtools sort", "samtools").unwrap();
        assert_eq!(meta.id, "samtools_sort");
        assert!(meta.citations.is_empty());
        assert!(meta.container_image_tag.is_none());
    }

    #[test]
    fn empty_identifier_rejected() {
        let err = ToolMetadata::new("", "samtools sort", "samtools").unwrap_err();
        assert!(err.to_string().contains("id must not be empty"));

        let err = ToolMetadata::new("samtools_sort", "samtools sort", "").unwrap_err();
        assert!(err.to_string().contains("package must not be empty"));
    }

    #[test]
    fn citations_preserve_order() {
        let meta = ToolMetadata::new("bwa_mem", "bwa mem", "bwa")
            .unwrap()
            .with_citations(vec![
                "doi:10.1093/bioinformatics/btp324".to_owned(),
                "doi:10.1093/bioinformatics/btp698".to_owned(),
            ]);
        assert_eq!(meta.citations[0], "doi:10.1093/bioinformatics/btp324");
        assert_eq!(meta.citations[1], "doi:10.1093/bioinformatics/btp698");
    }

    #[test]
    fn serde_round_trip_without_optional_fields() {
        let json = r#"{"id":"t","name":"tool","package":"pkg"}"#;
        let meta: ToolMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.citations.is_empty());
        assert!(meta.container_image_tag.is_none());
    }
}
