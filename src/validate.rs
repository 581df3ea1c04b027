// 入站校验：所有规则独立检查，错误按字段汇总
use crate::inbound::InboundDefinition;
use crate::protocol::Security;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Tag is required")]
    TagRequired,

    #[error("Tag already exists")]
    TagExists,

    #[error("Invalid port")]
    InvalidPort,

    #[error("Private key is required")]
    PrivateKeyRequired,

    #[error("At least one short ID is required")]
    ShortIdRequired,
}

impl FieldError {
    /// Field the error is reported under
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::TagRequired | FieldError::TagExists => "tag",
            FieldError::InvalidPort => "port",
            FieldError::PrivateKeyRequired => "privateKey",
            FieldError::ShortIdRequired => "shortIds",
        }
    }
}

/// Field name -> error, at most one error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// Field name -> message, for display next to each input.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(field, error)| (field.to_string(), error.to_string()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check `inbound` against the tags already present in the document.
pub fn validate_inbound(
    inbound: &InboundDefinition,
    existing_tags: &HashSet<String>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if inbound.tag.is_empty() {
        errors.insert(FieldError::TagRequired);
    } else if existing_tags.contains(&inbound.tag) {
        errors.insert(FieldError::TagExists);
    }

    if !(1..=65535).contains(&inbound.port) {
        errors.insert(FieldError::InvalidPort);
    }

    if inbound.stream_settings.security == Security::Reality {
        let reality = inbound.stream_settings.reality_settings.as_ref();
        if reality.map_or(true, |r| r.private_key.is_empty()) {
            errors.insert(FieldError::PrivateKeyRequired);
        }
        // Only the first short ID is checked.
        let first_short_id = reality.and_then(|r| r.short_ids.first());
        if first_short_id.map_or(true, |id| id.is_empty()) {
            errors.insert(FieldError::ShortIdRequired);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
