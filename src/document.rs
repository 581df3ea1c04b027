// 服务端配置文档：只解析 inbounds，其余字段原样保留
use crate::error::{BuilderError, Result};
use crate::inbound::InboundDefinition;
use crate::protocol::Protocol;
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self { root: Map::new() }
    }
}

impl ConfigDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(BuilderError::Document(format!(
                "expected a JSON object at the top level, found {}",
                kind(&other)
            ))),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let document = Self::parse(&content)?;
        debug!(
            "Loaded {} with {} inbound(s)",
            path.display(),
            document.inbounds().len()
        );
        Ok(document)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string_pretty()?)?;
        info!("Configuration document written to {}", path.display());
        Ok(())
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// The `inbounds` array; empty when absent or malformed.
    pub fn inbounds(&self) -> &[Value] {
        match self.root.get("inbounds") {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Every non-empty inbound tag, for uniqueness checks.
    pub fn existing_tags(&self) -> HashSet<String> {
        self.inbounds()
            .iter()
            .filter_map(|inbound| inbound.get("tag").and_then(Value::as_str))
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Inbounds an operator manages: supported protocol and not reserved.
    pub fn user_inbounds(&self, reserved_tags: &[String]) -> Vec<&Value> {
        self.inbounds()
            .iter()
            .filter(|inbound| {
                let tag = inbound.get("tag").and_then(Value::as_str);
                !tag.map_or(false, |tag| reserved_tags.iter().any(|r| r == tag))
            })
            .filter(|inbound| {
                inbound
                    .get("protocol")
                    .and_then(Value::as_str)
                    .map_or(false, |p| p.parse::<Protocol>().is_ok())
            })
            .collect()
    }

    /// Append a finished inbound, creating `inbounds` when missing.
    pub fn add_inbound(&mut self, inbound: &InboundDefinition) -> Result<()> {
        let value = serde_json::to_value(inbound)?;
        let entry = self
            .root
            .entry("inbounds")
            .or_insert_with(|| Value::Array(Vec::new()));

        match entry {
            Value::Array(items) => {
                items.push(value);
                info!("Added inbound {}", inbound.tag);
                Ok(())
            }
            other => Err(BuilderError::Document(format!(
                "`inbounds` must be an array, found {}",
                kind(other)
            ))),
        }
    }

    /// Remove every inbound tagged `tag`; returns how many were removed.
    pub fn remove_inbound(&mut self, tag: &str) -> usize {
        let Some(Value::Array(items)) = self.root.get_mut("inbounds") else {
            return 0;
        };

        let before = items.len();
        items.retain(|inbound| inbound.get("tag").and_then(Value::as_str) != Some(tag));
        let removed = before - items.len();
        if removed > 0 {
            info!("Removed {} inbound(s) tagged {}", removed, tag);
        }
        removed
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
