//! Tree serialization

use std::io::Write;

use crate::core::node::Node;
use crate::utils::error::{TreeError, TreeResult};

/// Output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    JsonPretty,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::JsonPretty => "json",
            #[cfg(feature = "yaml")]
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Encode a tree in this format
    pub fn render(&self, node: &Node) -> TreeResult<String> {
        match self {
            OutputFormat::Json => to_json(node),
            OutputFormat::JsonPretty => to_json_pretty(node),
            #[cfg(feature = "yaml")]
            OutputFormat::Yaml => to_yaml(node),
        }
    }
}

/// Compact JSON, keys in insertion order
pub fn to_json(node: &Node) -> TreeResult<String> {
    Ok(serde_json::to_string(node)?)
}

/// Indented JSON, keys in insertion order
pub fn to_json_pretty(node: &Node) -> TreeResult<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// YAML document
#[cfg(feature = "yaml")]
pub fn to_yaml(node: &Node) -> TreeResult<String> {
    Ok(serde_yaml::to_string(node)?)
}

/// Stream JSON to a writer
pub fn write_json<W: Write>(writer: W, node: &Node, pretty: bool) -> TreeResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(writer, node)
    } else {
        serde_json::to_writer(writer, node)
    };
    result.map_err(|err| {
        if err.is_io() {
            TreeError::Io {
                message: err.to_string(),
            }
        } else {
            TreeError::from(err)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::Children;
    use crate::core::record::Value;
    use pretty_assertions::assert_eq;

    fn sample() -> Node {
        let mut child = Node::new();
        child.entries.insert("Child1".to_string(), Value::from("name"));
        let mut root = Node::new();
        root.entries.insert("Root".to_string(), Value::from("name"));
        root.children = Some(Children {
            label: "Children".to_string(),
            slot: 1,
            nodes: vec![child],
        });
        root
    }

    #[test]
    fn test_compact_json() {
        assert_eq!(
            to_json(&sample()).unwrap(),
            r#"{"Root":"name","Children":[{"Child1":"name"}]}"#
        );
    }

    #[test]
    fn test_pretty_json() {
        let expected = r#"{
  "Root": "name",
  "Children": [
    {
      "Child1": "name"
    }
  ]
}"#;
        assert_eq!(to_json_pretty(&sample()).unwrap(), expected);
    }

    #[test]
    fn test_write_json_to_buffer() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &sample(), false).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            to_json(&sample()).unwrap()
        );
    }

    #[test]
    fn test_format_render() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputFormat::JsonPretty.extension(), "json");
        assert_eq!(
            OutputFormat::Json.render(&sample()).unwrap(),
            to_json(&sample()).unwrap()
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_keeps_key_order() {
        let yaml = to_yaml(&sample()).unwrap();
        let root_pos = yaml.find("Root").unwrap();
        let children_pos = yaml.find("Children").unwrap();
        assert!(root_pos < children_pos);
        assert!(yaml.contains("Child1: name"));
    }
}
