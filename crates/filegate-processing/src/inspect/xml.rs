use roxmltree::{Document, ExpandedName, ParsingOptions};
use serde_json::{Map, Value};

use super::{decode_utf8, Inspector};
use crate::metadata::{FileDescriptor, FileSummary, XmlDescriptor};
use crate::upload::Upload;
use crate::validator::ValidationError;

/// Owned summary of a parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlTree {
    pub root_tag: String,
    pub root_attributes: Map<String, Value>,
    pub total_elements: usize,
}

/// `{namespace}local` for namespaced names, `local` otherwise.
fn qualified_name(name: ExpandedName<'_, '_>) -> String {
    match name.namespace() {
        Some(ns) => format!("{{{}}}{}", ns, name.name()),
        None => name.name().to_string(),
    }
}

pub struct XmlInspector;

impl Inspector for XmlInspector {
    type Decoded = XmlTree;

    fn decode(&self, upload: &Upload) -> Result<XmlTree, ValidationError> {
        let text = decode_utf8(upload, "XML")?;

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let document = Document::parse_with_options(text, options).map_err(|e| {
            let pos = e.pos();
            ValidationError::MalformedDocument {
                message: e.to_string(),
                line: pos.row as usize,
                column: pos.col as usize,
            }
        })?;

        let root = document.root_element();
        let root_attributes = root
            .attributes()
            .map(|attr| {
                let name = match attr.namespace() {
                    Some(ns) => format!("{{{}}}{}", ns, attr.name()),
                    None => attr.name().to_string(),
                };
                (name, Value::String(attr.value().to_string()))
            })
            .collect();

        Ok(XmlTree {
            root_tag: qualified_name(root.tag_name()),
            root_attributes,
            // Pre-order walk; includes the root itself.
            total_elements: root.descendants().filter(|n| n.is_element()).count(),
        })
    }

    fn summarize(&self, upload: &Upload, tree: XmlTree) -> FileDescriptor {
        FileDescriptor::Xml(XmlDescriptor {
            summary: FileSummary::of(upload),
            root_tag: tree.root_tag,
            total_elements: tree.total_elements,
            root_attributes: tree.root_attributes,
            is_valid: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<XmlTree, ValidationError> {
        let upload = Upload::new("doc.xml", None, text.as_bytes().to_vec());
        XmlInspector.decode(&upload)
    }

    #[test]
    fn test_counts_root_and_all_descendants() {
        let tree = parse(
            r#"<catalog><book><title>A</title><author/></book><book><title>B</title></book></catalog>"#,
        )
        .unwrap();
        assert_eq!(tree.root_tag, "catalog");
        // root + 2 books + 2 titles + 1 author
        assert_eq!(tree.total_elements, 6);
    }

    #[test]
    fn test_single_root() {
        let tree = parse("<?xml version=\"1.0\"?><empty/>").unwrap();
        assert_eq!(tree.total_elements, 1);
        assert!(tree.root_attributes.is_empty());
    }

    #[test]
    fn test_comments_and_text_are_not_elements() {
        let tree = parse("<a><!-- note -->text<b>inner</b><?pi data?></a>").unwrap();
        assert_eq!(tree.total_elements, 2);
    }

    #[test]
    fn test_root_attributes_keep_document_order() {
        let tree = parse(r#"<config version="2" env="prod" alpha="a"><item key="x"/></config>"#)
            .unwrap();
        let names: Vec<&str> = tree.root_attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["version", "env", "alpha"]);
        assert_eq!(tree.root_attributes["env"], "prod");

        let json = serde_json::to_string(&tree.root_attributes).unwrap();
        assert_eq!(json, r#"{"version":"2","env":"prod","alpha":"a"}"#);
    }

    #[test]
    fn test_namespaced_root() {
        let tree = parse(r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry/></feed>"#).unwrap();
        assert_eq!(tree.root_tag, "{http://www.w3.org/2005/Atom}feed");
        assert_eq!(tree.total_elements, 2);
    }

    #[test]
    fn test_malformed_reports_position() {
        let err = parse("<root>\n  <open>\n</root>").unwrap_err();
        let ValidationError::MalformedDocument { line, .. } = err else {
            panic!("expected a malformed document error");
        };
        assert!(line >= 2);
    }

    #[test]
    fn test_dtd_is_accepted() {
        let tree = parse("<!DOCTYPE note [<!ELEMENT note (#PCDATA)>]><note>hi</note>").unwrap();
        assert_eq!(tree.root_tag, "note");
    }
}
