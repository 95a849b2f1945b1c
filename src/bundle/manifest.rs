//! `extension.vsixmanifest` parsing
//!
//! Two schemas are in circulation: the 2010 `Vsix` schema with an
//! `Identifier` block, and the 2011 `PackageManifest` schema with a
//! `Metadata/Identity` element. Elements are matched by local name so the
//! namespace declarations do not matter.

use roxmltree::{Document, Node};

/// Manifest schema a bundle was described with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestSchema {
    /// `<Vsix Version="1.0.0">` (Visual Studio 2010 and 2012)
    V1,
    /// `<PackageManifest Version="2.0.0">`
    V2,
}

/// Fields read from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub schema: ManifestSchema,
    pub identifier: String,
    pub name: String,
    pub version: String,
    pub publisher: Option<String>,
    pub description: Option<String>,
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse manifest XML
pub fn parse(xml: &str) -> Result<Manifest, String> {
    let document = Document::parse(xml).map_err(|e| format!("invalid manifest XML: {e}"))?;
    let root = document.root_element();

    if root.has_tag_name("PackageManifest") {
        parse_v2(root)
    } else if root.has_tag_name("Vsix") {
        parse_v1(root)
    } else {
        Err(format!(
            "unknown manifest root element <{}>",
            root.tag_name().name()
        ))
    }
}

fn parse_v2(root: Node<'_, '_>) -> Result<Manifest, String> {
    let metadata = child(root, "Metadata").ok_or("manifest has no <Metadata> element")?;
    let identity = child(metadata, "Identity").ok_or("manifest has no <Identity> element")?;

    let identifier = non_empty(identity.attribute("Id")).ok_or("<Identity> has no Id")?;
    let version = non_empty(identity.attribute("Version")).ok_or("<Identity> has no Version")?;
    let name = child_text(metadata, "DisplayName").unwrap_or_else(|| identifier.clone());

    Ok(Manifest {
        schema: ManifestSchema::V2,
        identifier,
        name,
        version,
        publisher: non_empty(identity.attribute("Publisher")),
        description: child_text(metadata, "Description"),
    })
}

fn parse_v1(root: Node<'_, '_>) -> Result<Manifest, String> {
    let block = child(root, "Identifier").ok_or("manifest has no <Identifier> element")?;

    let identifier = non_empty(block.attribute("Id")).ok_or("<Identifier> has no Id")?;
    let version = child_text(block, "Version").ok_or("<Identifier> has no <Version>")?;
    let name = child_text(block, "Name").unwrap_or_else(|| identifier.clone());

    Ok(Manifest {
        schema: ManifestSchema::V1,
        identifier,
        name,
        version,
        publisher: child_text(block, "Author"),
        description: child_text(block, "Description"),
    })
}
