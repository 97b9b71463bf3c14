//! Index page generation.
//!
//! One overview page for the whole run: every namespace in sorted order, each
//! with its declarations grouped into fixed buckets. Entries link to the
//! declaring document and anchor.

use std::collections::BTreeMap;
use std::path::Path;

use folio_armature::DeclKind;
use folio_carton::path::relative_href;
use folio_croquis::{DeclarationRegistry, TypeDeclaration};
use htmlize::{escape_attribute, escape_text};

use crate::layout::{OutputLayout, INDEX_DOCUMENT, STICKY_HEADER_SCRIPT, STYLESHEET, TREE_SCRIPT};
use crate::render::Document;

/// Title of the index page.
pub const INDEX_TITLE: &str = "Overview of FlatBuffers schemas";

/// Label of the namespace holding declarations made outside any `namespace`.
pub const GLOBAL_NAMESPACE_LABEL: &str = "(global)";

/// A declaration bucket, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    RootTypes,
    Enums,
    Structs,
    Tables,
    Unions,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Self::RootTypes,
        Self::Enums,
        Self::Structs,
        Self::Tables,
        Self::Unions,
    ];

    pub const fn title(&self) -> &'static str {
        match self {
            Self::RootTypes => "Root types:",
            Self::Enums => "enums:",
            Self::Structs => "structs:",
            Self::Tables => "tables:",
            Self::Unions => "unions:",
        }
    }

    /// Root types are listed a second time under their kind.
    pub fn contains(&self, decl: &TypeDeclaration) -> bool {
        match self {
            Self::RootTypes => decl.is_root,
            Self::Enums => decl.kind == DeclKind::Enum,
            Self::Structs => decl.kind == DeclKind::Struct,
            Self::Tables => decl.kind == DeclKind::Table,
            Self::Unions => decl.kind == DeclKind::Union,
        }
    }
}

/// Declarations grouped by namespace, each group sorted by bare name.
///
/// Every recorded namespace appears, even without declarations. The global
/// namespace (`""`) appears only when something was declared in it.
pub fn group_by_namespace(registry: &DeclarationRegistry) -> BTreeMap<&str, Vec<&TypeDeclaration>> {
    let mut groups: BTreeMap<&str, Vec<&TypeDeclaration>> = registry
        .namespaces()
        .map(|namespace| (namespace, Vec::new()))
        .collect();

    for decl in registry.types() {
        groups.entry(decl.namespace.as_str()).or_default().push(decl);
    }

    for decls in groups.values_mut() {
        decls.sort_by(|a, b| a.name.cmp(&b.name));
    }

    groups
}

/// Render the index page.
pub fn render_index(registry: &DeclarationRegistry, layout: &OutputLayout) -> Document {
    let index = Path::new(INDEX_DOCUMENT);
    let mut html = String::with_capacity(4096 + registry.type_count() * 128);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", INDEX_TITLE));
    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", STYLESHEET));
    html.push_str("</head>\n<body>\n");
    html.push_str("<div class=\"header\" id=\"pageHeader\">\n");
    html.push_str(&format!("  <span class=\"header\">{}</span>\n", INDEX_TITLE));
    html.push_str("</div>\n");
    html.push_str(&format!("<script src=\"{}\"></script>\n", STICKY_HEADER_SCRIPT));
    html.push_str("<h2>Namespaces:</h2>\n");
    html.push_str("<ul id=\"myUL\">\n");

    for (namespace, decls) in group_by_namespace(registry) {
        let label = if namespace.is_empty() {
            GLOBAL_NAMESPACE_LABEL
        } else {
            namespace
        };
        html.push_str(&format!(
            "  <li><span class=\"caret\">{}</span>\n",
            escape_text(label)
        ));
        html.push_str("    <ul class=\"nested\">\n");

        for bucket in Bucket::ALL {
            let entries: Vec<_> = decls.iter().filter(|d| bucket.contains(d)).collect();
            if entries.is_empty() {
                continue;
            }

            html.push_str(&format!(
                "    <li><span class=\"caret\">{}</span>\n",
                bucket.title()
            ));
            html.push_str("      <ul class=\"nested\">\n");
            for decl in entries {
                let target = format!(
                    "{}#{}",
                    relative_href(index, &layout.document_path(&decl.source_file)),
                    decl.name
                );
                html.push_str(&format!(
                    "        <li><a href=\"{}\"><span class=\"type_reference\">{}</span></a></li>\n",
                    escape_attribute(target),
                    escape_text(decl.fully_qualified_name.as_str())
                ));
            }
            html.push_str("      </ul>\n");
            html.push_str("    </li>\n");
        }

        html.push_str("    </ul>\n");
        html.push_str("  </li>\n");
    }

    html.push_str("</ul>\n");
    html.push_str(&format!("<script src=\"{}\"></script>\n", TREE_SCRIPT));
    html.push_str("</body>\n</html>\n");

    Document {
        path: index.to_path_buf(),
        content: html,
    }
}
