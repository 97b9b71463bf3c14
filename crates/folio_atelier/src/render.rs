//! HTML page rendering.
//!
//! Emits one styled element per token, in lexical order, branching only on the
//! token's annotation. The concatenated token texts reproduce the schema, so the
//! page shows the source exactly as written.

use std::path::{Path, PathBuf};

use folio_armature::ParsedFile;
use folio_carton::path::relative_href;
use htmlize::{escape_attribute, escape_text};

use crate::annotate::{Role, SubKind, TokenAnnotation};
use crate::layout::{OutputLayout, INDEX_DOCUMENT, STICKY_HEADER_SCRIPT, STYLESHEET};

/// A rendered page and where it goes, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

/// Render the page of one schema file.
pub fn render_document(
    file: &ParsedFile,
    annotations: &[TokenAnnotation],
    layout: &OutputLayout,
) -> Document {
    let path = layout.document_path(file.path());
    let title = escape_text(layout.display_name(file.path())).into_owned();

    let mut html = String::with_capacity(file.tokens.len() * 24 + 512);
    push_page_head(&mut html, &path, &title);

    html.push_str("<pre>\n<code>\n");
    for (token, annotation) in file.tokens.iter().zip(annotations) {
        push_token(&mut html, &token.text, annotation);
    }
    html.push_str("\n</code>\n</pre>\n</body>\n</html>\n");

    Document {
        path,
        content: html,
    }
}

fn push_page_head(html: &mut String, path: &Path, title: &str) {
    let href = |target: &str| escape_attribute(relative_href(path, Path::new(target))).into_owned();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        href(STYLESHEET)
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str("<div class=\"header\" id=\"pageHeader\">\n");
    html.push_str(&format!(
        "  <a class=\"header\" href=\"{}\">Overview</a>\n",
        href(INDEX_DOCUMENT)
    ));
    html.push_str(&format!("  <span class=\"header\">{}</span>\n", title));
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<script src=\"{}\"></script>\n",
        href(STICKY_HEADER_SCRIPT)
    ));
    html.push_str(&format!("<h2>{}</h2>\n", title));
}

/// Append one token as HTML.
fn push_token(html: &mut String, text: &str, annotation: &TokenAnnotation) {
    let text = escape_text(text);

    let class = match annotation.role {
        Role::EndOfStream => return,
        Role::Other => {
            html.push_str(&text);
            return;
        }
        Role::Comment => "comment",
        Role::BaseType => "base_type_name",
        Role::Keyword => "keywords",
        Role::StringLiteral => match annotation.sub_kind {
            SubKind::IncludeFilename if annotation.link_target.is_some() => "include_filename",
            SubKind::AttributeDeclaration if annotation.anchor_id.is_some() => {
                "attribute_declaration"
            }
            _ => "string_constant",
        },
        Role::Identifier => match annotation.sub_kind {
            SubKind::TypeDeclaration if annotation.anchor_id.is_some() => "type_declaration",
            SubKind::AttributeDeclaration if annotation.anchor_id.is_some() => {
                "attribute_declaration"
            }
            SubKind::TypeReference if annotation.link_target.is_some() => "type_reference",
            SubKind::AttributeReference if annotation.link_target.is_some() => {
                "attribute_reference"
            }
            _ => "identifier",
        },
    };

    let span = format!("<span class=\"{}\">{}</span>", class, text);

    if let Some(anchor) = annotation
        .anchor_id
        .as_deref()
        .filter(|_| class.ends_with("_declaration"))
    {
        html.push_str(&format!("<a id=\"{}\">{}</a>", escape_attribute(anchor), span));
    } else if let Some(target) = annotation
        .link_target
        .as_deref()
        .filter(|_| class.ends_with("_reference") || class == "include_filename")
    {
        html.push_str(&format!("<a href=\"{}\">{}</a>", escape_attribute(target), span));
    } else {
        html.push_str(&span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(role: Role, sub_kind: SubKind) -> TokenAnnotation {
        TokenAnnotation {
            role,
            sub_kind,
            anchor_id: None,
            link_target: None,
        }
    }

    fn rendered(text: &str, annotation: &TokenAnnotation) -> String {
        let mut html = String::new();
        push_token(&mut html, text, annotation);
        html
    }

    #[test]
    fn test_fixed_classes() {
        insta::assert_snapshot!(
            rendered("table", &annotation(Role::Keyword, SubKind::PlainText)),
            @r#"<span class="keywords">table</span>"#
        );
        insta::assert_snapshot!(
            rendered("// a < b", &annotation(Role::Comment, SubKind::PlainText)),
            @r#"<span class="comment">// a &lt; b</span>"#
        );
        insta::assert_snapshot!(
            rendered("int", &annotation(Role::BaseType, SubKind::PlainText)),
            @r#"<span class="base_type_name">int</span>"#
        );
        assert_eq!(rendered("; ", &annotation(Role::Other, SubKind::PlainText)), "; ");
        assert_eq!(rendered("", &annotation(Role::EndOfStream, SubKind::PlainText)), "");
    }

    #[test]
    fn test_declaration_anchor() {
        let mut decl = annotation(Role::Identifier, SubKind::TypeDeclaration);
        decl.anchor_id = Some("Bar".into());
        insta::assert_snapshot!(
            rendered("Bar", &decl),
            @r#"<a id="Bar"><span class="type_declaration">Bar</span></a>"#
        );
    }

    #[test]
    fn test_reference_link() {
        let mut reference = annotation(Role::Identifier, SubKind::TypeReference);
        reference.link_target = Some("a.html#Bar".into());
        insta::assert_snapshot!(
            rendered("Bar", &reference),
            @r#"<a href="a.html#Bar"><span class="type_reference">Bar</span></a>"#
        );

        // Without a target the reference degrades to a plain identifier.
        let unresolved = annotation(Role::Identifier, SubKind::TypeReference);
        insta::assert_snapshot!(
            rendered("Bar", &unresolved),
            @r#"<span class="identifier">Bar</span>"#
        );
    }

    #[test]
    fn test_string_constants() {
        let mut include = annotation(Role::StringLiteral, SubKind::IncludeFilename);
        include.link_target = Some("common/vec.html".into());
        insta::assert_snapshot!(
            rendered("\"common/vec.fbs\"", &include),
            @r#"<a href="common/vec.html"><span class="include_filename">"common/vec.fbs"</span></a>"#
        );

        let mut attribute = annotation(Role::StringLiteral, SubKind::AttributeDeclaration);
        attribute.anchor_id = Some("priority".into());
        insta::assert_snapshot!(
            rendered("\"priority\"", &attribute),
            @r#"<a id="priority"><span class="attribute_declaration">"priority"</span></a>"#
        );

        insta::assert_snapshot!(
            rendered("\"MONS\"", &annotation(Role::StringLiteral, SubKind::PlainText)),
            @r#"<span class="string_constant">"MONS"</span>"#
        );
    }

    #[test]
    fn test_page_head_is_relative_to_page() {
        let file = folio_armature::parse("/s/game/monster.fbs", "table Monster {}\n");
        let annotations: Vec<_> = file
            .tokens
            .iter()
            .map(|t| annotation(Role::of(t.kind), SubKind::PlainText))
            .collect();
        let layout = OutputLayout::new("/s");

        let document = render_document(&file, &annotations, &layout);

        assert_eq!(document.path, Path::new("game/monster.html"));
        assert!(document.content.contains("<title>game/monster.fbs</title>"));
        assert!(document.content.contains("<h2>game/monster.fbs</h2>"));
        assert!(document.content.contains("href=\"../style.css\""));
        assert!(document.content.contains("href=\"../index.html\""));
        assert!(document.content.contains("src=\"../stickyHeader.js\""));
        assert!(document
            .content
            .contains("<span class=\"keywords\">table</span> <span class=\"identifier\">Monster</span> {}\n"));
    }
}
