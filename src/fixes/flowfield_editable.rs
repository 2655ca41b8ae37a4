//! Fix for LC0001: set `Editable = false` on a FlowField.
//!
//! The field is re-found in the current snapshot by its diagnostic range.
//! An existing `Editable` property keeps its position, spacing and comments
//! and only has its value replaced; a missing one is appended after the last
//! property using that property's indentation.

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::{CodeAction, CodeFixContext, CodeFixProvider, FixAllProvider, SettingValue};
use super::code_action::{FIX_ALL_TITLE, SUPPORTS_FIX_ALL};
use crate::base::TextRange;
use crate::compat::{ConstantResolver, PropertyKinds};
use crate::hir::codes;
use crate::parser::{
    AstNode, Field, GreenNode, GreenToken, NodeOrToken, PropertyList, SyntaxKind, SyntaxNode,
    SyntaxToken,
};
use crate::syntax::Document;

pub const EQUIVALENCE_KEY: &str = "LC0001.SetEditableFalse";
pub const TITLE: &str = "Set Editable to false";
pub const FIX_ALL: &str = "Set Editable to false on all FlowFields";

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Result of rewriting one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// New root of the document.
    Rewritten(GreenNode),
    Unchanged(StaleReason),
}

/// Why a fix left the document as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaleReason {
    /// The loaded host has no `Editable` property kind.
    PropertyUnknown,
    AnchorOutOfBounds,
    /// No field declaration spans exactly the anchor.
    NoField,
    NoPropertyList,
    /// `Editable` has no value to replace.
    MalformedProperty,
    AlreadyCompliant,
}

/// Rewrite the field at `anchor` so that it declares `Editable = false`.
pub fn fix_editable(
    root: &SyntaxNode,
    anchor: TextRange,
    kinds: PropertyKinds,
    indent_unit: &str,
) -> FixOutcome {
    if kinds.editable.is_absent() {
        return FixOutcome::Unchanged(StaleReason::PropertyUnknown);
    }
    if !root.text_range().contains_range(anchor) {
        return FixOutcome::Unchanged(StaleReason::AnchorOutOfBounds);
    }
    let Some(field) = find_field(root, anchor) else {
        return FixOutcome::Unchanged(StaleReason::NoField);
    };
    let Some(list) = field.property_list().filter(|l| l.r_brace().is_some()) else {
        return FixOutcome::Unchanged(StaleReason::NoPropertyList);
    };

    let new_list = match field.property(PropertyKinds::EDITABLE) {
        Some(property) => {
            let Some(value) = property.value() else {
                return FixOutcome::Unchanged(StaleReason::MalformedProperty);
            };
            if value.bool_literal() == Some(false) {
                return FixOutcome::Unchanged(StaleReason::AlreadyCompliant);
            }
            let new_property = property
                .syntax()
                .green()
                .replace_child(value.syntax().index(), false_value().into());
            list.syntax()
                .green()
                .replace_child(property.syntax().index(), new_property.into())
        }
        None => append_editable(&field, &list, indent_unit),
    };

    let new_field = field
        .syntax()
        .green()
        .replace_child(list.syntax().index(), new_list.into());
    FixOutcome::Rewritten(field.syntax().replace_with(new_field))
}

fn find_field(root: &SyntaxNode, anchor: TextRange) -> Option<Field> {
    let start = match root.covering_element(anchor) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent()?,
    };
    start
        .ancestors()
        .filter_map(Field::cast)
        .find(|f| f.syntax().text_range() == anchor)
}

fn append_editable(field: &Field, list: &PropertyList, indent_unit: &str) -> GreenNode {
    let green = list.syntax().green();
    let newline = newline_style(list.syntax());

    if let Some(last) = list.properties().last() {
        let lead = leading_trivia(last.syntax());
        let ends_in_comment = last
            .syntax()
            .last_token()
            .is_some_and(|t| t.kind() == SyntaxKind::LINE_COMMENT);
        let mut insert: Vec<GreenElement> = match lead.iter().rposition(|t| t.kind() == SyntaxKind::NEWLINE) {
            Some(idx) => lead[idx..].iter().map(|t| token(t.kind(), t.text()).into()).collect(),
            // A line comment runs to the end of the line.
            None if ends_in_comment => fresh_line(field, &newline, indent_unit).into(),
            None => vec![token(SyntaxKind::WHITESPACE, " ").into()],
        };
        insert.push(editable_property().into());
        let at = last.syntax().index() + 1;
        return green.splice_children(at..at, insert);
    }

    // Empty list: open a line below `{`, or stay inline for `{ }`.
    let Some(l_brace) = list
        .syntax()
        .children_with_tokens()
        .find(|e| e.kind() == SyntaxKind::L_BRACE)
    else {
        return green.into_owned();
    };
    let at = l_brace.index() + 1;
    let multiline = list
        .syntax()
        .children_with_tokens()
        .any(|e| e.kind() == SyntaxKind::NEWLINE);

    let mut insert: Vec<GreenElement> = Vec::new();
    if multiline {
        insert.extend(fresh_line(field, &newline, indent_unit));
        insert.push(editable_property().into());
    } else {
        insert.push(token(SyntaxKind::WHITESPACE, " ").into());
        insert.push(editable_property().into());
        let next = list.syntax().children_with_tokens().nth(at);
        if next.is_some_and(|e| e.kind() == SyntaxKind::R_BRACE) {
            insert.push(token(SyntaxKind::WHITESPACE, " ").into());
        }
    }
    green.splice_children(at..at, insert)
}

/// Line break plus one indentation level deeper than `field`.
fn fresh_line(field: &Field, newline: &str, indent_unit: &str) -> [GreenElement; 2] {
    let indent = line_indent(field.syntax());
    let unit = if indent.contains('\t') { "\t" } else { indent_unit };
    [
        token(SyntaxKind::NEWLINE, newline).into(),
        token(SyntaxKind::WHITESPACE, &format!("{indent}{unit}")).into(),
    ]
}

/// Trivia tokens directly before `node` among its siblings.
fn leading_trivia(node: &SyntaxNode) -> Vec<SyntaxToken> {
    let mut trivia: Vec<_> = std::iter::successors(node.prev_sibling_or_token(), |e| {
        e.prev_sibling_or_token()
    })
    .map_while(|e| e.into_token().filter(|t| t.kind().is_trivia()))
    .collect();
    trivia.reverse();
    trivia
}

/// Whitespace between the last line break and the start of `node`.
fn line_indent(node: &SyntaxNode) -> String {
    let mut token = node.first_token().and_then(|t| t.prev_token());
    let mut indent = String::new();
    while let Some(t) = token {
        match t.kind() {
            SyntaxKind::WHITESPACE => indent.insert_str(0, t.text()),
            SyntaxKind::NEWLINE => break,
            _ => return String::new(),
        }
        token = t.prev_token();
    }
    indent
}

fn newline_style(list: &SyntaxNode) -> String {
    list.ancestors()
        .last()
        .and_then(|root| {
            root.descendants_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| t.kind() == SyntaxKind::NEWLINE)
        })
        .map(|t| t.text().to_string())
        .unwrap_or_else(|| "\n".to_string())
}

fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind.into(), text)
}

fn false_value() -> GreenNode {
    let children: [GreenElement; 1] = [token(SyntaxKind::FALSE_KW, "false").into()];
    GreenNode::new(SyntaxKind::PROPERTY_VALUE.into(), children)
}

/// `Editable = false;`
fn editable_property() -> GreenNode {
    let children: [GreenElement; 6] = [
        token(SyntaxKind::IDENT, PropertyKinds::EDITABLE).into(),
        token(SyntaxKind::WHITESPACE, " ").into(),
        token(SyntaxKind::EQ, "=").into(),
        token(SyntaxKind::WHITESPACE, " ").into(),
        false_value().into(),
        token(SyntaxKind::SEMICOLON, ";").into(),
    ];
    GreenNode::new(SyntaxKind::PROPERTY.into(), children)
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Offers the `Editable = false` fix for LC0001 diagnostics.
#[derive(Debug, Clone)]
pub struct FlowFieldEditableFix {
    kinds: PropertyKinds,
    indent_unit: SmolStr,
}

impl FlowFieldEditableFix {
    /// Resolve the property kinds the fix needs.
    ///
    /// If the host lacks them the provider offers no actions.
    pub fn new(resolver: &ConstantResolver) -> Self {
        let kinds = resolver.property_kinds().unwrap_or_else(|err| {
            tracing::warn!(%err, "editable fix disabled");
            PropertyKinds::default()
        });
        Self {
            kinds,
            indent_unit: SmolStr::new_static("    "),
        }
    }

    pub fn with_indent_unit(mut self, unit: &str) -> Self {
        self.indent_unit = SmolStr::new(unit);
        self
    }

    /// Apply the fix for `anchor` to a document snapshot.
    pub fn apply(&self, document: &Document, anchor: TextRange, cancel: &CancellationToken) -> Document {
        if cancel.is_cancelled() {
            return document.clone();
        }
        match fix_editable(&document.syntax(), anchor, self.kinds, &self.indent_unit) {
            FixOutcome::Rewritten(green) if !cancel.is_cancelled() => document.with_green(green),
            FixOutcome::Rewritten(_) => document.clone(),
            FixOutcome::Unchanged(reason) => {
                tracing::debug!(
                    file = document.file().index(),
                    ?anchor,
                    ?reason,
                    "editable fix left document unchanged"
                );
                document.clone()
            }
        }
    }
}

impl CodeFixProvider for FlowFieldEditableFix {
    fn fixable_diagnostic_ids(&self) -> &'static [&'static str] {
        &[codes::FLOWFIELD_EDITABLE]
    }

    fn register_code_fixes(&self, ctx: &CodeFixContext<'_>) -> Vec<CodeAction> {
        if self.kinds.editable.is_absent()
            || !self.can_fix(ctx.diagnostic)
            || ctx.diagnostic.file != ctx.document.file()
        {
            return Vec::new();
        }

        let fix = self.clone();
        let anchor = ctx.diagnostic.range;
        let mut action = CodeAction::new(
            TITLE,
            EQUIVALENCE_KEY,
            ctx.diagnostic.clone(),
            ctx.capabilities.clone(),
            move |document, cancel| fix.apply(document, anchor, cancel),
        );
        action.try_set(SUPPORTS_FIX_ALL, SettingValue::Bool(true));
        action.try_set(FIX_ALL_TITLE, SettingValue::Text(SmolStr::new_static(FIX_ALL)));
        vec![action]
    }

    fn fix_all_provider(&self) -> Option<FixAllProvider> {
        Some(FixAllProvider::batch(EQUIVALENCE_KEY))
    }
}
