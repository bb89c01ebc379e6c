//! Immutable syntax tree.
//!
//! Nodes live in a flat arena in pre-order. Each entry records the index one
//! past its last descendant (`subtree_end`), so children are found by
//! hopping from sibling to sibling without per-node child vectors.
//!
//! Trivia (whitespace, `;`, comments) are kept in a separate list ordered by
//! offset. Leaves and trivia together cover the source exactly once.

use std::fmt::{self, Write};

use crate::{Span, SyntaxKind};

/// Index of a node in a [`SyntaxTree`]. Ids follow pre-order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Pre-order position of the node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) span: Span,
    pub(crate) subtree_end: u32,
}

/// A skipped piece of source between two significant tokens.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Trivia {
    pub kind: SyntaxKind,
    pub span: Span,
}

/// Syntax tree for one grammar file.
///
/// Owns a copy of the source so that node text can be recovered without the
/// caller keeping the buffer alive. Equality is structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTree {
    source: Box<str>,
    nodes: Vec<NodeData>,
    trivia: Vec<Trivia>,
}

impl SyntaxTree {
    pub(crate) fn from_parts(source: Box<str>, nodes: Vec<NodeData>, trivia: Vec<Trivia>) -> Self {
        debug_assert!(!nodes.is_empty(), "tree must have a root");
        SyntaxTree {
            source,
            nodes,
            trivia,
        }
    }

    /// The root node (always `GrammarSpecification` for parser output).
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: NodeId(0),
        }
    }

    /// View of the node with the given id.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id }
    }

    /// The source text the tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        &self.source[span.to_range()]
    }

    /// Number of nodes and leaves.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Trivia in source order.
    pub fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }

    /// Every node and leaf in pre-order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by source length, which fits in u32"
    )]
    pub fn preorder(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        (0..self.nodes.len() as u32).map(move |i| SyntaxNode {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Leaves (tokens, symbols, foreign spans) in source order.
    pub fn leaves(&self) -> impl Iterator<Item = SyntaxNode<'_>> + '_ {
        self.preorder().filter(|n| !n.kind().is_node())
    }

    /// Concatenate leaves and trivia in offset order.
    ///
    /// For every tree produced from a complete parse this equals the source.
    pub fn reconstruct(&self) -> String {
        let mut pieces: Vec<Span> = self
            .leaves()
            .map(|leaf| leaf.span())
            .chain(self.trivia.iter().map(|t| t.span))
            .collect();
        pieces.sort_by_key(|span| span.start);

        let mut out = String::with_capacity(self.source.len());
        for span in pieces {
            out.push_str(self.text(span));
        }
        out
    }

    /// Tree-sitter style S-expression of the named nodes.
    pub fn to_sexp(&self) -> String {
        self.root().to_sexp()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root().write_dump(f, 0)
    }
}

/// Borrowed view of one node or leaf.
#[derive(Copy, Clone)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.tree.data(self.id).kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.tree.data(self.id).span
    }

    /// Source text covered by the node.
    pub fn text(&self) -> &'t str {
        self.tree.text(self.span())
    }

    /// Direct children, leaves included.
    pub fn children(&self) -> Children<'t> {
        Children {
            tree: self.tree,
            next: self.id.0 + 1,
            end: self.tree.data(self.id).subtree_end,
        }
    }

    /// Direct children that appear in S-expressions.
    pub fn named_children(&self) -> impl Iterator<Item = SyntaxNode<'t>> {
        self.children().filter(|c| c.kind().is_named())
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// Direct children of the given kind.
    pub fn children_of(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode<'t>> {
        self.children().filter(move |c| c.kind() == kind)
    }

    /// This node and all its descendants, in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = SyntaxNode<'t>> {
        let tree = self.tree;
        (self.id.0..tree.data(self.id).subtree_end).map(move |i| SyntaxNode {
            tree,
            id: NodeId(i),
        })
    }

    /// Tree-sitter style S-expression: named kinds only, no text.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind().name());
        for child in self.named_children() {
            out.push(' ');
            child.write_sexp(out);
        }
        out.push(')');
    }

    fn write_dump(&self, f: &mut impl Write, depth: usize) -> fmt::Result {
        let kind = self.kind();
        write!(f, "{:indent$}{:?} {}", "", kind, self.span(), indent = depth * 2)?;
        if !kind.is_node() {
            write!(f, " {:?}", self.text())?;
        }
        writeln!(f)?;
        for child in self.children() {
            child.write_dump(f, depth + 1)?;
        }
        Ok(())
    }

    /// Indented dump of the subtree with spans and leaf text.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dump(&mut out, 0);
        out
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.span())
    }
}

/// Iterator over direct children.
pub struct Children<'t> {
    tree: &'t SyntaxTree,
    next: u32,
    end: u32,
}

impl<'t> Iterator for Children<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<SyntaxNode<'t>> {
        if self.next >= self.end {
            return None;
        }
        let id = NodeId(self.next);
        self.next = self.tree.data(id).subtree_end;
        Some(SyntaxNode {
            tree: self.tree,
            id,
        })
    }
}
