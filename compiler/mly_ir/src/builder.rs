//! Incremental construction of a [`SyntaxTree`].
//!
//! The recognizer drives the builder top-down: `start_node` opens a node,
//! `token` appends a leaf, `finish_node` closes the innermost open node.
//! Because nodes are appended in the order they are opened, the arena ends
//! up in pre-order without any reordering pass.

use crate::tree::NodeData;
use crate::{Span, SyntaxKind, SyntaxTree, Trivia};

/// Builds a [`SyntaxTree`] from a stream of node and leaf events.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    trivia: Vec<Trivia>,
    /// Arena indices of the nodes that are still open, innermost last.
    open: Vec<usize>,
    /// End offset of the last leaf pushed.
    last_end: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    /// Open a composite node. Its span is fixed when it is finished.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        debug_assert!(kind.is_node(), "{kind:?} is not a composite kind");
        self.open.push(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            span: Span::point(self.last_end),
            subtree_end: 0,
        });
    }

    /// Append a leaf to the innermost open node.
    pub fn token(&mut self, kind: SyntaxKind, span: Span) {
        debug_assert!(!kind.is_node(), "{kind:?} is a composite kind");
        debug_assert!(!kind.is_trivia(), "trivia go through `trivia`");
        let next = self.next_index();
        self.nodes.push(NodeData {
            kind,
            span,
            subtree_end: next + 1,
        });
        self.last_end = self.last_end.max(span.end);
    }

    /// Record a trivia piece. Trivia never become tree nodes.
    pub fn trivia(&mut self, kind: SyntaxKind, span: Span) {
        self.trivia.push(Trivia { kind, span });
    }

    /// Close the innermost open node.
    ///
    /// The node spans from its first leaf to the last leaf pushed so far; a
    /// node without leaves becomes a point at the current position.
    pub fn finish_node(&mut self) {
        let Some(index) = self.open.pop() else {
            debug_assert!(false, "finish_node without an open node");
            return;
        };
        let end = self.next_index();
        let span = match self.nodes.get(index + 1) {
            Some(first) => Span::new(first.span.start, self.last_end),
            None => Span::point(self.last_end),
        };
        let node = &mut self.nodes[index];
        node.span = span;
        node.subtree_end = end;
    }

    /// Close open nodes until only `depth` remain.
    pub fn finish_to_depth(&mut self, depth: usize) {
        while self.open.len() > depth {
            self.finish_node();
        }
    }

    /// Close every open node and produce the tree.
    ///
    /// The root is widened to the whole source so that leading and trailing
    /// trivia fall inside it.
    pub fn finish(mut self, source: &str) -> SyntaxTree {
        self.finish_to_depth(0);
        let whole = Span::try_from_range(0..source.len()).unwrap_or(Span::new(0, u32::MAX));
        match self.nodes.first_mut() {
            Some(root) => root.span = root.span.merge(whole),
            None => self.nodes.push(NodeData {
                kind: SyntaxKind::GrammarSpecification,
                span: whole,
                subtree_end: 1,
            }),
        }
        self.trivia.sort_by_key(|t| t.span.start);
        SyntaxTree::from_parts(source.into(), self.nodes, self.trivia)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by source length, which fits in u32"
    )]
    fn next_index(&self) -> u32 {
        self.nodes.len() as u32
    }
}
