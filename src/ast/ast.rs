use std::fmt::Display;

use crate::{errors::errors::{Error, ErrorImpl}, Span};

/// Stable index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node Kinds
///
/// The closed set of node variants. Payloads hold names and literal values;
/// everything else a node refers to is a child.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program { name: String },
    Block,
    VariableDeclaration,
    ProcedureDeclaration { name: String },
    Compound,
    Assignment,
    /// `[condition, consequence, next?]`, `next` being the else/else-if alternative.
    If,
    For { downto: bool },
    While,
    /// `[statements..., condition]`
    Repeat,
    Call { name: String },
    Variable { name: String },
    Empty,

    // Binary operators
    Plus,
    Minus,
    Multiplication,
    IntegerDivision,
    RealDivision,
    Mod,
    And,
    Or,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterEquals,
    LessEquals,

    // Unary operators
    UnaryPlus,
    UnaryMinus,
    Not,

    // Literals
    IntegerConstant(i64),
    RealConstant(f64),
    CharConstant(char),
    True,
    False,

    // Type markers
    Integer,
    Real,
    Boolean,
    Char,
}

impl NodeKind {
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            NodeKind::Plus
                | NodeKind::Minus
                | NodeKind::Multiplication
                | NodeKind::IntegerDivision
                | NodeKind::RealDivision
                | NodeKind::Mod
                | NodeKind::And
                | NodeKind::Or
                | NodeKind::Equals
                | NodeKind::NotEquals
                | NodeKind::GreaterThan
                | NodeKind::LessThan
                | NodeKind::GreaterEquals
                | NodeKind::LessEquals
        )
    }

    pub fn is_unary_operator(&self) -> bool {
        matches!(self, NodeKind::UnaryPlus | NodeKind::UnaryMinus | NodeKind::Not)
    }

    pub fn is_type_marker(&self) -> bool {
        matches!(
            self,
            NodeKind::Integer | NodeKind::Real | NodeKind::Boolean | NodeKind::Char
        )
    }

    /// Rendering of the variant in [`Tree::to_sexpr`]; payload-carrying
    /// leaves print as their payload.
    fn label(&self) -> String {
        match self {
            NodeKind::Program { name } => format!("Program {}", name),
            NodeKind::ProcedureDeclaration { name } => format!("ProcedureDeclaration {}", name),
            NodeKind::Call { name } => format!("Call {}", name),
            NodeKind::For { downto } => {
                if *downto {
                    String::from("For downto")
                } else {
                    String::from("For to")
                }
            }
            NodeKind::Variable { name } => name.clone(),
            NodeKind::IntegerConstant(value) => value.to_string(),
            NodeKind::RealConstant(value) => format!("{:?}", value),
            NodeKind::CharConstant(value) => format!("{:?}", value),
            NodeKind::True => String::from("true"),
            NodeKind::False => String::from("false"),
            NodeKind::Block
            | NodeKind::VariableDeclaration
            | NodeKind::Compound
            | NodeKind::Assignment
            | NodeKind::If
            | NodeKind::While
            | NodeKind::Repeat
            | NodeKind::Empty
            | NodeKind::Plus
            | NodeKind::Minus
            | NodeKind::Multiplication
            | NodeKind::IntegerDivision
            | NodeKind::RealDivision
            | NodeKind::Mod
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::Equals
            | NodeKind::NotEquals
            | NodeKind::GreaterThan
            | NodeKind::LessThan
            | NodeKind::GreaterEquals
            | NodeKind::LessEquals
            | NodeKind::UnaryPlus
            | NodeKind::UnaryMinus
            | NodeKind::Not
            | NodeKind::Integer
            | NodeKind::Real
            | NodeKind::Boolean
            | NodeKind::Char => format!("{:?}", self),
        }
    }

    /// Leaves that render without parentheses.
    fn is_atom(&self) -> bool {
        match self {
            NodeKind::Variable { .. }
            | NodeKind::IntegerConstant(_)
            | NodeKind::RealConstant(_)
            | NodeKind::CharConstant(_)
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Empty
            | NodeKind::Integer
            | NodeKind::Real
            | NodeKind::Boolean
            | NodeKind::Char => true,
            NodeKind::Program { .. }
            | NodeKind::Block
            | NodeKind::VariableDeclaration
            | NodeKind::ProcedureDeclaration { .. }
            | NodeKind::Compound
            | NodeKind::Assignment
            | NodeKind::If
            | NodeKind::For { .. }
            | NodeKind::While
            | NodeKind::Repeat
            | NodeKind::Call { .. }
            | NodeKind::Plus
            | NodeKind::Minus
            | NodeKind::Multiplication
            | NodeKind::IntegerDivision
            | NodeKind::RealDivision
            | NodeKind::Mod
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::Equals
            | NodeKind::NotEquals
            | NodeKind::GreaterThan
            | NodeKind::LessThan
            | NodeKind::GreaterEquals
            | NodeKind::LessEquals
            | NodeKind::UnaryPlus
            | NodeKind::UnaryMinus
            | NodeKind::Not => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Span of the token that began the node's grammar rule.
    pub span: Span,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Index of this node in its parent's children.
    slot: usize,
}

impl Node {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An arena of AST nodes.
///
/// Nodes own their children by id and point back at their parent; both links
/// are kept in step by [`Tree::add_node`], [`Tree::add_child`] and
/// [`Tree::replace`].
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Tree::default()
    }

    /// Creates a node owning `children`.
    ///
    /// The caller must pass nodes it has just built and not attached
    /// anywhere else, as every parser rule does. Use [`Tree::add_child`] to
    /// attach nodes whose state is not known.
    pub fn add_node(&mut self, kind: NodeKind, span: Span, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, span, children: Vec::with_capacity(children.len()), parent: None, slot: 0 });
        for child in children {
            debug_assert!(self.nodes[child.0].parent.is_none(), "{} is already attached", child);
            self.attach(id, child);
        }
        id
    }

    /// Appends `children` to `parent`.
    ///
    /// Fails on the first child that is already attached, is the root, or
    /// would become its own ancestor; earlier children stay attached.
    pub fn add_child(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), Error> {
        for &child in children {
            if self.nodes[child.0].parent.is_some() || self.root == Some(child) {
                return Err(self.internal_error(child, format!("{} is already attached", child)));
            }
            if self.is_ancestor_or_self(child, parent) {
                return Err(self.internal_error(
                    child,
                    format!("attaching {} under {} would form a cycle", child, parent),
                ));
            }
            self.attach(parent, child);
        }
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        let slot = self.nodes[parent.0].children.len();
        self.nodes[parent.0].children.push(child);
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.slot = slot;
    }

    /// Whether `candidate` is `node` or one of its ancestors.
    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        std::iter::successors(Some(node), |&id| self.nodes[id.0].parent).any(|id| id == candidate)
    }

    /// Puts `new` where `old` sits in its parent and detaches `old`.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), Error> {
        let Some(parent) = self.nodes[old.0].parent else {
            return Err(self.internal_error(old, format!("{} has no parent to be replaced in", old)));
        };
        let slot = self.nodes[old.0].slot;
        if self.nodes[parent.0].children.get(slot) != Some(&old) {
            return Err(self.internal_error(
                old,
                format!("{} is not child {} of its parent {}", old, slot, parent),
            ));
        }
        if self.nodes[new.0].parent.is_some() || self.root == Some(new) {
            return Err(self.internal_error(new, format!("replacement {} is still attached", new)));
        }
        if self.is_ancestor_or_self(new, old) {
            return Err(self.internal_error(
                new,
                format!("replacing {} with its ancestor {} would form a cycle", old, new),
            ));
        }

        self.nodes[parent.0].children[slot] = new;
        let replacement = &mut self.nodes[new.0];
        replacement.parent = Some(parent);
        replacement.slot = slot;

        let detached = &mut self.nodes[old.0];
        detached.parent = None;
        detached.slot = 0;
        Ok(())
    }

    fn internal_error(&self, id: NodeId, message: String) -> Error {
        Error::new(ErrorImpl::InternalTree { message }, self.nodes[id.0].span.start.clone())
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn span(&self, id: NodeId) -> &Span {
        &self.nodes[id.0].span
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The else/else-if alternative hanging off an `If` node.
    pub fn if_next(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::If => self.children(id).get(2).copied(),
            _ => None,
        }
    }

    /// Every alternative of the chain starting at `id`, in source order.
    pub fn if_chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(next) = self.if_next(current) {
            chain.push(next);
            current = next;
        }
        chain
    }

    /// Compares variants, payloads and child structure, ignoring spans.
    pub fn structurally_eq(&self, a: NodeId, other: &Tree, b: NodeId) -> bool {
        let (left, right) = (self.node(a), other.node(b));
        left.kind == right.kind
            && left.children.len() == right.children.len()
            && left
                .children
                .iter()
                .zip(right.children.iter())
                .all(|(&x, &y)| self.structurally_eq(x, other, y))
    }

    /// Checks the parent/child links of every node reachable from the root.
    pub fn verify(&self) -> Result<(), Error> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.parent(root).is_some() {
            return Err(self.internal_error(root, format!("root {} has a parent", root)));
        }

        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            for (slot, &child) in self.children(id).iter().enumerate() {
                let node = self.node(child);
                if node.parent != Some(id) || node.slot != slot {
                    return Err(self.internal_error(
                        child,
                        format!("{} is child {} of {} but links elsewhere", child, slot, id),
                    ));
                }
                pending.push(child);
            }
        }
        Ok(())
    }

    pub fn to_sexpr(&self, id: NodeId) -> String {
        let node = self.node(id);
        if node.kind.is_atom() && node.children.is_empty() {
            return node.kind.label();
        }

        let mut out = format!("({}", node.kind.label());
        for &child in &node.children {
            out.push(' ');
            out.push_str(&self.to_sexpr(child));
        }
        out.push(')');
        out
    }
}
