//! Unit tests for the AST arena.

use std::rc::Rc;

use super::ast::{NodeId, NodeKind, Tree};
use crate::{errors::errors::ErrorImpl, Position, Span};

fn span(line: u32, column: u32) -> Span {
    let file = Rc::new(String::from("test.pas"));
    Span {
        start: Position::new(line, column, Rc::clone(&file)),
        end: Position::new(line, column + 1, file),
    }
}

fn int(tree: &mut Tree, value: i64, column: u32) -> NodeId {
    tree.add_node(NodeKind::IntegerConstant(value), span(1, column), vec![])
}

#[test]
fn test_add_node_links_children() {
    let mut tree = Tree::new();
    let left = int(&mut tree, 1, 1);
    let right = int(&mut tree, 2, 5);
    let plus = tree.add_node(NodeKind::Plus, span(1, 3), vec![left, right]);

    assert_eq!(tree.children(plus), &[left, right]);
    assert_eq!(tree.parent(left), Some(plus));
    assert_eq!(tree.parent(right), Some(plus));
    assert_eq!(tree.parent(plus), None);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.to_sexpr(plus), "(Plus 1 2)");
}

#[test]
fn test_add_child_appends_in_order() {
    let mut tree = Tree::new();
    let compound = tree.add_node(NodeKind::Compound, span(1, 1), vec![]);
    let a = tree.add_node(NodeKind::Empty, span(1, 2), vec![]);
    let b = tree.add_node(NodeKind::Empty, span(1, 3), vec![]);
    let c = tree.add_node(NodeKind::Empty, span(1, 4), vec![]);

    tree.add_child(compound, &[a]).unwrap();
    tree.add_child(compound, &[b, c]).unwrap();

    assert_eq!(tree.children(compound), &[a, b, c]);
    assert!(tree.children(compound).iter().all(|&child| tree.parent(child) == Some(compound)));
}

#[test]
fn test_replace_keeps_position_and_detaches_old() {
    let mut tree = Tree::new();
    let one = int(&mut tree, 1, 1);
    let two = int(&mut tree, 2, 5);
    let plus = tree.add_node(NodeKind::Plus, span(1, 3), vec![one, two]);
    tree.set_root(plus);

    let three = int(&mut tree, 3, 9);
    tree.replace(one, three).unwrap();

    assert_eq!(tree.children(plus), &[three, two]);
    assert_eq!(tree.parent(three), Some(plus));
    assert_eq!(tree.parent(one), None);
    assert_eq!(tree.to_sexpr(plus), "(Plus 3 2)");
    // spans travel with their nodes
    assert_eq!(tree.span(three).start.column, 9);
    assert_eq!(tree.span(one).start.column, 1);
    assert!(tree.verify().is_ok());
}

#[test]
fn test_replaced_node_can_be_reattached_elsewhere() {
    let mut tree = Tree::new();
    let one = int(&mut tree, 1, 1);
    let minus = tree.add_node(NodeKind::UnaryMinus, span(1, 1), vec![one]);
    let two = int(&mut tree, 2, 2);

    tree.replace(one, two).unwrap();
    let wrapped = tree.add_node(NodeKind::UnaryPlus, span(1, 1), vec![one]);

    assert_eq!(tree.parent(one), Some(wrapped));
    assert_eq!(tree.to_sexpr(minus), "(UnaryMinus 2)");
}

#[test]
fn test_replace_without_parent_fails() {
    let mut tree = Tree::new();
    let orphan = int(&mut tree, 1, 4);
    let other = int(&mut tree, 2, 1);

    let error = tree.replace(orphan, other).err().unwrap();
    assert!(matches!(error.get_error(), ErrorImpl::InternalTree { .. }));
    assert_eq!(error.get_position().column, 4);
}

#[test]
fn test_replace_with_attached_node_fails() {
    let mut tree = Tree::new();
    let one = int(&mut tree, 1, 1);
    let two = int(&mut tree, 2, 2);
    tree.add_node(NodeKind::Plus, span(1, 1), vec![one, two]);

    let error = tree.replace(one, two).err().unwrap();
    assert_eq!(error.get_error_name(), "InternalTreeError");
    assert!(tree.parent(one).is_some());
}

#[test]
fn test_if_chain_traversal() {
    let mut tree = Tree::new();
    let a = tree.add_node(NodeKind::Variable { name: "a".into() }, span(1, 4), vec![]);
    let s1 = tree.add_node(NodeKind::Empty, span(1, 10), vec![]);
    let first = tree.add_node(NodeKind::If, span(1, 1), vec![a, s1]);
    let b = tree.add_node(NodeKind::Variable { name: "b".into() }, span(2, 4), vec![]);
    let s2 = tree.add_node(NodeKind::Empty, span(2, 10), vec![]);
    let second = tree.add_node(NodeKind::If, span(2, 1), vec![b, s2]);
    let s3 = tree.add_node(NodeKind::Empty, span(3, 1), vec![]);

    tree.add_child(first, &[second]).unwrap();
    tree.add_child(second, &[s3]).unwrap();

    assert_eq!(tree.if_next(first), Some(second));
    assert_eq!(tree.if_next(second), Some(s3));
    assert_eq!(tree.if_next(s3), None);
    assert_eq!(tree.if_chain(first), vec![first, second, s3]);
    assert_eq!(tree.to_sexpr(first), "(If a Empty (If b Empty Empty))");
}

#[test]
fn test_structural_equality_ignores_spans() {
    let mut left = Tree::new();
    let l1 = int(&mut left, 1, 1);
    let l2 = int(&mut left, 2, 3);
    let lroot = left.add_node(NodeKind::Minus, span(1, 2), vec![l1, l2]);

    let mut right = Tree::new();
    let r1 = int(&mut right, 1, 10);
    let r2 = int(&mut right, 2, 30);
    let rroot = right.add_node(NodeKind::Minus, span(4, 20), vec![r1, r2]);

    assert!(left.structurally_eq(lroot, &right, rroot));

    let r3 = int(&mut right, 3, 1);
    right.replace(r2, r3).unwrap();
    assert!(!left.structurally_eq(lroot, &right, rroot));
}

#[test]
fn test_sexpr_leaves() {
    let mut tree = Tree::new();
    let real = tree.add_node(NodeKind::RealConstant(2.5), span(1, 1), vec![]);
    let ch = tree.add_node(NodeKind::CharConstant('c'), span(1, 1), vec![]);
    let call = tree.add_node(NodeKind::Call { name: "f".into() }, span(1, 1), vec![real, ch]);
    let empty_call = tree.add_node(NodeKind::Call { name: "g".into() }, span(1, 1), vec![]);

    assert_eq!(tree.to_sexpr(call), "(Call f 2.5 'c')");
    assert_eq!(tree.to_sexpr(empty_call), "(Call g)");
}

#[test]
fn test_kind_predicates() {
    assert!(NodeKind::IntegerDivision.is_binary_operator());
    assert!(!NodeKind::Not.is_binary_operator());
    assert!(NodeKind::Not.is_unary_operator());
    assert!(NodeKind::Char.is_type_marker());
    assert!(!NodeKind::CharConstant('x').is_type_marker());
}

#[test]
fn test_replace_with_detached_ancestor_fails() {
    let mut tree = Tree::new();
    let one = int(&mut tree, 1, 2);
    let minus = tree.add_node(NodeKind::UnaryMinus, span(1, 1), vec![one]);
    let two = int(&mut tree, 2, 5);
    let plus = tree.add_node(NodeKind::Plus, span(1, 4), vec![two, minus]);
    tree.set_root(plus);

    let zero = int(&mut tree, 0, 1);
    tree.replace(minus, zero).unwrap();

    // `minus` is detached now but still owns `one`
    let error = tree.replace(one, minus).err().unwrap();
    assert_eq!(error.get_error_name(), "InternalTreeError");
    assert_eq!(tree.parent(minus), None);
    assert_eq!(tree.parent(one), Some(minus));
    assert_eq!(tree.to_sexpr(minus), "(UnaryMinus 1)");
    assert_eq!(tree.to_sexpr(plus), "(Plus 2 0)");
    assert!(tree.verify().is_ok());
}

#[test]
fn test_add_child_rejects_attached_nodes() {
    let mut tree = Tree::new();
    let one = int(&mut tree, 1, 1);
    let minus = tree.add_node(NodeKind::UnaryMinus, span(1, 1), vec![one]);
    let compound = tree.add_node(NodeKind::Compound, span(1, 1), vec![]);

    let error = tree.add_child(compound, &[one]).err().unwrap();
    assert!(matches!(error.get_error(), ErrorImpl::InternalTree { .. }));
    assert_eq!(tree.parent(one), Some(minus));
    assert!(tree.children(compound).is_empty());

    tree.set_root(compound);
    assert!(tree.add_child(minus, &[compound]).is_err());
}

#[test]
fn test_add_child_rejects_cycles() {
    let mut tree = Tree::new();
    let compound = tree.add_node(NodeKind::Compound, span(1, 1), vec![]);
    let inner = tree.add_node(NodeKind::Compound, span(2, 1), vec![]);
    tree.add_child(compound, &[inner]).unwrap();

    assert!(tree.add_child(compound, &[compound]).is_err());
    assert!(tree.add_child(inner, &[compound]).is_err());
    assert_eq!(tree.parent(compound), None);
    assert_eq!(tree.children(inner), &[] as &[NodeId]);
}
