//! Unit tests for scopes and the declaration pass.

use std::rc::Rc;

use super::{
    builder::build_scopes,
    scope::ScopeTree,
    symbols::{ProcedureSymbol, Symbol, SymbolKind, VariableSymbol},
};
use crate::{
    ast::ast::NodeId,
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    values::value::{DataType, Value, ValueKind},
    Position, Span,
};

fn span(line: u32) -> Span {
    let file = Rc::new(String::from("test.pas"));
    Span {
        start: Position::new(line, 5, Rc::clone(&file)),
        end: Position::new(line, 6, file),
    }
}

fn variable(name: &str, data_type: DataType) -> Symbol {
    Symbol::Variable(VariableSymbol::new(name.to_string(), data_type, span(1)))
}

fn scopes_for(source: &str) -> ScopeTree {
    let tokens = tokenize(source.to_string(), Some("test.pas".to_string())).unwrap();
    build_scopes(&parse(tokens).unwrap()).unwrap()
}

#[test]
fn test_insert_seeds_default_value() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    scopes.insert(global, variable("count", DataType::Integer)).unwrap();

    assert_eq!(scopes.resolve_value(global, "count", None), Some(&Value::Integer(0)));
    assert_eq!(scopes.resolve(global, "count", None).unwrap().owner(), Some(global));
}

#[test]
fn test_redeclaration_in_same_scope_fails() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    scopes.insert(global, variable("x", DataType::Integer)).unwrap();

    let error = scopes
        .insert(global, Symbol::Variable(VariableSymbol::new("X".into(), DataType::Real, span(2))))
        .err()
        .unwrap();
    assert_eq!(error.get_error(), &ErrorImpl::Redeclaration { name: String::from("X") });
    assert_eq!(error.get_position().line, 2);
    // the first declaration is untouched
    assert_eq!(scopes.resolve_value(global, "x", None), Some(&Value::Integer(0)));
}

#[test]
fn test_shadowing_in_child_scope() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let inner = scopes.add_child(global, "inner");

    scopes.insert(global, variable("x", DataType::Integer)).unwrap();
    scopes.insert(inner, variable("x", DataType::Boolean)).unwrap();

    assert_eq!(scopes.resolve_value(inner, "x", None), Some(&Value::Boolean(false)));
    assert_eq!(scopes.resolve_value(global, "x", None), Some(&Value::Integer(0)));
}

#[test]
fn test_resolution_walks_outward_and_is_case_insensitive() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let outer = scopes.add_child(global, "Outer");
    let inner = scopes.add_child(outer, "inner");
    scopes.insert(global, variable("Total", DataType::Real)).unwrap();

    let symbol = scopes.resolve(inner, "TOTAL", None).unwrap();
    assert_eq!(symbol.name(), "Total");
    assert_eq!(symbol.owner(), Some(global));
    assert_eq!(scopes.resolve_value(inner, "total", Some(ValueKind::Real)), Some(&Value::Real(0.0)));
    assert_eq!(scopes.resolve_value(inner, "total", Some(ValueKind::Integer)), None);
    assert!(scopes.resolve(inner, "missing", None).is_none());

    assert_eq!(scopes.child(global, "OUTER"), Some(outer));
    assert_eq!(scopes.child(global, "inner"), None);
    assert_eq!(scopes.parent(inner), Some(outer));
}

#[test]
fn test_this_scope_only_does_not_walk() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let inner = scopes.add_child(global, "inner");
    scopes.insert(global, variable("x", DataType::Char)).unwrap();

    assert_eq!(scopes.resolve_value_this_scope_only(inner, "x", None), None);
    assert_eq!(scopes.resolve_value_this_scope_only(global, "X", None), Some(&Value::Char('\0')));
    assert_eq!(scopes.resolve_value_this_scope_only(global, "x", Some(ValueKind::Integer)), None);
}

#[test]
fn test_filter_skips_to_outer_declaration() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let inner = scopes.add_child(global, "inner");
    let procedure = ProcedureSymbol::new("p".into(), vec![], NodeId(0), span(1));
    scopes.insert(global, Symbol::Procedure(procedure)).unwrap();
    scopes.insert(inner, variable("p", DataType::Integer)).unwrap();

    assert_eq!(scopes.resolve(inner, "p", None).unwrap().kind(), SymbolKind::Variable);
    let found = scopes.resolve(inner, "p", Some(SymbolKind::Procedure)).unwrap();
    assert_eq!(found.owner(), Some(global));
}

#[test]
fn test_procedures_have_no_value() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let procedure = ProcedureSymbol::new("p".into(), vec![], NodeId(0), span(1));
    scopes.insert(global, Symbol::Procedure(procedure)).unwrap();

    assert_eq!(scopes.resolve_value(global, "p", None), None);
    let error = scopes.change_value(global, "p", Value::Integer(1)).err().unwrap();
    assert_eq!(error.get_error(), &ErrorImpl::NotAVariable { name: String::from("p") });
}

#[test]
fn test_procedure_hides_outer_variable_from_writes() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let inner = scopes.add_child(global, "inner");
    scopes.insert(global, variable("x", DataType::Integer)).unwrap();
    scopes.insert(global, variable("v", DataType::array(1, 2, DataType::Integer))).unwrap();
    let x = ProcedureSymbol::new("X".into(), vec![], NodeId(0), span(2));
    let v = ProcedureSymbol::new("v".into(), vec![], NodeId(0), span(3));
    scopes.insert(inner, Symbol::Procedure(x)).unwrap();
    scopes.insert(inner, Symbol::Procedure(v)).unwrap();

    let error = scopes.change_value(inner, "x", Value::Integer(99)).err().unwrap();
    assert_eq!(error.get_error_name(), "NotAVariableError");
    assert_eq!(scopes.resolve_value_this_scope_only(global, "x", None), Some(&Value::Integer(0)));

    let error = scopes
        .change_array_value(inner, "v", &[Value::Integer(1)], Value::Integer(5))
        .err()
        .unwrap();
    assert_eq!(error.get_error_name(), "NotAVariableError");

    // outside the procedure the variables are still writable
    scopes.change_value(global, "x", Value::Integer(1)).unwrap();
    assert_eq!(scopes.resolve_value(global, "x", None), Some(&Value::Integer(1)));
}

#[test]
fn test_change_value_writes_declaring_scope() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let inner = scopes.add_child(global, "inner");
    scopes.insert(global, variable("x", DataType::Integer)).unwrap();

    scopes.change_value(inner, "X", Value::Integer(42)).unwrap();

    assert_eq!(scopes.resolve_value_this_scope_only(global, "x", None), Some(&Value::Integer(42)));
    assert_eq!(scopes.resolve_value_this_scope_only(inner, "x", None), None);
}

#[test]
fn test_change_value_of_unknown_name() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();

    let error = scopes.change_value(global, "ghost", Value::Boolean(true)).err().unwrap();
    assert_eq!(error.get_error(), &ErrorImpl::UndeclaredIdentifier { name: String::from("ghost") });
}

#[test]
fn test_change_array_value_in_place() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    let inner = scopes.add_child(global, "inner");
    let grid = DataType::array(0, 1, DataType::array(1, 3, DataType::Integer));
    scopes.insert(global, variable("grid", grid)).unwrap();

    let at = [Value::Integer(1), Value::Integer(3)];
    scopes.change_array_value(inner, "grid", &at, Value::Integer(7)).unwrap();

    let Some(Value::Array(array)) = scopes.resolve_value(inner, "grid", Some(ValueKind::Array)) else {
        panic!("grid should hold an array");
    };
    assert_eq!(array.get(&at).unwrap(), &Value::Integer(7));
    assert_eq!(array.get(&[Value::Integer(0), Value::Integer(3)]).unwrap(), &Value::Integer(0));
}

#[test]
fn test_change_array_value_errors() {
    let mut scopes = ScopeTree::new("main");
    let global = scopes.global();
    scopes.insert(global, variable("n", DataType::Integer)).unwrap();
    scopes.insert(global, variable("v", DataType::array(1, 2, DataType::Real))).unwrap();
    scopes.insert(global, variable("none", DataType::array(2, 1, DataType::Real))).unwrap();

    let not_array = scopes.change_array_value(global, "n", &[Value::Integer(1)], Value::Integer(1));
    assert_eq!(not_array.err().unwrap().get_error_name(), "NotAnArrayError");

    let out_of_range = scopes.change_array_value(global, "v", &[Value::Integer(3)], Value::Real(1.0));
    assert_eq!(out_of_range.err().unwrap().get_error_name(), "IndexError");

    let too_deep = scopes.change_array_value(
        global,
        "v",
        &[Value::Integer(1), Value::Integer(1)],
        Value::Real(1.0),
    );
    assert_eq!(too_deep.err().unwrap().get_error_name(), "IndexError");

    let empty = scopes.change_array_value(global, "none", &[Value::Integer(1)], Value::Real(1.0));
    assert_eq!(empty.err().unwrap().get_error_name(), "IndexError");

    let missing = scopes.change_array_value(global, "w", &[Value::Integer(1)], Value::Real(1.0));
    assert_eq!(missing.err().unwrap().get_error_name(), "UndeclaredIdentifierError");
}

#[test]
fn test_build_scopes_from_program() {
    let scopes = scopes_for(
        "program Demo;
var a: integer;
procedure Outer(n: integer);
var a: real;
  procedure inner;
  begin end;
begin end;
begin end.",
    );
    let global = scopes.global();
    assert_eq!(scopes.name(global), "Demo");
    assert_eq!(scopes.len(), 3);

    let outer = scopes.child(global, "outer").unwrap();
    let inner = scopes.child(outer, "INNER").unwrap();

    let Some(Symbol::Procedure(procedure)) = scopes.resolve(global, "outer", Some(SymbolKind::Procedure)) else {
        panic!("outer should be a procedure");
    };
    assert_eq!(procedure.params.len(), 1);
    assert_eq!(procedure.params[0].data_type, DataType::Integer);

    assert_eq!(scopes.resolve_value(inner, "a", None), Some(&Value::Real(0.0)));
    assert_eq!(scopes.resolve_value(global, "a", None), Some(&Value::Integer(0)));
    assert_eq!(scopes.resolve_value_this_scope_only(outer, "n", None), Some(&Value::Integer(0)));
    assert!(scopes.resolve(inner, "inner", Some(SymbolKind::Procedure)).is_some());
}

#[test]
fn test_build_scopes_reports_redeclaration() {
    let tokens = tokenize(
        "program p;\nvar x: integer;\n    X: char;\nbegin end.".to_string(),
        Some("test.pas".to_string()),
    )
    .unwrap();
    let tree = parse(tokens).unwrap();

    let error = build_scopes(&tree).err().unwrap();
    assert_eq!(error.get_error_name(), "RedeclarationError");
    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_parameter_clashing_with_local_is_redeclaration() {
    let tokens = tokenize(
        "program p; procedure q(a: integer); var a: integer; begin end; begin end.".to_string(),
        None,
    )
    .unwrap();

    let error = build_scopes(&parse(tokens).unwrap()).err().unwrap();
    assert_eq!(error.get_error(), &ErrorImpl::Redeclaration { name: String::from("a") });
}

#[test]
fn test_scope_tree_display() {
    let scopes = scopes_for("program p; var x: boolean; procedure q(c: char); begin end; begin end.");

    assert_eq!(
        scopes.to_string(),
        "scope p\n  var x: boolean = false\n  procedure q(c: char)\n  scope q\n    var c: char = '\\0'\n"
    );
}
