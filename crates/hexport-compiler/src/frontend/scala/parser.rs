//! Scala parser using tree-sitter.

use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::diagnostic::{ParseError, Span};
use crate::ir::Variance;
use super::ast::*;

/// Scala parser.
pub struct ScalaParser {
    parser: Parser,
}

impl ScalaParser {
    /// Creates a new Scala parser.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_scala::LANGUAGE.into())
            .map_err(|_| ParseError::ParserInitFailed)?;
        Ok(Self { parser })
    }

    /// Parses a Scala source file.
    ///
    /// tree-sitter recovers from malformed input, so this only fails when no
    /// tree is produced at all. Recovered regions are recorded in
    /// [`SyntaxTree::syntax_errors`] and rejected by the converter.
    pub fn parse(&mut self, source: &str, path: &Path) -> Result<SyntaxTree, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::ParseFailed { path: path.to_path_buf() })?;

        let root = tree.root_node();
        let mut visitor = Visitor::new(source, path);
        visitor.visit_compilation_unit(root);
        if root.has_error() {
            visitor.collect_errors(root);
        }

        Ok(visitor.tree)
    }
}

/// AST visitor that extracts declarations from tree-sitter nodes.
struct Visitor<'a> {
    source: &'a str,
    path: &'a Path,
    tree: SyntaxTree,
}

impl<'a> Visitor<'a> {
    fn new(source: &'a str, path: &'a Path) -> Self {
        Self {
            source,
            path,
            tree: SyntaxTree::new(path),
        }
    }

    fn span(&self, node: Node) -> Span {
        Span::new(
            self.path.to_path_buf(),
            node.start_position().row,
            node.start_position().column,
            node.end_position().row,
            node.end_position().column,
        )
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Node text with whitespace runs collapsed.
    fn compact_text(&self, node: Node) -> String {
        self.node_text(node).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Identifier text with backquotes removed.
    fn identifier(&self, node: Node) -> String {
        self.node_text(node).trim_matches('`').to_string()
    }

    fn visit_compilation_unit(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => self.visit_package(child),
                "import_declaration" => self.visit_import(child),
                _ => {
                    if let Some(decl) = self.visit_declaration(child) {
                        self.tree.declarations.push(decl);
                    }
                }
            }
        }
    }

    fn visit_package(&mut self, node: Node) {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.compact_text(n).replace(' ', ""))
            .unwrap_or_default();
        if !name.is_empty() {
            self.tree.packages.push(name);
        }

        // `package a { ... }` carries its declarations in a body
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "template_body" {
                self.visit_compilation_unit(child);
            }
        }
    }

    fn visit_import(&mut self, node: Node) {
        let text = self.compact_text(node);
        let path = text.strip_prefix("import").unwrap_or(&text).trim().to_string();
        self.tree.imports.push(ImportDecl {
            path,
            span: self.span(node),
        });
    }

    fn visit_declaration(&self, node: Node) -> Option<Declaration> {
        let kind = match node.kind() {
            "class_definition" => DeclKind::Class,
            "trait_definition" => DeclKind::Trait,
            "object_definition" => DeclKind::Object,
            "enum_definition" => DeclKind::Enum,
            _ => return None,
        };

        let name = node
            .child_by_field_name("name")
            .map(|n| self.identifier(n))
            .unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let mut decl = Declaration {
            kind,
            name,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            parameter_lists: Vec::new(),
            extends: Vec::new(),
            members: Vec::new(),
            enum_cases: Vec::new(),
            span: self.span(node),
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "case" => decl.modifiers.case = true,
                "modifiers" => self.visit_modifiers(child, &mut decl.modifiers),
                "annotation" => decl.annotations.push(self.annotation_name(child)),
                "type_parameters" => decl.type_parameters = self.visit_type_parameters(child),
                "class_parameters" => decl.parameter_lists.push(self.visit_parameter_list(child)),
                "extends_clause" => decl.extends = self.visit_extends(child),
                "template_body" => decl.members = self.visit_template_body(child),
                "enum_body" => {
                    let (cases, members) = self.visit_enum_body(child);
                    decl.enum_cases = cases;
                    decl.members = members;
                }
                _ => {}
            }
        }

        Some(decl)
    }

    fn visit_modifiers(&self, node: Node, modifiers: &mut Modifiers) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "sealed" => modifiers.sealed = true,
                "abstract" => modifiers.is_abstract = true,
                "override" => modifiers.is_override = true,
                "case" => modifiers.case = true,
                "access_modifier" => {
                    let text = self.node_text(child);
                    if text.starts_with("private") {
                        modifiers.private = true;
                    } else if text.starts_with("protected") {
                        modifiers.protected = true;
                    }
                }
                _ => {}
            }
        }
    }

    fn annotation_name(&self, node: Node) -> String {
        if let Some(name) = node.child_by_field_name("name") {
            return self.compact_text(name);
        }
        let text = self.compact_text(node);
        text.trim_start_matches('@')
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or("")
            .to_string()
    }

    fn visit_type_parameters(&self, node: Node) -> Vec<TypeParam> {
        let mut params = Vec::new();
        self.absorb_type_parameters(node, &mut params);
        params
    }

    /// Type parameter parts appear flattened in the list (name, nested
    /// holes, bounds), so bounds attach to the most recent name. Holes of a
    /// higher-kinded parameter (`F[_]`) are not parameters themselves.
    fn absorb_type_parameters(&self, node: Node, params: &mut Vec<TypeParam>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" | "type_identifier" | "wildcard" => params.push(TypeParam {
                    name: self.identifier(child),
                    bounds: Vec::new(),
                    variance: Variance::Invariant,
                }),
                "covariant_type_parameter" | "contravariant_type_parameter" => {
                    let first = params.len();
                    self.absorb_type_parameters(child, params);
                    if let Some(param) = params.get_mut(first) {
                        param.variance = if child.kind() == "covariant_type_parameter" {
                            Variance::Covariant
                        } else {
                            Variance::Contravariant
                        };
                    }
                }
                "type_parameters" => {}
                "upper_bound" | "context_bound" | "view_bound" => {
                    let bound = child
                        .child_by_field_name("type")
                        .or_else(|| last_named_child(child))
                        .map(|t| self.visit_type(t));
                    if let (Some(bound), Some(last)) = (bound, params.last_mut()) {
                        last.bounds.push(bound);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_parameter_list(&self, node: Node) -> ParameterList {
        let mut list = ParameterList::default();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "implicit" | "using" => list.implicit = true,
                "class_parameter" | "parameter" => {
                    if let Some(param) = self.visit_parameter(child) {
                        list.parameters.push(param);
                    }
                }
                _ => {}
            }
        }
        list
    }

    fn visit_parameter(&self, node: Node) -> Option<Parameter> {
        let name_node = node.child_by_field_name("name").or_else(|| {
            let mut cursor = node.walk();
            let found = node.named_children(&mut cursor).find(|c| c.kind() == "identifier");
            found
        })?;
        let name = self.identifier(name_node);
        if name.is_empty() {
            return None;
        }

        let mut param = Parameter {
            name,
            type_node: node.child_by_field_name("type").map(|t| self.visit_type(t)),
            binding: None,
            modifiers: Modifiers::default(),
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "val" => param.binding = Some(Binding::Val),
                "var" => param.binding = Some(Binding::Var),
                "modifiers" => self.visit_modifiers(child, &mut param.modifiers),
                _ => {}
            }
        }

        Some(param)
    }

    fn visit_extends(&self, node: Node) -> Vec<TypeNode> {
        let mut types = Vec::new();
        self.collect_supertypes(node, &mut types);
        types
    }

    /// `A(args) with B` may arrive as one compound node; each part is a
    /// supertype of its own.
    fn collect_supertypes(&self, node: Node, types: &mut Vec<TypeNode>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "arguments" | "refinement" | "template_body" => {}
                "compound_type" | "constructor_application" => self.collect_supertypes(child, types),
                _ => types.push(self.visit_type(child)),
            }
        }
    }

    fn visit_template_body(&self, node: Node) -> Vec<Member> {
        let mut members = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if let Some(member) = self.visit_member(child) {
                members.push(member);
            }
        }
        members
    }

    fn visit_member(&self, node: Node) -> Option<Member> {
        match node.kind() {
            "function_definition" | "function_declaration" => {
                self.visit_function(node).map(Member::Method)
            }
            "val_definition" | "var_definition" | "val_declaration" | "var_declaration" => {
                self.visit_value(node).map(Member::Value)
            }
            _ => self.visit_declaration(node).map(Member::Nested),
        }
    }

    fn visit_function(&self, node: Node) -> Option<MethodDecl> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.identifier(n))
            .unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let mut method = MethodDecl {
            name,
            modifiers: Modifiers::default(),
            type_parameters: Vec::new(),
            parameter_lists: Vec::new(),
            return_type: node.child_by_field_name("return_type").map(|t| self.visit_type(t)),
            has_body: node.kind() == "function_definition",
            span: self.span(node),
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "modifiers" => self.visit_modifiers(child, &mut method.modifiers),
                "type_parameters" => method.type_parameters = self.visit_type_parameters(child),
                "parameters" => method.parameter_lists.push(self.visit_parameter_list(child)),
                _ => {}
            }
        }

        Some(method)
    }

    fn visit_value(&self, node: Node) -> Option<ValueDecl> {
        let binding = if node.kind().starts_with("var") {
            Binding::Var
        } else {
            Binding::Val
        };

        // Only simple `val name` patterns become members; destructuring is skipped.
        let name_node = node
            .child_by_field_name("pattern")
            .or_else(|| node.child_by_field_name("name"))?;
        if name_node.kind() != "identifier" {
            return None;
        }

        let mut modifiers = Modifiers::default();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "modifiers" {
                self.visit_modifiers(child, &mut modifiers);
            }
        }

        Some(ValueDecl {
            name: self.identifier(name_node),
            binding,
            modifiers,
            type_node: node.child_by_field_name("type").map(|t| self.visit_type(t)),
        })
    }

    fn visit_enum_body(&self, node: Node) -> (Vec<EnumCase>, Vec<Member>) {
        let mut cases = Vec::new();
        let mut members = Vec::new();

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "enum_case_definitions" {
                let mut case_cursor = child.walk();
                for case in child.named_children(&mut case_cursor) {
                    if let Some(enum_case) = self.visit_enum_case(case) {
                        cases.push(enum_case);
                    }
                }
            } else if let Some(member) = self.visit_member(child) {
                members.push(member);
            }
        }

        (cases, members)
    }

    fn visit_enum_case(&self, node: Node) -> Option<EnumCase> {
        if node.kind() != "simple_enum_case" && node.kind() != "full_enum_case" {
            return None;
        }
        let name = node
            .child_by_field_name("name")
            .map(|n| self.identifier(n))
            .unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let mut parameter_lists = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "class_parameters" {
                parameter_lists.push(self.visit_parameter_list(child));
            }
        }

        Some(EnumCase { name, parameter_lists })
    }

    fn visit_type(&self, node: Node) -> TypeNode {
        match node.kind() {
            "type_identifier" | "identifier" => TypeNode::reference(self.identifier(node)),
            "stable_type_identifier" => TypeNode::reference(self.compact_text(node).replace(' ', "")),
            "generic_type" => self.visit_generic_type(node),
            "function_type" => self.visit_function_type(node),
            "lazy_parameter_type" => match node.child_by_field_name("type").or_else(|| last_named_child(node)) {
                Some(inner) => TypeNode::ByName(Box::new(self.visit_type(inner))),
                None => TypeNode::Raw(self.compact_text(node)),
            },
            "repeated_parameter_type" => match first_named_child(node) {
                Some(inner) => TypeNode::Repeated(Box::new(self.visit_type(inner))),
                None => TypeNode::Raw(self.compact_text(node)),
            },
            "annotated_type" => match first_named_child(node) {
                Some(inner) => self.visit_type(inner),
                None => TypeNode::Raw(self.compact_text(node)),
            },
            _ => TypeNode::Raw(self.compact_text(node)),
        }
    }

    fn visit_generic_type(&self, node: Node) -> TypeNode {
        let base = node
            .child_by_field_name("type")
            .or_else(|| first_named_child(node))
            .map(|b| self.visit_type(b));

        let arguments_node = node.child_by_field_name("type_arguments").or_else(|| {
            let mut cursor = node.walk();
            let found = node.named_children(&mut cursor).find(|c| c.kind() == "type_arguments");
            found
        });

        let mut arguments = Vec::new();
        if let Some(args) = arguments_node {
            let mut cursor = args.walk();
            for arg in args.named_children(&mut cursor) {
                arguments.push(self.visit_type(arg));
            }
        }

        match base {
            Some(TypeNode::Reference { name, .. }) => TypeNode::Reference { name, arguments },
            _ => TypeNode::Raw(self.compact_text(node)),
        }
    }

    fn visit_function_type(&self, node: Node) -> TypeNode {
        let result = match node.child_by_field_name("return_type") {
            Some(result) => self.visit_type(result),
            None => return TypeNode::Raw(self.compact_text(node)),
        };

        let mut parameters = Vec::new();
        if let Some(params) = node.child_by_field_name("parameter_types") {
            if params.kind() == "parameter_types" {
                let mut cursor = params.walk();
                for param in params.named_children(&mut cursor) {
                    parameters.push(self.visit_type(param));
                }
            } else {
                parameters.push(self.visit_type(params));
            }
        }

        TypeNode::Function {
            parameters,
            result: Box::new(result),
        }
    }

    /// Records the outermost erroneous or missing nodes.
    fn collect_errors(&mut self, node: Node) {
        if node.is_error() || node.is_missing() {
            let text = self.compact_text(node);
            let snippet: String = text.chars().take(40).collect();
            self.tree.syntax_errors.push(SyntaxErrorNode {
                span: self.span(node),
                text: if snippet.is_empty() { node.kind().to_string() } else { snippet },
            });
            return;
        }
        if !node.has_error() {
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_errors(child);
        }
    }
}

fn first_named_child(node: Node) -> Option<Node> {
    node.named_child(0)
}

fn last_named_child(node: Node) -> Option<Node> {
    node.named_child(node.named_child_count().checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxTree {
        let mut parser = ScalaParser::new().unwrap();
        parser.parse(source, Path::new("Test.scala")).unwrap()
    }

    #[test]
    fn parses_package_and_imports() {
        let tree = parse(
            r#"
package com.acme.users

import cats.effect.IO

case class UserId(value: String) extends AnyVal
"#,
        );
        assert_eq!(tree.packages, vec!["com.acme.users".to_string()]);
        assert_eq!(tree.imports.len(), 1);
        assert_eq!(tree.imports[0].path, "cats.effect.IO");
        assert!(tree.syntax_errors.is_empty());
    }

    #[test]
    fn parses_case_class_with_extends() {
        let tree = parse("case class UserId(value: String) extends AnyVal\n");
        let decl = &tree.declarations[0];
        assert_eq!(decl.kind, DeclKind::Class);
        assert_eq!(decl.name, "UserId");
        assert!(decl.is_case());
        assert_eq!(decl.primary_parameters().len(), 1);
        assert_eq!(decl.primary_parameters()[0].name, "value");
        assert_eq!(
            decl.primary_parameters()[0].type_node,
            Some(TypeNode::reference("String"))
        );
        assert_eq!(decl.extends, vec![TypeNode::reference("AnyVal")]);
    }

    #[test]
    fn parses_sealed_trait_and_case_object() {
        let tree = parse(
            r#"
sealed trait Status
case object Active extends Status
"#,
        );
        assert_eq!(tree.declarations.len(), 2);
        assert_eq!(tree.declarations[0].kind, DeclKind::Trait);
        assert!(tree.declarations[0].is_sealed());
        assert_eq!(tree.declarations[1].kind, DeclKind::Object);
        assert!(tree.declarations[1].is_case());
        assert_eq!(tree.declarations[1].extends, vec![TypeNode::reference("Status")]);
    }

    #[test]
    fn parses_abstract_methods_with_generic_types() {
        let tree = parse(
            r#"
trait UserRepository {
  def find(id: UserId): IO[Option[User]]
  def save(user: User): IO[Unit]
}
"#,
        );
        let decl = &tree.declarations[0];
        let methods: Vec<_> = decl.methods().collect();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name, "find");
        assert!(!methods[0].has_body);
        assert_eq!(methods[0].parameter_lists[0].parameters[0].name, "id");
        assert_eq!(
            methods[0].return_type,
            Some(TypeNode::generic(
                "IO",
                vec![TypeNode::generic("Option", vec![TypeNode::reference("User")])]
            ))
        );
    }

    #[test]
    fn keeps_every_parameter_list() {
        let tree = parse(
            r#"
class RegisterUserService(repo: UserRepository, clock: Clock)(implicit ec: ExecutionContext) {
  def register(email: Email)(implicit trace: Trace): Future[User] = ???
}
"#,
        );
        let decl = &tree.declarations[0];
        assert_eq!(decl.parameter_lists.len(), 2);
        assert!(!decl.parameter_lists[0].implicit);
        assert!(decl.parameter_lists[1].implicit);

        let method = decl.methods().next().unwrap();
        assert!(method.has_body);
        assert_eq!(method.parameter_lists.len(), 2);
    }

    #[test]
    fn records_type_parameter_variance() {
        let tree = parse("sealed trait Codec[+A, -B, F[_], C <: Entity]\n");
        let params = &tree.declarations[0].type_parameters;
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "F", "C"]);
        assert_eq!(params[0].variance, Variance::Covariant);
        assert_eq!(params[1].variance, Variance::Contravariant);
        assert_eq!(params[2].variance, Variance::Invariant);
        assert_eq!(params[3].bounds, vec![TypeNode::reference("Entity")]);
    }

    #[test]
    fn records_syntax_errors() {
        let tree = parse("case class Broken(value: String extends\n");
        assert!(!tree.syntax_errors.is_empty());
    }
}
