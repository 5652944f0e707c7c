//! Member classification over tree-sitter TypeScript syntax trees.

use crate::diagnostics::Position;
use crate::order::member::{Accessibility, Member, MemberExtent, MemberKind, MemberType, TextRange};
use tree_sitter::Node;

/// Container node kinds whose body holds class members.
const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];
const INTERFACE_KINDS: &[&str] = &["interface_declaration"];

/// The member body of a class (or, when `include_interfaces`, interface)
/// declaration.
pub fn member_container<'t>(node: Node<'t>, include_interfaces: bool) -> Option<Node<'t>> {
    let kind = node.kind();
    let is_container =
        CLASS_KINDS.contains(&kind) || (include_interfaces && INTERFACE_KINDS.contains(&kind));
    if !is_container {
        return None;
    }
    node.child_by_field_name("body")
}

/// Member bodies of every class (and optionally interface) under `root`,
/// outermost first.
pub fn member_bodies<'t>(root: Node<'t>, include_interfaces: bool) -> Vec<Node<'t>> {
    let mut bodies = Vec::new();
    walk(root, &mut |node| {
        if let Some(body) = member_container(node, include_interfaces) {
            bodies.push(body);
        }
    });
    bodies
}

/// Pre-order walk over `node` and all of its descendants.
pub fn walk<'t>(node: Node<'t>, f: &mut impl FnMut(Node<'t>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, f);
    }
}

/// Classify every member of a class or interface body in declaration order.
///
/// Member ids are positions in the returned list. Static blocks, call and
/// construct signatures are not members.
pub fn class_members(body: Node, source: &str) -> Vec<Member> {
    let mut cursor = body.walk();
    let children: Vec<Node> = body.children(&mut cursor).collect();

    let mut members = Vec::new();
    for (i, node) in children.iter().enumerate() {
        let Some(shape) = Shape::of(node.kind()) else {
            continue;
        };
        let id = members.len();
        if let Some(member) = classify(id, shape, &children, i, source) {
            members.push(member);
        }
    }
    members
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    MethodDefinition,
    MethodSignature,
    AbstractMethodSignature,
    Field,
    PropertySignature,
    IndexSignature,
}

impl Shape {
    fn of(kind: &str) -> Option<Self> {
        Some(match kind {
            "method_definition" => Shape::MethodDefinition,
            "method_signature" => Shape::MethodSignature,
            "abstract_method_signature" => Shape::AbstractMethodSignature,
            "public_field_definition" | "field_definition" => Shape::Field,
            "property_signature" => Shape::PropertySignature,
            "index_signature" => Shape::IndexSignature,
            _ => return None,
        })
    }

    fn member_type(self) -> MemberType {
        match self {
            Shape::MethodDefinition | Shape::MethodSignature | Shape::AbstractMethodSignature => {
                MemberType::Method
            }
            Shape::Field | Shape::PropertySignature | Shape::IndexSignature => MemberType::Property,
        }
    }
}

#[derive(Debug, Default)]
struct Modifiers {
    is_static: bool,
    is_async: bool,
    is_abstract: bool,
    is_readonly: bool,
    is_override: bool,
    accessibility: Option<Accessibility>,
    accessor: Option<MemberKind>,
}

fn classify(id: usize, shape: Shape, siblings: &[Node], at: usize, source: &str) -> Option<Member> {
    let node = siblings[at];

    let (name, name_node) = match shape {
        Shape::IndexSignature => (index_signature_name(node, source), None),
        _ => {
            let name_node = node.child_by_field_name("name")?;
            (text(source, name_node).to_string(), Some(name_node))
        }
    };

    let modifiers = modifiers(node, name_node, source);
    let member_type = shape.member_type();
    let kind = match (member_type, modifiers.accessor) {
        (_, Some(accessor)) => accessor,
        (MemberType::Method, None) if name == "constructor" && !modifiers.is_static => {
            MemberKind::Constructor
        }
        (MemberType::Method, None) => MemberKind::Method,
        (MemberType::Property, None) => MemberKind::Field,
    };

    let decorator_nodes = decorators(siblings, at);
    let mut member = Member::new(id, name, member_type, kind);
    member.is_static = modifiers.is_static;
    member.is_async = modifiers.is_async;
    member.is_abstract = modifiers.is_abstract || shape == Shape::AbstractMethodSignature;
    member.is_readonly = modifiers.is_readonly;
    member.is_override = modifiers.is_override;
    member.accessibility = modifiers.accessibility.unwrap_or_default();
    member.decorators = decorator_nodes
        .iter()
        .filter_map(|d| decorator_name(*d, source))
        .collect();
    if shape == Shape::Field {
        member.property_type = node
            .child_by_field_name("value")
            .map(|value| estree_type(value).into_owned());
    }
    member.extent = extent(shape, siblings, at, decorator_nodes.first().copied());

    Some(member)
}

/// Modifier keywords written before the member name.
fn modifiers(node: Node, name_node: Option<Node>, source: &str) -> Modifiers {
    let mut found = Modifiers::default();
    let name_start = name_node.map_or(usize::MAX, |n| n.start_byte());

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.start_byte() >= name_start {
            break;
        }
        match child.kind() {
            "static" => found.is_static = true,
            "static get" => {
                found.is_static = true;
                found.accessor = Some(MemberKind::Get);
            }
            "async" => found.is_async = true,
            "get" => found.accessor = Some(MemberKind::Get),
            "set" => found.accessor = Some(MemberKind::Set),
            "abstract" => found.is_abstract = true,
            "readonly" => found.is_readonly = true,
            "override_modifier" => found.is_override = true,
            "accessibility_modifier" => {
                found.accessibility = Accessibility::parse(text(source, child).trim());
            }
            _ => {}
        }
    }
    found
}

/// Decorators of the member at `siblings[at]`, in source order.
///
/// Method decorators are siblings directly in front of the member; field
/// decorators are children of the field.
fn decorators<'t>(siblings: &[Node<'t>], at: usize) -> Vec<Node<'t>> {
    let node = siblings[at];
    let leading = siblings[..at]
        .iter()
        .rev()
        .take_while(|n| n.kind() == "decorator")
        .count();

    let mut found: Vec<Node<'t>> = siblings[at - leading..at].to_vec();
    let mut cursor = node.walk();
    found.extend(
        node.children(&mut cursor)
            .filter(|child| child.kind() == "decorator"),
    );
    found
}

/// Identifier of `@name`, `@name(...)`, or `@ns.name`.
fn decorator_name(decorator: Node, source: &str) -> Option<String> {
    let expr = decorator.named_child(0)?;
    let target = match expr.kind() {
        "call_expression" => expr.child_by_field_name("function")?,
        _ => expr,
    };
    Some(text(source, target).to_string())
}

fn extent(shape: Shape, siblings: &[Node], at: usize, first_decorator: Option<Node>) -> MemberExtent {
    let node = siblings[at];
    let first = first_decorator
        .filter(|d| d.start_byte() < node.start_byte())
        .unwrap_or(node);

    let mut last = node;
    let mut next_index = at + 1;
    if shape != Shape::MethodDefinition
        && let Some(separator) = siblings.get(at + 1)
        && matches!(separator.kind(), ";" | ",")
    {
        last = *separator;
        next_index += 1;
    }

    let node_range = TextRange {
        start_byte: first.start_byte(),
        end_byte: last.end_byte(),
        start: position(first.start_position()),
        end: position(last.end_position()),
    };

    let leading_comment = siblings[..siblings.len().min(at + 1)]
        .iter()
        .rev()
        .find(|n| n.start_byte() < first.start_byte())
        .filter(|n| n.kind() == "comment")
        .map(|n| range(*n));

    let next_token = siblings[next_index.min(siblings.len())..]
        .iter()
        .find(|n| n.kind() != "comment")
        .or_else(|| siblings.last())
        .map_or(node_range, |n| range(*n));

    MemberExtent {
        node: node_range,
        leading_comment,
        next_token,
    }
}

fn index_signature_name(node: Node, source: &str) -> String {
    let raw = text(source, node);
    match (raw.find('['), raw.find(']')) {
        (Some(open), Some(close)) if open < close => raw[open..=close].to_string(),
        _ => raw.to_string(),
    }
}

/// ESTree node type name for an initializer expression.
fn estree_type(value: Node) -> std::borrow::Cow<'static, str> {
    let name = match value.kind() {
        "parenthesized_expression" => {
            return match value.named_child(0) {
                Some(inner) => estree_type(inner),
                None => "ParenthesizedExpression".into(),
            };
        }
        "number" | "string" | "true" | "false" | "null" | "regex" => "Literal",
        "template_string" => "TemplateLiteral",
        "arrow_function" => "ArrowFunctionExpression",
        "function_expression" | "function" | "generator_function" => "FunctionExpression",
        "object" => "ObjectExpression",
        "array" => "ArrayExpression",
        "call_expression" => "CallExpression",
        "new_expression" => "NewExpression",
        "identifier" | "undefined" => "Identifier",
        "member_expression" | "subscript_expression" => "MemberExpression",
        "class" => "ClassExpression",
        "this" => "ThisExpression",
        "binary_expression" => "BinaryExpression",
        "unary_expression" => "UnaryExpression",
        "update_expression" => "UpdateExpression",
        "ternary_expression" => "ConditionalExpression",
        "assignment_expression" => "AssignmentExpression",
        "await_expression" => "AwaitExpression",
        "as_expression" => "TSAsExpression",
        "satisfies_expression" => "TSSatisfiesExpression",
        "non_null_expression" => "TSNonNullExpression",
        other => return pascal_case(other).into(),
    };
    name.into()
}

fn pascal_case(kind: &str) -> String {
    kind.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect()
}

fn text<'a>(source: &'a str, node: Node) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn position(point: tree_sitter::Point) -> Position {
    Position {
        row: point.row + 1,
        column: point.column + 1,
    }
}

fn range(node: Node) -> TextRange {
    TextRange {
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        start: position(node.start_position()),
        end: position(node.end_position()),
    }
}
