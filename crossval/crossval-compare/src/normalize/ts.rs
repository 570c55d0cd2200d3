//! Tree-sitter side of normalization: rename toward the PSI vocabulary,
//! elide skip-set nodes with promotion, and run the structural alignment
//! rules that reshape tree-sitter's nesting conventions into PSI's.

use crossval_parser::Node;

use crate::vocab::CorrespondenceTable;

/// Normalize a tree-sitter tree into the PSI vocabulary.
///
/// Returns `None` when the whole tree is elided, which happens when no node
/// in it has a composite PSI counterpart.
pub fn normalize_ts(table: &CorrespondenceTable, root: &Node) -> Option<Node> {
    normalize_one(table, root)
}

/// Normalize one child position, producing zero or more replacement nodes.
///
/// An elided node contributes its own (recursively normalized) children in
/// its place, so promotion splices grandchildren into the parent's child
/// list rather than leaving a hole.
fn normalize_child(table: &CorrespondenceTable, node: &Node) -> Vec<Node> {
    match normalize_one(table, node) {
        Some(normalized) => vec![normalized],
        None => node
            .children
            .iter()
            .flat_map(|child| normalize_child(table, child))
            .collect(),
    }
}

fn normalize_one(table: &CorrespondenceTable, node: &Node) -> Option<Node> {
    let children: Vec<Node> = node
        .children
        .iter()
        .flat_map(|child| normalize_child(table, child))
        .collect();

    // runs before the skip check so skipped parents still hand nested
    // accessors upward
    let mut children = nest_property_accessors(children);

    if table.skips_ts(&node.name) {
        return match children.len() {
            0 => None,
            1 => children.pop(),
            // more than one child cannot be promoted into a single slot;
            // fall back to a wrapper with the mapped name when one exists
            _ => table
                .rename(&node.name)
                .flatten()
                .map(|mapped| Node::new(mapped, children)),
        };
    }

    let Some(Some(mapped)) = table.rename(&node.name) else {
        // unknown or explicitly unmapped name. Retaining the original name
        // around multiple children preserves structure at the cost of a
        // NAME_MISMATCH in the diff, which is the point: it surfaces the
        // vocabulary gap instead of hiding it.
        return match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(Node::new(node.name.clone(), children)),
        };
    };

    let mapped = disambiguate(node, mapped);

    let input = RuleInput { raw: node, mapped };
    for rule in ALIGNMENTS {
        children = match rule(&input, children) {
            Step::Continue(adjusted) => adjusted,
            Step::Done(resolved) => return resolved,
        };
    }

    Some(Node::new(mapped, children))
}

/// `check_expression` covers both `is`/`!is` (IS_EXPRESSION in PSI) and
/// `in`/`!in` (a plain BINARY_EXPRESSION). A type-shaped raw child means the
/// operand is a type, which only `is` checks have.
fn disambiguate(node: &Node, mapped: &'static str) -> &'static str {
    const TYPE_SHAPED: &[&str] = &[
        "user_type",
        "nullable_type",
        "parenthesized_type",
        "function_type",
        "type_identifier",
    ];

    if node.name != "check_expression" {
        return mapped;
    }
    if node
        .children
        .iter()
        .any(|child| TYPE_SHAPED.contains(&child.name.as_str()))
    {
        "IS_EXPRESSION"
    } else {
        "BINARY_EXPRESSION"
    }
}

/// Context handed to each alignment rule: the raw (pre-normalization) node
/// and the post-rename name it resolved to.
struct RuleInput<'a> {
    raw: &'a Node,
    mapped: &'static str,
}

enum Step {
    /// Keep going with the adjusted child list.
    Continue(Vec<Node>),
    /// The rule resolved the whole node; later rules do not run.
    Done(Option<Node>),
}

type AlignRule = fn(&RuleInput, Vec<Node>) -> Step;

/// The structural alignment rules, in application order. Each is keyed on
/// the post-rename name and independent of the others; a rule that does not
/// apply passes the child list through untouched.
const ALIGNMENTS: &[AlignRule] = &[
    transparent_single_expression_body,
    collapse_pure_reference_chain,
    inject_parameter_list,
    unwrap_extension_receiver,
    flatten_call_chain,
    inject_empty_lambda_block,
    wrap_initializer_block,
    inject_object_declaration,
    wrap_bare_parameter_types,
    remove_empty_wrappers,
];

/// `function_body` and `control_structure_body` both map to BLOCK, but PSI
/// only materializes a BLOCK for actual `{ ... }` blocks. An expression body
/// (`= expr`, `if (x) expr`) has no raw `statements` child; its single
/// expression is promoted and the wrapper dropped.
fn transparent_single_expression_body(input: &RuleInput, mut children: Vec<Node>) -> Step {
    if input.mapped != "BLOCK"
        || !matches!(
            input.raw.name.as_str(),
            "function_body" | "control_structure_body"
        )
    {
        return Step::Continue(children);
    }

    let has_statements = input.raw.children.iter().any(|c| c.name == "statements");
    let has_expression = input.raw.children.iter().any(|c| {
        !matches!(
            c.name.as_str(),
            "statements" | "line_comment" | "multiline_comment"
        )
    });

    if !has_statements && has_expression {
        match children.len() {
            0 => return Step::Done(None),
            1 => return Step::Done(children.pop()),
            // several children in an expression body is unusual; keep the
            // BLOCK wrapper rather than guess
            _ => {}
        }
    }
    Step::Continue(children)
}

/// A qualified name like `a.b.c` loses all of its identifier leaves during
/// normalization. What remains is an empty DOT_QUALIFIED_EXPRESSION, which
/// PSI also reduces to nothing once REFERENCE_EXPRESSION is pruned.
fn collapse_pure_reference_chain(input: &RuleInput, children: Vec<Node>) -> Step {
    if input.mapped == "DOT_QUALIFIED_EXPRESSION" && children.is_empty() {
        return Step::Done(None);
    }
    Step::Continue(children)
}

/// Tree-sitter puts constructor/accessor parameters directly under the
/// declaring node; PSI interposes a VALUE_PARAMETER_LIST. Wrap each
/// contiguous run of parameters.
fn inject_parameter_list(input: &RuleInput, children: Vec<Node>) -> Step {
    if !matches!(input.mapped, "PRIMARY_CONSTRUCTOR" | "PROPERTY_ACCESSOR")
        || !children.iter().any(|c| c.name == "VALUE_PARAMETER")
    {
        return Step::Continue(children);
    }

    let mut result = vec![];
    let mut run = vec![];
    for child in children {
        if child.name == "VALUE_PARAMETER" {
            run.push(child);
        } else {
            if !run.is_empty() {
                result.push(Node::new("VALUE_PARAMETER_LIST", std::mem::take(&mut run)));
            }
            result.push(child);
        }
    }
    if !run.is_empty() {
        result.push(Node::new("VALUE_PARAMETER_LIST", run));
    }
    Step::Continue(result)
}

/// Extension receivers sit as bare types directly under FUN/PROPERTY in
/// PSI; tree-sitter wraps them in a receiver node. The same wrapper inside
/// FUNCTION_TYPE is genuine PSI structure and is left alone, which is why
/// this rule keys on the parent.
fn unwrap_extension_receiver(input: &RuleInput, children: Vec<Node>) -> Step {
    if !matches!(input.mapped, "FUN" | "PROPERTY")
        || !children.iter().any(|c| c.name == "FUNCTION_TYPE_RECEIVER")
    {
        return Step::Continue(children);
    }

    let mut result = vec![];
    for child in children {
        if child.name == "FUNCTION_TYPE_RECEIVER" {
            result.extend(child.children);
        } else {
            result.push(child);
        }
    }
    Step::Continue(result)
}

/// Trailing lambdas nest in tree-sitter (`f() {} {}` is a CALL_EXPRESSION
/// around a CALL_EXPRESSION around the real call) but are flat siblings in
/// PSI. Unwrap a leading nested call recursively, splicing its children
/// ahead of the current node's remaining children.
fn flatten_call_chain(input: &RuleInput, children: Vec<Node>) -> Step {
    if input.mapped != "CALL_EXPRESSION" {
        return Step::Continue(children);
    }
    Step::Continue(flatten_calls(children))
}

fn flatten_calls(mut children: Vec<Node>) -> Vec<Node> {
    if children.first().map(|c| c.name.as_str()) != Some("CALL_EXPRESSION") {
        return children;
    }
    let inner = children.remove(0);
    let mut result = flatten_calls(inner.children);
    result.append(&mut children);
    result
}

/// PSI emits FUNCTION_LITERAL > BLOCK even for the empty lambda `{}`.
fn inject_empty_lambda_block(input: &RuleInput, children: Vec<Node>) -> Step {
    if input.mapped == "FUNCTION_LITERAL" && children.is_empty() {
        return Step::Continue(vec![Node::leaf("BLOCK")]);
    }
    Step::Continue(children)
}

/// PSI nests CLASS_INITIALIZER > BLOCK > statements; tree-sitter's
/// `statements` wrapper is transparent, so the promoted statements need a
/// synthesized BLOCK around them.
fn wrap_initializer_block(input: &RuleInput, children: Vec<Node>) -> Step {
    if input.mapped == "CLASS_INITIALIZER" && !children.is_empty() {
        return Step::Continue(vec![Node::new("BLOCK", children)]);
    }
    Step::Continue(children)
}

/// PSI has OBJECT_LITERAL > OBJECT_DECLARATION > body; tree-sitter puts the
/// body directly under object_literal.
fn inject_object_declaration(input: &RuleInput, children: Vec<Node>) -> Step {
    if input.mapped == "OBJECT_LITERAL" && !children.is_empty() {
        return Step::Continue(vec![Node::new("OBJECT_DECLARATION", children)]);
    }
    Step::Continue(children)
}

/// In `function_type_parameters`, tree-sitter lists the parameter types
/// bare; PSI wraps each in a VALUE_PARAMETER. Skipped when real
/// VALUE_PARAMETER children are already present (ordinary parameter lists).
fn wrap_bare_parameter_types(input: &RuleInput, children: Vec<Node>) -> Step {
    const TYPE_NAMES: &[&str] = &["USER_TYPE", "NULLABLE_TYPE", "FUNCTION_TYPE", "PARENTHESIZED"];

    if input.mapped != "VALUE_PARAMETER_LIST"
        || !children.iter().any(|c| TYPE_NAMES.contains(&c.name.as_str()))
        || children.iter().any(|c| c.name == "VALUE_PARAMETER")
    {
        return Step::Continue(children);
    }

    let result = children
        .into_iter()
        .map(|child| {
            if TYPE_NAMES.contains(&child.name.as_str()) {
                Node::new("VALUE_PARAMETER", vec![child])
            } else {
                child
            }
        })
        .collect();
    Step::Continue(result)
}

/// MODIFIER_LIST and VALUE_PARAMETER_LIST lose all their children to
/// normalization when they only held keyword leaves; both sides drop the
/// empty shell.
fn remove_empty_wrappers(input: &RuleInput, children: Vec<Node>) -> Step {
    if matches!(input.mapped, "MODIFIER_LIST" | "VALUE_PARAMETER_LIST") && children.is_empty() {
        return Step::Done(None);
    }
    Step::Continue(children)
}

/// Tree-sitter emits getter/setter as siblings of property_declaration, PSI
/// nests PROPERTY_ACCESSOR inside PROPERTY. Merge each accessor into the
/// immediately preceding PROPERTY sibling.
fn nest_property_accessors(children: Vec<Node>) -> Vec<Node> {
    if !children.iter().any(|c| c.name == "PROPERTY_ACCESSOR") {
        return children;
    }

    let mut result: Vec<Node> = vec![];
    for child in children {
        match result.last_mut() {
            Some(prev) if child.name == "PROPERTY_ACCESSOR" && prev.name == "PROPERTY" => {
                prev.children.push(child);
            }
            _ => result.push(child),
        }
    }
    result
}
