//! Node vocabulary correspondence between tree-sitter-kotlin and
//! JetBrains PSI.
//!
//! The PSI vocabulary is the normalization target: tree-sitter names are
//! renamed toward it, while the PSI side only prunes and collapses. The
//! table is pure data; its internal consistency (every tree-sitter node
//! accounted for, every target a known PSI name) is enforced by the tests
//! in `vocab_test`, not at runtime.

use fnv::{FnvHashMap, FnvHashSet};

/// How a PSI wrapper node folds into its contents.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Collapse {
    /// Replace the wrapper by its single child, whatever that child is.
    Single,
    /// Merge the wrapper into the named child: that child keeps its name,
    /// its own children first, then the wrapper's remaining children.
    Into(&'static str),
}

/// The complete static correspondence between the two vocabularies.
///
/// Built once and passed by reference; comparisons never mutate it, so one
/// table can serve any number of parallel comparisons.
pub struct CorrespondenceTable {
    rename: FnvHashMap<&'static str, Option<&'static str>>,
    ts_skip: FnvHashSet<&'static str>,
    psi_skip: FnvHashSet<&'static str>,
    wrapper_collapse: FnvHashMap<&'static str, Collapse>,
}

impl CorrespondenceTable {
    /// The Kotlin table: tree-sitter-kotlin named nodes vs the PSI
    /// composite nodes observed in the JetBrains fixture corpus.
    pub fn kotlin() -> Self {
        Self::from_parts(TS_TO_PSI, TS_SKIP, PSI_SKIP, WRAPPER_COLLAPSE)
    }

    pub(crate) fn from_parts(
        rename: &[(&'static str, Option<&'static str>)],
        ts_skip: &[&'static str],
        psi_skip: &[&'static str],
        wrapper_collapse: &[(&'static str, Collapse)],
    ) -> Self {
        Self {
            rename: rename.iter().copied().collect(),
            ts_skip: ts_skip.iter().copied().collect(),
            psi_skip: psi_skip.iter().copied().collect(),
            wrapper_collapse: wrapper_collapse.iter().copied().collect(),
        }
    }

    /// Rename entry for a tree-sitter name: `None` when the name is not in
    /// the table at all, `Some(None)` for an explicit "no direct
    /// equivalent" marker.
    pub fn rename(&self, name: &str) -> Option<Option<&'static str>> {
        self.rename.get(name).copied()
    }

    pub fn skips_ts(&self, name: &str) -> bool {
        self.ts_skip.contains(name)
    }

    pub fn skips_psi(&self, name: &str) -> bool {
        self.psi_skip.contains(name)
    }

    pub fn collapse(&self, name: &str) -> Option<Collapse> {
        self.wrapper_collapse.get(name).copied()
    }
}

pub(crate) const TS_TO_PSI: &[(&str, Option<&str>)] = &[
    // Top level
    ("source_file", Some("KtFile")),
    ("package_header", Some("PACKAGE_DIRECTIVE")),
    ("import_list", Some("IMPORT_LIST")),
    ("import_header", Some("IMPORT_DIRECTIVE")),
    ("import_alias", Some("IMPORT_ALIAS")),
    ("wildcard_import", None), // a bare `*` leaf in PSI
    // Classes and objects
    ("class_declaration", Some("CLASS")),
    ("class_body", Some("CLASS_BODY")),
    ("class_parameter", Some("VALUE_PARAMETER")),
    ("companion_object", Some("OBJECT_DECLARATION")), // companion objects are plain OBJECT_DECLARATION in PSI
    ("object_declaration", Some("OBJECT_DECLARATION")),
    ("object_literal", Some("OBJECT_LITERAL")),
    ("enum_class_body", Some("CLASS_BODY")), // PSI reuses CLASS_BODY for enum bodies
    ("enum_entry", Some("ENUM_ENTRY")),
    ("type_alias", Some("TYPEALIAS")),
    // Constructors
    ("primary_constructor", Some("PRIMARY_CONSTRUCTOR")),
    ("secondary_constructor", Some("SECONDARY_CONSTRUCTOR")),
    ("constructor_delegation_call", Some("CONSTRUCTOR_DELEGATION_CALL")),
    ("constructor_invocation", None), // part of the SUPER_TYPE_CALL_ENTRY chain
    // Functions
    ("function_declaration", Some("FUN")),
    ("function_body", Some("BLOCK")), // expression bodies handled by the alignment rules
    ("function_value_parameters", Some("VALUE_PARAMETER_LIST")),
    ("parameter", Some("VALUE_PARAMETER")),
    ("parameter_with_optional_type", Some("VALUE_PARAMETER")),
    ("getter", Some("PROPERTY_ACCESSOR")),
    ("setter", Some("PROPERTY_ACCESSOR")),
    ("anonymous_function", Some("FUN")), // anonymous functions are FUN in PSI too
    // Properties
    ("property_declaration", Some("PROPERTY")),
    ("property_delegate", Some("PROPERTY_DELEGATE")),
    // Types
    ("type_parameters", Some("TYPE_PARAMETER_LIST")),
    ("type_parameter", Some("TYPE_PARAMETER")),
    ("type_arguments", Some("TYPE_ARGUMENT_LIST")),
    ("type_projection", Some("TYPE_PROJECTION")),
    ("user_type", Some("USER_TYPE")),
    ("function_type", Some("FUNCTION_TYPE")),
    ("function_type_parameters", Some("VALUE_PARAMETER_LIST")), // PSI wraps function type params in VALUE_PARAMETER_LIST
    ("nullable_type", Some("NULLABLE_TYPE")),
    ("not_nullable_type", None), // PSI goes through TYPE_REFERENCE here
    ("parenthesized_type", Some("PARENTHESIZED")),
    ("parenthesized_user_type", None),
    ("type_constraints", Some("TYPE_CONSTRAINT_LIST")),
    ("type_constraint", Some("TYPE_CONSTRAINT")),
    ("receiver_type", Some("FUNCTION_TYPE_RECEIVER")), // extension receivers are unwrapped by an alignment rule
    // Delegation and inheritance
    ("delegation_specifier", None), // becomes one of three SUPER_TYPE_* entries
    ("explicit_delegation", Some("DELEGATED_SUPER_TYPE_ENTRY")),
    // Identifiers: leaves in PSI, elided on both sides
    ("type_identifier", None),
    ("simple_identifier", None),
    ("identifier", None),
    // Modifiers: individual keywords are leaves in PSI
    ("modifiers", Some("MODIFIER_LIST")),
    ("class_modifier", None),
    ("member_modifier", None),
    ("visibility_modifier", None),
    ("function_modifier", None),
    ("property_modifier", None),
    ("inheritance_modifier", None),
    ("parameter_modifier", None),
    ("parameter_modifiers", None),
    ("platform_modifier", None),
    ("reification_modifier", None),
    ("variance_modifier", None),
    ("type_modifiers", None),
    ("type_parameter_modifiers", None),
    ("type_projection_modifiers", None),
    // Annotations
    ("annotation", Some("ANNOTATION_ENTRY")),
    ("file_annotation", Some("FILE_ANNOTATION_LIST")),
    ("use_site_target", Some("ANNOTATION_TARGET")),
    // Expressions
    ("call_expression", Some("CALL_EXPRESSION")),
    ("call_suffix", None), // PSI inlines call suffix children
    ("navigation_expression", Some("DOT_QUALIFIED_EXPRESSION")), // or SAFE_ACCESS_EXPRESSION
    ("navigation_suffix", None), // PSI inlines navigation children
    ("indexing_expression", Some("ARRAY_ACCESS_EXPRESSION")),
    ("indexing_suffix", Some("INDICES")),
    ("value_arguments", Some("VALUE_ARGUMENT_LIST")),
    ("value_argument", Some("VALUE_ARGUMENT")),
    ("spread_expression", None), // a `*` leaf inside VALUE_ARGUMENT in PSI
    ("parenthesized_expression", Some("PARENTHESIZED")),
    ("if_expression", Some("IF")),
    ("when_expression", Some("WHEN")),
    ("when_subject", None), // no wrapper in PSI
    ("when_entry", Some("WHEN_ENTRY")),
    ("when_condition", None), // one of three WHEN_CONDITION_* names
    ("try_expression", Some("TRY")),
    ("catch_block", Some("CATCH")),
    ("finally_block", Some("FINALLY")),
    ("jump_expression", None), // RETURN, THROW, BREAK or CONTINUE
    ("callable_reference", Some("CALLABLE_REFERENCE_EXPRESSION")),
    ("collection_literal", Some("COLLECTION_LITERAL_EXPRESSION")),
    ("this_expression", Some("THIS_EXPRESSION")),
    ("super_expression", Some("SUPER_EXPRESSION")),
    ("directly_assignable_expression", None),
    ("assignment", None), // BINARY_EXPRESSION with an assignment operator in PSI
    // Binary and unary expressions
    ("additive_expression", Some("BINARY_EXPRESSION")),
    ("multiplicative_expression", Some("BINARY_EXPRESSION")),
    ("comparison_expression", Some("BINARY_EXPRESSION")),
    ("equality_expression", Some("BINARY_EXPRESSION")),
    ("conjunction_expression", Some("BINARY_EXPRESSION")),
    ("disjunction_expression", Some("BINARY_EXPRESSION")),
    ("elvis_expression", Some("BINARY_EXPRESSION")),
    ("range_expression", Some("BINARY_EXPRESSION")),
    ("infix_expression", Some("BINARY_EXPRESSION")),
    ("as_expression", Some("BINARY_WITH_TYPE")), // `as` casts
    ("check_expression", Some("IS_EXPRESSION")), // `in` checks are disambiguated to BINARY_EXPRESSION
    ("prefix_expression", Some("PREFIX_EXPRESSION")),
    ("postfix_expression", Some("POSTFIX_EXPRESSION")),
    // Loops and control flow
    ("for_statement", Some("FOR")),
    ("while_statement", Some("WHILE")),
    ("do_while_statement", Some("DO_WHILE")),
    ("control_structure_body", Some("BLOCK")), // single-expression bodies handled by the alignment rules
    ("range_test", Some("WHEN_CONDITION_IN_RANGE")),
    ("type_test", Some("WHEN_CONDITION_IS_PATTERN")),
    // Lambdas
    ("lambda_literal", Some("FUNCTION_LITERAL")),
    ("lambda_parameters", Some("VALUE_PARAMETER_LIST")),
    ("annotated_lambda", None), // PSI's LAMBDA_ARGUMENT is skipped, so this is too
    // Statements
    ("statements", None), // transparent; BLOCK comes from the body wrappers
    ("multi_variable_declaration", Some("DESTRUCTURING_DECLARATION")),
    ("variable_declaration", None), // PROPERTY or DESTRUCTURING_DECLARATION_ENTRY in PSI
    ("binding_pattern_kind", None), // val/var keyword leaf
    // Literals
    ("string_literal", Some("STRING_TEMPLATE")),
    ("string_content", Some("LITERAL_STRING_TEMPLATE_ENTRY")),
    ("interpolated_expression", Some("LONG_STRING_TEMPLATE_ENTRY")),
    ("interpolated_identifier", Some("SHORT_STRING_TEMPLATE_ENTRY")),
    ("character_literal", Some("CHARACTER_CONSTANT")),
    ("character_escape_seq", Some("ESCAPE_STRING_TEMPLATE_ENTRY")),
    ("integer_literal", Some("INTEGER_CONSTANT")),
    ("real_literal", Some("FLOAT_CONSTANT")),
    ("long_literal", None), // PSI uses INTEGER_CONSTANT for longs as well
    ("hex_literal", Some("INTEGER_CONSTANT")),
    ("bin_literal", Some("INTEGER_CONSTANT")),
    ("unsigned_literal", Some("INTEGER_CONSTANT")),
    ("boolean_literal", Some("BOOLEAN_CONSTANT")),
    ("null_literal", Some("NULL")),
    // Labels, comments, initializers
    ("label", Some("LABEL")),
    ("line_comment", None),
    ("multiline_comment", None),
    ("anonymous_initializer", Some("CLASS_INITIALIZER")),
    ("shebang_line", None),
];

/// Tree-sitter nodes with no composite PSI counterpart: identifier and
/// modifier leaves, comments, and structural wrappers PSI never emits.
/// Elided with their children promoted into the parent.
pub(crate) const TS_SKIP: &[&str] = &[
    "annotated_lambda",
    "assignment",
    "binding_pattern_kind",
    "call_suffix",
    "class_modifier",
    "constructor_invocation",
    "delegation_specifier",
    "directly_assignable_expression",
    "function_modifier",
    "identifier",
    "inheritance_modifier",
    "jump_expression",
    "line_comment",
    "long_literal",
    "member_modifier",
    "multiline_comment",
    "navigation_suffix",
    "not_nullable_type",
    "parameter_modifier",
    "parameter_modifiers",
    "parenthesized_user_type",
    "platform_modifier",
    "property_modifier",
    "reification_modifier",
    "shebang_line",
    "simple_identifier",
    "spread_expression",
    "statements",
    "type_identifier",
    "type_modifiers",
    "type_parameter_modifiers",
    "type_projection_modifiers",
    "variable_declaration",
    "variance_modifier",
    "visibility_modifier",
    "when_condition",
    "when_subject",
    "wildcard_import",
];

/// PSI composite nodes with no tree-sitter counterpart, elided with
/// promotion: reference/type wrappers, body wrappers, jump keywords,
/// and features the grammar does not distinguish.
pub(crate) const PSI_SKIP: &[&str] = &[
    "ANNOTATED_EXPRESSION",
    "ANNOTATION",
    "BODY",
    "BREAK",
    "CLASS_LITERAL_EXPRESSION",
    "CONDITION",
    "CONSTRUCTOR_CALLEE",
    "CONSTRUCTOR_DELEGATION_REFERENCE",
    "CONTEXT_PARAMETER_LIST",
    "CONTEXT_RECEIVER",
    "CONTINUE",
    "DYNAMIC_TYPE",
    "ELSE",
    "ENUM_ENTRY_SUPERCLASS_REFERENCE_EXPRESSION",
    "INITIALIZER_LIST",
    "INTERSECTION_TYPE",
    "KDOC_SECTION",
    "LABELED_EXPRESSION",
    "LABEL_QUALIFIER",
    "LAMBDA_ARGUMENT",
    "LAMBDA_EXPRESSION",
    "LOOP_RANGE",
    "OPERATION_REFERENCE",
    "REFERENCE_EXPRESSION",
    "RETURN",
    "SUPER_TYPE_CALL_ENTRY",
    "SUPER_TYPE_ENTRY",
    "SUPER_TYPE_LIST",
    "THEN",
    "THROW",
    "TYPE_REFERENCE",
    "VALUE_ARGUMENT_NAME",
];

/// PSI wrapper chains folded into their contents, e.g.
/// `SUPER_TYPE_CALL_ENTRY > CONSTRUCTOR_CALLEE > TYPE_REFERENCE > USER_TYPE`
/// against tree-sitter's `delegation_specifier > constructor_invocation >
/// user_type`.
pub(crate) const WRAPPER_COLLAPSE: &[(&str, Collapse)] = &[
    ("TYPE_REFERENCE", Collapse::Into("USER_TYPE")),
    ("SUPER_TYPE_CALL_ENTRY", Collapse::Into("CONSTRUCTOR_CALLEE")),
    ("CONSTRUCTOR_CALLEE", Collapse::Into("TYPE_REFERENCE")),
    ("LAMBDA_EXPRESSION", Collapse::Into("FUNCTION_LITERAL")),
    ("ANNOTATED_EXPRESSION", Collapse::Single),
    ("LABELED_EXPRESSION", Collapse::Single),
];

/// All named node types of tree-sitter-kotlin (from `node-types.json`).
/// Test data only: the integrity tests check the rename map against it.
#[cfg(test)]
pub(crate) const ALL_TS_NODES: &[&str] = &[
    "additive_expression",
    "annotated_lambda",
    "annotation",
    "anonymous_function",
    "anonymous_initializer",
    "as_expression",
    "assignment",
    "bin_literal",
    "binding_pattern_kind",
    "boolean_literal",
    "call_expression",
    "call_suffix",
    "callable_reference",
    "catch_block",
    "character_escape_seq",
    "character_literal",
    "check_expression",
    "class_body",
    "class_declaration",
    "class_modifier",
    "class_parameter",
    "collection_literal",
    "companion_object",
    "comparison_expression",
    "conjunction_expression",
    "constructor_delegation_call",
    "constructor_invocation",
    "control_structure_body",
    "delegation_specifier",
    "directly_assignable_expression",
    "disjunction_expression",
    "do_while_statement",
    "elvis_expression",
    "enum_class_body",
    "enum_entry",
    "equality_expression",
    "explicit_delegation",
    "file_annotation",
    "finally_block",
    "for_statement",
    "function_body",
    "function_declaration",
    "function_modifier",
    "function_type",
    "function_type_parameters",
    "function_value_parameters",
    "getter",
    "hex_literal",
    "identifier",
    "if_expression",
    "import_alias",
    "import_header",
    "import_list",
    "indexing_expression",
    "indexing_suffix",
    "infix_expression",
    "inheritance_modifier",
    "integer_literal",
    "interpolated_expression",
    "interpolated_identifier",
    "jump_expression",
    "label",
    "lambda_literal",
    "lambda_parameters",
    "line_comment",
    "long_literal",
    "member_modifier",
    "modifiers",
    "multi_variable_declaration",
    "multiline_comment",
    "multiplicative_expression",
    "navigation_expression",
    "navigation_suffix",
    "not_nullable_type",
    "null_literal",
    "nullable_type",
    "object_declaration",
    "object_literal",
    "package_header",
    "parameter",
    "parameter_modifier",
    "parameter_modifiers",
    "parameter_with_optional_type",
    "parenthesized_expression",
    "parenthesized_type",
    "parenthesized_user_type",
    "platform_modifier",
    "postfix_expression",
    "prefix_expression",
    "primary_constructor",
    "property_declaration",
    "property_delegate",
    "property_modifier",
    "range_expression",
    "range_test",
    "real_literal",
    "receiver_type",
    "reification_modifier",
    "secondary_constructor",
    "setter",
    "shebang_line",
    "simple_identifier",
    "source_file",
    "spread_expression",
    "statements",
    "string_content",
    "string_literal",
    "super_expression",
    "this_expression",
    "try_expression",
    "type_alias",
    "type_arguments",
    "type_constraint",
    "type_constraints",
    "type_identifier",
    "type_modifiers",
    "type_parameter",
    "type_parameter_modifiers",
    "type_parameters",
    "type_projection",
    "type_projection_modifiers",
    "type_test",
    "unsigned_literal",
    "use_site_target",
    "user_type",
    "value_argument",
    "value_arguments",
    "variable_declaration",
    "variance_modifier",
    "visibility_modifier",
    "when_condition",
    "when_entry",
    "when_expression",
    "when_subject",
    "while_statement",
    "wildcard_import",
];

/// All PSI composite node types observed in the JetBrains fixture corpus.
#[cfg(test)]
pub(crate) const ALL_PSI_NODES: &[&str] = &[
    "ANNOTATED_EXPRESSION",
    "ANNOTATION",
    "ANNOTATION_ENTRY",
    "ANNOTATION_TARGET",
    "ARRAY_ACCESS_EXPRESSION",
    "BINARY_EXPRESSION",
    "BINARY_WITH_TYPE",
    "BLOCK",
    "BODY",
    "BOOLEAN_CONSTANT",
    "BREAK",
    "CALLABLE_REFERENCE_EXPRESSION",
    "CALL_EXPRESSION",
    "CATCH",
    "CHARACTER_CONSTANT",
    "CLASS",
    "CLASS_BODY",
    "CLASS_INITIALIZER",
    "CLASS_LITERAL_EXPRESSION",
    "COLLECTION_LITERAL_EXPRESSION",
    "CONDITION",
    "CONSTRUCTOR_CALLEE",
    "CONSTRUCTOR_DELEGATION_CALL",
    "CONSTRUCTOR_DELEGATION_REFERENCE",
    "CONTEXT_PARAMETER_LIST",
    "CONTEXT_RECEIVER",
    "CONTINUE",
    "DELEGATED_SUPER_TYPE_ENTRY",
    "DESTRUCTURING_DECLARATION",
    "DESTRUCTURING_DECLARATION_ENTRY",
    "DOT_QUALIFIED_EXPRESSION",
    "DO_WHILE",
    "DYNAMIC_TYPE",
    "ELSE",
    "ENUM_ENTRY",
    "ENUM_ENTRY_SUPERCLASS_REFERENCE_EXPRESSION",
    "ESCAPE_STRING_TEMPLATE_ENTRY",
    "FILE_ANNOTATION_LIST",
    "FINALLY",
    "FLOAT_CONSTANT",
    "FOR",
    "FUN",
    "FUNCTION_LITERAL",
    "FUNCTION_TYPE",
    "FUNCTION_TYPE_RECEIVER",
    "IF",
    "IMPORT_ALIAS",
    "IMPORT_DIRECTIVE",
    "IMPORT_LIST",
    "INDICES",
    "INITIALIZER_LIST",
    "INTEGER_CONSTANT",
    "INTERSECTION_TYPE",
    "IS_EXPRESSION",
    "KDOC_SECTION",
    "KtFile",
    "LABEL",
    "LABELED_EXPRESSION",
    "LABEL_QUALIFIER",
    "LAMBDA_ARGUMENT",
    "LAMBDA_EXPRESSION",
    "LITERAL_STRING_TEMPLATE_ENTRY",
    "LONG_STRING_TEMPLATE_ENTRY",
    "LOOP_RANGE",
    "MODIFIER_LIST",
    "NULL",
    "NULLABLE_TYPE",
    "OBJECT_DECLARATION",
    "OBJECT_LITERAL",
    "OPERATION_REFERENCE",
    "PACKAGE_DIRECTIVE",
    "PARENTHESIZED",
    "POSTFIX_EXPRESSION",
    "PREFIX_EXPRESSION",
    "PRIMARY_CONSTRUCTOR",
    "PROPERTY",
    "PROPERTY_ACCESSOR",
    "PROPERTY_DELEGATE",
    "REFERENCE_EXPRESSION",
    "RETURN",
    "SAFE_ACCESS_EXPRESSION",
    "SECONDARY_CONSTRUCTOR",
    "SHORT_STRING_TEMPLATE_ENTRY",
    "STRING_TEMPLATE",
    "SUPER_EXPRESSION",
    "SUPER_TYPE_CALL_ENTRY",
    "SUPER_TYPE_ENTRY",
    "SUPER_TYPE_LIST",
    "THEN",
    "THIS_EXPRESSION",
    "THROW",
    "TRY",
    "TYPEALIAS",
    "TYPE_ARGUMENT_LIST",
    "TYPE_CONSTRAINT",
    "TYPE_CONSTRAINT_LIST",
    "TYPE_PARAMETER",
    "TYPE_PARAMETER_LIST",
    "TYPE_PROJECTION",
    "TYPE_REFERENCE",
    "USER_TYPE",
    "VALUE_ARGUMENT",
    "VALUE_ARGUMENT_LIST",
    "VALUE_ARGUMENT_NAME",
    "VALUE_PARAMETER",
    "VALUE_PARAMETER_LIST",
    "WHEN",
    "WHEN_CONDITION_IN_RANGE",
    "WHEN_CONDITION_IS_PATTERN",
    "WHEN_CONDITION_WITH_EXPRESSION",
    "WHEN_ENTRY",
    "WHILE",
];
