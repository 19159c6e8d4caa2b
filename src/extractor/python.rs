use crate::detector::FrameworkDetector;
use crate::error::{Result, ScanError};
use crate::extractor::{
    ClassRecord, DeclarationExtractor, FileDeclarations, FunctionRecord, MethodRecord, NodeKind,
    RouteRecord,
};
use crate::parser::{node_text, ParsedFile};
use log::debug;
use tree_sitter::Node;

/// Method name of a route registration call (`app.route(...)`)
const ROUTE_CALL: &str = "route";

/// Method name of the serve-call (`app.run(...)`)
const SERVE_CALL: &str = "run";

const TAB_WIDTH: usize = 8;

/// Python declaration extractor with Flask route detection
pub struct PythonExtractor;

impl DeclarationExtractor for PythonExtractor {
    fn extract(&self, parsed: &ParsedFile) -> Result<FileDeclarations> {
        let mut visitor = DeclarationVisitor::new(parsed);

        let root = parsed.root();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            visitor.visit_top_level(node)?;
        }

        let declarations = visitor.declarations;
        debug!(
            "Extracted from {}: {} functions, {} classes, {} routes, serve call: {}, framework: {}",
            parsed.path.display(),
            declarations.functions.len(),
            declarations.classes.len(),
            declarations.routes.len(),
            declarations.has_serve_call,
            declarations.uses_framework
        );

        Ok(declarations)
    }
}

/// Classifies a statement node of a Python syntax tree.
pub fn classify<'tree>(node: Node<'tree>, source: &[u8]) -> NodeKind<'tree> {
    match node.kind() {
        "function_definition" => NodeKind::FunctionDecl {
            node,
            decorators: Vec::new(),
        },
        "class_definition" => NodeKind::ClassDecl {
            node,
            decorators: Vec::new(),
        },
        "decorated_definition" => {
            let decorators = decorator_expressions(node);
            match node.child_by_field_name("definition") {
                Some(def) if def.kind() == "function_definition" => NodeKind::FunctionDecl {
                    node: def,
                    decorators,
                },
                Some(def) if def.kind() == "class_definition" => NodeKind::ClassDecl {
                    node: def,
                    decorators,
                },
                _ => NodeKind::Other,
            }
        }
        "expression_statement" => match node.named_child(0) {
            Some(expr) if expr.kind() == "call" && node.named_child_count() == 1 => {
                NodeKind::ExpressionCallStatement(expr)
            }
            _ => NodeKind::Other,
        },
        "import_statement" | "import_from_statement" => NodeKind::ImportDecl(node),
        "if_statement" if is_main_guard(node, source) => {
            match node.child_by_field_name("consequence") {
                Some(block) => NodeKind::MainGuard(block),
                None => NodeKind::Other,
            }
        }
        _ => NodeKind::Other,
    }
}

/// Visitor for the top-level statements of one file
struct DeclarationVisitor<'a> {
    parsed: &'a ParsedFile,
    declarations: FileDeclarations,
}

impl<'a> DeclarationVisitor<'a> {
    fn new(parsed: &'a ParsedFile) -> Self {
        Self {
            parsed,
            declarations: FileDeclarations::default(),
        }
    }

    fn source(&self) -> &'a [u8] {
        self.parsed.bytes()
    }

    fn visit_top_level(&mut self, node: Node) -> Result<()> {
        match classify(node, self.source()) {
            NodeKind::ImportDecl(import) => {
                if FrameworkDetector::is_framework_import(import, self.source()) {
                    self.declarations.uses_framework = true;
                }
            }
            NodeKind::FunctionDecl { node, decorators } => {
                self.visit_decorators(&decorators)?;
                if let Some(function) = self.function_record(node) {
                    self.declarations.functions.push(function);
                }
            }
            NodeKind::ClassDecl { node, decorators } => {
                self.visit_decorators(&decorators)?;
                if let Some(class) = self.class_record(node) {
                    self.declarations.classes.push(class);
                }
            }
            NodeKind::ExpressionCallStatement(call) => self.visit_call(call)?,
            NodeKind::MainGuard(block) => self.visit_main_guard(block),
            NodeKind::Other => {}
        }
        Ok(())
    }

    /// Route decorators register the decorated handler
    fn visit_decorators(&mut self, decorators: &[Node]) -> Result<()> {
        for decorator in decorators {
            if decorator.kind() == "call" && call_method_name(*decorator, self.source()) == Some(ROUTE_CALL) {
                self.register_route(*decorator)?;
            }
        }
        Ok(())
    }

    fn visit_call(&mut self, call: Node) -> Result<()> {
        match call_method_name(call, self.source()) {
            Some(ROUTE_CALL) => self.register_route(call)?,
            Some(SERVE_CALL) => self.declarations.has_serve_call = true,
            _ => {}
        }
        Ok(())
    }

    /// Only serve-calls count inside the main guard
    fn visit_main_guard(&mut self, block: Node) {
        let mut cursor = block.walk();
        for statement in block.named_children(&mut cursor) {
            if let NodeKind::ExpressionCallStatement(call) = classify(statement, self.source()) {
                if call_method_name(call, self.source()) == Some(SERVE_CALL) {
                    self.declarations.has_serve_call = true;
                }
            }
        }
    }

    fn register_route(&mut self, call: Node) -> Result<()> {
        let route = self.route_record(call)?;
        debug!(
            "Found route {} ({}) in {}",
            route.path,
            route.http_methods,
            self.parsed.path.display()
        );
        self.declarations.uses_framework = true;
        self.declarations.routes.push(route);
        Ok(())
    }

    fn route_record(&self, call: Node) -> Result<RouteRecord> {
        let mut path = String::new();
        let mut http_methods = String::new();

        let arguments = call
            .child_by_field_name("arguments")
            .filter(|args| args.kind() == "argument_list");

        if let Some(arguments) = arguments {
            let mut seen_positional = false;
            let mut cursor = arguments.walk();
            for argument in arguments.named_children(&mut cursor) {
                match argument.kind() {
                    // `**options` never supplies the rule
                    "comment" | "dictionary_splat" => {}
                    "list_splat" if !seen_positional => {
                        return Err(self.malformed_route(argument, "route path is unpacked"));
                    }
                    "keyword_argument" => {
                        let name = argument
                            .child_by_field_name("name")
                            .map(|n| node_text(n, self.source()));
                        if name == Some("methods") {
                            if let Some(value) = argument.child_by_field_name("value") {
                                http_methods = self.method_list(value)?.join(", ");
                            }
                        }
                    }
                    _ if !seen_positional => {
                        seen_positional = true;
                        path = string_literal(argument, self.source()).ok_or_else(|| {
                            self.malformed_route(argument, "route path is not a string literal")
                        })?;
                    }
                    _ => {}
                }
            }
        }

        Ok(RouteRecord::new(path, http_methods))
    }

    fn method_list(&self, value: Node) -> Result<Vec<String>> {
        if !matches!(value.kind(), "list" | "tuple" | "set") {
            return Err(self.malformed_route(value, "`methods` is not a list literal"));
        }

        let mut methods = Vec::new();
        let mut cursor = value.walk();
        for element in value.named_children(&mut cursor) {
            if element.kind() == "comment" {
                continue;
            }
            let method = string_literal(element, self.source()).ok_or_else(|| {
                self.malformed_route(element, "`methods` entry is not a string literal")
            })?;
            methods.push(method);
        }
        Ok(methods)
    }

    fn malformed_route(&self, node: Node, message: &str) -> ScanError {
        ScanError::MalformedRoute {
            file: self.parsed.path.clone(),
            line: node.start_position().row + 1,
            message: format!("{}: `{}`", message, node_text(node, self.source())),
        }
    }

    fn function_record(&self, node: Node) -> Option<FunctionRecord> {
        let name = node.child_by_field_name("name")?;
        Some(FunctionRecord::new(
            node_text(name, self.source()),
            docstring(node, self.source()),
        ))
    }

    fn class_record(&self, node: Node) -> Option<ClassRecord> {
        let name = node.child_by_field_name("name")?;

        let mut methods: Vec<MethodRecord> = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                if let NodeKind::FunctionDecl { node: method, .. } = classify(member, self.source())
                {
                    if let Some(record) = self.function_record(method) {
                        methods.push(record);
                    }
                }
            }
        }

        Some(ClassRecord {
            name: node_text(name, self.source()).to_string(),
            description: docstring(node, self.source()),
            methods,
        })
    }
}

fn decorator_expressions(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    let decorators = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .filter_map(|decorator| decorator.named_child(0))
        .collect();
    decorators
}

/// `receiver.name(...)` -> `name`; `None` for calls on bare identifiers
fn call_method_name<'a>(call: Node, source: &'a [u8]) -> Option<&'a str> {
    let function = call.child_by_field_name("function")?;
    if function.kind() != "attribute" {
        return None;
    }
    function
        .child_by_field_name("attribute")
        .map(|attr| node_text(attr, source))
}

/// `if __name__ == "__main__":` in either operand order
fn is_main_guard(node: Node, source: &[u8]) -> bool {
    let Some(condition) = node.child_by_field_name("condition") else {
        return false;
    };
    if condition.kind() != "comparison_operator" || condition.named_child_count() != 2 {
        return false;
    }

    let mut cursor = condition.walk();
    let is_equality = condition.children(&mut cursor).any(|c| c.kind() == "==");
    if !is_equality {
        return false;
    }

    let (Some(left), Some(right)) = (condition.named_child(0), condition.named_child(1)) else {
        return false;
    };
    let is_name = |n: Node| n.kind() == "identifier" && node_text(n, source) == "__name__";
    let is_main = |n: Node| string_literal(n, source).as_deref() == Some("__main__");

    (is_name(left) && is_main(right)) || (is_main(left) && is_name(right))
}

/// Value of a constant string literal node.
///
/// Implicitly concatenated literals (`'/a' '/b'`) are joined. Returns `None` for anything
/// that is not a constant `str` value: other expressions, f-strings and bytes literals,
/// including a concatenation with any such part.
pub fn string_literal(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => single_string_literal(node, source),
        "concatenated_string" => {
            let mut cursor = node.walk();
            let parts: Option<Vec<String>> = node
                .named_children(&mut cursor)
                .filter(|part| part.kind() != "comment")
                .map(|part| {
                    if part.kind() == "string" {
                        single_string_literal(part, source)
                    } else {
                        None
                    }
                })
                .collect();
            parts.map(|parts| parts.concat())
        }
        _ => None,
    }
}

fn single_string_literal(node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let is_interpolated = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "interpolation");
    if is_interpolated {
        return None;
    }

    decode_string_literal(node_text(node, source))
}

fn decode_string_literal(raw: &str) -> Option<String> {
    let prefix_len = raw.find(['"', '\''])?;
    let prefix = raw[..prefix_len].to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('b') {
        return None;
    }

    let quoted = &raw[prefix_len..];
    let quote = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        &quoted[..3]
    } else {
        &quoted[..1]
    };
    let inner = quoted.strip_prefix(quote)?.strip_suffix(quote)?;

    if prefix.contains('r') {
        Some(inner.to_string())
    } else {
        Some(unescape(inner))
    }
}

/// Decodes backslash escapes of a non-raw `str` literal.
///
/// Unknown escapes and malformed numeric escapes are kept verbatim.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '\\' | '\'' | '"' => out.push(escape),
            // line continuation
            '\n' => {}
            'x' | 'u' | 'U' => {
                let width = match escape {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                match hex_char(&digits, width) {
                    Some(decoded) => {
                        out.push(decoded);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(escape);
                    }
                }
            }
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'N' if chars.peek() == Some(&'{') => {
                let rest: String = chars.clone().skip(1).take_while(|c| *c != '}').collect();
                let closed = chars.clone().nth(1 + rest.chars().count()) == Some('}');
                match unicode_names2::character(&rest).filter(|_| closed) {
                    Some(named) => {
                        out.push(named);
                        // `{`, the name and `}`
                        for _ in 0..rest.chars().count() + 2 {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(escape);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn hex_char(digits: &str, width: usize) -> Option<char> {
    if digits.len() != width || !digits.chars().all(|d| d.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

/// Docstring of a function or class definition, cleaned like `inspect.cleandoc`.
pub fn docstring(definition: Node, source: &[u8]) -> Option<String> {
    let body = definition.child_by_field_name("body")?;

    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|statement| statement.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }

    let literal = string_literal(first.named_child(0)?, source)?;
    clean_docstring(&literal)
}

/// Strips docstring indentation: the first line loses its leading whitespace, later
/// lines lose their common indentation, blank lines at either end are dropped.
pub fn clean_docstring(raw: &str) -> Option<String> {
    let lines: Vec<String> = raw.lines().map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                line.trim_start()
            } else {
                strip_margin(line, margin)
            }
        })
        .collect();

    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }
    let leading_blank = cleaned
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();
    cleaned.drain(..leading_blank);

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("\n"))
    }
}

fn strip_margin(line: &str, margin: usize) -> &str {
    let indent = line.len() - line.trim_start().len();
    let cut = margin.min(indent);
    if line.is_char_boundary(cut) {
        &line[cut..]
    } else {
        &line[indent..]
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
