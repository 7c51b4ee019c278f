//! Identifier rules and output names

use heck::ToLowerCamelCase;
use std::collections::{HashMap, HashSet};

/// Reserved words that need an `@` prefix to be used as identifiers
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Whether `name` can be declared as a member name
pub fn is_valid_identifier(name: &str) -> bool {
    let (escaped, body) = match name.strip_prefix('@') {
        Some(body) => (true, body),
        None => (false, name),
    };

    let mut chars = body.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && (escaped || !is_keyword(body))
}

/// Escape a keyword with `@`
pub fn escape_keyword(name: &str) -> String {
    if is_keyword(name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Constructor parameter for a property: lower camel case, `_value` suffix
/// when casing leaves the name unchanged or unusable, `@` for keywords. Names that
/// collide after casing get a numeric suffix.
pub fn parameter_names<'a, I>(property_names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used = HashSet::new();
    property_names
        .into_iter()
        .map(|property| {
            let cased = property.to_lower_camel_case();
            let unusable = cased.is_empty() || cased.starts_with(|c: char| c.is_ascii_digit());
            let mut name = if unusable {
                property.to_string()
            } else {
                cased
            };
            if name == property {
                name.push_str("_value");
            }

            let mut candidate = name.clone();
            let mut counter = 1;
            while !used.insert(candidate.clone()) {
                candidate = format!("{}{}", name, counter);
                counter += 1;
            }

            escape_keyword(&candidate)
        })
        .collect()
}

/// Hands out output identifiers unique within one batch. The first type
/// keeps its simple name; later ones get `1`, `2`, ... appended, in the
/// order they are assigned.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        while self.taken.contains(&candidate) {
            let counter = self.counters.entry(name.to_string()).or_insert(0);
            *counter += 1;
            candidate = format!("{}{}", name, counter);
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
