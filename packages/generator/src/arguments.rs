//! Attribute argument parsing
//!
//! Argument lists arrive as raw tokens exactly as written (`"Name"`, `true`,
//! `compareValues: true`). Parsing never fails: anything that cannot be
//! read falls back to the caller's default, since attribute lists are
//! routinely half-typed while the user edits them.

/// Text of a string token: enclosing quotes stripped, or the value of a `name: value` pair
fn string_text(token: &str) -> Option<String> {
    let token = token.trim();
    if let Some(rest) = token.strip_prefix('"') {
        return Some(rest.strip_suffix('"').unwrap_or(rest).to_string());
    }
    token
        .split_once(':')
        .map(|(_, value)| trim_value(value).to_string())
}

/// Text of a literal token such as `true` or `42`; quoted tokens are not literals
fn literal_text(token: &str) -> Option<&str> {
    let token = token.trim();
    if token.is_empty() || token.starts_with('"') {
        return None;
    }
    match token.split_once(':') {
        Some((_, value)) => Some(trim_value(value)),
        None => Some(token),
    }
}

fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c == ' ' || c == '"' || c == '\t')
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Name part of a `name: value` token, if the token is named
fn token_name(token: &str) -> Option<&str> {
    let token = token.trim();
    if token.starts_with('"') {
        return None;
    }
    token
        .split_once(':')
        .map(|(name, _)| name.trim())
        .filter(|name| !name.is_empty())
}

/// Read the string at `index`, or `default`
pub fn extract_string(args: &[String], index: usize, default: &str) -> String {
    args.get(index)
        .and_then(|token| string_text(token))
        .unwrap_or_else(|| default.to_string())
}

/// Read the boolean at `index`, or `default`
pub fn extract_boolean(args: &[String], index: usize, default: bool) -> bool {
    args.get(index)
        .and_then(|token| literal_text(token))
        .and_then(parse_bool)
        .unwrap_or(default)
}

/// Read the integer at `index`, or `default`
pub fn extract_int(args: &[String], index: usize, default: i64) -> i64 {
    args.get(index)
        .and_then(|token| literal_text(token))
        .and_then(|text| text.parse().ok())
        .unwrap_or(default)
}

/// Reads arguments against a known parameter list, so `name: value` tokens
/// land in their named slot wherever they are written
struct ArgumentReader<'a> {
    args: &'a [String],
    parameters: &'static [&'static str],
}

impl<'a> ArgumentReader<'a> {
    fn new(args: &'a [String], parameters: &'static [&'static str]) -> Self {
        Self { args, parameters }
    }

    /// Index of the token that fills parameter `slot`
    fn position(&self, slot: usize) -> Option<usize> {
        let name = self.parameters.get(slot)?;

        if let Some(index) = self
            .args
            .iter()
            .position(|token| token_name(token) == Some(*name))
        {
            return Some(index);
        }

        // A token naming a different known parameter does not fill this slot
        let token = self.args.get(slot)?;
        match token_name(token) {
            Some(other) if self.parameters.contains(&other) => None,
            _ => Some(slot),
        }
    }

    fn string(&self, slot: usize, default: &str) -> String {
        match self.position(slot) {
            Some(index) => extract_string(self.args, index, default),
            None => default.to_string(),
        }
    }

    fn boolean(&self, slot: usize, default: bool) -> bool {
        match self.position(slot) {
            Some(index) => extract_boolean(self.args, index, default),
            None => default,
        }
    }
}

/// Arguments of the observable-property marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyArguments {
    /// Public property to generate
    pub name: String,
    /// Emit a per-property hook and call the global hook
    pub extra_notify: bool,
    /// Skip assignment and notification when the value is unchanged
    pub compare_values: bool,
}

impl PropertyArguments {
    const PARAMETERS: &'static [&'static str] = &["name", "extraNotify", "compareValues"];

    /// Returns `None` only when there are no arguments at all
    pub fn parse(args: &[String]) -> Option<Self> {
        if args.is_empty() {
            return None;
        }

        let reader = ArgumentReader::new(args, Self::PARAMETERS);
        Some(Self {
            name: reader.string(0, ""),
            extra_notify: reader.boolean(1, false),
            compare_values: reader.boolean(2, false),
        })
    }
}

/// Arguments of the concrete-type marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteArguments {
    pub mocking_type_full_name: String,
    pub generate_initializing_constructor: bool,
    pub make_setters_private: bool,
    pub implement_interface: bool,
    pub make_reference_types_nullable: bool,
    pub make_value_types_nullable: bool,
}

impl Default for ConcreteArguments {
    fn default() -> Self {
        Self {
            mocking_type_full_name: String::new(),
            generate_initializing_constructor: true,
            make_setters_private: false,
            implement_interface: false,
            make_reference_types_nullable: false,
            make_value_types_nullable: false,
        }
    }
}

impl ConcreteArguments {
    const PARAMETERS: &'static [&'static str] = &[
        "interfaceFullTypeName",
        "generateInitializingConstructor",
        "makeSettersPrivate",
        "implementInterface",
        "makeReferenceTypesNullable",
        "makeValueTypesNullable",
    ];

    pub fn parse(args: &[String]) -> Option<Self> {
        if args.is_empty() {
            return None;
        }

        let defaults = Self::default();
        let reader = ArgumentReader::new(args, Self::PARAMETERS);
        Some(Self {
            mocking_type_full_name: reader.string(0, ""),
            generate_initializing_constructor: reader
                .boolean(1, defaults.generate_initializing_constructor),
            make_setters_private: reader.boolean(2, defaults.make_setters_private),
            implement_interface: reader.boolean(3, defaults.implement_interface),
            make_reference_types_nullable: reader
                .boolean(4, defaults.make_reference_types_nullable),
            make_value_types_nullable: reader.boolean(5, defaults.make_value_types_nullable),
        })
    }
}
