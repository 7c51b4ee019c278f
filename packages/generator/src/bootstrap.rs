//! Marker attribute declarations
//!
//! Projects consuming the generated code need the two marker attributes in
//! scope. Their source never depends on the input.

use crate::options::LineEnding;

/// Identifier the attribute source is registered under
pub const ATTRIBUTES_IDENTIFIER: &str = "MakePropertyAttribute";

pub const ATTRIBUTES_SOURCE: &str = r#"using System;

namespace SpeedyGenerators
{
    [AttributeUsage(AttributeTargets.Field, Inherited = false, AllowMultiple = false)]
    sealed class MakePropertyAttribute : Attribute
    {
        public MakePropertyAttribute(string name, bool extraNotify = false, bool compareValues = false)
        {
            Name = name;
            ExtraNotify = extraNotify;
            CompareValues = compareValues;
        }

        public string Name { get; private set; }

        public bool ExtraNotify { get; private set; }

        public bool CompareValues { get; private set; }
    }

    [AttributeUsage(AttributeTargets.Class | AttributeTargets.Struct, Inherited = false, AllowMultiple = false)]
    sealed class MakeConcreteAttribute : Attribute
    {
        public MakeConcreteAttribute(
            string interfaceFullTypeName,
            bool generateInitializingConstructor = true,
            bool makeSettersPrivate = false,
            bool implementInterface = false,
            bool makeReferenceTypesNullable = false,
            bool makeValueTypesNullable = false)
        {
            InterfaceFullTypeName = interfaceFullTypeName ?? throw new ArgumentNullException(nameof(interfaceFullTypeName));
            GenerateInitializingConstructor = generateInitializingConstructor;
            MakeSettersPrivate = makeSettersPrivate;
            ImplementInterface = implementInterface;
            MakeReferenceTypesNullable = makeReferenceTypesNullable;
            MakeValueTypesNullable = makeValueTypesNullable;
        }

        public string InterfaceFullTypeName { get; }

        public bool GenerateInitializingConstructor { get; }

        public bool MakeSettersPrivate { get; }

        public bool ImplementInterface { get; }

        public bool MakeReferenceTypesNullable { get; }

        public bool MakeValueTypesNullable { get; }
    }
}
"#;

/// The attribute source with the requested line endings
pub fn attributes_source(line_ending: LineEnding) -> String {
    match line_ending {
        LineEnding::Lf => ATTRIBUTES_SOURCE.to_string(),
        LineEnding::Crlf => ATTRIBUTES_SOURCE.replace('\n', "\r\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_both_markers() {
        assert!(ATTRIBUTES_SOURCE.contains("class MakePropertyAttribute : Attribute"));
        assert!(ATTRIBUTES_SOURCE.contains("class MakeConcreteAttribute : Attribute"));
        assert!(ATTRIBUTES_SOURCE.contains("bool extraNotify = false, bool compareValues = false"));
        assert!(ATTRIBUTES_SOURCE.contains("bool generateInitializingConstructor = true"));
    }

    #[test]
    fn test_crlf_conversion() {
        let text = attributes_source(LineEnding::Crlf);
        assert!(text.starts_with("using System;\r\n\r\nnamespace"));
        assert!(!text.replace("\r\n", "").contains('\n'));
    }
}
