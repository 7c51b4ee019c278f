//! Marker attribute recognition
//!
//! Attribute names are matched once, here. Everything past this module works
//! with [`Marker`] values and never compares attribute name strings.

use crate::arguments::{ConcreteArguments, PropertyArguments};
use propforge_syntax::Attribute;

/// Recognised marker attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    MakeProperty,
    MakeConcrete,
}

impl MarkerKind {
    /// Normalise an attribute name as written: `MakeProperty`,
    /// `MakePropertyAttribute`, `SpeedyGenerators.MakeProperty` and
    /// `global::SpeedyGenerators.MakePropertyAttribute` are all the same marker
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("global::").unwrap_or(name);
        let simple = name.rsplit('.').next().unwrap_or(name);
        let simple = simple.strip_suffix("Attribute").unwrap_or(simple);

        match simple {
            "MakeProperty" => Some(MarkerKind::MakeProperty),
            "MakeConcrete" => Some(MarkerKind::MakeConcrete),
            _ => None,
        }
    }
}

/// A marker attribute with its parsed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    MakeProperty(PropertyArguments),
    MakeConcrete(ConcreteArguments),
}

impl Marker {
    /// `None` for unrelated attributes and for markers without arguments
    pub fn from_attribute(attribute: &Attribute) -> Option<Self> {
        match MarkerKind::from_attribute_name(&attribute.name)? {
            MarkerKind::MakeProperty => {
                PropertyArguments::parse(&attribute.arguments).map(Marker::MakeProperty)
            }
            MarkerKind::MakeConcrete => {
                ConcreteArguments::parse(&attribute.arguments).map(Marker::MakeConcrete)
            }
        }
    }
}

/// First property marker among `attributes`
pub fn find_property_marker(attributes: &[Attribute]) -> Option<PropertyArguments> {
    attributes
        .iter()
        .find_map(|attribute| match Marker::from_attribute(attribute)? {
            Marker::MakeProperty(arguments) => Some(arguments),
            Marker::MakeConcrete(_) => None,
        })
}

/// First concrete-type marker among `attributes`
pub fn find_concrete_marker(attributes: &[Attribute]) -> Option<ConcreteArguments> {
    attributes
        .iter()
        .find_map(|attribute| match Marker::from_attribute(attribute)? {
            Marker::MakeConcrete(arguments) => Some(arguments),
            Marker::MakeProperty(_) => None,
        })
}
