// Copyright 2025 Cowboy AI, LLC.

//! Well-known concepts and patterns
//!
//! The built-in semantic templates write against these records. Their ids are
//! derived from stable names, so every process (and every store) agrees on
//! them without a lookup. [`WellKnownPattern::assembler`] drafts the pattern
//! record itself, for hosts that need to bootstrap an empty store.

use crate::composition::PatternAssembler;
use crate::fields::FieldDataType;
use crate::identifiers::PublicId;

/// Concepts the built-in templates put into field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownConcept {
    /// English language
    EnglishLanguage,
    /// Spanish language
    SpanishLanguage,
    /// French language
    FrenchLanguage,
    /// German language
    GermanLanguage,
    /// Description text is not case sensitive
    DescriptionNotCaseSensitive,
    /// Description text is case sensitive
    DescriptionCaseSensitive,
    /// Only the initial character is case sensitive
    DescriptionInitialCharacterCaseSensitive,
    /// Fully qualified name description type
    FullyQualifiedNameDescriptionType,
    /// Regular name (synonym) description type
    RegularNameDescriptionType,
    /// Definition description type
    DefinitionDescriptionType,
    /// Preferred dialect acceptability
    Preferred,
    /// Acceptable dialect acceptability
    Acceptable,
    /// Identifier source for UUIDs
    UniversallyUniqueIdentifier,
}

impl WellKnownConcept {
    /// Stable name the id is derived from
    pub fn name(&self) -> &'static str {
        match self {
            WellKnownConcept::EnglishLanguage => "English language",
            WellKnownConcept::SpanishLanguage => "Spanish language",
            WellKnownConcept::FrenchLanguage => "French language",
            WellKnownConcept::GermanLanguage => "German language",
            WellKnownConcept::DescriptionNotCaseSensitive => "Description not case sensitive",
            WellKnownConcept::DescriptionCaseSensitive => "Description case sensitive",
            WellKnownConcept::DescriptionInitialCharacterCaseSensitive => {
                "Description initial character case sensitive"
            }
            WellKnownConcept::FullyQualifiedNameDescriptionType => {
                "Fully qualified name description type"
            }
            WellKnownConcept::RegularNameDescriptionType => "Regular name description type",
            WellKnownConcept::DefinitionDescriptionType => "Definition description type",
            WellKnownConcept::Preferred => "Preferred",
            WellKnownConcept::Acceptable => "Acceptable",
            WellKnownConcept::UniversallyUniqueIdentifier => "Universally unique identifier",
        }
    }

    /// Public id of the concept
    pub fn public_id(&self) -> PublicId {
        PublicId::from_name(&format!("concept:{}", self.name()))
    }
}

/// Patterns the built-in templates write semantics against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownPattern {
    /// Free-text comments
    Comment,
    /// Descriptions: fully qualified names, synonyms, definitions
    Description,
    /// US English dialect acceptability of a description
    UsEnglishDialect,
    /// GB English dialect acceptability of a description
    GbEnglishDialect,
    /// External identifiers
    Identifier,
    /// Stated EL++ axioms
    StatedAxioms,
    /// Stated parent/child navigation
    StatedNavigation,
    /// Membership in the Tinkar base model
    TinkarBaseModelComponent,
    /// Membership in the Komet base model
    KometBaseModelComponent,
}

impl WellKnownPattern {
    /// Every well-known pattern
    pub const ALL: [WellKnownPattern; 9] = [
        WellKnownPattern::Comment,
        WellKnownPattern::Description,
        WellKnownPattern::UsEnglishDialect,
        WellKnownPattern::GbEnglishDialect,
        WellKnownPattern::Identifier,
        WellKnownPattern::StatedAxioms,
        WellKnownPattern::StatedNavigation,
        WellKnownPattern::TinkarBaseModelComponent,
        WellKnownPattern::KometBaseModelComponent,
    ];

    /// Stable name the id is derived from
    pub fn name(&self) -> &'static str {
        match self {
            WellKnownPattern::Comment => "Comment pattern",
            WellKnownPattern::Description => "Description pattern",
            WellKnownPattern::UsEnglishDialect => "US English dialect pattern",
            WellKnownPattern::GbEnglishDialect => "GB English dialect pattern",
            WellKnownPattern::Identifier => "Identifier pattern",
            WellKnownPattern::StatedAxioms => "EL++ stated axioms pattern",
            WellKnownPattern::StatedNavigation => "Stated navigation pattern",
            WellKnownPattern::TinkarBaseModelComponent => "Tinkar base model component pattern",
            WellKnownPattern::KometBaseModelComponent => "Komet base model component pattern",
        }
    }

    /// Public id of the pattern
    pub fn public_id(&self) -> PublicId {
        PublicId::from_name(&format!("pattern:{}", self.name()))
    }

    /// Field names and types, in positional order
    pub fn fields(&self) -> &'static [(&'static str, FieldDataType)] {
        match self {
            WellKnownPattern::Comment => &[
                ("Comment", FieldDataType::String),
                ("Context", FieldDataType::String),
            ],
            WellKnownPattern::Description => &[
                ("Language", FieldDataType::Component),
                ("Text", FieldDataType::String),
                ("Case significance", FieldDataType::Component),
                ("Description type", FieldDataType::Component),
            ],
            WellKnownPattern::UsEnglishDialect | WellKnownPattern::GbEnglishDialect => {
                &[("Acceptability", FieldDataType::Component)]
            }
            WellKnownPattern::Identifier => &[
                ("Identifier source", FieldDataType::Component),
                ("Identifier value", FieldDataType::String),
            ],
            WellKnownPattern::StatedAxioms => &[("Parents", FieldDataType::ComponentSet)],
            WellKnownPattern::StatedNavigation => &[
                ("Children", FieldDataType::ComponentSet),
                ("Parents", FieldDataType::ComponentSet),
            ],
            WellKnownPattern::TinkarBaseModelComponent
            | WellKnownPattern::KometBaseModelComponent => &[],
        }
    }

    /// Draft of the pattern record with its field definitions
    pub fn assembler(&self) -> PatternAssembler {
        let field = |name: &str| PublicId::from_name(&format!("field:{}:{name}", self.name()));
        self.fields().iter().fold(
            PatternAssembler::with_public_id(self.public_id())
                .meaning(PublicId::from_name(&format!("meaning:{}", self.name())))
                .purpose(PublicId::from_name(&format!("purpose:{}", self.name()))),
            |pattern, (name, data_type)| pattern.field(field(name), field(name), *data_type),
        )
    }
}
