// Copyright 2025 Cowboy AI, LLC.

//! Semantic templates: the closed set of built-in semantic kinds plus one
//! open `Custom` variant
//!
//! Every template knows its target pattern, how to lay out its field values
//! and what it needs before it may be written. Attaching any of them is one
//! operation, [`crate::ComponentHandle::attach`].

use super::node::LazyIdentity;
use crate::errors::{ComposerError, ComposerResult};
use crate::fields::{FieldValue, FieldValues};
use crate::identifiers::PublicId;
use crate::well_known::{WellKnownConcept, WellKnownPattern};
use std::fmt;

/// Language of a description
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    /// English
    English,
    /// Spanish
    Spanish,
    /// French
    French,
    /// German
    German,
    /// Any other language concept
    Other(PublicId),
}

impl Language {
    /// Concept naming the language
    pub fn concept(&self) -> PublicId {
        match self {
            Language::English => WellKnownConcept::EnglishLanguage.public_id(),
            Language::Spanish => WellKnownConcept::SpanishLanguage.public_id(),
            Language::French => WellKnownConcept::FrenchLanguage.public_id(),
            Language::German => WellKnownConcept::GermanLanguage.public_id(),
            Language::Other(id) => id.clone(),
        }
    }
}

/// Case significance of description text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseSignificance {
    /// Case may be changed freely
    NotCaseSensitive,
    /// Case is significant throughout
    CaseSensitive,
    /// Only the initial character's case is significant
    InitialCharacterCaseSensitive,
}

impl CaseSignificance {
    /// Concept naming the case significance
    pub fn concept(&self) -> PublicId {
        match self {
            CaseSignificance::NotCaseSensitive => {
                WellKnownConcept::DescriptionNotCaseSensitive.public_id()
            }
            CaseSignificance::CaseSensitive => {
                WellKnownConcept::DescriptionCaseSensitive.public_id()
            }
            CaseSignificance::InitialCharacterCaseSensitive => {
                WellKnownConcept::DescriptionInitialCharacterCaseSensitive.public_id()
            }
        }
    }
}

/// Dialect acceptability of a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acceptability {
    /// Preferred term in the dialect
    Preferred,
    /// Acceptable but not preferred
    Acceptable,
}

impl Acceptability {
    /// Concept naming the acceptability
    pub fn concept(&self) -> PublicId {
        match self {
            Acceptability::Preferred => WellKnownConcept::Preferred.public_id(),
            Acceptability::Acceptable => WellKnownConcept::Acceptable.public_id(),
        }
    }
}

/// Text shared by the three description templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionText {
    /// Language of the text
    pub language: Language,
    /// The text itself
    pub text: String,
    /// How case in `text` may be treated
    pub case_significance: CaseSignificance,
}

impl DescriptionText {
    fn validate(&self, what: &str) -> ComposerResult<()> {
        if self.text.trim().is_empty() {
            return Err(ComposerError::validation(format!("{what} text is empty")));
        }
        Ok(())
    }

    fn field_values(&self, description_type: WellKnownConcept) -> FieldValues {
        vec![
            FieldValue::Component(self.language.concept()),
            FieldValue::String(self.text.clone()),
            FieldValue::Component(self.case_significance.concept()),
            FieldValue::Component(description_type.public_id()),
        ]
    }
}

macro_rules! description_template {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(pub DescriptionText);

        impl $name {
            /// Create the description
            pub fn new(
                language: Language,
                text: impl Into<String>,
                case_significance: CaseSignificance,
            ) -> Self {
                Self(DescriptionText {
                    language,
                    text: text.into(),
                    case_significance,
                })
            }
        }
    };
}

description_template!(
    /// Fully qualified name: the unambiguous name of a component
    FullyQualifiedName
);
description_template!(
    /// Synonym: a regular name of a component
    Synonym
);
description_template!(
    /// Definition: a text definition of a component
    Definition
);

/// Free-text comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text
    pub text: String,
    /// Optional context the comment applies in
    pub context: String,
}

impl Comment {
    /// Comment without context
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: String::new(),
        }
    }

    /// Set the context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

macro_rules! dialect_template {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            /// Acceptability in the dialect
            pub acceptability: Acceptability,
        }

        impl $name {
            /// Dialect entry with the given acceptability
            pub fn new(acceptability: Acceptability) -> Self {
                Self { acceptability }
            }

            /// Preferred in this dialect
            pub fn preferred() -> Self {
                Self::new(Acceptability::Preferred)
            }

            /// Acceptable in this dialect
            pub fn acceptable() -> Self {
                Self::new(Acceptability::Acceptable)
            }
        }
    };
}

dialect_template!(
    /// US English dialect acceptability of a description
    UsDialect
);
dialect_template!(
    /// GB English dialect acceptability of a description
    GbDialect
);

/// External identifier of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Concept naming the identifier scheme
    pub source: PublicId,
    /// Identifier in that scheme
    pub value: String,
}

impl Identifier {
    /// Identifier from a scheme and value
    pub fn new(source: PublicId, value: impl Into<String>) -> Self {
        Self {
            source,
            value: value.into(),
        }
    }

    /// UUID identifier
    pub fn uuid(value: uuid::Uuid) -> Self {
        Self::new(
            WellKnownConcept::UniversallyUniqueIdentifier.public_id(),
            value.to_string(),
        )
    }
}

/// Stated axiom: the component is-a each of its parents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatedAxiom {
    /// Stated parent concepts
    pub parents: Vec<PublicId>,
}

impl StatedAxiom {
    /// Axiom with one parent
    pub fn is_a(parent: PublicId) -> Self {
        Self {
            parents: vec![parent],
        }
    }

    /// Add another parent
    pub fn and_is_a(mut self, parent: PublicId) -> Self {
        self.parents.push(parent);
        self
    }
}

/// Stated navigation: parents and children of a concept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatedNavigation {
    /// Parent concepts
    pub parents: Vec<PublicId>,
    /// Child concepts
    pub children: Vec<PublicId>,
}

impl StatedNavigation {
    /// Empty navigation; at least one parent or child is needed to attach it
    pub fn new() -> Self {
        Self::default()
    }

    /// Add parents
    pub fn parents(mut self, parents: impl IntoIterator<Item = PublicId>) -> Self {
        self.parents.extend(parents);
        self
    }

    /// Add children
    pub fn children(mut self, children: impl IntoIterator<Item = PublicId>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Caller-defined semantic kind
pub trait CustomTemplate: fmt::Debug {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Pattern the values are written against
    fn pattern(&self) -> PublicId;

    /// Precondition check; runs before anything is written
    fn validate(&self) -> ComposerResult<()> {
        Ok(())
    }

    /// Field values in the pattern's positional order
    fn field_values(&self) -> FieldValues;
}

/// One semantic kind to attach to a component
#[derive(Debug)]
pub enum SemanticTemplate {
    /// Free-text comment
    Comment(Comment),
    /// Text definition
    Definition(Definition),
    /// Fully qualified name
    FullyQualifiedName(FullyQualifiedName),
    /// US English dialect acceptability
    UsDialect(UsDialect),
    /// GB English dialect acceptability
    GbDialect(GbDialect),
    /// External identifier
    Identifier(Identifier),
    /// Stated is-a axiom
    StatedAxiom(StatedAxiom),
    /// Stated parents/children
    StatedNavigation(StatedNavigation),
    /// Regular name
    Synonym(Synonym),
    /// Tinkar base model membership marker
    TinkarBaseModel,
    /// Komet base model membership marker
    KometBaseModel,
    /// Caller-defined kind
    Custom(Box<dyn CustomTemplate>),
}

impl SemanticTemplate {
    /// Wrap a caller-defined template
    pub fn custom(template: impl CustomTemplate + 'static) -> Self {
        SemanticTemplate::Custom(Box::new(template))
    }

    /// Name used in logs and errors
    pub fn name(&self) -> &str {
        match self {
            SemanticTemplate::Comment(_) => "comment",
            SemanticTemplate::Definition(_) => "definition",
            SemanticTemplate::FullyQualifiedName(_) => "fully qualified name",
            SemanticTemplate::UsDialect(_) => "US dialect",
            SemanticTemplate::GbDialect(_) => "GB dialect",
            SemanticTemplate::Identifier(_) => "identifier",
            SemanticTemplate::StatedAxiom(_) => "stated axiom",
            SemanticTemplate::StatedNavigation(_) => "stated navigation",
            SemanticTemplate::Synonym(_) => "synonym",
            SemanticTemplate::TinkarBaseModel => "Tinkar base model membership",
            SemanticTemplate::KometBaseModel => "Komet base model membership",
            SemanticTemplate::Custom(custom) => custom.name(),
        }
    }

    /// Pattern the semantic is written against
    pub fn pattern(&self) -> PublicId {
        let pattern = match self {
            SemanticTemplate::Comment(_) => WellKnownPattern::Comment,
            SemanticTemplate::Definition(_)
            | SemanticTemplate::FullyQualifiedName(_)
            | SemanticTemplate::Synonym(_) => WellKnownPattern::Description,
            SemanticTemplate::UsDialect(_) => WellKnownPattern::UsEnglishDialect,
            SemanticTemplate::GbDialect(_) => WellKnownPattern::GbEnglishDialect,
            SemanticTemplate::Identifier(_) => WellKnownPattern::Identifier,
            SemanticTemplate::StatedAxiom(_) => WellKnownPattern::StatedAxioms,
            SemanticTemplate::StatedNavigation(_) => WellKnownPattern::StatedNavigation,
            SemanticTemplate::TinkarBaseModel => WellKnownPattern::TinkarBaseModelComponent,
            SemanticTemplate::KometBaseModel => WellKnownPattern::KometBaseModelComponent,
            SemanticTemplate::Custom(custom) => return custom.pattern(),
        };
        pattern.public_id()
    }

    /// Precondition check; a failure means nothing is written
    pub fn validate(&self) -> ComposerResult<()> {
        match self {
            SemanticTemplate::Comment(comment) => {
                if comment.text.trim().is_empty() {
                    return Err(ComposerError::validation("comment text is empty"));
                }
                Ok(())
            }
            SemanticTemplate::Definition(Definition(text)) => text.validate("definition"),
            SemanticTemplate::FullyQualifiedName(FullyQualifiedName(text)) => {
                text.validate("fully qualified name")
            }
            SemanticTemplate::Synonym(Synonym(text)) => text.validate("synonym"),
            SemanticTemplate::Identifier(identifier) => {
                if identifier.value.trim().is_empty() {
                    return Err(ComposerError::validation("identifier value is empty"));
                }
                Ok(())
            }
            SemanticTemplate::StatedAxiom(axiom) => {
                if axiom.parents.is_empty() {
                    return Err(ComposerError::validation(
                        "stated axiom needs at least one parent",
                    ));
                }
                Ok(())
            }
            SemanticTemplate::StatedNavigation(navigation) => {
                if navigation.parents.is_empty() && navigation.children.is_empty() {
                    return Err(ComposerError::validation(
                        "stated navigation needs parents or children",
                    ));
                }
                Ok(())
            }
            SemanticTemplate::UsDialect(_)
            | SemanticTemplate::GbDialect(_)
            | SemanticTemplate::TinkarBaseModel
            | SemanticTemplate::KometBaseModel => Ok(()),
            SemanticTemplate::Custom(custom) => custom.validate(),
        }
    }

    /// Field values in the target pattern's positional order
    pub fn field_values(&self) -> FieldValues {
        match self {
            SemanticTemplate::Comment(comment) => vec![
                FieldValue::String(comment.text.clone()),
                FieldValue::String(comment.context.clone()),
            ],
            SemanticTemplate::Definition(Definition(text)) => {
                text.field_values(WellKnownConcept::DefinitionDescriptionType)
            }
            SemanticTemplate::FullyQualifiedName(FullyQualifiedName(text)) => {
                text.field_values(WellKnownConcept::FullyQualifiedNameDescriptionType)
            }
            SemanticTemplate::Synonym(Synonym(text)) => {
                text.field_values(WellKnownConcept::RegularNameDescriptionType)
            }
            SemanticTemplate::UsDialect(UsDialect { acceptability })
            | SemanticTemplate::GbDialect(GbDialect { acceptability }) => {
                vec![FieldValue::Component(acceptability.concept())]
            }
            SemanticTemplate::Identifier(identifier) => vec![
                FieldValue::Component(identifier.source.clone()),
                FieldValue::String(identifier.value.clone()),
            ],
            SemanticTemplate::StatedAxiom(axiom) => {
                vec![FieldValue::component_set(axiom.parents.iter().cloned())]
            }
            SemanticTemplate::StatedNavigation(navigation) => vec![
                FieldValue::component_set(navigation.children.iter().cloned()),
                FieldValue::component_set(navigation.parents.iter().cloned()),
            ],
            SemanticTemplate::TinkarBaseModel | SemanticTemplate::KometBaseModel => Vec::new(),
            SemanticTemplate::Custom(custom) => custom.field_values(),
        }
    }

    /// Pair the template with a caller-supplied identity
    pub fn identified_by(self, id: PublicId) -> Attachment {
        Attachment {
            template: self,
            identity: LazyIdentity::supplied(id),
        }
    }
}

/// A template plus the identity its semantic will carry
#[derive(Debug)]
pub struct Attachment {
    pub(crate) template: SemanticTemplate,
    pub(crate) identity: LazyIdentity,
}

impl Attachment {
    /// The template being attached
    pub fn template(&self) -> &SemanticTemplate {
        &self.template
    }
}

impl From<SemanticTemplate> for Attachment {
    fn from(template: SemanticTemplate) -> Self {
        Attachment {
            template,
            identity: LazyIdentity::new(),
        }
    }
}

macro_rules! into_template {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SemanticTemplate {
                fn from(template: $variant) -> Self {
                    SemanticTemplate::$variant(template)
                }
            }

            impl From<$variant> for Attachment {
                fn from(template: $variant) -> Self {
                    SemanticTemplate::$variant(template).into()
                }
            }

            impl $variant {
                /// Pair the template with a caller-supplied identity
                pub fn identified_by(self, id: PublicId) -> Attachment {
                    SemanticTemplate::$variant(self).identified_by(id)
                }
            }
        )*
    };
}

into_template!(
    Comment,
    Definition,
    FullyQualifiedName,
    UsDialect,
    GbDialect,
    Identifier,
    StatedAxiom,
    StatedNavigation,
    Synonym,
);
