// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use chrono::Utc;
use cim_composer::{
    CaseSignificance, Comment, Composer, ComposerError, ComposerResult, ConceptAssembler,
    CustomTemplate, Definition, FieldValue, FieldValues, FullyQualifiedName, GbDialect,
    Identifier, InMemoryEntityStore, Language, PublicId, SemanticTemplate, Session, StatedAxiom,
    StatedNavigation, Status, Synonym, UsDialect, VersionData, WellKnownPattern,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn session() -> (Session, Arc<InMemoryEntityStore>, Composer) {
    let store = Arc::new(InMemoryEntityStore::new());
    let mut composer = Composer::new(store.clone());
    let session = composer.open(
        Status::Active,
        Utc::now(),
        PublicId::from_name("author"),
        PublicId::from_name("module"),
        PublicId::from_name("path"),
    );
    (session, store, composer)
}

#[test_case(Comment::new("note").into(), WellKnownPattern::Comment ; "comment")]
#[test_case(Definition::new(Language::French, "une couleur", CaseSignificance::NotCaseSensitive).into(), WellKnownPattern::Description ; "definition")]
#[test_case(FullyQualifiedName::new(Language::English, "Color", CaseSignificance::NotCaseSensitive).into(), WellKnownPattern::Description ; "fully qualified name")]
#[test_case(Synonym::new(Language::German, "Farbe", CaseSignificance::InitialCharacterCaseSensitive).into(), WellKnownPattern::Description ; "synonym")]
#[test_case(UsDialect::preferred().into(), WellKnownPattern::UsEnglishDialect ; "us dialect")]
#[test_case(GbDialect::acceptable().into(), WellKnownPattern::GbEnglishDialect ; "gb dialect")]
#[test_case(Identifier::uuid(uuid::Uuid::nil()).into(), WellKnownPattern::Identifier ; "identifier")]
#[test_case(StatedAxiom::is_a(PublicId::from_name("parent")).into(), WellKnownPattern::StatedAxioms ; "stated axiom")]
#[test_case(StatedNavigation::new().children([PublicId::from_name("child")]).into(), WellKnownPattern::StatedNavigation ; "stated navigation")]
#[test_case(SemanticTemplate::TinkarBaseModel, WellKnownPattern::TinkarBaseModelComponent ; "tinkar base model")]
#[test_case(SemanticTemplate::KometBaseModel, WellKnownPattern::KometBaseModelComponent ; "komet base model")]
fn valid_template_attaches_against_its_pattern(
    template: SemanticTemplate,
    expected: WellKnownPattern,
) {
    let (session, store, _composer) = session();
    let concept = session.compose(ConceptAssembler::new()).unwrap();
    let values = template.field_values();

    let semantic = concept.attach(template).unwrap();
    session.commit().unwrap();

    let versions = store.durable_versions(semantic.public_id()).unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(
        versions[0].data,
        VersionData::Semantic {
            referenced_component: concept.public_id().clone(),
            pattern: expected.public_id(),
            field_values: values,
        }
    );
}

#[test_case(Comment::new("  ").into() ; "blank comment")]
#[test_case(Definition::new(Language::English, "", CaseSignificance::CaseSensitive).into() ; "empty definition")]
#[test_case(FullyQualifiedName::new(Language::English, "\t", CaseSignificance::CaseSensitive).into() ; "blank name")]
#[test_case(Synonym::new(Language::Spanish, "", CaseSignificance::CaseSensitive).into() ; "empty synonym")]
#[test_case(Identifier::new(PublicId::from_name("scheme"), "").into() ; "empty identifier")]
#[test_case(StatedAxiom::default().into() ; "axiom without parents")]
#[test_case(StatedNavigation::new().into() ; "empty navigation")]
fn invalid_template_is_rejected_before_writing(template: SemanticTemplate) {
    let (session, store, _composer) = session();
    let concept = session.compose(ConceptAssembler::new()).unwrap();

    let err = concept.attach(template).unwrap_err();

    assert!(err.is_validation_error(), "unexpected error: {err}");
    assert_eq!(session.components_in_session_count(), 1);
    assert_eq!(store.staged_version_count().unwrap(), 1);
}

#[derive(Debug)]
struct Measurement {
    value: f64,
    unit: &'static str,
}

impl CustomTemplate for Measurement {
    fn name(&self) -> &str {
        "measurement"
    }

    fn pattern(&self) -> PublicId {
        PublicId::from_name("measurement pattern")
    }

    fn validate(&self) -> ComposerResult<()> {
        if !self.value.is_finite() {
            return Err(ComposerError::validation("measurement must be finite"));
        }
        Ok(())
    }

    fn field_values(&self) -> FieldValues {
        vec![FieldValue::Float(self.value), FieldValue::from(self.unit)]
    }
}

#[test]
fn custom_template_attaches_like_built_ins() -> anyhow::Result<()> {
    let (session, store, _composer) = session();
    let concept = session.compose(ConceptAssembler::new())?;

    let measured = concept.attach(SemanticTemplate::custom(Measurement {
        value: 3.5,
        unit: "kg",
    }))?;
    let err = concept
        .attach(SemanticTemplate::custom(Measurement {
            value: f64::NAN,
            unit: "kg",
        }))
        .unwrap_err();
    assert!(err.is_validation_error());
    session.commit()?;

    let versions = store.durable_versions(measured.public_id())?;
    match &versions[0].data {
        VersionData::Semantic {
            pattern,
            field_values,
            ..
        } => {
            assert_eq!(pattern, &PublicId::from_name("measurement pattern"));
            assert_eq!(field_values[1], FieldValue::from("kg"));
        }
        other => panic!("expected a semantic version, got {other:?}"),
    }
    Ok(())
}

#[test]
fn other_language_uses_the_supplied_concept() {
    let klingon = PublicId::from_name("klingon language");
    let template: SemanticTemplate = Synonym::new(
        Language::Other(klingon.clone()),
        "rItlh",
        CaseSignificance::CaseSensitive,
    )
    .into();

    assert_eq!(template.field_values()[0], FieldValue::Component(klingon));
}
