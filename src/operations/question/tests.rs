//! Tests for the question-driven orchestrator

use serde_json::json;

use super::*;
use crate::error::RequisiteError;
use crate::installer::RawOperation;
use crate::ledger::LEDGER_FILE;
use crate::manifest::ManifestStore;
use crate::resolver::OperationKind;
use crate::test_fixtures::{
    RecordingInstaller, ScriptedPrompt, StaticIndex, StaticLookup, create_project,
};

const MANIFEST: &str = r#"{
    "require": {
        "acme/framework": "^1.0"
    }
}
"#;

fn group(question: &str, candidates: &[(&str, &str)]) -> RequirementGroup {
    RequirementGroup::new(
        question,
        candidates
            .iter()
            .map(|(name, constraint)| ((*name).to_string(), (*constraint).to_string()))
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_group_needs_two_candidates() {
    let err = RequirementGroup::new("Which logger?", vec![("a/log".into(), String::new())])
        .unwrap_err();
    assert!(matches!(err, RequisiteError::InvalidRequirementGroup { count: 1, .. }));
}

#[test]
fn test_groups_from_directives() {
    let groups = RequirementGroup::from_directives(&json!({
        "optional": {
            "Which logger?": ["a/log", "b/log"],
            "Which cache?": {"a/cache": "^1.0", "b/cache": "*"}
        }
    }))
    .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].question(), "Which logger?");
    assert_eq!(groups[0].candidates()[1], ("b/log".to_string(), String::new()));
    assert_eq!(groups[1].candidates()[0], ("a/cache".to_string(), "^1.0".to_string()));

    assert!(RequirementGroup::from_directives(&json!({})).unwrap().is_empty());
    assert!(RequirementGroup::from_directives(&json!({"optional": {"Q?": ["only/one"]}})).is_err());
}

#[test]
fn test_installed_constraint() {
    assert_eq!(installed_constraint("1.2.3"), "^1.2.3");
    assert_eq!(installed_constraint("v1.2.3"), "^1.2.3");
    assert_eq!(installed_constraint("2.0.0-beta.1"), "2.0.0-beta.1");
    assert_eq!(installed_constraint("dev-main"), "dev-main");
}

#[test]
fn test_non_interactive_install_is_a_no_op() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0);
    let index = StaticIndex::new(vec![PackageSnapshot::new("a/log", "1.0.0")]);
    let lookup = StaticLookup::default().with("a/log", "1.0.0");
    let mut prompt = ScriptedPrompt::non_interactive();
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    let records = {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        let records = orchestrator
            .install("acme/framework", &[group("Which logger?", &[("a/log", ""), ("b/log", "")])])
            .unwrap();
        assert!(orchestrator.packages_to_install().is_empty());
        records
    };

    assert!(records.is_empty());
    assert_eq!(store.read_raw().unwrap(), MANIFEST.as_bytes());
    assert!(installer.runs().is_empty());
    assert!(lookup.lookups().is_empty());
}

#[test]
fn test_selection_is_installed_with_parent() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0)
        .emitting(vec![RawOperation::Install(PackageSnapshot::new("b/log", "2.0.0"))]);
    let index = StaticIndex::default();
    let lookup = StaticLookup::default().with("a/log", "1.0.0").with("b/log", "2.0.0");
    let mut prompt = ScriptedPrompt::new(["one", "5", "1"]);
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    let records = {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        let records = orchestrator
            .install("acme/framework", &[group("Which logger?", &[("a/log", "*"), ("b/log", "b/log")])])
            .unwrap();
        assert_eq!(
            orchestrator.packages_to_install().get("b/log"),
            Some(&"^2.0.0".to_string())
        );
        records
    };

    assert_eq!(prompt.asked().len(), 3);
    assert_eq!(
        prompt.shown(),
        [
            "Which logger?",
            "  [0] a/log : ^1.0.0",
            "  [1] b/log : ^2.0.0",
            "Invalid answer 'one'",
            "Invalid answer '5'",
        ]
    );
    assert_eq!(installer.runs(), [vec!["b/log".to_string()]]);
    assert_eq!(
        store.read().unwrap().links(Section::Require)[1],
        ("b/log".to_string(), "^2.0.0".to_string())
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].parent_package_name(), Some("acme/framework"));
    assert_eq!(records[0].operation(), OperationKind::Install);
}

#[test]
fn test_shared_candidate_is_not_asked_twice() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0);
    let index = StaticIndex::default();
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::new(["1"]);
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        orchestrator
            .install(
                "acme/framework",
                &[
                    group("Which transport?", &[("a/http", "^1.0"), ("shared/psr", "^2.0")]),
                    group("Which factory?", &[("shared/psr", "^2.0"), ("b/factory", "^1.0")]),
                ],
            )
            .unwrap();
        assert_eq!(orchestrator.packages_to_install().len(), 1);
    }

    assert_eq!(prompt.asked().len(), 1);
    assert_eq!(installer.runs(), [vec!["shared/psr".to_string()]]);
}

#[test]
fn test_group_answered_by_root_is_skipped() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0);
    let index = StaticIndex::default();
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::unanswered();
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        let records = orchestrator
            .install(
                "acme/framework",
                &[group("Which framework?", &[("Acme/Framework", "^1.0"), ("b/framework", "^1.0")])],
            )
            .unwrap();
        assert!(records.is_empty());
    }

    assert!(prompt.asked().is_empty());
    assert!(installer.runs().is_empty());
    assert_eq!(store.read_raw().unwrap(), MANIFEST.as_bytes());
}

#[test]
fn test_installed_candidate_is_selected_without_asking() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0);
    let index = StaticIndex::new(vec![PackageSnapshot::new("b/log", "v1.4.2")]);
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::unanswered();
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        orchestrator
            .install("acme/framework", &[group("Which logger?", &[("a/log", ""), ("b/log", "")])])
            .unwrap();
    }

    assert!(prompt.asked().is_empty());
    assert_eq!(
        store.read().unwrap().links(Section::Require)[1],
        ("b/log".to_string(), "^1.4.2".to_string())
    );
}

#[test]
fn test_failed_run_restores_manifest() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(1);
    let index = StaticIndex::default();
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::new(["0"]);
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        let records = orchestrator
            .install("acme/framework", &[group("Which logger?", &[("a/log", "^1.0"), ("b/log", "^1.0")])])
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(orchestrator.status(), 1);
    }

    assert_eq!(store.read_raw().unwrap(), MANIFEST.as_bytes());
}

#[test]
fn test_aborted_prompt_fails_before_writing() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0);
    let index = StaticIndex::default();
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::new(["x"]);
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    let err = {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        orchestrator
            .install("acme/framework", &[group("Which logger?", &[("a/log", "^1.0"), ("b/log", "^1.0")])])
            .unwrap_err()
    };

    assert!(matches!(err, RequisiteError::PromptAborted { .. }));
    assert_eq!(store.read_raw().unwrap(), MANIFEST.as_bytes());
}

#[test]
fn test_uninstall_adds_invoking_requires_to_whitelist() {
    let (temp, mut store) = create_project(
        r#"{"require": {"acme/framework": "^1.0", "b/log": "^1.0"}}"#,
    );
    let mut installer = RecordingInstaller::new(0)
        .emitting(vec![RawOperation::Uninstall(PackageSnapshot::new("b/log", "1.0.0"))]);
    let index = StaticIndex::new(vec![
        PackageSnapshot::new("acme/framework", "1.0.0")
            .with_require("acme/contracts", "^1.0")
            .with_require("b/log", "^1.0"),
        PackageSnapshot::new("acme/contracts", "1.0.0"),
        PackageSnapshot::new("acme/console", "1.0.0").with_require("acme/contracts", "^1.0"),
        PackageSnapshot::new("b/log", "1.0.0"),
    ]);
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::non_interactive();
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    let records = {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        orchestrator
            .uninstall("acme/framework", &["b/log".to_string()])
            .unwrap()
    };

    // acme/contracts joins through acme/framework but acme/console still needs it
    assert_eq!(installer.runs(), [vec!["b/log".to_string()]]);
    assert_eq!(
        store.read().unwrap().links(Section::Require),
        vec![("acme/framework".to_string(), "^1.0".to_string())]
    );
    assert_eq!(records.len(), 1);
    assert!(records[0].is_optional_extra());
}

#[test]
fn test_uninstall_without_dependencies_does_nothing() {
    let (temp, mut store) = create_project(MANIFEST);
    let mut installer = RecordingInstaller::new(0);
    let index = StaticIndex::default();
    let lookup = StaticLookup::default();
    let mut prompt = ScriptedPrompt::non_interactive();
    let ledger = Lock::new(temp.path().join(LEDGER_FILE));

    {
        let session = InstallSession::open(&mut store, &mut installer, &index).unwrap();
        let mut orchestrator = QuestionOrchestrator::new(session, &lookup, &mut prompt, &ledger);
        assert!(orchestrator.uninstall("acme/framework", &[]).unwrap().is_empty());
    }

    assert!(installer.runs().is_empty());
}
