use crate::harness::{Assertion, Scenario};
use tabkeep_core::{BLANK_TITLE, HELP_REPO, SYSTEM_REPO};

#[test]
fn test_fresh_workspace_is_blank() {
    Scenario::new("fresh_blank")
        .assert_repo(None)
        .assert_blank()
        .assert(Assertion::CurrentTitle(BLANK_TITLE.to_string()))
        .run()
        .unwrap();
}

#[test]
fn test_close_records_system_entry() {
    Scenario::new("close_records_system")
        .from_fixture("default")
        .with_repository("notes")
        .open("notes", "/todo.md")
        .close()
        .assert_blank()
        .assert_most_recent(SYSTEM_REPO, Some("/blank.md"))
        .assert(Assertion::RecencyMatchesOpenTime)
        .run()
        .unwrap();
}

#[test]
fn test_help_document_becomes_current() {
    Scenario::new("help_document")
        .with_help_doc("FEATURES.md", "# Features\n\nTabs that remember.")
        .show_help("FEATURES.md")
        .assert_current(HELP_REPO, "/FEATURES.md")
        .assert(Assertion::CurrentTitle("FEATURES.md".to_string()))
        .assert(Assertion::ContentContains("Tabs that remember".to_string()))
        .run()
        .unwrap();
}

#[test]
fn test_missing_help_document_fails() {
    let error = Scenario::new("missing_help")
        .show_help("NOPE.md")
        .run()
        .expect_failure();
    assert!(error.contains("NOPE.md"));
}
