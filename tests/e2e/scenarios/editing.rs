use crate::harness::{Assertion, Scenario};

#[test]
fn test_edit_then_save() {
    Scenario::new("edit_then_save")
        .from_fixture("default")
        .with_repository("notes")
        .open("notes", "/todo.md")
        .assert(Assertion::Modified(false))
        .assert(Assertion::ContentContains("Water the plants".to_string()))
        .edit("# Todo\n\n- [x] Water the plants\n")
        .assert(Assertion::Modified(true))
        .wait_secs(5)
        .save()
        .assert(Assertion::Modified(false))
        .run()
        .unwrap();
}

#[test]
fn test_edits_survive_switching_away_and_back() {
    Scenario::new("edits_survive_switch")
        .from_fixture("default")
        .with_repository("notes")
        .open("notes", "/todo.md")
        .edit("draft")
        .open("notes", "/ideas.md")
        .assert(Assertion::Modified(false))
        .assert(Assertion::Custom(Box::new(|ws| {
            let todo = tabkeep_core::FileUri::new("notes", "/todo.md");
            let entity = ws.session().opened_file(&todo);
            anyhow::ensure!(entity.content.as_deref() == Some("draft"), "draft lost");
            anyhow::ensure!(entity.is_modified(), "draft should be unsaved");
            Ok(())
        })))
        .run()
        .unwrap();
}

#[test]
fn test_edit_on_blank_is_rejected() {
    let error = Scenario::new("edit_blank")
        .edit("nothing to edit")
        .run()
        .expect_failure();
    assert!(error.contains("to edit"));
}
