use super::assertions::Assertion;
use super::clock::MockClock;
use super::steps::ScenarioStep;
use super::workspace::TestWorkspace;
use anyhow::{anyhow, ensure, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tabkeep_core::{FileUri, Workspace};

/// Executes scenarios against a real tabkeep workspace
pub struct ScenarioRunner {
    workspace: TestWorkspace,
    tabkeep: Option<Workspace>,
    clock: MockClock,
    crashed: bool,
    current_step: usize,
}

impl ScenarioRunner {
    /// Create a new runner, seeding the workspace before init
    pub fn new(
        fixture: Option<&str>,
        initial_files: HashMap<String, Vec<u8>>,
        repositories: &[String],
        help_docs: &HashMap<String, String>,
    ) -> Result<Self> {
        let workspace = TestWorkspace::with_files(initial_files)?;
        if let Some(name) = fixture {
            workspace.copy_fixture(name)?;
        }

        let clock = MockClock::new();
        let mut tabkeep = workspace
            .init_tabkeep()?
            .with_time_provider(clock.as_provider());

        for name in repositories {
            tabkeep.add_repository(name, name.as_str())?;
        }

        let help_dir = tabkeep.state_dir().join(&tabkeep.config().help.dir);
        for (name, content) in help_docs {
            fs::write(help_dir.join(name), content)
                .with_context(|| format!("Failed to write help doc {}", name))?;
        }

        Ok(Self {
            workspace,
            tabkeep: Some(tabkeep),
            clock,
            crashed: false,
            current_step: 0,
        })
    }

    /// Get current step number
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Execute all steps in sequence
    pub fn execute(&mut self, steps: &[ScenarioStep]) -> Result<()> {
        for (i, step) in steps.iter().enumerate() {
            self.current_step = i;
            self.execute_step(step)
                .with_context(|| format!("Step {}: {:?}", i, step))?;
        }
        Ok(())
    }

    fn tabkeep(&mut self) -> Result<&mut Workspace> {
        self.tabkeep
            .as_mut()
            .ok_or_else(|| anyhow!("Workspace not available (crashed?)"))
    }

    /// Execute a single step
    fn execute_step(&mut self, step: &ScenarioStep) -> Result<()> {
        match step {
            ScenarioStep::UseRepo { name } => self.handle_use_repo(name.as_deref()),
            ScenarioStep::LoadTree { repo } => {
                self.tabkeep()?.load_tree(repo.as_deref())?;
                Ok(())
            }
            ScenarioStep::Refresh => Ok(self.tabkeep()?.refresh()?),

            ScenarioStep::OpenFile { repo, path } => {
                self.tabkeep()?.open_file(repo, path)?;
                Ok(())
            }
            ScenarioStep::CloseFile => {
                self.tabkeep()?.close_file()?;
                Ok(())
            }
            ScenarioStep::EditContent { content } => self.handle_edit(content),
            ScenarioStep::Save => self.handle_save(),
            ScenarioStep::ShowHelp { doc } => {
                self.tabkeep()?.show_help(doc)?;
                Ok(())
            }

            ScenarioStep::PinTab => self.handle_pin_tab(),
            ScenarioStep::ToggleSide => {
                let session = self.tabkeep()?.session_mut();
                let show = !session.show_side();
                Ok(session.set_show_side(show)?)
            }
            ScenarioStep::ToggleXterm => {
                let session = self.tabkeep()?.session_mut();
                let show = !session.show_xterm();
                session.set_show_xterm(show);
                Ok(())
            }

            ScenarioStep::Wait { duration } => self.handle_wait(*duration),
            ScenarioStep::ClockBack { duration } => {
                self.clock.rewind(*duration);
                Ok(())
            }

            ScenarioStep::Crash => self.handle_crash(),
            ScenarioStep::Restart => self.handle_restart(),

            ScenarioStep::Assert { assertion } => self.handle_assertion(assertion),
        }
    }

    // ===== Action handlers =====

    fn handle_use_repo(&mut self, name: Option<&str>) -> Result<()> {
        let tabkeep = self.tabkeep()?;
        match name {
            Some(name) => {
                tabkeep.use_repository(name)?;
            }
            None => {
                tabkeep.session_mut().switch_current_repo(None)?;
            }
        }
        Ok(())
    }

    fn handle_edit(&mut self, content: &str) -> Result<()> {
        let session = self.tabkeep()?.session_mut();
        let id = session.current_file_id().clone();
        ensure!(
            session.update_content(&id, content),
            "No opened file at {} to edit",
            id
        );
        Ok(())
    }

    fn handle_save(&mut self) -> Result<()> {
        let session = self.tabkeep()?.session_mut();
        let id = session.current_file_id().clone();
        ensure!(session.mark_saved(&id), "No opened file at {} to save", id);
        Ok(())
    }

    fn handle_pin_tab(&mut self) -> Result<()> {
        let session = self.tabkeep()?.session_mut();
        let mut tabs = session.tabs().to_vec();
        tabs.push(session.current_file_id().clone());
        Ok(session.set_tabs(tabs)?)
    }

    // ===== Time control =====

    fn handle_wait(&mut self, duration: Duration) -> Result<()> {
        self.clock.advance(duration);
        Ok(())
    }

    // ===== Process lifecycle =====

    fn handle_crash(&mut self) -> Result<()> {
        // Drop the workspace without any shutdown step
        self.tabkeep = None;
        self.crashed = true;
        Ok(())
    }

    fn handle_restart(&mut self) -> Result<()> {
        if !self.crashed {
            return Err(anyhow!("Cannot restart - not crashed"));
        }

        let tabkeep = self
            .workspace
            .open_tabkeep()?
            .with_time_provider(self.clock.as_provider());

        self.tabkeep = Some(tabkeep);
        self.crashed = false;

        Ok(())
    }

    // ===== Assertions =====

    fn handle_assertion(&mut self, assertion: &Assertion) -> Result<()> {
        if let Assertion::Custom(check) = assertion {
            return check(self.tabkeep()?);
        }

        let tabkeep = self
            .tabkeep
            .as_ref()
            .ok_or_else(|| anyhow!("Workspace not available"))?;
        let session = tabkeep.session();
        let current = session.current_file();

        match assertion {
            Assertion::CurrentRepo(expected) => {
                let actual = session.current_repo().map(|r| r.name.clone());
                ensure!(
                    actual == *expected,
                    "Expected current repo {:?}, got {:?}",
                    expected,
                    actual
                );
            }
            Assertion::CurrentFile { repo, path } => {
                let expected = FileUri::new(repo, path);
                ensure!(
                    session.current_file_id() == &expected,
                    "Expected current file {}, got {}",
                    expected,
                    session.current_file_id()
                );
                ensure!(
                    current.repo == *repo && current.path == *path,
                    "Entity is {}:{}, expected {}:{}",
                    current.repo,
                    current.path,
                    repo,
                    path
                );
            }
            Assertion::CurrentFileBlank => {
                ensure!(
                    current.is_blank(),
                    "Expected blank file, got {}",
                    current.id
                );
            }
            Assertion::CurrentTitle(expected) => {
                ensure!(
                    current.title.as_deref() == Some(expected.as_str()),
                    "Expected title {:?}, got {:?}",
                    expected,
                    current.title
                );
            }
            Assertion::ContentContains(text) => {
                let content = current.content.as_deref().unwrap_or_default();
                ensure!(
                    content.contains(text.as_str()),
                    "Content {:?} does not contain {:?}",
                    content,
                    text
                );
            }
            Assertion::Modified(expected) => {
                ensure!(
                    current.is_modified() == *expected,
                    "Expected modified={}, hash={:?} prev_hash={:?}",
                    expected,
                    current.hash,
                    current.prev_hash
                );
            }
            Assertion::MostRecent { repo, path } => {
                let actual = session.recency().most_recent(repo).map(|l| l.path);
                ensure!(
                    actual == *path,
                    "Expected most recent {:?} in {}, got {:?}",
                    path,
                    repo,
                    actual
                );
            }
            Assertion::RecencyMatchesOpenTime => {
                let open_time = current
                    .open_time
                    .ok_or_else(|| anyhow!("Current file has no open time"))?;
                let recorded = session.recency().get(&current.repo, &current.path);
                ensure!(
                    recorded == Some(open_time),
                    "Recency {:?} differs from open time {}",
                    recorded,
                    open_time
                );
            }
            Assertion::TreeFileCount(n) => {
                let tree = session.tree().ok_or_else(|| anyhow!("No tree loaded"))?;
                ensure!(
                    tree.file_count() == *n,
                    "Expected {} files in tree, got {}",
                    n,
                    tree.file_count()
                );
            }
            Assertion::NoTree => {
                ensure!(session.tree().is_none(), "Expected no tree");
            }
            Assertion::RepositoryCount(n) => {
                ensure!(
                    session.repositories().len() == *n,
                    "Expected {} repositories, got {}",
                    n,
                    session.repositories().len()
                );
            }
            Assertion::TabCount(n) => {
                ensure!(
                    session.tabs().len() == *n,
                    "Expected {} tabs, got {}",
                    n,
                    session.tabs().len()
                );
            }
            Assertion::ShowSide(expected) => {
                ensure!(session.show_side() == *expected, "show_side mismatch");
            }
            Assertion::ShowXterm(expected) => {
                ensure!(session.show_xterm() == *expected, "show_xterm mismatch");
            }
            Assertion::Custom(_) => unreachable!("handled above"),
        }

        Ok(())
    }
}
