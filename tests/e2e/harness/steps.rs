use std::time::Duration;

use super::assertions::Assertion;

/// All possible actions in a test scenario
#[derive(Debug)]
pub enum ScenarioStep {
    // Repository actions
    UseRepo {
        name: Option<String>,
    },
    LoadTree {
        repo: Option<String>,
    },
    Refresh,

    // File actions
    OpenFile {
        repo: String,
        path: String,
    },
    CloseFile,
    EditContent {
        content: String,
    },
    Save,
    ShowHelp {
        doc: String,
    },

    // UI state
    PinTab,
    ToggleSide,
    ToggleXterm,

    // Time control
    Wait {
        duration: Duration,
    },
    ClockBack {
        duration: Duration,
    },

    // Process lifecycle
    Crash,
    Restart,

    // Assertions (can be interspersed)
    Assert {
        assertion: Assertion,
    },
}
