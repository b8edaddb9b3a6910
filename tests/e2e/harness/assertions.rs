use anyhow::Result;
use tabkeep_core::Workspace;

/// Declarative assertions on session state
pub enum Assertion {
    // Cursor
    CurrentRepo(Option<String>),
    CurrentFile {
        repo: String,
        path: String,
    },
    CurrentFileBlank,
    CurrentTitle(String),

    // Entity
    ContentContains(String),
    Modified(bool),

    // Recency
    MostRecent {
        repo: String,
        path: Option<String>,
    },
    RecencyMatchesOpenTime,

    // Loaded data
    TreeFileCount(usize),
    NoTree,
    RepositoryCount(usize),

    // UI state
    TabCount(usize),
    ShowSide(bool),
    ShowXterm(bool),

    // Custom (takes mutable reference to allow mutations)
    Custom(Box<dyn Fn(&mut Workspace) -> Result<()> + Send + Sync>),
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentRepo(r) => write!(f, "CurrentRepo({:?})", r),
            Self::CurrentFile { repo, path } => {
                write!(f, "CurrentFile {{ repo: {:?}, path: {:?} }}", repo, path)
            }
            Self::CurrentFileBlank => write!(f, "CurrentFileBlank"),
            Self::CurrentTitle(t) => write!(f, "CurrentTitle({:?})", t),
            Self::ContentContains(s) => write!(f, "ContentContains({:?})", s),
            Self::Modified(m) => write!(f, "Modified({})", m),
            Self::MostRecent { repo, path } => {
                write!(f, "MostRecent {{ repo: {:?}, path: {:?} }}", repo, path)
            }
            Self::RecencyMatchesOpenTime => write!(f, "RecencyMatchesOpenTime"),
            Self::TreeFileCount(n) => write!(f, "TreeFileCount({})", n),
            Self::NoTree => write!(f, "NoTree"),
            Self::RepositoryCount(n) => write!(f, "RepositoryCount({})", n),
            Self::TabCount(n) => write!(f, "TabCount({})", n),
            Self::ShowSide(b) => write!(f, "ShowSide({})", b),
            Self::ShowXterm(b) => write!(f, "ShowXterm({})", b),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}
