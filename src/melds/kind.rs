/// What an open meld has committed to so far.
///
/// A single card is `Undetermined`; the second card decides between a run
/// and a set. Some seeds commit early: a King can only head a set, an ace
/// read as 1 can only head a run.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum MeldKind {
    #[default]
    Undetermined,
    Run,
    Set,
}

impl MeldKind {
    pub fn admits_run(&self) -> bool {
        !matches!(self, MeldKind::Set)
    }
    pub fn admits_set(&self) -> bool {
        !matches!(self, MeldKind::Run)
    }
}

impl std::fmt::Display for MeldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(match self {
            MeldKind::Undetermined => "open",
            MeldKind::Run => "run",
            MeldKind::Set => "set",
        })
    }
}
