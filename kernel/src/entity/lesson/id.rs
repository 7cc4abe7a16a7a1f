use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct LessonId(Uuid);

impl LessonId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }

    /// Identifiers arrive from callers as opaque strings; anything that is not a
    /// well-formed id cannot name an existing lesson.
    pub fn parse(id: &str) -> Option<Self> {
        Uuid::parse_str(id.trim()).ok().map(Self)
    }
}

impl Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
