use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Remaining seats of a lesson. Never negative once stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonSpace(i32);

impl LessonSpace {
    pub fn new(space: impl Into<i32>) -> Self {
        Self(space.into())
    }

    pub fn try_new(space: i32) -> Option<Self> {
        (space >= 0).then_some(Self(space))
    }
}
