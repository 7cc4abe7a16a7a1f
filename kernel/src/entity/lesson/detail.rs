use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonSubject(String);

impl LessonSubject {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonTitle(String);

impl LessonTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonLocation(String);

impl LessonLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonCategory(String);

impl LessonCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LessonDescription(String);

impl LessonDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}
