use error_stack::Report;

use crate::entity::Lesson;
use crate::{InvalidField, KernelError};

/// Lesson attributes a search query is matched against.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SearchField {
    Subject,
    Title,
    Location,
    Category,
    Description,
    Price,
}

impl SearchField {
    pub const ALL: [SearchField; 6] = [
        SearchField::Subject,
        SearchField::Title,
        SearchField::Location,
        SearchField::Category,
        SearchField::Description,
        SearchField::Price,
    ];

    pub fn is_numeric(&self) -> bool {
        matches!(self, SearchField::Price)
    }

    fn text_of(&self, lesson: &Lesson) -> String {
        match self {
            SearchField::Subject => lesson.subject().as_ref().clone(),
            SearchField::Title => lesson.title().as_ref().clone(),
            SearchField::Location => lesson.location().as_ref().clone(),
            SearchField::Category => lesson.category().as_ref().clone(),
            SearchField::Description => lesson.description().as_ref().clone(),
            SearchField::Price => lesson.price().to_text(),
        }
    }
}

/// A single matcher in the OR-combination built from [`LessonSearch::predicate`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMatcher<'a> {
    /// Case-insensitive, literal substring match.
    Contains(SearchField, &'a str),
    /// Exact numeric equality; only produced for numeric fields.
    Equals(SearchField, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonSearch {
    keyword: String,
    number: Option<f64>,
}

impl LessonSearch {
    pub fn parse(query: Option<&str>) -> error_stack::Result<Self, KernelError> {
        let keyword = query.map(str::trim).unwrap_or_default();
        if keyword.is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(InvalidField::new("q"))
                .attach_printable("Query parameter is required"));
        }
        let number = keyword.parse::<f64>().ok().filter(|n| n.is_finite());
        Ok(Self {
            keyword: keyword.to_string(),
            number,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn number(&self) -> Option<f64> {
        self.number
    }

    /// Every matcher a lesson may satisfy; a lesson matches the search if any one holds.
    pub fn predicate(&self) -> Vec<FieldMatcher<'_>> {
        let mut matchers = SearchField::ALL
            .iter()
            .map(|field| FieldMatcher::Contains(*field, self.keyword.as_str()))
            .collect::<Vec<_>>();
        if let Some(number) = self.number {
            matchers.extend(
                SearchField::ALL
                    .iter()
                    .filter(|field| field.is_numeric())
                    .map(|field| FieldMatcher::Equals(*field, number)),
            );
        }
        matchers
    }

    pub fn matches(&self, lesson: &Lesson) -> bool {
        let keyword = self.keyword.to_lowercase();
        self.predicate().iter().any(|matcher| match matcher {
            FieldMatcher::Contains(field, _) => {
                field.text_of(lesson).to_lowercase().contains(&keyword)
            }
            FieldMatcher::Equals(SearchField::Price, number) => {
                *lesson.price().as_ref() == *number
            }
            FieldMatcher::Equals(..) => false,
        })
    }
}
