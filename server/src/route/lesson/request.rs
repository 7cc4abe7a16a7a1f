use application::transfer::{SearchLessonDto, UpdateLessonDto};
use serde::Deserialize;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    q: Option<String>,
}

/// Merge-patch body for `PUT /lessons/:id`. Absent fields keep their stored value.
#[cfg(feature = "full-update")]
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    subject: Option<String>,
    title: Option<String>,
    location: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    description: Option<String>,
    space: Option<i32>,
}

#[cfg(not(feature = "full-update"))]
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    space: Option<i32>,
}

pub struct Transformer;

impl Intake<SearchRequest> for Transformer {
    type To = SearchLessonDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        SearchLessonDto { query: input.q }
    }
}

#[cfg(feature = "full-update")]
impl Intake<(String, UpdateRequest)> for Transformer {
    type To = UpdateLessonDto;
    fn emit(&self, (id, input): (String, UpdateRequest)) -> Self::To {
        UpdateLessonDto {
            id,
            subject: input.subject,
            title: input.title,
            location: input.location,
            price: input.price,
            category: input.category,
            description: input.description,
            space: input.space,
        }
    }
}

#[cfg(not(feature = "full-update"))]
impl Intake<(String, UpdateRequest)> for Transformer {
    type To = UpdateLessonDto;
    fn emit(&self, (id, input): (String, UpdateRequest)) -> Self::To {
        UpdateLessonDto {
            id,
            space: input.space,
            ..UpdateLessonDto::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::{SearchRequest, Transformer, UpdateRequest};
    use crate::controller::Intake;

    #[test]
    fn search_query_is_passed_untouched() {
        let dto = Transformer.emit(SearchRequest {
            q: Some("  art ".to_string()),
        });
        assert_eq!(dto.query.as_deref(), Some("  art "));
    }

    #[test]
    fn update_keeps_path_id() {
        let req: UpdateRequest = serde_json::from_str(r#"{"space": 4}"#).unwrap();
        let dto = Transformer.emit(("abc".to_string(), req));
        assert_eq!(dto.id, "abc");
        assert_eq!(dto.space, Some(4));
        assert_eq!(dto.title, None);
    }

    #[cfg(feature = "full-update")]
    #[test]
    fn update_ignores_unknown_fields() {
        let req: UpdateRequest =
            serde_json::from_str(r#"{"id": "x", "title": "Chess", "price": 12.5}"#).unwrap();
        let dto = Transformer.emit(("abc".to_string(), req));
        assert_eq!(dto.title.as_deref(), Some("Chess"));
        assert_eq!(dto.price, Some(12.5));
    }
}
