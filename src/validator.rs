use serde::Deserialize;

use crate::error::ApiError;
use crate::faq::{Category, CreateFaq, UpdateFaq};

const MIN_QUESTION_LEN: usize = 10;
const MIN_ANSWER_LEN: usize = 20;

/// Body of `POST /faqs`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub order: Option<i64>,
}

impl CreateFaqRequest {
    /// Validate and convert into typed service input. Errors carry the
    /// first failing rule's message.
    pub fn validate(self) -> Result<CreateFaq, ApiError> {
        let question = match self.question.as_deref().map(str::trim) {
            None | Some("") => return Err(ApiError::Validation("Question is required".into())),
            Some(q) => q.to_string(),
        };
        if question.chars().count() < MIN_QUESTION_LEN {
            return Err(ApiError::Validation(
                "Question must be at least 10 characters long".into(),
            ));
        }

        let answer = match self.answer.as_deref().map(str::trim) {
            None | Some("") => return Err(ApiError::Validation("Answer is required".into())),
            Some(a) => a.to_string(),
        };
        if answer.chars().count() < MIN_ANSWER_LEN {
            return Err(ApiError::Validation(
                "Answer must be at least 20 characters long".into(),
            ));
        }

        let category = match self.category.as_deref() {
            None | Some("") => return Err(ApiError::Validation("Category is required".into())),
            Some(c) => {
                Category::parse(c).ok_or_else(|| ApiError::Validation("Invalid category".into()))?
            }
        };

        let order = validate_order(self.order)?;

        Ok(CreateFaq {
            question,
            answer,
            category,
            order,
        })
    }
}

/// Body of `PUT /faqs/{id}`. Every field is optional; absent fields are
/// left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl UpdateFaqRequest {
    pub fn validate(self) -> Result<UpdateFaq, ApiError> {
        let question = match self.question.as_deref().map(str::trim) {
            None => None,
            Some(q) if q.chars().count() >= MIN_QUESTION_LEN => Some(q.to_string()),
            Some(_) => {
                return Err(ApiError::Validation(
                    "Question must be at least 10 characters long".into(),
                ))
            }
        };

        let answer = match self.answer.as_deref().map(str::trim) {
            None => None,
            Some(a) if a.chars().count() >= MIN_ANSWER_LEN => Some(a.to_string()),
            Some(_) => {
                return Err(ApiError::Validation(
                    "Answer must be at least 20 characters long".into(),
                ))
            }
        };

        let category = match self.category.as_deref() {
            None => None,
            Some(c) => Some(
                Category::parse(c).ok_or_else(|| ApiError::Validation("Invalid category".into()))?,
            ),
        };

        let order = match self.order {
            None => None,
            Some(o) => Some(validate_order(Some(o))?),
        };

        Ok(UpdateFaq {
            question,
            answer,
            category,
            order,
            is_active: self.is_active,
        })
    }
}

fn validate_order(order: Option<i64>) -> Result<i64, ApiError> {
    match order {
        Some(o) if o < 0 => Err(ApiError::Validation(
            "Order must be a positive integer".into(),
        )),
        Some(o) => Ok(o),
        None => Ok(0),
    }
}
