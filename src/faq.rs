use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Languages the API serves. English is the source of truth; Hindi and
/// Bengali are derived via machine translation at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Hi,
    Bn,
}

impl Language {
    /// Resolve a language code from a query parameter.
    ///
    /// Unknown codes resolve to English rather than erroring: projection
    /// falls back to English anyway, so an unrecognized code and an
    /// untranslated record behave identically.
    pub fn resolve(code: &str) -> Language {
        match code {
            "hi" => Language::Hi,
            "bn" => Language::Bn,
            _ => Language::En,
        }
    }

    /// ISO 639-1 code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
        }
    }
}

/// The closed set of FAQ categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Technical,
    Billing,
    Other,
}

impl Category {
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "general" => Some(Category::General),
            "technical" => Some(Category::Technical),
            "billing" => Some(Category::Billing),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Technical => "technical",
            Category::Billing => "billing",
            Category::Other => "other",
        }
    }
}

/// A piece of text with its English source and optional translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bn: Option<String>,
}

impl LocalizedText {
    /// The text in the requested language, falling back to English when
    /// that language variant is absent.
    pub fn get(&self, lang: Language) -> &str {
        let variant = match lang {
            Language::En => None,
            Language::Hi => self.hi.as_deref(),
            Language::Bn => self.bn.as_deref(),
        };
        variant.unwrap_or(&self.en)
    }
}

/// Creator and last-modifier identities for a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
}

/// A stored FAQ record with all language variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i64,
    pub question: LocalizedText,
    pub answer: LocalizedText,
    pub category: Category,
    pub order: i64,
    pub is_active: bool,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    /// Project the record to a single language, falling back to English
    /// for missing variants.
    pub fn translated(&self, lang: Language) -> FaqView {
        FaqView {
            id: self.id,
            question: self.question.get(lang).to_string(),
            answer: self.answer.get(lang).to_string(),
            category: self.category,
            order: self.order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A single-language view of a FAQ record, as returned by read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqView {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Category,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a FAQ. English text only; translations are
/// derived by the service.
#[derive(Debug, Clone)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    pub category: Category,
    pub order: i64,
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<Category>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(en: &str, hi: Option<&str>, bn: Option<&str>) -> LocalizedText {
        LocalizedText {
            en: en.to_string(),
            hi: hi.map(str::to_string),
            bn: bn.map(str::to_string),
        }
    }

    #[test]
    fn test_projection_prefers_requested_language() {
        let t = text("hello", Some("नमस्ते"), Some("হ্যালো"));
        assert_eq!(t.get(Language::En), "hello");
        assert_eq!(t.get(Language::Hi), "नमस्ते");
        assert_eq!(t.get(Language::Bn), "হ্যালো");
    }

    #[test]
    fn test_projection_falls_back_to_english() {
        let t = text("hello", None, None);
        assert_eq!(t.get(Language::Hi), "hello");
        assert_eq!(t.get(Language::Bn), "hello");
    }

    #[test]
    fn test_unknown_language_resolves_to_english() {
        assert_eq!(Language::resolve("en"), Language::En);
        assert_eq!(Language::resolve("hi"), Language::Hi);
        assert_eq!(Language::resolve("bn"), Language::Bn);
        assert_eq!(Language::resolve("fr"), Language::En);
        assert_eq!(Language::resolve(""), Language::En);
    }

    #[test]
    fn test_category_closed_set() {
        assert_eq!(Category::parse("billing"), Some(Category::Billing));
        assert_eq!(Category::parse("Billing"), None);
        assert_eq!(Category::parse("unknown"), None);
        assert_eq!(Category::Billing.as_str(), "billing");
    }

    #[test]
    fn test_faq_serializes_camel_case() {
        let faq = Faq {
            id: 1,
            question: text("What is this?", Some("यह क्या है?"), None),
            answer: text("A test record for serialization.", None, None),
            category: Category::General,
            order: 0,
            is_active: true,
            metadata: Metadata {
                created_by: "admin".to_string(),
                last_updated_by: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&faq).expect("serialize");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["category"], "general");
        assert_eq!(json["question"]["hi"], "यह क्या है?");
        // Absent variants are omitted, not null
        assert!(json["question"].get("bn").is_none());
        assert_eq!(json["metadata"]["createdBy"], "admin");
        assert!(json.get("createdAt").is_some());
    }
}
