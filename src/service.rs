use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::Cache;
use crate::db::{Database, FaqTranslations};
use crate::error::ApiError;
use crate::faq::{CreateFaq, Faq, FaqView, Language, UpdateFaq};
use crate::translation::Translator;

/// Prefix shared by every cached list page; mutations sweep it wholesale.
const LIST_CACHE_PREFIX: &str = "faqs:";

/// Query parameters for the list read path.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub lang: Language,
    pub category: Option<String>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

/// One page of projected results plus its pagination block. The whole
/// structure is what gets cached, so cache hits and misses return the same
/// envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    pub data: Vec<FaqView>,
    pub pagination: Pagination,
}

/// Orchestrates the read path (cache, then query-project-count-cache) and
/// the write path (persist with concurrent translation fan-out, then
/// invalidate the list cache).
pub struct FaqService {
    db: Database,
    cache: Cache,
    translator: Translator,
}

impl FaqService {
    pub fn new(db: Database, cache: Cache, translator: Translator) -> Self {
        Self {
            db,
            cache,
            translator,
        }
    }

    /// List active FAQs in the requested language, paginated.
    pub async fn list(&self, params: ListParams) -> Result<ListPage, ApiError> {
        let page = params.page.max(1);
        let category = params.category.as_deref();
        let cache_key = format!(
            "{}{}:{}:{}:{}",
            LIST_CACHE_PREFIX,
            params.lang.code(),
            category.unwrap_or("all"),
            page,
            params.limit,
        );

        if let Some(cached) = self.cache.get(&cache_key).await {
            if let Ok(page) = serde_json::from_value::<ListPage>(cached) {
                debug!("List cache hit for {}", cache_key);
                return Ok(page);
            }
            // An undecodable entry behaves like a miss; the store is the
            // source of truth.
        }

        let faqs = self.db.list(category, page, params.limit)?;
        let total = self.db.count(category)?;

        let result = ListPage {
            data: faqs.iter().map(|f| f.translated(params.lang)).collect(),
            pagination: Pagination {
                page,
                limit: params.limit,
                total,
            },
        };

        if let Ok(value) = serde_json::to_value(&result) {
            self.cache.set(&cache_key, value).await;
        }

        Ok(result)
    }

    /// Look up one FAQ by id and project it. Not cached; inactive records
    /// still resolve here.
    pub async fn get(&self, id: i64, lang: Language) -> Result<FaqView, ApiError> {
        let faq = self.db.get(id)?.ok_or(ApiError::NotFound)?;
        Ok(faq.translated(lang))
    }

    /// Create a FAQ from validated English input. The four translation
    /// calls run concurrently; each falls back to English on its own, so a
    /// translation outage slows the write but never fails it.
    pub async fn create(&self, input: CreateFaq, caller_id: &str) -> Result<Faq, ApiError> {
        let (question_hi, answer_hi, question_bn, answer_bn) = futures::join!(
            self.translator.translate(&input.question, Language::Hi),
            self.translator.translate(&input.answer, Language::Hi),
            self.translator.translate(&input.question, Language::Bn),
            self.translator.translate(&input.answer, Language::Bn),
        );

        let translations = FaqTranslations {
            question_hi,
            question_bn,
            answer_hi,
            answer_bn,
        };

        let faq = self.db.insert(&input, &translations, caller_id)?;
        info!("Created FAQ {} in category {}", faq.id, faq.category.as_str());

        self.cache.invalidate_prefix(LIST_CACHE_PREFIX).await;
        Ok(faq)
    }

    /// Apply a partial update. Only changed text fields are retranslated;
    /// the other field's existing translations are preserved as-is.
    pub async fn update(
        &self,
        id: i64,
        changes: UpdateFaq,
        caller_id: &str,
    ) -> Result<Faq, ApiError> {
        let mut faq = self.db.get(id)?.ok_or(ApiError::NotFound)?;

        if changes.question.is_some() || changes.answer.is_some() {
            let question = changes.question.as_deref();
            let answer = changes.answer.as_deref();

            let (question_hi, answer_hi, question_bn, answer_bn) = futures::join!(
                self.maybe_translate(question, Language::Hi),
                self.maybe_translate(answer, Language::Hi),
                self.maybe_translate(question, Language::Bn),
                self.maybe_translate(answer, Language::Bn),
            );

            if let Some(text) = changes.question {
                faq.question.en = text;
                faq.question.hi = question_hi;
                faq.question.bn = question_bn;
            }
            if let Some(text) = changes.answer {
                faq.answer.en = text;
                faq.answer.hi = answer_hi;
                faq.answer.bn = answer_bn;
            }
        }

        if let Some(category) = changes.category {
            faq.category = category;
        }
        if let Some(order) = changes.order {
            faq.order = order;
        }
        if let Some(is_active) = changes.is_active {
            faq.is_active = is_active;
        }

        faq.metadata.last_updated_by = Some(caller_id.to_string());
        let faq = self.db.update(&faq)?;
        info!("Updated FAQ {}", faq.id);

        self.cache.invalidate_prefix(LIST_CACHE_PREFIX).await;
        Ok(faq)
    }

    /// Hard-delete a FAQ.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if !self.db.delete(id)? {
            return Err(ApiError::NotFound);
        }
        info!("Deleted FAQ {}", id);

        self.cache.invalidate_prefix(LIST_CACHE_PREFIX).await;
        Ok(())
    }

    async fn maybe_translate(&self, text: Option<&str>, target: Language) -> Option<String> {
        match text {
            Some(t) => Some(self.translator.translate(t, target).await),
            None => None,
        }
    }
}
