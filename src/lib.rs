//! Multilingual FAQ content management API.
//!
//! Stores question/answer pairs with an English source of truth and
//! machine-derived Hindi/Bengali translations, serves them paginated and
//! cached, and auto-translates new or changed content on write.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod faq;
pub mod retry;
pub mod routes;
pub mod security;
pub mod service;
pub mod translation;
pub mod validator;
