//! Provider registry and first-claim-wins dispatch

use axum::response::{IntoResponse, Response};
use http::HeaderMap;
use mimic_core::RequestContext;

use crate::error::ChatError;
use crate::provider::{DifyProvider, GeminiProvider, MinimaxProvider, OpenAiProvider, QwenProvider};

/// Closed set of vendor adapters
///
/// A tagged enumeration rather than trait objects: the set of emulated
/// vendors is fixed at compile time and dispatch stays a plain match.
#[derive(Debug, Clone, Copy)]
pub enum ChatProvider {
    /// Generic OpenAI-compatible fallback
    OpenAi(OpenAiProvider),
    /// Minimax chat completion Pro
    Minimax(MinimaxProvider),
    /// Qwen (DashScope) text generation
    Qwen(QwenProvider),
    /// Dify chat / completion messages
    Dify(DifyProvider),
    /// Gemini generateContent
    Gemini(GeminiProvider),
}

impl ChatProvider {
    /// Vendor name used for keyed lookup and logging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "openai",
            Self::Minimax(_) => "minimax",
            Self::Qwen(_) => "qwen",
            Self::Dify(_) => "dify",
            Self::Gemini(_) => "gemini",
        }
    }

    /// Keyed lookup for the single-vendor configuration mode
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(Self::OpenAi(OpenAiProvider)),
            "minimax" => Some(Self::Minimax(MinimaxProvider)),
            "qwen" => Some(Self::Qwen(QwenProvider)),
            "dify" => Some(Self::Dify(DifyProvider)),
            "gemini" => Some(Self::Gemini(GeminiProvider)),
            _ => None,
        }
    }

    /// Pure claim predicate over the request context; never touches the body
    pub fn claims(&self, ctx: &RequestContext) -> bool {
        match self {
            Self::OpenAi(provider) => provider.claims(ctx),
            Self::Minimax(provider) => provider.claims(ctx),
            Self::Qwen(provider) => provider.claims(ctx),
            Self::Dify(provider) => provider.claims(ctx),
            Self::Gemini(provider) => provider.claims(ctx),
        }
    }

    /// Handle the claimed request
    pub fn handle(&self, ctx: &RequestContext, headers: &HeaderMap, body: &[u8]) -> Response {
        match self {
            Self::OpenAi(provider) => provider.handle(ctx, headers, body),
            Self::Minimax(provider) => provider.handle(ctx, headers, body),
            Self::Qwen(provider) => provider.handle(ctx, headers, body),
            Self::Dify(provider) => provider.handle(ctx, headers, body),
            Self::Gemini(provider) => provider.handle(ctx, headers, body),
        }
    }
}

/// Ordered adapter collection, built once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<ChatProvider>,
}

impl ProviderRegistry {
    /// Registry with every adapter, narrow claims first
    ///
    /// The unconditional OpenAI-compatible fallback must stay last: it claims
    /// everything, so any adapter registered after it is unreachable.
    pub fn all() -> Self {
        Self {
            providers: vec![
                ChatProvider::Minimax(MinimaxProvider),
                ChatProvider::Dify(DifyProvider),
                ChatProvider::Qwen(QwenProvider),
                ChatProvider::Gemini(GeminiProvider),
                ChatProvider::OpenAi(OpenAiProvider),
            ],
        }
    }

    /// Registry over an explicit adapter list (used by tests)
    pub fn with_providers(providers: Vec<ChatProvider>) -> Self {
        Self { providers }
    }

    /// Forward to the first adapter that claims the request
    pub fn dispatch(&self, ctx: &RequestContext, headers: &HeaderMap, body: &[u8]) -> Response {
        for provider in &self.providers {
            if provider.claims(ctx) {
                tracing::debug!(provider = provider.name(), path = %ctx.path, "request claimed");
                return provider.handle(ctx, headers, body);
            }
        }
        ChatError::NoProvider.into_response()
    }
}
