//! Context attached to outgoing web requests.
//!
//! Zellij echoes an opaque `BTreeMap<String, String>` back with every
//! `WebRequestResult`. The plugin uses it to tag responses with the request
//! that produced them and to carry the OpenTelemetry ids of the requesting
//! span, so the span that handles the response can be linked to it.

use crate::domain::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const KIND_KEY: &str = "request";
const ID_KEY: &str = "request_id";
const SUBJECT_KEY: &str = "subject";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_KEY: &str = "parent_span_id";

/// Trace and span ids captured from the active span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// is not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created while the
    /// returned guard is alive.
    ///
    /// Returns `None` if the ids are not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Identity of an in-flight request, round-tripped through Zellij.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Operation name, e.g. `"list_videos"`.
    pub kind: String,

    /// Per-session request counter. Used for logging only.
    pub request_id: u64,

    /// File name of the video a per-video request is about.
    pub subject: Option<String>,

    /// Trace ids of the requesting span, if tracing is active.
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `kind`, capturing the current trace ids.
    #[must_use]
    pub fn new(kind: &str, request_id: u64) -> Self {
        Self {
            kind: kind.to_string(),
            request_id,
            subject: None,
            trace: TraceContext::from_current(),
        }
    }

    /// Names the video a per-video request is about.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Encodes the context into the map Zellij carries with the request.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KIND_KEY.to_string(), self.kind.clone());
        map.insert(ID_KEY.to_string(), self.request_id.to_string());
        if let Some(subject) = &self.subject {
            map.insert(SUBJECT_KEY.to_string(), subject.clone());
        }
        if let Some(trace) = &self.trace {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map echoed back by Zellij.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Config`] if the kind or id is missing or the id
    /// is not a number. The subject and trace ids are optional.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let kind = map
            .get(KIND_KEY)
            .ok_or_else(|| ShelfError::Config("request context without kind".to_string()))?;
        let request_id = map
            .get(ID_KEY)
            .and_then(|id| id.parse::<u64>().ok())
            .ok_or_else(|| ShelfError::Config("request context without numeric id".to_string()))?;

        let trace = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            kind: kind.clone(),
            request_id,
            subject: map.get(SUBJECT_KEY).cloned(),
            trace,
        })
    }
}
