//! Poster copy: the headline, subheadline, period and call to action.
//!
//! Copy is resolved through a provider [`Chain`]:
//!
//! 1. [`ExplicitCopy`] when the request spells out a headline,
//! 2. [`GeneratedCopy`] when the request carries labelled text from a copy
//!    writer (`메인제목: ...` / `headline: ...` lines),
//! 3. otherwise [`fallback_copy`], built from the request's title, event
//!    and menu names.

use chrono::NaiveDate;
use serde::Serialize;

use super::request::PosterRequest;
use crate::providers::{Chain, Provider, Resolved};

/// Call to action used by the fallback copy.
pub const FALLBACK_CTA: &str = "지금 방문!";
/// Call to action used when generated copy omits one.
pub const GENERATED_CTA: &str = "지금 확인!";
pub const FALLBACK_HEADLINE: &str = "특별 이벤트";
pub const FALLBACK_SUBHEADLINE: &str = "맛있는 음식";

/// Characters of the title kept for a fallback headline.
const HEADLINE_CHARS: usize = 8;

/// Resolved poster text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PosterCopy {
    pub headline: String,
    pub subheadline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub cta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// Chain of copy providers over a request.
pub type CopyChain = Chain<PosterRequest, PosterCopy>;

fn non_blank(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%Y.%m.%d").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

/// `start ~ end` when both dates are present. ISO dates are shown as
/// `YYYY.MM.DD`; anything else is kept as written.
pub fn period_label(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty())?;
    let end = end.map(str::trim).filter(|s| !s.is_empty())?;
    Some(format!("{} ~ {}", format_date(start), format_date(end)))
}

/// First eight characters of the title, or the generic headline.
fn title_headline(request: &PosterRequest) -> String {
    match non_blank(&request.title) {
        Some(title) => title.chars().take(HEADLINE_CHARS).collect(),
        None => FALLBACK_HEADLINE.to_string(),
    }
}

fn request_period(request: &PosterRequest) -> Option<String> {
    period_label(request.start_date.as_deref(), request.end_date.as_deref())
}

/// Copy built only from the request's descriptive fields.
pub fn fallback_copy(request: &PosterRequest) -> PosterCopy {
    PosterCopy {
        headline: title_headline(request),
        subheadline: non_blank(&request.event_name)
            .or_else(|| non_blank(&request.menu_name))
            .unwrap_or_else(|| FALLBACK_SUBHEADLINE.to_string()),
        body: non_blank(&request.body),
        cta: FALLBACK_CTA.to_string(),
        period: request_period(request),
        footer: non_blank(&request.store_name),
    }
}

/// Copy written out in the request. Fields left empty are taken from the
/// fallback copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitCopy;

impl Provider<PosterRequest, PosterCopy> for ExplicitCopy {
    fn name(&self) -> &str {
        "explicit"
    }

    fn provide(&self, request: &PosterRequest) -> Option<PosterCopy> {
        let headline = non_blank(&request.headline)?;
        let base = fallback_copy(request);
        Some(PosterCopy {
            headline,
            subheadline: non_blank(&request.subheadline).unwrap_or(base.subheadline),
            cta: non_blank(&request.cta).unwrap_or(base.cta),
            ..base
        })
    }
}

/// Labelled copy text, one `label: value` per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedCopy;

const HEADLINE_LABELS: &[&str] = &["메인제목:", "headline:"];
const SUBHEADLINE_LABELS: &[&str] = &["서브제목:", "subheadline:"];
const PERIOD_LABELS: &[&str] = &["기간정보:", "period:"];
const CTA_LABELS: &[&str] = &["액션문구:", "cta:"];

/// Value following any of `labels` on this line. ASCII labels match
/// case-insensitively.
fn labelled(line: &str, labels: &[&str]) -> Option<String> {
    let lower = line.to_ascii_lowercase();
    labels.iter().find_map(|label| {
        let at = lower.find(label)?;
        Some(line[at + label.len()..].trim().to_string())
    })
}

impl Provider<PosterRequest, PosterCopy> for GeneratedCopy {
    fn name(&self) -> &str {
        "generated"
    }

    fn provide(&self, request: &PosterRequest) -> Option<PosterCopy> {
        let text = non_blank(&request.generated_copy)?;
        let mut copy = PosterCopy {
            headline: title_headline(request),
            subheadline: String::new(),
            body: non_blank(&request.body),
            cta: GENERATED_CTA.to_string(),
            period: None,
            footer: non_blank(&request.store_name),
        };

        let mut found = false;
        for line in text.lines().map(str::trim) {
            // subheadline first: "subheadline:" contains "headline:"
            if let Some(v) = labelled(line, SUBHEADLINE_LABELS) {
                copy.subheadline = v;
            } else if let Some(v) = labelled(line, HEADLINE_LABELS) {
                copy.headline = v;
            } else if let Some(v) = labelled(line, PERIOD_LABELS) {
                copy.period = Some(v).filter(|p| !p.is_empty());
            } else if let Some(v) = labelled(line, CTA_LABELS) {
                copy.cta = v;
            } else {
                continue;
            }
            found = true;
        }

        if !found {
            tracing::warn!("generated copy has no recognised labels, ignoring it");
            return None;
        }
        if copy.period.is_none() {
            copy.period = request_period(request);
        }
        Some(copy)
    }
}

/// Explicit copy, then generated copy.
pub fn default_chain() -> CopyChain {
    Chain::new().then(ExplicitCopy).then(GeneratedCopy)
}

/// Resolve copy for a request, ending in the fallback copy.
pub fn resolve(request: &PosterRequest) -> Resolved<PosterCopy> {
    default_chain().resolve_or(request, fallback_copy)
}
