//! Inbound extraction parameters and the request mode they select.
//!
//! Parsing is deliberately lenient: aggregator clients send loosely typed
//! form values, and a malformed value degrades to a default instead of
//! failing the request.

use prodex_core::ProductId;
use serde::Deserialize;

use crate::resolve::decode_key;

/// Parameters as received, before interpretation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParams {
    pub token: Option<String>,
    pub variation: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
    pub products: Option<String>,
    pub slugs: Option<String>,
}

impl RawParams {
    /// Merges two parameter sets; values present in `self` win.
    #[must_use]
    pub fn or(self, fallback: RawParams) -> RawParams {
        RawParams {
            token: self.token.or(fallback.token),
            variation: self.variation.or(fallback.variation),
            limit: self.limit.or(fallback.limit),
            page: self.page.or(fallback.page),
            products: self.products.or(fallback.products),
            slugs: self.slugs.or(fallback.slugs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub show_variations: bool,
    /// `None` asks for every match on a single page.
    pub per_page: Option<u32>,
    /// 1-based.
    pub page: u32,
}

/// The three mutually exclusive extraction modes, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractRequest {
    Ids(Vec<ProductId>),
    Slugs(Vec<String>),
    Page(PageRequest),
}

impl ExtractRequest {
    /// Selects the request mode: an ID list wins over a slug list, which wins
    /// over a paged scan.
    #[must_use]
    pub fn from_params(params: &RawParams, default_page_size: u32) -> Self {
        let ids: Vec<ProductId> = params
            .products
            .as_deref()
            .map(|raw| split_list(raw).map(parse_int).collect())
            .unwrap_or_default();
        if !ids.is_empty() {
            return Self::Ids(ids);
        }

        let slugs: Vec<String> = params
            .slugs
            .as_deref()
            .map(|raw| {
                let decoded = decode_key(raw);
                split_list(&decoded).map(ToOwned::to_owned).collect()
            })
            .unwrap_or_default();
        if !slugs.is_empty() {
            return Self::Slugs(slugs);
        }

        let limit = params.limit.as_deref().map_or(0, parse_int);
        let per_page = match limit {
            -1 => None,
            n if n < 1 => Some(default_page_size),
            n => Some(u32::try_from(n).unwrap_or(u32::MAX)),
        };
        let page = params.page.as_deref().map_or(1, parse_int).max(1);

        Self::Page(PageRequest {
            show_variations: params.variation.as_deref().is_some_and(parse_bool),
            per_page,
            page: u32::try_from(page).unwrap_or(u32::MAX),
        })
    }
}

/// Comma-separated list entries, trimmed, empties dropped.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Integer value of the leading digits (with optional sign), `0` when there
/// are none. Values beyond `i64` saturate.
pub(crate) fn parse_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_owned()
    };
    signed
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

/// Lenient flag: false only for an empty value, `0` or `false` (any case).
pub(crate) fn parse_bool(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "" | "0" | "false")
}
