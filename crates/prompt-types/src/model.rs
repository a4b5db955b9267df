//! Uniform result and paging model returned by every command.
//!
//! Handlers produce a [`ConsoleResult`]; the dispatcher maps it into the
//! transport envelopes. Paging arithmetic lives here so handlers and the
//! dispatcher agree on clamping and page-count rules.

use serde::Serialize;

/// Default page size when a command supplies none (or a non-positive one).
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Hard upper bound on page size.
pub const MAX_PAGE_SIZE: i32 = 500;

/// Normalize a requested page size into `[1, 500]`.
///
/// Non-positive values fall back to [`DEFAULT_PAGE_SIZE`]; values above
/// [`MAX_PAGE_SIZE`] are capped.
pub fn clamp_page_size(max: i32) -> i32 {
    if max <= 0 {
        DEFAULT_PAGE_SIZE
    } else if max > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        max
    }
}

/// Number of pages needed for `records` entries at `max` per page.
///
/// An exact multiple adds no extra page; zero records means zero pages.
/// `max` must already be clamped positive.
pub fn total_pages(records: i32, max: i32) -> i32 {
    records / max + if records % max == 0 { 0 } else { 1 }
}

/// Paging metadata attached to a paged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    pub page_no: i32,
    pub total_pages: i32,
    pub page_size: i32,
}

/// The uniform output shape produced by a command's `run`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleResult {
    /// Opaque row models (one JSON object per row).
    pub data: Vec<serde_json::Value>,
    /// Paging metadata, absent for plain message results.
    pub paging_info: Option<PagingInfo>,
    /// Number of rows in this page.
    pub records: i32,
    /// Human-readable status line.
    pub output: String,
    /// Marks an error-flavored result (surfaced as a 400 by the dispatcher).
    pub is_error: bool,
}

impl ConsoleResult {
    /// A plain message result with no rows.
    pub fn message(output: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            paging_info: None,
            records: 0,
            output: output.into(),
            is_error: false,
        }
    }

    /// An error-flavored result with no rows.
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::message(output)
        }
    }

    /// A paged result.
    ///
    /// `records` is the total record count across all pages; `page` and `max`
    /// are the raw user-requested values (normalized here). `output` is used
    /// when the requested page is within range, `empty_output` otherwise --
    /// requesting a page past the end degrades to the no-results message
    /// instead of an error. Zero rows with a zero record count short-circuit
    /// to a plain no-results message before any paging math.
    pub fn paged(
        rows: Vec<serde_json::Value>,
        records: i32,
        page: i32,
        max: i32,
        output: impl Into<String>,
        empty_output: impl Into<String>,
    ) -> Self {
        if rows.is_empty() && records == 0 {
            return Self::message(empty_output);
        }
        let max = clamp_page_size(max);
        let pages = total_pages(records, max);
        let page_no = if page > 0 { page } else { 1 };
        Self {
            records: rows.len() as i32,
            data: rows,
            paging_info: Some(PagingInfo {
                page_no,
                total_pages: pages,
                page_size: max,
            }),
            output: if page_no <= pages {
                output.into()
            } else {
                empty_output.into()
            },
            is_error: false,
        }
    }
}

/// Transport success envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub data: Vec<serde_json::Value>,
    pub paging_info: Option<PagingInfo>,
    pub records: i32,
    pub output: String,
    pub is_error: bool,
}

impl From<ConsoleResult> for ResponseEnvelope {
    fn from(result: ConsoleResult) -> Self {
        Self {
            data: result.data,
            paging_info: result.paging_info,
            records: result.records,
            output: result.output,
            is_error: result.is_error,
        }
    }
}

/// Transport error envelope (400-equivalent).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
}

impl ErrorEnvelope {
    /// A 400-equivalent error envelope.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_non_positive_defaults_to_ten() {
        assert_eq!(clamp_page_size(0), 10);
        assert_eq!(clamp_page_size(-7), 10);
    }

    #[test]
    fn clamp_caps_at_five_hundred() {
        assert_eq!(clamp_page_size(501), 500);
        assert_eq!(clamp_page_size(10_000), 500);
    }

    #[test]
    fn clamp_passes_valid_sizes_through() {
        assert_eq!(clamp_page_size(1), 1);
        assert_eq!(clamp_page_size(10), 10);
        assert_eq!(clamp_page_size(500), 500);
    }

    #[test]
    fn total_pages_zero_records() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn total_pages_exact_multiple_adds_no_page() {
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(100, 10), 10);
    }

    #[test]
    fn total_pages_remainder_adds_page() {
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn paged_defaults_page_to_one() {
        let rows = vec![serde_json::json!({"id": 1})];
        let r = ConsoleResult::paged(rows, 1, 0, 10, "ok", "none");
        assert_eq!(r.paging_info.unwrap().page_no, 1);
        assert_eq!(r.output, "ok");
    }

    #[test]
    fn paged_past_end_degrades_to_empty_output() {
        let rows = vec![serde_json::json!({"id": 1})];
        let r = ConsoleResult::paged(rows, 11, 3, 10, "ok", "none");
        assert_eq!(r.paging_info.unwrap().total_pages, 2);
        assert_eq!(r.output, "none");
        assert!(!r.is_error);
    }

    #[test]
    fn paged_empty_short_circuits_before_paging() {
        let r = ConsoleResult::paged(Vec::new(), 0, 1, 10, "ok", "none");
        assert!(r.paging_info.is_none());
        assert_eq!(r.output, "none");
        assert_eq!(r.records, 0);
    }

    #[test]
    fn paged_records_counts_page_rows_not_total() {
        let rows = vec![serde_json::json!({}), serde_json::json!({})];
        let r = ConsoleResult::paged(rows, 42, 1, 2, "ok", "none");
        assert_eq!(r.records, 2);
        assert_eq!(r.paging_info.unwrap().total_pages, 21);
    }

    #[test]
    fn error_result_sets_flag() {
        let r = ConsoleResult::error("boom");
        assert!(r.is_error);
        assert_eq!(r.output, "boom");
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let r = ConsoleResult::paged(vec![serde_json::json!({"id": 1})], 1, 1, 10, "ok", "none");
        let env = ResponseEnvelope::from(r);
        let json = serde_json::to_value(&env).unwrap();
        assert!(json.get("pagingInfo").is_some());
        assert_eq!(json["pagingInfo"]["pageNo"], 1);
        assert_eq!(json["records"], 1);
    }

    proptest! {
        #[test]
        fn clamp_always_in_range(max in -1000i32..10_000) {
            let c = clamp_page_size(max);
            prop_assert!((1..=500).contains(&c));
        }

        #[test]
        fn total_pages_covers_all_records(records in 0i32..100_000, max in -50i32..1000) {
            let max = clamp_page_size(max);
            let pages = total_pages(records, max);
            prop_assert!(pages * max >= records);
            if records > 0 {
                prop_assert!((pages - 1) * max < records);
            } else {
                prop_assert_eq!(pages, 0);
            }
        }
    }
}
