//! Page/per-page validation and the paginated result envelope.

use serde::Serialize;

use crate::validation::{self, Violations};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Requested page window, as supplied by the client.
///
/// Values are kept signed and unvalidated so out-of-range input can be
/// reported back rather than rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    pub page: i64,
    pub per_page: i64,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PaginationRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// Build from raw query-string values.
    ///
    /// Absent values take their defaults; present values are coerced with
    /// [`coerce_int`], so garbage becomes 0 and fails [`validate`](Self::validate).
    pub fn from_query(page: Option<&str>, per_page: Option<&str>) -> Self {
        Self {
            page: page.map(coerce_int).unwrap_or(DEFAULT_PAGE),
            per_page: per_page.map(coerce_int).unwrap_or(DEFAULT_PER_PAGE),
        }
    }

    pub fn validate(&self) -> Result<(), Violations> {
        let mut violations = Violations::new();
        validation::positive(&mut violations, "page", self.page);
        validation::in_range(&mut violations, "per_page", self.per_page, 1, MAX_PER_PAGE);
        violations.into_result()
    }

    /// Number of records to skip. Only meaningful after [`validate`](Self::validate).
    pub fn offset(&self) -> u64 {
        let page = self.page.max(1) as u64;
        (page - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> u64 {
        self.per_page.max(0) as u64
    }
}

/// One page of results plus the metadata a client needs to request the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedCollection<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: i64,
    pub per_page: i64,
}

impl<T> PaginatedCollection<T> {
    /// Wrap a page slice. `page` and `per_page` echo the request unchanged.
    pub fn new(items: Vec<T>, total_count: u64, request: &PaginationRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            per_page: request.per_page,
        }
    }
}

/// Loose integer coercion of the leading numeric prefix.
///
/// Accepts optional leading whitespace and sign, digits, an optional
/// fraction and an optional exponent (`"1e3"` is 1000, `"2.9"` is 2).
/// Anything unparseable yields 0; overflow saturates.
pub fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let sign_len = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_end = digits_from(sign_len);
    let mut end = int_end;
    let mut fractional = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || int_end > sign_len {
            end = frac_end;
            fractional = true;
        }
    }
    if end == sign_len {
        return 0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_digits = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
        let exp_end = digits_from(exp_digits);
        if exp_end > exp_digits {
            end = exp_end;
            fractional = true;
        }
    }

    if fractional {
        // `as` saturates at the i64 bounds.
        return s[..end].parse::<f64>().map(|f| f as i64).unwrap_or(0);
    }

    let negative = bytes.first() == Some(&b'-');
    let mut value: i64 = 0;
    for &b in &bytes[sign_len..int_end] {
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(all: &[u32], request: &PaginationRequest) -> PaginatedCollection<u32> {
        let items = all
            .iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .copied()
            .collect();
        PaginatedCollection::new(items, all.len() as u64, request)
    }

    #[test]
    fn test_defaults_when_absent() {
        let request = PaginationRequest::from_query(None, None);
        assert_eq!(request, PaginationRequest::new(1, 20));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int("3"), 3);
        assert_eq!(coerce_int("  42"), 42);
        assert_eq!(coerce_int("12abc"), 12);
        assert_eq!(coerce_int("-7"), -7);
        assert_eq!(coerce_int("+5"), 5);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_coerce_int_fraction_and_exponent() {
        assert_eq!(coerce_int("1e3"), 1000);
        assert_eq!(coerce_int("1E2xyz"), 100);
        assert_eq!(coerce_int("2.5e1"), 25);
        assert_eq!(coerce_int("2.9"), 2);
        assert_eq!(coerce_int("-1.5"), -1);
        assert_eq!(coerce_int(".5"), 0);
        assert_eq!(coerce_int("5."), 5);
        assert_eq!(coerce_int("3e"), 3);
        assert_eq!(coerce_int("3e+"), 3);
        assert_eq!(coerce_int("1e-2"), 0);
        assert_eq!(coerce_int("1e30"), i64::MAX);
        assert_eq!(coerce_int("e3"), 0);
        assert_eq!(coerce_int("-"), 0);
    }

    #[test]
    fn test_exponent_page_values_pass_validation() {
        let request = PaginationRequest::from_query(Some("2"), Some("1e2"));
        assert_eq!(request, PaginationRequest::new(2, 100));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unparseable_values_fail_validation() {
        let request = PaginationRequest::from_query(Some("abc"), Some("many"));
        let violations = request.validate().unwrap_err();
        assert!(violations.has_field("page"));
        assert!(violations.has_field("per_page"));
    }

    #[test]
    fn test_page_must_be_positive() {
        assert!(PaginationRequest::new(0, 20).validate().is_err());
        assert!(PaginationRequest::new(-1, 20).validate().is_err());
        assert!(PaginationRequest::new(1, 20).validate().is_ok());
    }

    #[test]
    fn test_per_page_bounds() {
        assert!(PaginationRequest::new(1, 0).validate().is_err());
        assert!(PaginationRequest::new(1, 101).validate().is_err());
        assert!(PaginationRequest::new(1, 1).validate().is_ok());
        assert!(PaginationRequest::new(1, 100).validate().is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PaginationRequest::new(1, 20).offset(), 0);
        assert_eq!(PaginationRequest::new(3, 20).offset(), 40);
        assert_eq!(PaginationRequest::new(i64::MAX, 100).offset(), u64::MAX);
    }

    #[test]
    fn test_item_count_matches_remaining_records() {
        let all: Vec<u32> = (1..=47).collect();
        for per_page in [1, 7, 20, 47, 100] {
            for page in 1..=12 {
                let request = PaginationRequest::new(page, per_page);
                let collection = page_of(&all, &request);

                let remaining = (all.len() as i64 - (page - 1) * per_page).max(0);
                assert_eq!(collection.items.len() as i64, per_page.min(remaining));
                assert_eq!(collection.total_count, 47);
            }
        }
    }

    #[test]
    fn test_page_past_end_echoes_request() {
        let all: Vec<u32> = (1..=5).collect();
        let collection = page_of(&all, &PaginationRequest::new(9, 10));
        assert!(collection.items.is_empty());
        assert_eq!(collection.page, 9);
        assert_eq!(collection.per_page, 10);
    }

    #[test]
    fn test_envelope_uses_camel_case_keys() {
        let collection = PaginatedCollection::new(vec![1, 2], 2, &PaginationRequest::new(1, 20));
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items": [1, 2], "totalCount": 2, "page": 1, "perPage": 20})
        );
    }
}
