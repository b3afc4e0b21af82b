//! Parser for the legacy blob-storage filename convention.
//!
//! Uploads from the pre-catalog era follow
//! `[Category] Date_[Counselor] Title_vX.Y.ext`, e.g.
//! `[타로] 2026-01-15_[김태희] 신년운세_v2.0.mp4`. The storage sync job
//! parses these to reconstruct catalog rows. Anything that does not match
//! falls back to placeholder defaults — a malformed name must never abort
//! a reconciliation batch.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Category assigned when the filename carries none ("기타" = unclassified).
pub const DEFAULT_CATEGORY: &str = "기타";

/// Counselor assigned when the filename carries none ("대상없음" = none).
pub const DEFAULT_COUNSELOR: &str = "대상없음";

/// Version label assigned when the title has no `_vX.Y` suffix.
pub const DEFAULT_VERSION: &str = "v1.0";

// ---------------------------------------------------------------------------
// Parsed metadata
// ---------------------------------------------------------------------------

/// Fully-populated metadata extracted from a legacy filename.
///
/// Every field is always set; non-matching names receive the defaults
/// above with the title equal to the filename minus its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMeta {
    pub category: String,
    pub counselor: String,
    pub title: String,
    pub version_label: String,
    /// Production date when the filename encodes one.
    pub started_at: Option<NaiveDate>,
}

fn convention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[(.+?)\]\s*(.+?)_\[(.+?)\]\s*(.+)$").expect("convention regex is valid")
    })
}

fn version_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)_([vV]\d+\.\d+)$").expect("version regex is valid"))
}

/// Strip the final `.ext` from a filename, if any.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Parse a legacy filename into [`ParsedMeta`].
///
/// Pure and total: every input yields a fully-populated result. The
/// filename should be the final path segment (callers split off any
/// folder prefix first).
pub fn parse_legacy_filename(file_name: &str) -> ParsedMeta {
    let stem = strip_extension(file_name);

    let Some(caps) = convention_regex().captures(file_name) else {
        return ParsedMeta {
            category: DEFAULT_CATEGORY.to_string(),
            counselor: DEFAULT_COUNSELOR.to_string(),
            title: stem.to_string(),
            version_label: DEFAULT_VERSION.to_string(),
            started_at: None,
        };
    };

    let category = caps[1].to_string();
    let date_str = caps[2].trim();
    let counselor = caps[3].to_string();
    let raw_title = strip_extension(&caps[4]);

    let (title, version_label) = match version_suffix_regex().captures(raw_title) {
        Some(v) => (v[1].to_string(), v[2].to_string()),
        None => (raw_title.to_string(), DEFAULT_VERSION.to_string()),
    };

    ParsedMeta {
        category,
        counselor,
        title,
        version_label,
        started_at: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_convention_parses_all_fields() {
        let meta = parse_legacy_filename("[타로] 2026-01-15_[김태희] 신년운세_v2.0.mp4");
        assert_eq!(meta.category, "타로");
        assert_eq!(meta.counselor, "김태희");
        assert_eq!(meta.title, "신년운세");
        assert_eq!(meta.version_label, "v2.0");
        assert_eq!(meta.started_at, NaiveDate::from_ymd_opt(2026, 1, 15));
    }

    #[test]
    fn missing_version_suffix_defaults_to_v1() {
        let meta = parse_legacy_filename("[사주] 2025-11-03_[이민준] 연애운.mov");
        assert_eq!(meta.category, "사주");
        assert_eq!(meta.counselor, "이민준");
        assert_eq!(meta.title, "연애운");
        assert_eq!(meta.version_label, DEFAULT_VERSION);
    }

    #[test]
    fn uppercase_version_suffix_is_kept_verbatim() {
        let meta = parse_legacy_filename("[타로] 2026-02-01_[박서연] 이직운_V3.1.mp4");
        assert_eq!(meta.title, "이직운");
        assert_eq!(meta.version_label, "V3.1");
    }

    #[test]
    fn non_matching_name_falls_back_to_defaults() {
        let meta = parse_legacy_filename("randomfile123.mp4");
        assert_eq!(meta.category, DEFAULT_CATEGORY);
        assert_eq!(meta.counselor, DEFAULT_COUNSELOR);
        assert_eq!(meta.title, "randomfile123");
        assert_eq!(meta.version_label, DEFAULT_VERSION);
        assert_eq!(meta.started_at, None);
    }

    #[test]
    fn unparseable_date_leaves_started_at_empty() {
        let meta = parse_legacy_filename("[타로] 언젠가_[김태희] 신년운세.mp4");
        assert_eq!(meta.category, "타로");
        assert_eq!(meta.started_at, None);
    }

    #[test]
    fn extension_is_stripped_only_once() {
        let meta = parse_legacy_filename("[기타] 2026-01-01_[대상없음] backup.final_v1.2.webm");
        assert_eq!(meta.title, "backup.final");
        assert_eq!(meta.version_label, "v1.2");
    }

    #[test]
    fn name_without_extension_is_total() {
        let meta = parse_legacy_filename("noextension");
        assert_eq!(meta.title, "noextension");
        assert_eq!(meta.version_label, DEFAULT_VERSION);
    }

    #[test]
    fn dotfile_is_not_treated_as_extension() {
        let meta = parse_legacy_filename(".hidden");
        assert_eq!(meta.title, ".hidden");
    }
}
