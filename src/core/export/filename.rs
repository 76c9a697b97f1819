//! Naming the downloaded archive
//!
//! Precedence: `x-filename` header, then the `Content-Disposition` filename,
//! then `registro_publicadores_{service_year}.zip`.

use crate::domain::ZipPayload;
use fancy_regex::Regex;
use std::path::Path;

const DISPOSITION_FILENAME: &str = r#"filename[^;=\n]*=((['"]).*?\2|[^;\n]*)"#;

/// Name used when the server does not provide one
pub fn default_file_name(service_year: i32) -> String {
    format!("registro_publicadores_{service_year}.zip")
}

/// Filename from a `Content-Disposition` value, with all quotes removed
///
/// Returns `None` for a missing header, no `filename` parameter, or an empty
/// name.
pub fn extract_file_name(disposition: Option<&str>) -> Option<String> {
    let disposition = disposition?;
    let re = Regex::new(DISPOSITION_FILENAME).ok()?;
    let captures = re.captures(disposition).ok()??;
    let raw = captures.get(1)?.as_str();
    let name: String = raw.chars().filter(|c| *c != '\'' && *c != '"').collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Reduces a server-provided name to a bare file name
///
/// Directory components are dropped; `.`, `..` and empty names are rejected.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    Path::new(last)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// Name the archive is saved under
pub fn resolve_file_name(payload: &ZipPayload, service_year: i32) -> String {
    let header = payload
        .x_filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    header
        .or_else(|| extract_file_name(payload.content_disposition.as_deref()))
        .and_then(|name| sanitize_file_name(&name))
        .unwrap_or_else(|| default_file_name(service_year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn payload(x_filename: Option<&str>, disposition: Option<&str>) -> ZipPayload {
        ZipPayload {
            bytes: vec![0x50, 0x4b],
            x_filename: x_filename.map(str::to_string),
            content_disposition: disposition.map(str::to_string),
        }
    }

    #[test_case("attachment; filename=\"foo.zip\"" => Some("foo.zip".to_string()); "quoted")]
    #[test_case("attachment; filename='foo.zip'" => Some("foo.zip".to_string()); "single quoted")]
    #[test_case("attachment; filename=foo.zip" => Some("foo.zip".to_string()); "bare")]
    #[test_case("attachment; filename=foo.zip; size=10" => Some("foo.zip".to_string()); "followed by parameter")]
    #[test_case("attachment; filename=\"\"" => None; "empty quoted")]
    #[test_case("attachment" => None; "no filename")]
    #[test_case("inline; filename=\"reporte 2024.zip\"" => Some("reporte 2024.zip".to_string()); "with space")]
    fn test_extract_file_name(disposition: &str) -> Option<String> {
        extract_file_name(Some(disposition))
    }

    #[test]
    fn test_extract_file_name_missing_header() {
        assert_eq!(extract_file_name(None), None);
    }

    #[test]
    fn test_x_filename_wins() {
        let p = payload(Some("a.zip"), Some("attachment; filename=\"b.zip\""));
        assert_eq!(resolve_file_name(&p, 2024), "a.zip");
    }

    #[test]
    fn test_content_disposition_only() {
        let p = payload(None, Some("attachment; filename=\"foo.zip\""));
        assert_eq!(resolve_file_name(&p, 2024), "foo.zip");
    }

    #[test]
    fn test_default_when_no_headers() {
        let p = payload(None, None);
        assert_eq!(resolve_file_name(&p, 2024), "registro_publicadores_2024.zip");
    }

    #[test]
    fn test_blank_x_filename_falls_through() {
        let p = payload(Some("  "), Some("attachment; filename=\"foo.zip\""));
        assert_eq!(resolve_file_name(&p, 2024), "foo.zip");
    }

    #[test_case("../../etc/passwd" => Some("passwd".to_string()); "parent traversal")]
    #[test_case("dir\\name.zip" => Some("name.zip".to_string()); "backslash")]
    #[test_case(".." => None; "dot dot")]
    #[test_case("reports/" => None; "trailing slash")]
    #[test_case("plain.zip" => Some("plain.zip".to_string()); "plain")]
    fn test_sanitize_file_name(name: &str) -> Option<String> {
        sanitize_file_name(name)
    }

    #[test]
    fn test_unsafe_header_name_falls_back_to_default() {
        let p = payload(Some(".."), None);
        assert_eq!(resolve_file_name(&p, 2023), "registro_publicadores_2023.zip");
    }
}
