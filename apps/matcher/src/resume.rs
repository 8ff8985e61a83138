//! Resume intake — plain-text extraction and contact-info scraping.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::MatchError;
use crate::models::ContactInfo;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-\s]{7,}\d").expect("valid phone regex"));

/// Extracts plain text from an uploaded resume. PDF content goes through
/// `pdf-extract`; anything else is decoded as (lossy) UTF-8 text.
pub fn extract_resume_text(filename: &str, bytes: &[u8]) -> Result<String, MatchError> {
    if filename.to_lowercase().ends_with(".pdf") {
        return pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| MatchError::Resume(format!("failed to extract PDF text: {e}")));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Pulls contact details out of raw resume text. Always succeeds; anything
/// not found comes back empty. The name is a crude guess: the first
/// non-empty line, truncated to 120 chars.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let emails = dedup_preserving_order(EMAIL_RE.find_iter(text).map(|m| m.as_str().to_string()));
    let phones = dedup_preserving_order(PHONE_RE.find_iter(text).map(|m| m.as_str().to_string()));
    let name_guess: String = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .chars()
        .take(120)
        .collect();

    ContactInfo {
        name_guess,
        emails,
        phones,
    }
}

fn dedup_preserving_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\n  Priya Sharma\nSenior Backend Engineer\n\
        priya.sharma@example.com | priya.sharma@example.com\n\
        +91 98765 43210\nPython, SQL, Docker";

    #[test]
    fn test_contact_info_finds_email_and_phone() {
        let contact = extract_contact_info(RESUME);
        assert_eq!(contact.emails, vec!["priya.sharma@example.com"]);
        assert_eq!(contact.phones, vec!["+91 98765 43210"]);
    }

    #[test]
    fn test_name_guess_is_first_nonempty_line() {
        let contact = extract_contact_info(RESUME);
        assert_eq!(contact.name_guess, "Priya Sharma");
    }

    #[test]
    fn test_contact_info_on_empty_text_is_empty() {
        let contact = extract_contact_info("");
        assert!(contact.name_guess.is_empty());
        assert!(contact.emails.is_empty());
        assert!(contact.phones.is_empty());
    }

    #[test]
    fn test_duplicate_emails_collapse_preserving_order() {
        let text = "a@example.com b@example.com a@example.com";
        let contact = extract_contact_info(text);
        assert_eq!(contact.emails, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_non_pdf_bytes_decode_as_utf8_text() {
        let text = extract_resume_text("resume.txt", b"plain text resume").unwrap();
        assert_eq!(text, "plain text resume");
    }

    #[test]
    fn test_invalid_pdf_surfaces_resume_error() {
        let result = extract_resume_text("resume.pdf", b"not really a pdf");
        assert!(matches!(result, Err(MatchError::Resume(_))));
    }
}
