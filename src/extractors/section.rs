// src/extractors/section.rs

use regex::Regex;

/// Returns the span of `text` strictly between the first match of
/// `start_heading` and the first match of `end_heading` after it.
///
/// Both heading matches are excluded from the span. A missing end heading
/// extends the span to the end of the document; a missing start heading
/// yields the empty string, so row extraction over the result produces
/// zero records rather than an error.
pub fn isolate<'a>(text: &'a str, start_heading: &Regex, end_heading: &Regex) -> &'a str {
    let start = match start_heading.find(text) {
        Some(m) => m,
        None => return "",
    };

    let rest = &text[start.end()..];
    match end_heading.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    }
}

/// Like [`isolate`], but with no end heading: the span runs from the
/// first match of `start_heading` to the end of the document.
pub fn isolate_to_end<'a>(text: &'a str, start_heading: &Regex) -> &'a str {
    match start_heading.find(text) {
        Some(m) => &text[m.end()..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static START_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"VARIANTS\s+OF\s+UNCERTAIN\s+SIGNIFICANCE").unwrap());
    static END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"TECHNICAL\s+SUMMARY").unwrap());

    #[test]
    fn isolates_span_between_headings() {
        let text = "preamble\nVARIANTS OF UNCERTAIN SIGNIFICANCE\nrow one\nrow two\nTECHNICAL SUMMARY\ntrailing rows\n";
        let span = isolate(text, &START_RE, &END_RE);

        assert_eq!(span, "\nrow one\nrow two\n");
        assert!(!span.contains("VARIANTS OF UNCERTAIN SIGNIFICANCE"));
        assert!(!span.contains("TECHNICAL SUMMARY"));
        assert!(!span.contains("trailing rows"));
    }

    #[test]
    fn missing_end_heading_extends_to_document_end() {
        let text = "preamble\nVARIANTS OF UNCERTAIN SIGNIFICANCE\nrow one\nrow two\n";
        let span = isolate(text, &START_RE, &END_RE);

        assert_eq!(span, "\nrow one\nrow two\n");
    }

    #[test]
    fn missing_start_heading_yields_empty_span() {
        let text = "no section headings anywhere in this document";
        assert_eq!(isolate(text, &START_RE, &END_RE), "");
    }

    #[test]
    fn isolate_to_end_runs_from_heading_to_document_end() {
        let text = "preamble\nTECHNICAL SUMMARY\nrow one\nrow two\n";
        assert_eq!(isolate_to_end(text, &END_RE), "\nrow one\nrow two\n");
        assert_eq!(isolate_to_end("no headings", &END_RE), "");
    }

    #[test]
    fn uses_first_occurrence_of_each_heading() {
        let text = "VARIANTS OF UNCERTAIN SIGNIFICANCE first TECHNICAL SUMMARY mid VARIANTS OF UNCERTAIN SIGNIFICANCE TECHNICAL SUMMARY";
        assert_eq!(isolate(text, &START_RE, &END_RE), " first ");
    }
}
