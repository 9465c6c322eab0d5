use dnswatch_domain::{DomainError, HostnameMatcher, WatchPattern};

fn pattern(s: &str) -> WatchPattern {
    s.parse().unwrap()
}

fn default_watch_list() -> HostnameMatcher {
    HostnameMatcher::new(
        ["*.apple-dns.net", ".youtube.com", "chatgpt.com", "*.googlevideo.com"]
            .into_iter()
            .map(pattern),
    )
}

// ── parsing ────────────────────────────────────────────────────────────────

#[test]
fn test_parse_exact_pattern() {
    assert_eq!(
        pattern("ChatGPT.com."),
        WatchPattern::Exact("chatgpt.com".into())
    );
}

#[test]
fn test_parse_wildcard_pattern() {
    let p = pattern("*.googlevideo.com");
    assert!(p.is_wildcard());
    assert_eq!(p.to_string(), "*.googlevideo.com");
}

#[test]
fn test_leading_dot_is_wildcard_spelling() {
    assert_eq!(pattern(".youtube.com"), pattern("*.youtube.com"));
}

#[test]
fn test_parse_rejects_invalid_patterns() {
    for bad in ["", "*.", ".", "foo.*.com", "*foo.com", "a..b"] {
        assert!(
            matches!(
                bad.parse::<WatchPattern>(),
                Err(DomainError::InvalidWatchPattern(_))
            ),
            "'{}' should be rejected",
            bad
        );
    }
}

// ── matching ───────────────────────────────────────────────────────────────

#[test]
fn test_exact_pattern_matches_only_itself() {
    let p = pattern("chatgpt.com");
    assert!(p.matches("chatgpt.com"));
    assert!(p.matches("CHATGPT.COM."));
    assert!(!p.matches("api.chatgpt.com"));
    assert!(!p.matches("notchatgpt.com"));
}

#[test]
fn test_wildcard_requires_leading_label() {
    let p = pattern("*.apple-dns.net");
    assert!(p.matches("a.apple-dns.net"));
    assert!(p.matches("x.y.apple-dns.net"));
    assert!(!p.matches("apple-dns.net"));
    assert!(!p.matches(".apple-dns.net"));
    assert!(!p.matches("evilapple-dns.net"));
}

#[test]
fn test_default_watch_list() {
    let matcher = default_watch_list();

    assert!(matcher.is_matched_hostname("chatgpt.com"));
    assert!(matcher.is_matched_hostname("www.youtube.com"));
    assert!(matcher.is_matched_hostname("rr3---sn-abc.googlevideo.com"));
    assert!(!matcher.is_matched_hostname("youtube.com"));
    assert!(!matcher.is_matched_hostname("example.org"));
}

#[test]
fn test_matching_pattern_reports_first_hit() {
    let matcher = default_watch_list();
    assert_eq!(
        matcher.matching_pattern("m.youtube.com"),
        Some(&pattern("*.youtube.com"))
    );
    assert_eq!(matcher.matching_pattern("example.org"), None);
}

#[test]
fn test_empty_matcher_matches_nothing() {
    let matcher = HostnameMatcher::new(Vec::new());
    assert!(matcher.is_empty());
    assert!(!matcher.is_matched_hostname("chatgpt.com"));
}

#[test]
fn test_pattern_deserializes_from_string() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        patterns: Vec<WatchPattern>,
    }

    let parsed: Wrapper = toml::from_str(r#"patterns = ["*.a.com", "b.com"]"#).unwrap();
    assert_eq!(parsed.patterns, vec![pattern("*.a.com"), pattern("b.com")]);

    let bad: Result<Wrapper, _> = toml::from_str(r#"patterns = ["a.*.com"]"#);
    assert!(bad.is_err());
}
