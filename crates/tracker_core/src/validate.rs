use url::Url;

/// Returns true when `candidate` parses as an absolute URL.
///
/// Total over all strings: parse failures are reported as `false`.
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}
