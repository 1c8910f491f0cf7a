//! File name and extension rules for stored images

/// Extensions accepted for uploaded images
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Extension used when a remote image gives no usable hint
pub const DEFAULT_REMOTE_EXTENSION: &str = "jpg";

/// Reduce a client-supplied file name to a safe ASCII name.
///
/// Path separators become spaces, runs of whitespace become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are
/// trimmed. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Lowercased extension of `name` when it is an allowed image type
pub fn allowed_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Extension implied by a `Content-Type` header such as `image/jpeg; q=1`
pub fn extension_from_content_type(content_type: &str) -> Option<String> {
    if !content_type.contains("image/") {
        return None;
    }
    let essence = content_type.split(';').next()?.trim();
    let subtype = essence.rsplit('/').next()?;
    let subtype = subtype.split('+').next()?.to_ascii_lowercase();
    let subtype = if subtype == "jpeg" { "jpg".to_string() } else { subtype };
    is_plain_extension(&subtype).then_some(subtype)
}

/// Extension of the last path segment of `url`, ignoring query and fragment
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    is_plain_extension(&ext).then_some(ext)
}

fn is_plain_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename_strips_paths_and_symbols() {
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("My cake photo.JPG"), "My_cake_photo.JPG");
        assert_eq!(secure_filename("..hidden.png"), "hidden.png");
        assert_eq!(secure_filename("gâteau.png"), "gteau.png");
        assert_eq!(secure_filename("   "), "");
    }

    #[test]
    fn test_allowed_extension_is_case_insensitive() {
        assert_eq!(allowed_extension("cake.PNG").as_deref(), Some("png"));
        assert_eq!(allowed_extension("cake.webp").as_deref(), Some("webp"));
        assert_eq!(allowed_extension("cake.bmp"), None);
        assert_eq!(allowed_extension("cake"), None);
        assert_eq!(allowed_extension(""), None);
    }

    #[test]
    fn test_extension_from_content_type() {
        assert_eq!(extension_from_content_type("image/jpeg").as_deref(), Some("jpg"));
        assert_eq!(
            extension_from_content_type("image/png; charset=binary").as_deref(),
            Some("png")
        );
        assert_eq!(extension_from_content_type("image/svg+xml").as_deref(), Some("svg"));
        assert_eq!(extension_from_content_type("text/html"), None);
    }

    #[test]
    fn test_extension_from_url_ignores_query() {
        assert_eq!(
            extension_from_url("https://cdn.example/a/b/cake.webp?w=400").as_deref(),
            Some("webp")
        );
        assert_eq!(
            extension_from_url("https://images.unsplash.com/photo-1578985545062?w=400"),
            None
        );
    }
}
