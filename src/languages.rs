//! Language-code tables and helpers shared by the content and translation
//! providers.

/// Supported display languages: (code, English name, native name).
pub const LANGUAGES: &[(&str, &str, &str)] = &[
    ("en", "English", "English"),
    ("es", "Spanish", "Español"),
    ("fr", "French", "Français"),
    ("de", "German", "Deutsch"),
    ("it", "Italian", "Italiano"),
    ("pt", "Portuguese", "Português"),
    ("ru", "Russian", "Русский"),
    ("ja", "Japanese", "日本語"),
    ("zh", "Chinese", "中文"),
    ("ar", "Arabic", "العربية"),
    ("hi", "Hindi", "हिन्दी"),
    ("ko", "Korean", "한국어"),
    ("nl", "Dutch", "Nederlands"),
    ("sv", "Swedish", "Svenska"),
    ("fi", "Finnish", "Suomi"),
    ("no", "Norwegian", "Norsk"),
    ("da", "Danish", "Dansk"),
    ("pl", "Polish", "Polski"),
    ("uk", "Ukrainian", "Українська"),
    ("el", "Greek", "Ελληνικά"),
    ("he", "Hebrew", "עברית"),
    ("id", "Indonesian", "Bahasa Indonesia"),
    ("vi", "Vietnamese", "Tiếng Việt"),
    ("fa", "Persian", "فارسی"),
    ("tr", "Turkish", "Türkçe"),
    ("cs", "Czech", "Čeština"),
    ("hu", "Hungarian", "Magyar"),
    ("ro", "Romanian", "Română"),
    ("th", "Thai", "ไทย"),
];

/// English name for a language code, or the code itself when unknown.
pub fn language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
        .unwrap_or(code)
}

/// Native name for a language code, or the code itself when unknown.
pub fn native_language_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, native)| *native)
        .unwrap_or(code)
}

/// Check that a language code is in acceptable format: non-empty, ASCII
/// alphanumerics plus `-` and `_` (ISO 639 conventions, BCP 47 subtags).
pub fn is_valid_language_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Strip region/script subtags: `en-US` -> `en`, `zh-Hans` -> `zh`.
pub fn normalize_language_code(code: &str) -> String {
    code.split('-').next().unwrap_or(code).to_lowercase()
}
