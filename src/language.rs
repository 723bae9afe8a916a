/// Display languages offered by the selector.
///
/// Selecting a language changes only the displayed code and symbol; the
/// canned assistant responses are English-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub symbol: &'static str,
}

pub const LANGUAGES: [Language; 4] = [
    Language { code: "en", name: "English", native_name: "English", symbol: "Aa" },
    Language { code: "hi", name: "Hindi", native_name: "हिंदी", symbol: "अ" },
    Language { code: "ta", name: "Tamil", native_name: "தமிழ்", symbol: "அ" },
    Language { code: "bn", name: "Bengali", native_name: "বাংলা", symbol: "অ" },
];

/// Resolve a language code, falling back to the first entry (English)
/// when the code is unknown.
pub fn lookup(code: &str) -> &'static Language {
    LANGUAGES.iter().find(|l| l.code == code).unwrap_or(&LANGUAGES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        assert_eq!(lookup("hi").name, "Hindi");
        assert_eq!(lookup("bn").symbol, "অ");
    }

    #[test]
    fn test_lookup_unknown_code_falls_back_to_first() {
        assert_eq!(lookup("fr").code, "en");
        assert_eq!(lookup("").code, "en");
    }
}
