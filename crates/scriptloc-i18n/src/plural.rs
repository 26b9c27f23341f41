//! Plural form selection for `msgstr[N]` entries.
//!
//! Rules are chosen from the language subtag. Each rule maps a count to the
//! gettext form index, so `msgstr[index]` is the string to show.

/// Plural rule families covering the languages the game ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// `n != 1` (English, German, Spanish, Catalan, ...). Two forms.
    English,
    /// `n > 1` (French, Brazilian Portuguese). Two forms.
    French,
    /// Russian, Ukrainian, Belarusian, Serbian, Croatian. Three forms.
    EastSlavic,
    /// Polish. Three forms.
    Polish,
    /// Czech, Slovak. Three forms.
    Czech,
    /// No plural distinction (Japanese, Chinese, Korean, ...). One form.
    Invariant,
}

impl PluralRule {
    /// Pick the rule for a locale tag such as `"ru"` or `"pt-BR"`.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let normalized = locale.to_ascii_lowercase();
        let mut parts = normalized.split(['-', '_', '@', '.']);
        let lang = parts.next().unwrap_or("");
        let region = parts.next().unwrap_or("");
        match lang {
            "fr" => Self::French,
            "pt" if region == "br" => Self::French,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::EastSlavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" => Self::Invariant,
            _ => Self::English,
        }
    }

    /// Number of `msgstr[N]` forms this rule expects.
    #[must_use]
    pub const fn forms(self) -> usize {
        match self {
            Self::English | Self::French => 2,
            Self::EastSlavic | Self::Polish | Self::Czech => 3,
            Self::Invariant => 1,
        }
    }

    /// Form index for `count`.
    #[must_use]
    pub fn index(self, count: u64) -> usize {
        let n = count;
        match self {
            Self::English => usize::from(n != 1),
            Self::French => usize::from(n > 1),
            Self::EastSlavic => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&(n % 10)) && !(12..=14).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
            Self::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Invariant => 0,
        }
    }
}
