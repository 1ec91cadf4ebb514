//! Numerus (plural-form) rules.
//!
//! Each target language has a fixed number of numerus forms and a rule that
//! selects one of them from a count. The groupings below follow the rules
//! Qt's lrelease applies when compiling TS files, which is what the numerus
//! form counts in existing catalogs were authored against. Notably, classic
//! Qt treats Turkish as a single-form language even though CLDR has two.

use crate::ts::base_language;

/// Plural selection rule for one language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// One form for everything (ja, zh, ko, tr, ...).
    Single,
    /// Two forms, singular only at exactly 1 (en, de, es, mk-style no: see
    /// `Macedonian`).
    English,
    /// Two forms, singular at 0 and 1 (fr, pt-BR style).
    French,
    /// Three forms keyed on the last digit, teens excluded (ru, uk, sr, ...).
    Slavic,
    /// Three forms: 1 / 2-4 outside teens / rest (pl).
    Polish,
    /// Three forms: 1 / 2-4 / rest (cs, sk).
    Czech,
    /// Three forms keyed on the last two digits: x1 / x2 / rest (mk).
    Macedonian,
    /// Three forms (lt).
    Lithuanian,
    /// Three forms with a dedicated zero bucket (lv).
    Latvian,
    /// Three forms: 1 / 0 and teens-basis / rest (ro).
    Romanian,
    /// Three forms: 1 / 2 / rest (ga).
    Irish,
    /// Six forms (ar).
    Arabic,
}

impl PluralRule {
    /// Number of numerus forms a translation must provide.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::English | Self::French => 2,
            Self::Slavic
            | Self::Polish
            | Self::Czech
            | Self::Macedonian
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish => 3,
            Self::Arabic => 6,
        }
    }

    /// Selects the form index for a count. Always below [`Self::form_count`].
    #[must_use]
    pub fn select(self, n: u32) -> usize {
        match self {
            Self::Single => 0,
            Self::English => usize::from(n != 1),
            Self::French => usize::from(n > 1),
            Self::Slavic => {
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
            Self::Czech => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n) {
                    1
                } else {
                    2
                }
            }
            Self::Macedonian => {
                if n % 100 == 1 {
                    0
                } else if n % 100 == 2 {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if n % 10 >= 2 && !(11..=19).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if n == 0 {
                    2
                } else {
                    1
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&(n % 100)) {
                    1
                } else {
                    2
                }
            }
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&(n % 100)) => 3,
                _ if n % 100 >= 11 => 4,
                _ => 5,
            },
        }
    }

    /// Looks up the rule for a language code. Region subtags are ignored,
    /// so `mk_MK` and `mk` resolve identically.
    #[must_use]
    pub fn for_language(code: &str) -> Option<Self> {
        let rule = match base_language(code).as_ref() {
            "ja" | "zh" | "ko" | "th" | "vi" | "id" | "ms" | "tr" | "fa" | "ka" => Self::Single,
            "en" | "de" | "nl" | "sv" | "da" | "no" | "nb" | "nn" | "es" | "it" | "pt" | "el"
            | "bg" | "he" | "hu" | "fi" | "et" | "eu" | "gl" | "ca" | "sq" | "eo" | "af"
            | "ku" | "hi" | "ta" | "te" | "bn" | "mn" | "az" | "uz" | "kk" | "ky" => Self::English,
            "fr" | "oc" | "wa" => Self::French,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Slavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "mk" => Self::Macedonian,
            "lt" => Self::Lithuanian,
            "lv" => Self::Latvian,
            "ro" => Self::Romanian,
            "ga" => Self::Irish,
            "ar" => Self::Arabic,
            _ => return None,
        };
        Some(rule)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("mk", Some(PluralRule::Macedonian))]
    #[case("mk_MK", Some(PluralRule::Macedonian))]
    #[case("tr", Some(PluralRule::Single))]
    #[case("tr_TR", Some(PluralRule::Single))]
    #[case("en_US", Some(PluralRule::English))]
    #[case("pt-BR", Some(PluralRule::English))]
    #[case("ar", Some(PluralRule::Arabic))]
    #[case("tlh", None)]
    fn test_for_language(#[case] code: &str, #[case] expected: Option<PluralRule>) {
        assert_eq!(PluralRule::for_language(code), expected);
    }

    #[rstest]
    // Macedonian keys on the last two digits
    #[case(PluralRule::Macedonian, 1, 0)]
    #[case(PluralRule::Macedonian, 101, 0)]
    #[case(PluralRule::Macedonian, 2, 1)]
    #[case(PluralRule::Macedonian, 302, 1)]
    #[case(PluralRule::Macedonian, 5, 2)]
    #[case(PluralRule::Macedonian, 11, 2)]
    // Slavic excludes the teens from the singular bucket
    #[case(PluralRule::Slavic, 1, 0)]
    #[case(PluralRule::Slavic, 21, 0)]
    #[case(PluralRule::Slavic, 11, 2)]
    #[case(PluralRule::Slavic, 3, 1)]
    #[case(PluralRule::Slavic, 13, 2)]
    #[case(PluralRule::Slavic, 25, 2)]
    // Two-form rules differ at zero
    #[case(PluralRule::English, 0, 1)]
    #[case(PluralRule::English, 1, 0)]
    #[case(PluralRule::French, 0, 0)]
    #[case(PluralRule::French, 1, 0)]
    #[case(PluralRule::French, 2, 1)]
    // Arabic has six buckets
    #[case(PluralRule::Arabic, 0, 0)]
    #[case(PluralRule::Arabic, 1, 1)]
    #[case(PluralRule::Arabic, 2, 2)]
    #[case(PluralRule::Arabic, 7, 3)]
    #[case(PluralRule::Arabic, 103, 3)]
    #[case(PluralRule::Arabic, 15, 4)]
    #[case(PluralRule::Arabic, 100, 5)]
    fn test_select(#[case] rule: PluralRule, #[case] n: u32, #[case] expected: usize) {
        assert_that!(rule.select(n), eq(expected));
    }

    #[googletest::test]
    fn test_select_stays_below_form_count() {
        let rules = [
            PluralRule::Single,
            PluralRule::English,
            PluralRule::French,
            PluralRule::Slavic,
            PluralRule::Polish,
            PluralRule::Czech,
            PluralRule::Macedonian,
            PluralRule::Lithuanian,
            PluralRule::Latvian,
            PluralRule::Romanian,
            PluralRule::Irish,
            PluralRule::Arabic,
        ];

        for rule in rules {
            for n in 0..500 {
                expect_that!(rule.select(n), lt(rule.form_count()));
            }
        }
    }
}
