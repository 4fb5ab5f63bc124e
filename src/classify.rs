// src/classify.rs

// Keyword labeling of event titles.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Politics,
    Social,
    #[serde(rename = "Natural Disaster")]
    NaturalDisaster,
    Art,
    Science,
    Sports,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Politics,
        Category::Social,
        Category::NaturalDisaster,
        Category::Art,
        Category::Science,
        Category::Sports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Social => "Social",
            Category::NaturalDisaster => "Natural Disaster",
            Category::Art => "Art",
            Category::Science => "Science",
            Category::Sports => "Sports",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Politics => &[
                "انتخابات", "تاجگذاری", "انقلاب", "سلسله", "نبرد", "دولت", "ریاست جمهوری",
                "پارلمان", "مجلس", "وزیر", "سیاست", "حزب", "قانون", "دیپلماسی", "سفارت",
                "تحریم", "جنگ", "صلح",
            ],
            Category::Social => &[
                "اعتراض", "تظاهرات", "حقوق بشر", "آزادی", "خشونت", "تروریسم", "پناهنده",
                "مهاجرت", "جمعیت", "جمعیت‌شناسی", "فرهنگ", "آداب و رسوم", "مذهب", "جشنواره",
            ],
            Category::NaturalDisaster => &[
                "زلزله", "زمین لرزه", "سیل", "طوفان", "خشکسالی", "آتش‌سوزی", "سونامی",
                "آتشفشان", "توفان", "برف‌وباران", "گردباد", "فاجعه طبیعی",
            ],
            Category::Art => &[
                "فیلم", "موسیقی", "نقاشی", "ادبیات", "تئاتر", "رقص", "هنرهای تجسمی",
                "فرهنگ عامه", "کتاب", "نمایشگاه", "جشنواره فیلم", "آلبوم موسیقی",
            ],
            Category::Science => &[
                "اختراع", "کشف", "فضا", "تلسکوپ", "زیست‌شناسی", "فناوری", "رباتیک",
                "هوش مصنوعی", "پزشکی", "دارو", "آزمایشگاه", "دانشمند",
            ],
            Category::Sports => &[
                "المپیک", "جام جهانی", "فوتبال", "بسکتبال", "والیبال", "تنیس", "دوومیدانی",
                "کشتی", "بوکس", "ورزشکار", "مسابقه", "قهرمانی",
            ],
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `keyword` occurs in `text` with no word character directly on either side.
pub fn contains_word(text: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    text.match_indices(keyword).any(|(i, m)| {
        let before = text[..i].chars().next_back();
        let after = text[i + m.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Every category with at least one keyword in `text`, in `Category::ALL` order.
pub fn categorize(text: &str) -> Vec<Category> {
    let lowered = text.to_lowercase();
    Category::ALL
        .into_iter()
        .filter(|c| c.keywords().iter().any(|k| contains_word(&lowered, k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_words_only() {
        assert!(contains_word("آغاز جنگ جهانی", "جنگ"));
        assert!(!contains_word("جنگل‌های شمال", "جنگ"));
        // ZWNJ is not a word char
        assert!(contains_word("مجلس\u{200c}ها", "مجلس"));
        assert!(!contains_word("x", ""));
    }

    #[test]
    fn multiple_labels() {
        let got = categorize("زلزله در روز افتتاح جام جهانی فوتبال");
        assert_eq!(got, vec![Category::NaturalDisaster, Category::Sports]);
        assert!(categorize("یک روز عادی").is_empty());
    }

    #[test]
    fn labels_serialize_readably() {
        let s = serde_json::to_string(&Category::NaturalDisaster).unwrap();
        assert_eq!(s, "\"Natural Disaster\"");
        assert_eq!(Category::NaturalDisaster.label(), "Natural Disaster");
    }
}
