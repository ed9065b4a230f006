// File: src/core/tables.rs
//! Character tables used by the transliteration pipeline.
//!
//! Entries are written with escapes so that visually identical Arabic and
//! Persian glyphs (e.g. Arabic yeh U+064A vs Farsi yeh U+06CC) can't be
//! confused in review.

pub const ZWNJ: &str = "\u{200C}";
pub const NBSP: &str = "\u{00A0}";
pub const TATWEEL: &str = "\u{0640}";

/// Arabic variants folded into their Persian canonical letter.
pub const NORMALIZATION: &[(&str, &str)] = &[
    ("\u{064A}", "\u{06CC}"), // ي -> ی
    ("\u{0643}", "\u{06A9}"), // ك -> ک
    ("\u{0629}", "\u{0647}"), // ة -> ه
    ("\u{06C0}", "\u{0647}"), // ۀ -> ه
    ("\u{0624}", "\u{0648}"), // ؤ -> و
    ("\u{0625}", "\u{0627}"), // إ -> ا
    ("\u{0623}", "\u{0627}"), // أ -> ا
    ("\u{0671}", "\u{0627}"), // ٱ -> ا
    ("\u{0621}", ""),         // ء
    ("\u{0626}", "\u{06CC}"), // ئ -> ی
    ("\u{0622}", "a"),        // آ
    (ZWNJ, " "),
    (TATWEEL, ""),
];

/// Extended Arabic-Indic (Persian) and Arabic-Indic digits.
pub const NUMERALS: &[(&str, &str)] = &[
    ("\u{06F0}", "0"),
    ("\u{06F1}", "1"),
    ("\u{06F2}", "2"),
    ("\u{06F3}", "3"),
    ("\u{06F4}", "4"),
    ("\u{06F5}", "5"),
    ("\u{06F6}", "6"),
    ("\u{06F7}", "7"),
    ("\u{06F8}", "8"),
    ("\u{06F9}", "9"),
    ("\u{0660}", "0"),
    ("\u{0661}", "1"),
    ("\u{0662}", "2"),
    ("\u{0663}", "3"),
    ("\u{0664}", "4"),
    ("\u{0665}", "5"),
    ("\u{0666}", "6"),
    ("\u{0667}", "7"),
    ("\u{0668}", "8"),
    ("\u{0669}", "9"),
];

/// Persian canonical letters to Latin. Empty values elide the letter.
pub const LATIN: &[(&str, &str)] = &[
    ("\u{0627}", "a"),  // ا
    ("\u{0622}", "a"),  // آ
    ("\u{0628}", "b"),  // ب
    ("\u{067E}", "p"),  // پ
    ("\u{062A}", "t"),  // ت
    ("\u{062B}", "s"),  // ث
    ("\u{062C}", "j"),  // ج
    ("\u{0686}", "ch"), // چ
    ("\u{062D}", "h"),  // ح
    ("\u{062E}", "kh"), // خ
    ("\u{062F}", "d"),  // د
    ("\u{0630}", "z"),  // ذ
    ("\u{0631}", "r"),  // ر
    ("\u{0632}", "z"),  // ز
    ("\u{0698}", "zh"), // ژ
    ("\u{0633}", "s"),  // س
    ("\u{0634}", "sh"), // ش
    ("\u{0635}", "s"),  // ص
    ("\u{0636}", "z"),  // ض
    ("\u{0637}", "t"),  // ط
    ("\u{0638}", "z"),  // ظ
    ("\u{0639}", ""),   // ع
    ("\u{063A}", "gh"), // غ
    ("\u{0641}", "f"),  // ف
    ("\u{0642}", "q"),  // ق
    ("\u{06A9}", "k"),  // ک
    ("\u{06AF}", "g"),  // گ
    ("\u{0644}", "l"),  // ل
    ("\u{0645}", "m"),  // م
    ("\u{0646}", "n"),  // ن
    ("\u{0648}", "v"),  // و
    ("\u{0647}", "h"),  // ه
    ("\u{06CC}", "y"),  // ی
    (ZWNJ, " "),
    (NBSP, " "),
];
