// ============================================
// src/kana.rs
// 出題する文字データ (ひらがな / カタカナ) とモードの定義
// ============================================

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 文字の種類 (清音 / 濁音 / 半濁音)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanaType {
    Basic,
    Dakuon,
    Handakuon,
}

/// 文字の属する音節文字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hiragana,
    Katakana,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hiragana => "hiragana",
            Category::Katakana => "katakana",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1文字分のデータ
///
/// 同一性は `thai` (タイ語の読み) で判定する。`glyph` が違っても読みが同じなら
/// 選択肢の上では同じ答えとして扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kana {
    pub glyph: &'static str,  // 表示用の文字 ("あ")
    pub romaji: &'static str, // ローマ字 ("a")
    pub thai: &'static str,   // 答え合わせに使う読み ("อะ")
    pub kind: KanaType,
    pub category: Category,
}

impl Kana {
    pub const fn new(
        glyph: &'static str,
        romaji: &'static str,
        thai: &'static str,
        kind: KanaType,
        category: Category,
    ) -> Self {
        Self {
            glyph,
            romaji,
            thai,
            kind,
            category,
        }
    }
}

/// 出題モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Hiragana,
    Katakana,
    Mixed,
}

impl GameMode {
    /// モード選択画面に並べる順番
    pub const ALL: [GameMode; 3] = [GameMode::Hiragana, GameMode::Katakana, GameMode::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Hiragana => "hiragana",
            GameMode::Katakana => "katakana",
            GameMode::Mixed => "mixed",
        }
    }

    /// 画面表示用のタイトル
    pub fn title(self) -> &'static str {
        match self {
            GameMode::Hiragana => "ひらがな (Hiragana)",
            GameMode::Katakana => "カタカナ (Katakana)",
            GameMode::Mixed => "ミックス (Mixed)",
        }
    }

    /// モードに対応する出題プールを作る。
    /// 中身は静的データへの参照だけなので、モード切り替えのたびに作り直してよい。
    pub fn pool(self) -> Vec<&'static Kana> {
        match self {
            GameMode::Hiragana => HIRAGANA.iter().collect(),
            GameMode::Katakana => KATAKANA.iter().collect(),
            GameMode::Mixed => HIRAGANA.iter().chain(KATAKANA.iter()).collect(),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --------------------------------------------------
// 文字データ
// --------------------------------------------------

/// ひらがな一覧 (清音 → 濁音 → 半濁音)
///
/// 「を」と「お」、「ぢ」と「じ」、「づ」と「ず」は読みが同じ。
pub const HIRAGANA: &[Kana] = &[
    // 基本
    Kana::new("あ", "a", "อะ", KanaType::Basic, Category::Hiragana),
    Kana::new("い", "i", "อิ", KanaType::Basic, Category::Hiragana),
    Kana::new("う", "u", "อุ", KanaType::Basic, Category::Hiragana),
    Kana::new("え", "e", "เอะ", KanaType::Basic, Category::Hiragana),
    Kana::new("お", "o", "โอะ", KanaType::Basic, Category::Hiragana),
    Kana::new("か", "ka", "คะ", KanaType::Basic, Category::Hiragana),
    Kana::new("き", "ki", "คิ", KanaType::Basic, Category::Hiragana),
    Kana::new("く", "ku", "คุ", KanaType::Basic, Category::Hiragana),
    Kana::new("け", "ke", "เคะ", KanaType::Basic, Category::Hiragana),
    Kana::new("こ", "ko", "โคะ", KanaType::Basic, Category::Hiragana),
    Kana::new("さ", "sa", "สะ", KanaType::Basic, Category::Hiragana),
    Kana::new("し", "shi", "ชิ", KanaType::Basic, Category::Hiragana),
    Kana::new("す", "su", "สุ", KanaType::Basic, Category::Hiragana),
    Kana::new("せ", "se", "เสะ", KanaType::Basic, Category::Hiragana),
    Kana::new("そ", "so", "โสะ", KanaType::Basic, Category::Hiragana),
    Kana::new("た", "ta", "ทะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ち", "chi", "ฉิ", KanaType::Basic, Category::Hiragana),
    Kana::new("つ", "tsu", "สึ", KanaType::Basic, Category::Hiragana),
    Kana::new("て", "te", "เทะ", KanaType::Basic, Category::Hiragana),
    Kana::new("と", "to", "โทะ", KanaType::Basic, Category::Hiragana),
    Kana::new("な", "na", "นะ", KanaType::Basic, Category::Hiragana),
    Kana::new("に", "ni", "นิ", KanaType::Basic, Category::Hiragana),
    Kana::new("ぬ", "nu", "นุ", KanaType::Basic, Category::Hiragana),
    Kana::new("ね", "ne", "เนะ", KanaType::Basic, Category::Hiragana),
    Kana::new("の", "no", "โนะ", KanaType::Basic, Category::Hiragana),
    Kana::new("は", "ha", "ฮะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ひ", "hi", "ฮิ", KanaType::Basic, Category::Hiragana),
    Kana::new("ふ", "fu", "ฟุ", KanaType::Basic, Category::Hiragana),
    Kana::new("へ", "he", "เฮะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ほ", "ho", "โฮะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ま", "ma", "มะ", KanaType::Basic, Category::Hiragana),
    Kana::new("み", "mi", "มิ", KanaType::Basic, Category::Hiragana),
    Kana::new("む", "mu", "มุ", KanaType::Basic, Category::Hiragana),
    Kana::new("め", "me", "เมะ", KanaType::Basic, Category::Hiragana),
    Kana::new("も", "mo", "โมะ", KanaType::Basic, Category::Hiragana),
    Kana::new("や", "ya", "ยะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ゆ", "yu", "ยุ", KanaType::Basic, Category::Hiragana),
    Kana::new("よ", "yo", "โยะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ら", "ra", "ระ", KanaType::Basic, Category::Hiragana),
    Kana::new("り", "ri", "ริ", KanaType::Basic, Category::Hiragana),
    Kana::new("る", "ru", "รุ", KanaType::Basic, Category::Hiragana),
    Kana::new("れ", "re", "เระ", KanaType::Basic, Category::Hiragana),
    Kana::new("ろ", "ro", "โระ", KanaType::Basic, Category::Hiragana),
    Kana::new("わ", "wa", "วะ", KanaType::Basic, Category::Hiragana),
    Kana::new("を", "wo", "โอะ", KanaType::Basic, Category::Hiragana),
    Kana::new("ん", "n", "อึน", KanaType::Basic, Category::Hiragana),
    // 濁音
    Kana::new("が", "ga", "กะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぎ", "gi", "กิ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぐ", "gu", "กุ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("げ", "ge", "เกะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ご", "go", "โกะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ざ", "za", "ซะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("じ", "ji", "จิ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ず", "zu", "ซุ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぜ", "ze", "เซะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぞ", "zo", "โซะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("だ", "da", "ดะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぢ", "ji", "จิ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("づ", "zu", "ซุ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("で", "de", "เดะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ど", "do", "โดะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ば", "ba", "บะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("び", "bi", "บิ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぶ", "bu", "บุ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("べ", "be", "เบะ", KanaType::Dakuon, Category::Hiragana),
    Kana::new("ぼ", "bo", "โบะ", KanaType::Dakuon, Category::Hiragana),
    // 半濁音
    Kana::new("ぱ", "pa", "ปะ", KanaType::Handakuon, Category::Hiragana),
    Kana::new("ぴ", "pi", "ปิ", KanaType::Handakuon, Category::Hiragana),
    Kana::new("ぷ", "pu", "ปุ", KanaType::Handakuon, Category::Hiragana),
    Kana::new("ぺ", "pe", "เปะ", KanaType::Handakuon, Category::Hiragana),
    Kana::new("ぽ", "po", "โปะ", KanaType::Handakuon, Category::Hiragana),
];

/// カタカナ一覧 (読みはひらがなと共通)
pub const KATAKANA: &[Kana] = &[
    // 基本
    Kana::new("ア", "a", "อะ", KanaType::Basic, Category::Katakana),
    Kana::new("イ", "i", "อิ", KanaType::Basic, Category::Katakana),
    Kana::new("ウ", "u", "อุ", KanaType::Basic, Category::Katakana),
    Kana::new("エ", "e", "เอะ", KanaType::Basic, Category::Katakana),
    Kana::new("オ", "o", "โอะ", KanaType::Basic, Category::Katakana),
    Kana::new("カ", "ka", "คะ", KanaType::Basic, Category::Katakana),
    Kana::new("キ", "ki", "คิ", KanaType::Basic, Category::Katakana),
    Kana::new("ク", "ku", "คุ", KanaType::Basic, Category::Katakana),
    Kana::new("ケ", "ke", "เคะ", KanaType::Basic, Category::Katakana),
    Kana::new("コ", "ko", "โคะ", KanaType::Basic, Category::Katakana),
    Kana::new("サ", "sa", "สะ", KanaType::Basic, Category::Katakana),
    Kana::new("シ", "shi", "ชิ", KanaType::Basic, Category::Katakana),
    Kana::new("ス", "su", "สุ", KanaType::Basic, Category::Katakana),
    Kana::new("セ", "se", "เสะ", KanaType::Basic, Category::Katakana),
    Kana::new("ソ", "so", "โสะ", KanaType::Basic, Category::Katakana),
    Kana::new("タ", "ta", "ทะ", KanaType::Basic, Category::Katakana),
    Kana::new("チ", "chi", "ฉิ", KanaType::Basic, Category::Katakana),
    Kana::new("ツ", "tsu", "สึ", KanaType::Basic, Category::Katakana),
    Kana::new("テ", "te", "เทะ", KanaType::Basic, Category::Katakana),
    Kana::new("ト", "to", "โทะ", KanaType::Basic, Category::Katakana),
    Kana::new("ナ", "na", "นะ", KanaType::Basic, Category::Katakana),
    Kana::new("ニ", "ni", "นิ", KanaType::Basic, Category::Katakana),
    Kana::new("ヌ", "nu", "นุ", KanaType::Basic, Category::Katakana),
    Kana::new("ネ", "ne", "เนะ", KanaType::Basic, Category::Katakana),
    Kana::new("ノ", "no", "โนะ", KanaType::Basic, Category::Katakana),
    Kana::new("ハ", "ha", "ฮะ", KanaType::Basic, Category::Katakana),
    Kana::new("ヒ", "hi", "ฮิ", KanaType::Basic, Category::Katakana),
    Kana::new("フ", "fu", "ฟุ", KanaType::Basic, Category::Katakana),
    Kana::new("ヘ", "he", "เฮะ", KanaType::Basic, Category::Katakana),
    Kana::new("ホ", "ho", "โฮะ", KanaType::Basic, Category::Katakana),
    Kana::new("マ", "ma", "มะ", KanaType::Basic, Category::Katakana),
    Kana::new("ミ", "mi", "มิ", KanaType::Basic, Category::Katakana),
    Kana::new("ム", "mu", "มุ", KanaType::Basic, Category::Katakana),
    Kana::new("メ", "me", "เมะ", KanaType::Basic, Category::Katakana),
    Kana::new("モ", "mo", "โมะ", KanaType::Basic, Category::Katakana),
    Kana::new("ヤ", "ya", "ยะ", KanaType::Basic, Category::Katakana),
    Kana::new("ユ", "yu", "ยุ", KanaType::Basic, Category::Katakana),
    Kana::new("ヨ", "yo", "โยะ", KanaType::Basic, Category::Katakana),
    Kana::new("ラ", "ra", "ระ", KanaType::Basic, Category::Katakana),
    Kana::new("リ", "ri", "ริ", KanaType::Basic, Category::Katakana),
    Kana::new("ル", "ru", "รุ", KanaType::Basic, Category::Katakana),
    Kana::new("レ", "re", "เระ", KanaType::Basic, Category::Katakana),
    Kana::new("ロ", "ro", "โระ", KanaType::Basic, Category::Katakana),
    Kana::new("ワ", "wa", "วะ", KanaType::Basic, Category::Katakana),
    Kana::new("ヲ", "wo", "โอะ", KanaType::Basic, Category::Katakana),
    Kana::new("ン", "n", "อึน", KanaType::Basic, Category::Katakana),
    // 濁音
    Kana::new("ガ", "ga", "กะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ギ", "gi", "กิ", KanaType::Dakuon, Category::Katakana),
    Kana::new("グ", "gu", "กุ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ゲ", "ge", "เกะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ゴ", "go", "โกะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ザ", "za", "ซะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ジ", "ji", "จิ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ズ", "zu", "ซุ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ゼ", "ze", "เซะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ゾ", "zo", "โซะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ダ", "da", "ดะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ヂ", "ji", "จิ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ヅ", "zu", "ซุ", KanaType::Dakuon, Category::Katakana),
    Kana::new("デ", "de", "เดะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ド", "do", "โดะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("バ", "ba", "บะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ビ", "bi", "บิ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ブ", "bu", "บุ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ベ", "be", "เบะ", KanaType::Dakuon, Category::Katakana),
    Kana::new("ボ", "bo", "โบะ", KanaType::Dakuon, Category::Katakana),
    // 半濁音
    Kana::new("パ", "pa", "ปะ", KanaType::Handakuon, Category::Katakana),
    Kana::new("ピ", "pi", "ปิ", KanaType::Handakuon, Category::Katakana),
    Kana::new("プ", "pu", "ปุ", KanaType::Handakuon, Category::Katakana),
    Kana::new("ペ", "pe", "เปะ", KanaType::Handakuon, Category::Katakana),
    Kana::new("ポ", "po", "โปะ", KanaType::Handakuon, Category::Katakana),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_syllabary_has_the_full_table() {
        for (table, category) in [(HIRAGANA, Category::Hiragana), (KATAKANA, Category::Katakana)] {
            assert_eq!(table.len(), 71);
            assert_eq!(table.iter().filter(|k| k.kind == KanaType::Basic).count(), 46);
            assert_eq!(table.iter().filter(|k| k.kind == KanaType::Dakuon).count(), 20);
            assert_eq!(table.iter().filter(|k| k.kind == KanaType::Handakuon).count(), 5);
            assert!(table.iter().all(|k| k.category == category));
        }
    }

    #[test]
    fn glyphs_are_unique_and_fields_are_filled() {
        let mut seen = HashSet::new();
        for kana in HIRAGANA.iter().chain(KATAKANA.iter()) {
            assert!(seen.insert(kana.glyph), "duplicate glyph '{}'", kana.glyph);
            assert_eq!(kana.glyph.chars().count(), 1, "'{}' is not a single char", kana.glyph);
            assert!(!kana.romaji.is_empty(), "empty romaji for '{}'", kana.glyph);
            assert!(!kana.thai.is_empty(), "empty label for '{}'", kana.glyph);
        }
    }

    #[test]
    fn katakana_mirrors_hiragana_readings() {
        for (h, k) in HIRAGANA.iter().zip(KATAKANA.iter()) {
            assert_eq!(h.romaji, k.romaji);
            assert_eq!(h.thai, k.thai);
            assert_eq!(h.kind, k.kind);
        }
    }

    #[test]
    fn mixed_pool_is_hiragana_then_katakana() {
        let mixed = GameMode::Mixed.pool();
        assert_eq!(mixed.len(), HIRAGANA.len() + KATAKANA.len());
        assert_eq!(mixed[0].glyph, "あ");
        assert_eq!(mixed[HIRAGANA.len()].glyph, "ア");
        assert_eq!(GameMode::Hiragana.pool().len(), HIRAGANA.len());
        assert_eq!(GameMode::Katakana.pool().len(), KATAKANA.len());
    }

    #[test]
    fn mixed_pool_covers_both_categories() {
        let categories: HashSet<Category> =
            GameMode::Mixed.pool().iter().map(|k| k.category).collect();
        assert_eq!(categories, HashSet::from([Category::Hiragana, Category::Katakana]));
    }

    #[test]
    fn pool_has_enough_distinct_labels_for_four_options() {
        for mode in GameMode::ALL {
            let labels: HashSet<_> = mode.pool().iter().map(|k| k.thai).collect();
            assert!(labels.len() >= 4, "{mode} has only {} labels", labels.len());
        }
    }
}
