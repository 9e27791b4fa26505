//! 建筑结构编码（StructureCode）
//!
//! 语法：由 `+` 连接的若干段，每段为可选的数字前缀 + 一个字母标签，例如 `P+2M+1E+0S`。
//!
//! | 标签 | 含义            |
//! |------|-----------------|
//! | `P`  | 底层（parter）  |
//! | `M`  | 阁楼（mansarda）|
//! | `E`  | 楼层（etaj）    |
//! | `D`  | 半地下（demisol），只补齐不解码 |
//! | `S`  | 地下室（subsol）|
//!
//! 规范化后 M/E/D/S 四个标签必然都出现；缺失的标签以 `+0<标签>` 的形式按 M、E、D、S 顺序补齐。

use std::fmt;

use serde::Serialize;

/// 原始数据中"无数据"的占位值
pub const NOT_AVAILABLE: &str = "Not available";

/// 占位值被替换成的基础编码
pub const BASE_TAG: &str = "P";

/// 段分隔符
pub const SEGMENT_SEPARATOR: char = '+';

/// 层级标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTag {
    Mansard,
    Etage,
    Demisol,
    Subsol,
}

impl LevelTag {
    /// 规范化时的补齐顺序
    pub const NORMALIZATION_ORDER: [LevelTag; 4] = [
        LevelTag::Mansard,
        LevelTag::Etage,
        LevelTag::Demisol,
        LevelTag::Subsol,
    ];

    pub fn letter(self) -> char {
        match self {
            LevelTag::Mansard => 'M',
            LevelTag::Etage => 'E',
            LevelTag::Demisol => 'D',
            LevelTag::Subsol => 'S',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(LevelTag::Mansard),
            'E' => Some(LevelTag::Etage),
            'D' => Some(LevelTag::Demisol),
            'S' => Some(LevelTag::Subsol),
            _ => None,
        }
    }
}

/// 编码单个段，例如 `encode_segment(2, LevelTag::Mansard)` → `"2M"`
pub fn encode_segment(count: u32, tag: LevelTag) -> String {
    format!("{}{}", count, tag.letter())
}

/// 解析出的单个段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// 数字前缀（可能为空）
    pub prefix: &'a str,
    /// 段中剩余的标签部分，例如 `M`、`P`
    pub tag: &'a str,
}

impl Segment<'_> {
    /// 标签对应的层级（`P` 等非层级标签返回 None）
    pub fn level_tag(&self) -> Option<LevelTag> {
        let mut chars = self.tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => LevelTag::from_letter(c),
            _ => None,
        }
    }

    /// 数字前缀的数值
    pub fn count(&self) -> Option<u32> {
        self.prefix.parse().ok()
    }
}

/// 规范化后的建筑结构编码
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StructureCode(String);

impl StructureCode {
    /// 规范化原始编码
    ///
    /// 1. 占位值 `Not available` 替换为 `P`
    /// 2. 按 M、E、D、S 顺序，字母未出现时追加 `+0<字母>`
    pub fn normalize(raw: &str) -> Self {
        let mut code = if raw == NOT_AVAILABLE {
            BASE_TAG.to_string()
        } else {
            raw.to_string()
        };

        for tag in LevelTag::NORMALIZATION_ORDER {
            if !code.contains(tag.letter()) {
                code.push(SEGMENT_SEPARATOR);
                code.push_str(&encode_segment(0, tag));
            }
        }

        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// 按分隔符拆分为段
    pub fn segments(&self) -> Vec<Segment<'_>> {
        self.0
            .split(SEGMENT_SEPARATOR)
            .map(|part| {
                let split_at = part
                    .char_indices()
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(i, _)| i)
                    .unwrap_or(part.len());
                let (prefix, tag) = part.split_at(split_at);
                Segment { prefix, tag }
            })
            .collect()
    }

    /// 指定层级的显示值：字母首次出现位置前一个字符 + "0"
    ///
    /// 字母位于开头（没有前一个字符）时按 `0` 处理。字母不存在时返回 None，
    /// 规范化后的编码不会出现这种情况。
    pub fn level_of(&self, tag: LevelTag) -> Option<String> {
        let letter = tag.letter();
        let mut previous = None;
        for c in self.0.chars() {
            if c == letter {
                return Some(format!("{}0", previous.unwrap_or('0')));
            }
            previous = Some(c);
        }
        None
    }

    /// 解码出四个显示值
    pub fn levels(&self) -> DecodedLevels {
        let level = |tag| self.level_of(tag).unwrap_or_else(|| "00".to_string());
        DecodedLevels {
            mansarda: level(LevelTag::Mansard),
            etaj: level(LevelTag::Etage),
            // 半地下没有数据来源，固定为 "0"
            demisol: DEMISOL_VALUE.to_string(),
            subsol: level(LevelTag::Subsol),
        }
    }
}

impl fmt::Display for StructureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const DEMISOL_VALUE: &str = "0";

/// 由结构编码派生出的四个显示值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLevels {
    pub mansarda: String,
    pub etaj: String,
    pub demisol: String,
    pub subsol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_available_becomes_base_with_all_defaults() {
        let code = StructureCode::normalize("Not available");
        assert_eq!(code.as_str(), "P+0M+0E+0D+0S");
    }

    #[test]
    fn test_missing_tags_appended_in_fixed_order() {
        assert_eq!(StructureCode::normalize("P+2E").as_str(), "P+2E+0M+0D+0S");
        assert_eq!(StructureCode::normalize("P+1S").as_str(), "P+1S+0M+0E+0D");
        assert_eq!(StructureCode::normalize("P+3M").as_str(), "P+3M+0E+0D+0S");
        assert_eq!(StructureCode::normalize("P").as_str(), "P+0M+0E+0D+0S");
    }

    #[test]
    fn test_complete_code_unchanged() {
        assert_eq!(
            StructureCode::normalize("P+2M+1E+1D+1S").as_str(),
            "P+2M+1E+1D+1S"
        );
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        // 只有完全匹配的占位值才会被替换
        let code = StructureCode::normalize("not available");
        assert!(code.as_str().starts_with("not available"));
    }

    #[test]
    fn test_normalized_contains_each_tag_once() {
        for raw in ["", "P", "P+1E", "2S", "P+4M+2E", "Not available", "D"] {
            let code = StructureCode::normalize(raw);
            for tag in LevelTag::NORMALIZATION_ORDER {
                let count = code.as_str().matches(tag.letter()).count();
                assert_eq!(count, 1, "{} in {:?} -> {}", tag.letter(), raw, code);
            }
        }
    }

    #[test]
    fn test_levels_per_letter() {
        let code = StructureCode::normalize("P+2M+3E+1S");
        let levels = code.levels();
        assert_eq!(levels.mansarda, "20");
        assert_eq!(levels.etaj, "30");
        assert_eq!(levels.subsol, "10");
        assert_eq!(levels.demisol, "0");
    }

    #[test]
    fn test_levels_of_defaulted_code() {
        let levels = StructureCode::normalize("Not available").levels();
        assert_eq!(levels.mansarda, "00");
        assert_eq!(levels.etaj, "00");
        assert_eq!(levels.subsol, "00");
        assert_eq!(levels.demisol, "0");
    }

    #[test]
    fn test_demisol_ignores_source() {
        let levels = StructureCode::normalize("P+2D").levels();
        assert_eq!(levels.demisol, "0");
    }

    #[test]
    fn test_letter_at_start_has_no_preceding_char() {
        let code = StructureCode::normalize("M");
        assert_eq!(code.as_str(), "M+0E+0D+0S");
        assert_eq!(code.level_of(LevelTag::Mansard).as_deref(), Some("00"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        // E 首次出现在 "1E"，后面的 "Etaj" 不影响
        let code = StructureCode::normalize("P+1E+Etaj");
        assert_eq!(code.level_of(LevelTag::Etage).as_deref(), Some("10"));
    }

    #[test]
    fn test_non_ascii_preceding_char() {
        let code = StructureCode::normalize("P+ăM");
        assert_eq!(code.level_of(LevelTag::Mansard).as_deref(), Some("ă0"));
    }

    #[test]
    fn test_segments() {
        let code = StructureCode::normalize("P+12M+1E");
        let segments = code.segments();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0].tag, "P");
        assert_eq!(segments[0].level_tag(), None);
        assert_eq!(segments[1].count(), Some(12));
        assert_eq!(segments[1].level_tag(), Some(LevelTag::Mansard));
        assert_eq!(segments[4].prefix, "0");
        assert_eq!(segments[4].level_tag(), Some(LevelTag::Subsol));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment(0, LevelTag::Demisol), "0D");
        assert_eq!(encode_segment(3, LevelTag::Etage), "3E");
        for tag in LevelTag::NORMALIZATION_ORDER {
            assert_eq!(LevelTag::from_letter(tag.letter()), Some(tag));
        }
    }
}
