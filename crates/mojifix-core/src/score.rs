//! CJK 密度打分

/// 统计字符串中落在 CJK 表意文字区段内的标量值个数
/// - 覆盖基本区（U+4E00..U+9FFF）、扩展 A 区（U+3400..U+4DBF）、兼容区（U+F900..U+FAFF）
/// - 密度启发式：仅假设目标语料以中日韩文本为主，不是语言检测
pub fn cjk_score(s: &str) -> usize {
    s.chars()
        .filter(|c| {
            matches!(
                *c as u32,
                0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF
            )
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::cjk_score;

    #[test]
    fn empty_scores_zero() {
        assert_eq!(cjk_score(""), 0);
    }

    #[test]
    fn ascii_scores_zero() {
        assert_eq!(cjk_score("hello, world"), 0);
    }

    #[test]
    fn counts_common_block() {
        assert_eq!(cjk_score("你好，世界"), 4);
    }

    #[test]
    fn counts_extension_a_and_compat_blocks() {
        // 㐀 = U+3400（扩展 A 起点），豈 = U+F900（兼容区起点）
        assert_eq!(cjk_score("\u{3400}\u{F900}"), 2);
    }

    #[test]
    fn block_boundaries_inclusive() {
        assert_eq!(cjk_score("\u{4E00}\u{9FFF}\u{4DBF}\u{FAFF}"), 4);
        // 区段外紧邻的码位不计分
        assert_eq!(cjk_score("\u{4DFF}\u{A000}\u{33FF}\u{FB00}"), 0);
    }

    #[test]
    fn kana_and_hangul_do_not_count() {
        // 打分只看表意文字区段，假名/谚文不计
        assert_eq!(cjk_score("ひらがな한글"), 0);
    }
}
