//! 乱码特征检测器集合
use crate::rules::RuleSpec;
use anyhow::Result;

/// 单个已编译的检测器
pub(crate) struct Detector {
    pub(crate) id: String,
    pub(crate) pattern: regex::Regex,
}

/// 检测器集合：对受损行做分类，并驱动 flagged 门控
pub(crate) struct DetectorSet {
    pub(crate) detectors: Vec<Detector>,
}

impl DetectorSet {
    /// 从规则条目构建检测器集合；无法编译的规则跳过
    pub(crate) fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        let mut detectors = Vec::new();
        for r in specs {
            if let Ok(rx) = regex::Regex::new(&r.pat) {
                detectors.push(Detector { id: r.id.clone(), pattern: rx });
            }
        }
        Ok(Self { detectors })
    }

    /// 是否有任一规则命中该行
    pub(crate) fn matches_any(&self, line: &str) -> bool {
        self.detectors.iter().any(|d| d.pattern.is_match(line))
    }

    /// 命中该行的全部规则 id（按规则声明顺序）
    pub(crate) fn matching_ids(&self, line: &str) -> Vec<String> {
        self.detectors
            .iter()
            .filter(|d| d.pattern.is_match(line))
            .map(|d| d.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DetectorSet;
    use crate::rules::builtin_rule_specs;

    fn builtin_set() -> DetectorSet {
        DetectorSet::from_specs(&builtin_rule_specs()).unwrap()
    }

    #[test]
    fn flags_mangled_cjk_line() {
        // "你" 的 UTF-8 字节按 Latin-1 读出
        let set = builtin_set();
        let ids = set.matching_ids("\u{E4}\u{BD}\u{A0}");
        assert!(ids.contains(&"cjk-three-byte".to_string()));
    }

    #[test]
    fn flags_latin1_digraph() {
        let set = builtin_set();
        assert!(set.matches_any("f\u{C3}\u{BC}r")); // "für" 被误读
    }

    #[test]
    fn flags_replacement_run() {
        let set = builtin_set();
        let ids = set.matching_ids("abc\u{FFFD}\u{FFFD}def");
        assert_eq!(ids, vec!["replacement-run".to_string()]);
    }

    #[test]
    fn clean_text_not_flagged() {
        let set = builtin_set();
        assert!(!set.matches_any("plain ascii"));
        assert!(!set.matches_any("你好，世界"));
    }

    #[test]
    fn invalid_rule_is_skipped() {
        use crate::rules::RuleSpec;
        let specs = vec![
            RuleSpec { id: "bad".into(), name: None, pat: "(".into() },
            RuleSpec { id: "good".into(), name: None, pat: "x".into() },
        ];
        let set = DetectorSet::from_specs(&specs).unwrap();
        assert_eq!(set.detectors.len(), 1);
        assert_eq!(set.detectors[0].id, "good");
    }
}
