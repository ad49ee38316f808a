//! 乱码特征规则加载（TOML + 内置缺省）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 单条规则的配置（支持 pattern 或 regex 字段）
#[derive(Debug, Clone, Deserialize)]
struct RuleEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
}

/// 顶层规则文件结构
#[derive(Debug, Clone, Deserialize)]
struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// 归一化后的规则规格（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RuleSpec {
    pub id: String,
    #[allow(dead_code)]
    pub name: Option<String>,
    pub pat: String,
}

/// 从 TOML 规则文件加载并归一化为 RuleSpec 列表
pub(crate) fn load_rule_specs(path: &Path) -> Result<Vec<RuleSpec>> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("read rules file {}", path.display()))?;
    let parsed: RuleFile = toml::from_str(&txt).context("parse rules toml")?;
    let mut out = Vec::new();

    for e in parsed.rules {
        // 兼容两种字段名：pattern 或 regex
        let pat = match (e.pattern, e.regex) {
            (Some(p), _) => p,
            (None, Some(r)) => r,
            _ => continue,
        };
        out.push(RuleSpec { id: e.id, name: e.name, pat });
    }

    Ok(out)
}

/// 内置缺省规则：Latin-1 误读 UTF-8 留下的典型痕迹
/// （与 rules/default.toml 内容一致，后者是外部覆盖模板）
pub(crate) fn builtin_rule_specs() -> Vec<RuleSpec> {
    let builtin: &[(&str, &str, &str)] = &[
        // 西文双字节序列被 Latin-1 读出：Ã + 延续字节区
        ("latin1-digraph", "Latin-1 digraph", r"Ã[\x{80}-\x{BF}]"),
        // CJK 三字节序列被 Latin-1 读出：E3..E9/EF 前导 + 两个延续字节区字符
        ("cjk-three-byte", "CJK three-byte shape", r"[\x{E3}-\x{E9}\x{EF}][\x{80}-\x{BF}]{2}"),
        // 裸 C1 控制字符：正常文本里不该出现
        ("c1-control", "raw C1 control", r"[\x{80}-\x{9F}]"),
        // 替换符连串：上游已经历过一次有损解码
        ("replacement-run", "replacement character run", r"\x{FFFD}+"),
    ];
    builtin
        .iter()
        .map(|(id, name, pat)| RuleSpec {
            id: (*id).to_string(),
            name: Some((*name).to_string()),
            pat: (*pat).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{builtin_rule_specs, load_rule_specs};
    use std::io::Write;

    #[test]
    fn builtin_specs_compile() {
        for spec in builtin_rule_specs() {
            assert!(regex::Regex::new(&spec.pat).is_ok(), "rule {} invalid", spec.id);
        }
    }

    #[test]
    fn loads_pattern_and_regex_fields() {
        let dir = std::env::temp_dir().join(format!("mojifix-rules-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("r.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            "[[rules]]\nid = \"a\"\npattern = \"x+\"\n\n[[rules]]\nid = \"b\"\nregex = \"y+\"\n\n[[rules]]\nid = \"skipped\"\n"
        )
        .unwrap();

        let specs = load_rule_specs(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].id, "a");
        assert_eq!(specs[0].pat, "x+");
        assert_eq!(specs[1].id, "b");
        assert_eq!(specs[1].pat, "y+");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_rule_specs(std::path::Path::new("/nonexistent/rules.toml")).is_err());
    }
}
