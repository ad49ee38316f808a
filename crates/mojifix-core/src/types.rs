//! 公共类型（对外暴露）
use serde::Serialize;

/// 报告中的单条修复记录（对应 findings 数组的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub file: &'a str,
    pub line: usize,
    pub original: &'a str,
    pub repaired: &'a str,
    pub score_before: usize,
    pub score_after: usize,
    pub strategy: &'a str,
    pub rules: &'a [String],
}
