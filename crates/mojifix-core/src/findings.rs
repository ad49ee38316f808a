//! 命中项与单文件结果（内部使用）
use crate::repair::CandidateSource;

/// 单行修复命中的内部表示
#[derive(Debug, Clone)]
pub(crate) struct Finding {
    pub(crate) file: String,
    pub(crate) line: usize,
    pub(crate) original: String,
    pub(crate) repaired: String,
    pub(crate) score_before: usize,
    pub(crate) score_after: usize,
    pub(crate) strategy: CandidateSource,
    pub(crate) rule_ids: Vec<String>,
}

/// 单文件处理结果：命中列表 + 行计数 + 跳过/改写标记
#[derive(Debug, Clone, Default)]
pub(crate) struct FileOutcome {
    pub(crate) findings: Vec<Finding>,
    pub(crate) lines_scanned: usize,
    pub(crate) lines_suspicious: usize,
    /// false 表示该文件被跳过（二进制、超限或读取失败）
    pub(crate) scanned: bool,
    /// --fix 是否改写了该文件
    pub(crate) changed: bool,
}
