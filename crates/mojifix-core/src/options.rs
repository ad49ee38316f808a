//! 扫描选项与统计信息（模块）
use std::path::PathBuf;

/// 修复门控：决定哪些行进入候选评估
/// - NonAscii：含任意非 ASCII 标量值的行都尝试修复（默认）。
/// - Flagged：仅规则检测器命中的行尝试修复（保守模式）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairGate {
    NonAscii,
    Flagged,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 修复门控：non-ascii（默认）或 flagged
    pub gate: RepairGate,
    /// 规则文件路径（TOML）；为空则尝试 ./rules/default.toml，再退回内置规则
    pub rules_path: Option<PathBuf>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 是否原地改写命中文件
    pub fix: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_file_size: None,
            gate: RepairGate::NonAscii,
            rules_path: None,
            threads: None,
            fix: false,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_changed: usize,
    pub lines_scanned: usize,
    pub lines_suspicious: usize,
    pub findings_written: usize,
    /// 本次报告的会话标识
    pub session: String,
}
