//! 乱码修复核心库
//!
//! 设计要点：
//! - 核心是纯函数 `repair`：对输入文本尝试两种重解码策略，按 CJK 密度打分取最优。
//! - 宽松/严格两种 UTF-8 解码是策略语义的一部分，不可互换
//!   （策略一允许替换符，策略二遇到非法字节序列即整体失败）。
//! - 批量层（scan）在核心之上：遍历目录、逐行修复、流式写 JSON 报告。
//! - 输出顺序可复现：文件按路径排序，并行路径由单线程 Writer 按序冲刷。

mod detectors;
mod engine;
mod findings;
mod options;
mod repair;
mod rules;
mod scan;
mod score;
mod session;
mod strategy;
mod types;

pub use options::{RepairGate, ScanOptions, ScanStats};
pub use repair::{repair, repair_candidate, Candidate, CandidateSource};
pub use scan::scan_and_write;
pub use score::cjk_score;
pub use session::{session_id, session_id_with};
pub use strategy::{escape_round_trip, reinterpret_low_bytes, StrategyError};
pub use types::OutputItem;
