//! 扫描主流程与并行调度
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::detectors::DetectorSet;
use crate::engine::repair_file;
use crate::findings::FileOutcome;
use crate::options::{ScanOptions, ScanStats};
use crate::rules::{builtin_rule_specs, load_rule_specs};
use crate::session::session_id;
use crate::types::OutputItem;

/// 扫描目录并将修复报告以 JSON 对象流式写入 `out`
/// 报告结构：`{"session":"sess_…","findings":[…]}`
/// 稳定性保证：
/// - 文件级：先收集文件并按路径排序，确保输出顺序可复现
/// - 并行路径由单线程 Writer 按文件索引重排，与串行输出一致
pub fn scan_and_write(input_dir: &Path, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    // 规则：显式路径 → ./rules/default.toml → 内置缺省
    let rule_specs = match &opts.rules_path {
        Some(p) => load_rule_specs(p)?,
        None => {
            let default = Path::new("./rules/default.toml");
            if default.is_file() {
                load_rule_specs(default)?
            } else {
                builtin_rule_specs()
            }
        }
    };
    let detectors = Arc::new(DetectorSet::from_specs(&rule_specs)?);

    let mut stats = ScanStats { session: session_id(), ..Default::default() };

    // 递归遍历输入目录，仅收集普通文件
    let mut files: Vec<PathBuf> = vec![];
    for entry in WalkDir::new(input_dir).min_depth(1) {
        let entry = match entry { Ok(e) => e, Err(_) => continue };
        if entry.file_type().is_file() { files.push(entry.into_path()); }
    }
    // 按路径排序，确保输出顺序稳定
    files.sort();

    // 报告信封：会话标识 + findings 数组起始
    write!(out, "{{\"session\":")?;
    serde_json::to_writer(&mut *out, &stats.session)?;
    write!(out, ",\"findings\":[")?;
    let mut first = true;

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    if threads > 1 {
        scan_parallel(input_dir, &files, out, opts, &detectors, &mut stats, &mut first, threads)?;
    } else {
        // 串行路径
        for path in &files {
            let outcome = scan_one(input_dir, path, opts, &detectors);
            absorb(&mut stats, &outcome);
            write_findings(out, &outcome, &mut first, &mut stats)?;
        }
    }

    write!(out, "]}}")?;
    Ok(stats)
}

/// 处理单个文件；跳过与错误都折叠为 scanned=false 的空结果
fn scan_one(input_dir: &Path, path: &Path, opts: &ScanOptions, detectors: &DetectorSet) -> FileOutcome {
    if let Some(max) = opts.max_file_size {
        if let Ok(md) = std::fs::metadata(path) {
            if md.len() > max {
                return FileOutcome::default();
            }
        }
    }
    let rel = relative_name(input_dir, path);
    match repair_file(path, &rel, detectors, opts.gate, opts.fix) {
        Ok(outcome) => outcome,
        Err(_) => FileOutcome::default(),
    }
}

/// 并行调度：
/// - Rayon 线程池并行处理文件
/// - 单线程 Writer 按 idx 重排并流式写 JSON，保证与串行一致的顺序
#[allow(clippy::too_many_arguments)]
fn scan_parallel(
    input_dir: &Path,
    files: &[PathBuf],
    out: &mut dyn Write,
    opts: &ScanOptions,
    detectors: &Arc<DetectorSet>,
    stats: &mut ScanStats,
    first: &mut bool,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    // 通道用于 worker → writer 传递结果
    type Msg = (usize /*idx*/, FileOutcome);
    let (tx, rx) = channel::bounded::<Msg>(256);

    // 为防止 &mut out 的跨线程所有权问题，Writer 保持在当前线程；
    // 扫描在后台线程内创建 Rayon 线程池并执行
    let detectors = Arc::clone(detectors);
    let opts = opts.clone();
    let input_dir = input_dir.to_path_buf();
    let files_vec: Vec<(usize, PathBuf)> = files
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.clone()))
        .collect();

    let scan_thread = std::thread::spawn(move || -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| {
            files_vec.par_iter().for_each(|(idx, path)| {
                let outcome = scan_one(&input_dir, path, &opts, &detectors);
                let _ = tx.send((*idx, outcome));
            });
        });
        // 结束后 Sender 全部被丢弃，Receiver 将收到关闭信号
        Ok(())
    });

    // Writer：维护 next_idx 与缓存，按序输出
    use std::collections::BTreeMap;
    let mut next_idx: usize = 0;
    let mut buffer: BTreeMap<usize, FileOutcome> = BTreeMap::new();

    while let Ok((idx, outcome)) = rx.recv() {
        buffer.insert(idx, outcome);
        // 尝试从 next_idx 开始顺序冲刷
        while let Some(outcome) = buffer.remove(&next_idx) {
            absorb(stats, &outcome);
            write_findings(out, &outcome, first, stats)?;
            next_idx += 1;
        }
    }

    // 等待扫描线程结束
    match scan_thread.join() {
        Ok(res) => res?,
        Err(_) => anyhow::bail!("scan thread panicked"),
    }

    // 最终冲刷残余（理论上缓冲应已清空）
    while let Some(outcome) = buffer.remove(&next_idx) {
        absorb(stats, &outcome);
        write_findings(out, &outcome, first, stats)?;
        next_idx += 1;
    }

    Ok(())
}

/// 累加单文件结果到总体统计
fn absorb(stats: &mut ScanStats, outcome: &FileOutcome) {
    if outcome.scanned {
        stats.files_scanned += 1;
    } else {
        stats.files_skipped += 1;
    }
    if outcome.changed {
        stats.files_changed += 1;
    }
    stats.lines_scanned += outcome.lines_scanned;
    stats.lines_suspicious += outcome.lines_suspicious;
}

/// 将单文件命中项流式写入 findings 数组
fn write_findings(
    out: &mut dyn Write,
    outcome: &FileOutcome,
    first: &mut bool,
    stats: &mut ScanStats,
) -> Result<()> {
    for f in &outcome.findings {
        if !*first { write!(out, ",")?; } else { *first = false; }
        let item = OutputItem {
            file: &f.file,
            line: f.line,
            original: &f.original,
            repaired: &f.repaired,
            score_before: f.score_before,
            score_after: f.score_after,
            strategy: f.strategy.as_str(),
            rules: &f.rule_ids,
        };
        serde_json::to_writer(&mut *out, &item)?;
        stats.findings_written += 1;
    }
    Ok(())
}

/// 报告中使用的文件名：相对输入目录的路径
fn relative_name(input_dir: &Path, path: &Path) -> String {
    path.strip_prefix(input_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
