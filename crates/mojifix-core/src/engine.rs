//! 单文件修复引擎
//!
//! 读取→判二进制→解码→逐行评估→（可选）原地改写。
//! 二进制判定只看 NUL 字节：可打印占比启发式会把高密度乱码误判为二进制，
//! 这里的输入恰恰就是那种文本。

use anyhow::Result;
use std::path::Path;

use crate::detectors::DetectorSet;
use crate::findings::{FileOutcome, Finding};
use crate::options::RepairGate;
use crate::repair::{repair_candidate, CandidateSource};
use crate::score::cjk_score;

/// 修复单个文件，逐行收集命中项
/// - 合法 UTF-8 直接按字符串处理；否则按 Latin-1（字节=标量值）解码，
///   这样原始单字节文件里的受损序列仍然可修复
/// - 行终止符（`\n` / `\r\n`）原样保留；仅当某策略严格提升得分时产生命中
/// - `fix` 为真且有命中时将改写后的内容写回原路径
pub(crate) fn repair_file(
    path: &Path,
    file: &str,
    detectors: &DetectorSet,
    gate: RepairGate,
    fix: bool,
) -> Result<FileOutcome> {
    let raw = std::fs::read(path)?;
    let mut outcome = FileOutcome::default();

    // NUL 即二进制，跳过
    if raw.contains(&0) {
        return Ok(outcome);
    }
    outcome.scanned = true;

    let text = match String::from_utf8(raw) {
        Ok(s) => s,
        Err(e) => decode_latin1(&e.into_bytes()),
    };

    let mut rebuilt = String::with_capacity(text.len());
    let mut any_repaired = false;

    for (idx, piece) in text.split_inclusive('\n').enumerate() {
        let (content, terminator) = split_terminator(piece);
        outcome.lines_scanned += 1;

        let should_try = match gate {
            RepairGate::NonAscii => !content.is_ascii(),
            RepairGate::Flagged => detectors.matches_any(content),
        };
        if should_try {
            outcome.lines_suspicious += 1;
            let cand = repair_candidate(content);
            if cand.source != CandidateSource::Input {
                outcome.findings.push(Finding {
                    file: file.to_string(),
                    line: idx + 1,
                    original: content.to_string(),
                    repaired: cand.text.clone(),
                    score_before: cjk_score(content),
                    score_after: cand.score,
                    strategy: cand.source,
                    rule_ids: detectors.matching_ids(content),
                });
                rebuilt.push_str(&cand.text);
                rebuilt.push_str(terminator);
                any_repaired = true;
                continue;
            }
        }
        rebuilt.push_str(piece);
    }

    if fix && any_repaired {
        std::fs::write(path, rebuilt)?;
        outcome.changed = true;
    }

    Ok(outcome)
}

/// Latin-1 解码：每个字节即同值标量
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// 拆出行内容与终止符（`\r\n` 优先于 `\n`）
fn split_terminator(piece: &str) -> (&str, &str) {
    if let Some(stripped) = piece.strip_suffix("\r\n") {
        (stripped, "\r\n")
    } else if let Some(stripped) = piece.strip_suffix('\n') {
        (stripped, "\n")
    } else {
        (piece, "")
    }
}
