//! 候选评估与择优
use crate::score::cjk_score;
use crate::strategy;

/// 候选文本的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// 原始输入（未修复）
    Input,
    /// 策略一：低 8 位字节重解释
    ByteReinterpret,
    /// 策略二：百分号转义往返
    EscapeRoundTrip,
}

impl CandidateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateSource::Input => "input",
            CandidateSource::ByteReinterpret => "byte-reinterpret",
            CandidateSource::EscapeRoundTrip => "escape-round-trip",
        }
    }
}

/// 胜出候选：文本、得分与来源
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub score: usize,
    pub source: CandidateSource,
}

/// 评估输入与两种策略的候选并返回胜者
/// - 只有严格更高的得分才会取代当前最优，平分时先评估者胜
///   （输入 > 策略一 > 策略二），因此输出必是某个候选的原文
/// - 策略失败只剔除该候选，不影响其余评估
pub fn repair_candidate(text: &str) -> Candidate {
    let mut best = Candidate {
        text: text.to_string(),
        score: cjk_score(text),
        source: CandidateSource::Input,
    };
    if text.is_empty() {
        return best;
    }

    let decoded = strategy::reinterpret_low_bytes(text);
    let score = cjk_score(&decoded);
    if score > best.score {
        best = Candidate {
            text: decoded,
            score,
            source: CandidateSource::ByteReinterpret,
        };
    }

    if let Ok(decoded) = strategy::escape_round_trip(text) {
        let score = cjk_score(&decoded);
        if score > best.score {
            best = Candidate {
                text: decoded,
                score,
                source: CandidateSource::EscapeRoundTrip,
            };
        }
    }

    best
}

/// 修复一段可能被 Latin-1/UTF-8 双重编码损坏的文本
/// 全函数：任何输入都返回字符串；无可改进时原样返回
pub fn repair(text: &str) -> String {
    repair_candidate(text).text
}
