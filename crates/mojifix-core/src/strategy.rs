//! 两种字节重解释策略
//!
//! 策略一（宽松）：每个标量值取低 8 位组成字节流，按 UTF-8 宽松解码，
//! 非法序列替换为 U+FFFD，永不失败。
//! 策略二（严格）：模拟 legacy escape/decodeURIComponent 往返——
//! 0..=255 的标量值映射为其字节值，255 以上的标量值按原样透传
//! （其 UTF-8 编码进入字节流，保留 legacy escape 的行为，勿"修正"），
//! 再按严格 UTF-8 解码；任何非法序列使整个策略失败。

use thiserror::Error;

/// 策略内部的解码失败；由 repair 捕获，该策略不产生候选，不外泄给调用方
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("reinterpreted byte stream is not valid UTF-8")]
    InvalidUtf8,
}

/// 策略一：低 8 位字节重解释（宽松 UTF-8）
pub fn reinterpret_low_bytes(text: &str) -> String {
    let bytes: Vec<u8> = text.chars().map(|c| (c as u32 & 0xFF) as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// 策略二：百分号转义往返（严格 UTF-8）
pub fn escape_round_trip(text: &str) -> Result<String, StrategyError> {
    let mut bytes: Vec<u8> = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        if code <= 0xFF {
            // escape 产生 %XY，decodeURIComponent 还原为字节 0xXY
            bytes.push(code as u8);
        } else {
            // escape 不转义 255 以上的标量值，解码侧按字面字符透传
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    String::from_utf8(bytes).map_err(|_| StrategyError::InvalidUtf8)
}
