//! 会话标识生成
//!
//! 格式：`sess_<base36 毫秒时间戳>_<6 位 [a-z0-9] 随机后缀>`。
//! 随机源可注入，便于测试提供确定性序列。

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 6;

/// 以给定时间戳与随机源生成会话标识
pub fn session_id_with<R: Rng>(millis: u64, rng: &mut R) -> String {
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())] as char);
    }
    format!("sess_{}_{}", to_base36(millis), suffix)
}

/// 以当前时间与线程本地随机源生成会话标识
pub fn session_id() -> String {
    session_id_with(now_millis(), &mut rand::thread_rng())
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{session_id, session_id_with, to_base36};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn base36_matches_js_to_string_36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        // Date.now() 量级的值
        assert_eq!(to_base36(1_700_000_000_000), "lpg31oao");
    }

    #[test]
    fn deterministic_with_seeded_rng() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(session_id_with(1234, &mut a), session_id_with(1234, &mut b));
    }

    #[test]
    fn id_shape() {
        let id = session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "sess");
        assert!(parts[1].bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }
}
