use chrono::Utc;

const SUFFIX_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
const SUFFIX_LENGTH: usize = 6;

/// 產生追蹤碼 `COL-<毫秒時間戳末 6 碼>-<6 個大寫 base-36 亂數字元>`。
///
/// 每次呼叫都重新產生；唯一性只是機率上的保證。
pub fn generate_tracking_code() -> String {
    let suffix = nanoid::format(nanoid::rngs::default, &SUFFIX_ALPHABET, SUFFIX_LENGTH);
    tracking_code_from(Utc::now().timestamp_millis(), &suffix)
}

pub fn tracking_code_from(timestamp_millis: i64, suffix: &str) -> String {
    format!("COL-{:06}-{}", timestamp_millis.rem_euclid(1_000_000), suffix)
}
