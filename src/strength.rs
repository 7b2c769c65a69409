use crate::alphabet::ClassSet;

/// Bits at which the 0-100 score saturates.
pub const ENTROPY_CAP_BITS: f64 = 120.0;

const VARIETY_BONUS: i32 = 5;
const LENGTH_BONUS: i32 = 10;
const REPEAT_PENALTY: i32 = 10;
const SEQUENCE_PENALTY: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthResult {
    pub score: u8,
    pub entropy_bits: u32,
}

/// Heuristic strength estimate: a bits-of-entropy figure from the enabled
/// pool size and password length, adjusted by variety and length bonuses
/// and repeat/sequence penalties, mapped onto a 0-100 score.
///
/// Pure function of its inputs. The pool size comes from `classes`; variety
/// is re-detected from the password itself.
pub fn estimate(password: &str, classes: ClassSet) -> StrengthResult {
    if password.is_empty() {
        return StrengthResult {
            score: 0,
            entropy_bits: 0,
        };
    }

    let chars: Vec<char> = password.chars().collect();
    let length = chars.len();

    let pool_size = classes.pool_size() as f64;
    let entropy = length as f64 * pool_size.log2();

    let mut bonus = (variety(&chars) - 1) * VARIETY_BONUS;
    if length >= 12 {
        bonus += LENGTH_BONUS;
    }
    if length >= 16 {
        bonus += LENGTH_BONUS;
    }
    if length >= 24 {
        bonus += LENGTH_BONUS;
    }
    if has_repeat_run(&chars) {
        bonus -= REPEAT_PENALTY;
    }
    if has_ascending_digit_run(&chars) {
        bonus -= SEQUENCE_PENALTY;
    }
    if has_ascending_letter_run(&chars) {
        bonus -= SEQUENCE_PENALTY;
    }

    let raw = (entropy / ENTROPY_CAP_BITS) * 100.0 + bonus as f64;
    StrengthResult {
        score: raw.clamp(0.0, 100.0).round() as u8,
        entropy_bits: entropy.round() as u32,
    }
}

/// Count of character classes present in the password itself: ASCII lower,
/// ASCII upper, ASCII digit, and anything else as symbol. At least 1 for a
/// non-empty password.
fn variety(chars: &[char]) -> i32 {
    let has_lower = chars.iter().any(|c| c.is_ascii_lowercase());
    let has_upper = chars.iter().any(|c| c.is_ascii_uppercase());
    let has_digit = chars.iter().any(|c| c.is_ascii_digit());
    let has_symbol = chars.iter().any(|c| !c.is_ascii_alphanumeric());

    [has_lower, has_upper, has_digit, has_symbol]
        .iter()
        .filter(|present| **present)
        .count() as i32
}

/// Any character repeated 3 or more times consecutively.
fn has_repeat_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Any 4-character ascending run of consecutive digits ("0123" .. "6789").
fn has_ascending_digit_run(chars: &[char]) -> bool {
    chars.windows(4).any(|w| {
        w.iter().all(|c| c.is_ascii_digit())
            && w[1] as u32 == w[0] as u32 + 1
            && w[2] as u32 == w[1] as u32 + 1
            && w[3] as u32 == w[2] as u32 + 1
    })
}

/// Any 4-letter ascending run of consecutive alphabet letters, case
/// insensitive ("abcd" .. "wxyz", "WXYZ" included).
fn has_ascending_letter_run(chars: &[char]) -> bool {
    chars.windows(4).any(|w| {
        let folded: Vec<u32> = w
            .iter()
            .map(|c| c.to_ascii_lowercase() as u32)
            .collect();
        w.iter().all(|c| c.is_ascii_alphabetic())
            && folded[1] == folded[0] + 1
            && folded[2] == folded[1] + 1
            && folded[3] == folded[2] + 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERS_ONLY: ClassSet = ClassSet {
        uppercase: false,
        numbers: true,
        symbols: false,
    };

    const UPPER_ONLY: ClassSet = ClassSet {
        uppercase: true,
        numbers: false,
        symbols: false,
    };

    #[test]
    fn test_empty_password() {
        let result = estimate("", ClassSet::ALL);
        assert_eq!(
            result,
            StrengthResult {
                score: 0,
                entropy_bits: 0,
            }
        );
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let first = estimate("qazwsxedcrfv", ClassSet::LOWER_ONLY);
        let second = estimate("qazwsxedcrfv", ClassSet::LOWER_ONLY);
        assert_eq!(first, second);
    }

    #[test]
    fn test_entropy_and_score_fixture() {
        // 12 chars over a 26-character pool: 12 * log2(26) = 56.4 bits,
        // score 56.4 / 120 * 100 + 10 (length bonus) = 57.
        let result = estimate("qazwsxedcrfv", ClassSet::LOWER_ONLY);
        assert_eq!(result.entropy_bits, 56);
        assert_eq!(result.score, 57);
    }

    #[test]
    fn test_monotonic_in_length() {
        let short = estimate("qazwsxed", ClassSet::LOWER_ONLY);
        let long = estimate("qazwsxedcrfvtgby", ClassSet::LOWER_ONLY);

        assert_eq!(short.score, 31);
        assert_eq!(long.score, 83);
        assert!(long.score > short.score);
    }

    #[test]
    fn test_repeat_and_digit_run_penalties() {
        let penalized = estimate("aaab1234", NUMBERS_ONLY);
        let clean = estimate("axcuw9k2", NUMBERS_ONLY);

        // Same pool and length; "aaa" costs 10 and "1234" costs 8.
        assert_eq!(penalized.entropy_bits, clean.entropy_bits);
        assert_eq!(penalized.score, 21);
        assert_eq!(clean.score, 39);
        assert!(penalized.score < clean.score);
    }

    #[test]
    fn test_ascending_letters_case_insensitive() {
        let result = estimate("WXYZ", UPPER_ONLY);
        assert_eq!(result.entropy_bits, 23);
        assert_eq!(result.score, 11);
    }

    #[test]
    fn test_length_bonuses_stack_and_score_saturates() {
        // 24 chars over 26: 112.8 bits plus 30 in stacked length bonuses,
        // clamped at 100.
        let result = estimate("qmwnebrvtcyxuzaplkosjdhg", ClassSet::LOWER_ONLY);
        assert_eq!(result.entropy_bits, 113);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_variety_detected_from_string() {
        assert_eq!(variety(&['a', 'b']), 1);
        assert_eq!(variety(&['a', 'B']), 2);
        assert_eq!(variety(&['a', 'B', '4']), 3);
        assert_eq!(variety(&['a', 'B', '4', '!']), 4);
        // Non-ASCII counts as symbol, same as the membership tests.
        assert_eq!(variety(&['a', 'é']), 2);
    }

    #[test]
    fn test_repeat_run_detection() {
        assert!(has_repeat_run(&['x', 'a', 'a', 'a', 'y']));
        assert!(has_repeat_run(&['!', '!', '!', '!']));
        assert!(!has_repeat_run(&['a', 'a', 'b', 'a', 'a']));
        assert!(!has_repeat_run(&['a', 'b', 'c']));
    }

    #[test]
    fn test_digit_run_detection() {
        assert!(has_ascending_digit_run(&['a', '0', '1', '2', '3', 'z']));
        assert!(has_ascending_digit_run(&['6', '7', '8', '9']));
        // Three ascending digits are not enough, and runs do not wrap.
        assert!(!has_ascending_digit_run(&['7', '8', '9']));
        assert!(!has_ascending_digit_run(&['8', '9', '0', '1']));
        assert!(!has_ascending_digit_run(&['1', '3', '5', '7']));
    }

    #[test]
    fn test_letter_run_detection() {
        assert!(has_ascending_letter_run(&['k', 'l', 'm', 'n']));
        assert!(has_ascending_letter_run(&['A', 'b', 'C', 'd']));
        assert!(!has_ascending_letter_run(&['a', 'b', 'c']));
        assert!(!has_ascending_letter_run(&['a', 'c', 'e', 'g']));
        // 'z' to 'a' is not consecutive.
        assert!(!has_ascending_letter_run(&['y', 'z', 'a', 'b']));
    }

    #[test]
    fn test_pool_size_follows_config_not_string() {
        // Same string, wider configured pool, higher entropy estimate.
        let narrow = estimate("qazwsxedcrfv", ClassSet::LOWER_ONLY);
        let wide = estimate("qazwsxedcrfv", ClassSet::ALL);
        assert!(wide.entropy_bits > narrow.entropy_bits);
    }
}
