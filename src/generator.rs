use anyhow::Result;
use zeroize::Zeroizing;

use crate::alphabet::ClassSet;
use crate::source::RandomSource;

#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    pub length: usize,
    pub classes: ClassSet,
}

/// Generate a password of `config.length` characters drawn from the union
/// of the enabled alphabets, with at least one character from each enabled
/// class when the length allows it.
///
/// When `length` is smaller than the number of enabled classes, seeding
/// stops at `length` characters: trailing classes lose their guarantee and
/// the result is never longer than requested.
pub fn generate(config: &GenerationConfig, source: &mut RandomSource) -> Result<Zeroizing<String>> {
    let classes = config.classes.enabled();

    let mut pool = Vec::with_capacity(config.classes.pool_size());
    for class in &classes {
        pool.extend_from_slice(class.alphabet());
    }
    if pool.is_empty() {
        return Ok(Zeroizing::new(String::new()));
    }

    let mut bytes = Zeroizing::new(Vec::with_capacity(config.length));

    // Seed phase: one character per enabled class, in the fixed class order.
    for class in &classes {
        if bytes.len() >= config.length {
            break;
        }
        let alphabet = class.alphabet();
        bytes.push(alphabet[source.random_index(alphabet.len())]);
    }

    // Fill phase: the rest comes from the full combined pool.
    while bytes.len() < config.length {
        bytes.push(pool[source.random_index(pool.len())]);
    }

    // Fisher-Yates, so the seed characters do not sit in fixed leading
    // positions.
    for i in (1..bytes.len()).rev() {
        let j = source.random_index(i + 1);
        bytes.swap(i, j);
    }

    let password = String::from_utf8(bytes.to_vec())?;
    Ok(Zeroizing::new(password))
}
