//! Constrained random password generation.
//!
//! A password always contains at least one character from every active
//! [`CharClass`]. The guaranteed characters are drawn first, the remaining
//! positions are filled from the union alphabet, and the whole buffer is
//! shuffled so the guaranteed characters do not sit at fixed positions.

pub mod charset;
pub mod request;

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::error::{CoreError, CoreResult};

pub use charset::{CharClass, ClassSet};
pub use request::GenerationRequest;

/// Generates one password of exactly `length` characters.
///
/// Every active class gets one guaranteed character, lowercase included, so
/// the result always contains at least one lowercase letter.
///
/// # Errors
///
/// - [`CoreError::InvalidComposition`] if `classes` is empty.
/// - [`CoreError::InvalidLength`] if `length` is smaller than the number of
///   active classes.
pub fn generate<R>(length: usize, classes: &ClassSet, rng: &mut R) -> CoreResult<String>
where
    R: Rng + CryptoRng,
{
    if classes.is_empty() {
        return Err(CoreError::InvalidComposition);
    }
    if length < classes.len() {
        return Err(CoreError::InvalidLength(format!(
            "length {length} cannot hold one character from each of {} classes",
            classes.len()
        )));
    }

    let mut buf = Vec::with_capacity(length);
    for class in classes.iter() {
        buf.push(pick(class.alphabet(), rng));
    }

    let union = classes.union_alphabet();
    while buf.len() < length {
        buf.push(pick(&union, rng));
    }

    buf.shuffle(rng);
    Ok(buf.into_iter().map(char::from).collect())
}

/// Generates `request.count()` independent passwords.
pub fn generate_many<R>(request: &GenerationRequest, rng: &mut R) -> CoreResult<Vec<String>>
where
    R: Rng + CryptoRng,
{
    (0..request.count())
        .map(|_| generate(request.length(), request.classes(), rng))
        .collect()
}

// Alphabets are non-empty constants, so the range is never empty.
fn pick<R: Rng>(alphabet: &[u8], rng: &mut R) -> u8 {
    alphabet[rng.gen_range(0..alphabet.len())]
}
