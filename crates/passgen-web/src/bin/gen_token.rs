//! Prints a fresh trusted-tier token for `PASSGEN_TRUSTED_TOKEN`.

use passgen_core::{generate, ClassSet};

const TOKEN_LENGTH: usize = 48;

fn main() -> anyhow::Result<()> {
    // No symbols, so the token can go straight into a query string.
    let classes = ClassSet::from_flags(true, true, false);
    let token = generate(TOKEN_LENGTH, &classes, &mut rand::thread_rng())?;
    println!("{token}");
    Ok(())
}
