pub mod cooldown;
pub mod token_verifier;

pub use cooldown::{CooldownStore, InMemoryCooldownStore, StoreError};
pub use token_verifier::{HmacTokenVerifier, TokenVerifier};
