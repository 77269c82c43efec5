//! Utility functions and helpers

use solana_sdk::pubkey::Pubkey;
use crate::shared::errors::AppError;

/// Parse a base-58 address, telling bad encoding apart from bad length
pub fn parse_address(input: &str) -> Result<Pubkey, AppError> {
    let trimmed = input.trim();
    let bytes = bs58::decode(trimmed)
        .into_vec()
        .map_err(|e| AppError::InvalidAddress(format!("{}: not base-58 ({})", trimmed, e)))?;

    let array: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        AppError::InvalidAddress(format!("{}: expected 32 bytes, got {}", trimmed, bytes.len()))
    })?;

    Ok(Pubkey::new_from_array(array))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_roundtrips_display() {
        let key = Pubkey::new_unique();
        assert_eq!(parse_address(&key.to_string()).unwrap(), key);
    }

    #[test]
    fn test_parse_address_trims_whitespace() {
        let parsed = parse_address("  So11111111111111111111111111111111111111112 \n").unwrap();
        assert_eq!(parsed.to_string(), "So11111111111111111111111111111111111111112");
    }

    #[test]
    fn test_parse_address_rejects_bad_alphabet() {
        let err = parse_address("0OIl").unwrap_err();
        assert!(err.to_string().contains("not base-58"));
    }

    #[test]
    fn test_parse_address_rejects_short_key() {
        let err = parse_address("3yZe7d").unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes"));
    }
}
