use anyhow::{Context, Result};
use ethers::types::{Address, U256};

/// Parse a user supplied hex address, with or without checksum casing
pub fn parse_address(input: &str) -> Result<Address> {
    input
        .trim()
        .parse::<Address>()
        .with_context(|| format!("Failed to parse address {input:?}"))
}

/// Parse an enrollment number into the contract's `uint256`, decimal or `0x` hex
pub fn parse_enrollment(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        anyhow::bail!("Enrollment number must be a non-negative integer, got {input:?}");
    }

    U256::from_str_radix(digits, radix).context("Enrollment number does not fit in uint256")
}

/// Checksummed `0x` form used in responses and logs
pub fn format_address(address: &Address) -> String {
    ethers::utils::to_checksum(address, None)
}
