/// Compute effective limit with precedence: `--limit` flag -> configured default.
#[must_use]
pub fn effective_limit(flag: Option<u32>, configured: u32) -> u32 {
    flag.unwrap_or(configured)
}
