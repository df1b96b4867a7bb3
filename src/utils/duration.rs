// Duration parsing for token lifetimes and request timeouts

use anyhow::Result;

/// Parse a duration expression and return seconds
///
/// Accepts one or more `<number><unit>` pairs with units `d`, `h`, `m`, `s`,
/// e.g. `30s`, `10m`, `8h`, `1d12h`. Each unit may appear once, largest first.
pub fn parse_duration(expr: &str) -> Result<i64> {
    let expr = expr.trim();
    if expr.is_empty() {
        anyhow::bail!("Duration cannot be empty");
    }

    let mut total_secs = 0i64;
    let mut digits = String::new();
    let mut last_unit_rank = usize::MAX;

    for c in expr.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let (rank, unit_secs) = match c {
            'd' => (3, 86400),
            'h' => (2, 3600),
            'm' => (1, 60),
            's' => (0, 1),
            _ => anyhow::bail!("Invalid duration format: {}", expr),
        };
        if digits.is_empty() || rank >= last_unit_rank {
            anyhow::bail!("Invalid duration format: {}", expr);
        }
        let amount: i64 = digits
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration format: {}", expr))?;
        total_secs = amount
            .checked_mul(unit_secs)
            .and_then(|secs| total_secs.checked_add(secs))
            .ok_or_else(|| anyhow::anyhow!("Duration too large: {}", expr))?;
        digits.clear();
        last_unit_rank = rank;
    }

    if !digits.is_empty() {
        anyhow::bail!("Missing unit in duration: {} (use d, h, m or s)", expr);
    }
    if total_secs == 0 {
        anyhow::bail!("Duration must be greater than 0");
    }

    Ok(total_secs)
}
