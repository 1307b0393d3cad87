use crate::domain::PolicyMode;

/// Highest value the two-digit decimal version can hold.
pub const MAX_DECIMAL_VERSION: u8 = 99;

/// Compute a version number guaranteed to sit at or above today's baseline.
///
/// `today` is the date as `YYYYMMDD`; the baseline is `today * 100`. When the
/// current integer version already reached the baseline only the decimal part
/// moves. Otherwise the integer version jumps to the baseline and the decimal
/// restarts: at `01` under the current policy, at `00` under the legacy one.
/// A decimal overflowing 99 rolls into the integer part.
pub fn next_higher_version(
    integer_version: u64,
    decimal_version: u8,
    today: u64,
    mode: PolicyMode,
) -> (u64, u8) {
    let baseline = today * 100;

    let (integer, decimal) = if integer_version >= baseline {
        (integer_version, u16::from(decimal_version) + 1)
    } else {
        match mode {
            PolicyMode::Current => (baseline, 1),
            PolicyMode::Legacy => (baseline, 0),
        }
    };

    if decimal > u16::from(MAX_DECIMAL_VERSION) {
        (integer + 1, 0)
    } else {
        (integer, decimal as u8)
    }
}
