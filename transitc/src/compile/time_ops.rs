/// a clock value whose two-digit minute component is 60 or greater, e.g.
/// `1671`. the original tooling silently computed a time outside the day
/// window for these; nothing downstream can use such a window, so they are
/// rejected instead.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid HHMM time encoding {0}: minute component exceeds 59")]
pub struct InvalidTimeEncoding(pub u32);

/// converts an HHMM-encoded clock time to seconds after midnight.
pub fn hhmm_to_seconds(value: u32) -> Result<u32, InvalidTimeEncoding> {
    let minutes = value % 100;
    if minutes >= 60 {
        return Err(InvalidTimeEncoding(value));
    }
    Ok((value / 100) * 3600 + minutes * 60)
}
