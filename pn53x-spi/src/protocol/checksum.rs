// pn53x-spi/src/protocol/checksum.rs

//! LCS/DCS arithmetic.

/// Compute Length Checksum (LCS) for a PN53x frame
/// LCS = 0x100 - length (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute Data Checksum (DCS) over the frame identifier and payload
/// DCS = 0x100 - ((tfi + sum(payload)) & 0xff)
pub fn dcs(tfi: u8, payload: &[u8]) -> u8 {
    0u8.wrapping_sub(residue(tfi, payload))
}

/// Running byte sum (mod 256) seeded with `seed`. A well-formed frame
/// section sums to zero once its checksum byte is included.
pub fn residue(seed: u8, bytes: &[u8]) -> u8 {
    bytes.iter().fold(seed, |acc, &b| acc.wrapping_add(b))
}
