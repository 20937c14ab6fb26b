//! Decoded result records for the nl80211 operation layer.

use getset::Getters;

use crate::{
    card::Card,
    consts::nl80211::{Nl80211ChanWidth, Nl80211CipherSuite, Nl80211Cmd, Nl80211Iftype},
};

/// The kernel's "off" sentinel for RTS/fragmentation thresholds.
///
/// Both thresholds disable at the same sentinel in this crate's model
/// (the maximum `u32`); a value at or above it normalizes to
/// [`Threshold::Off`] on decode.
pub const THRESHOLD_DISABLE_SENTINEL: u32 = u32::MAX;

/// An RTS or fragmentation threshold: either a byte count or disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    Value(u32),
    Off,
}

impl Threshold {
    pub fn from_raw(value: u32) -> Self {
        if value >= THRESHOLD_DISABLE_SENTINEL {
            Threshold::Off
        } else {
            Threshold::Value(value)
        }
    }

    /// The wire value to send for this threshold.
    pub fn to_raw(self) -> u32 {
        match self {
            Threshold::Value(v) => v,
            Threshold::Off => THRESHOLD_DISABLE_SENTINEL,
        }
    }
}

/// Outcome of a get-interface operation.
#[derive(Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct DeviceInfo {
    card: Card,
    iftype: Nl80211Iftype,
    wdev: u64,
    mac: [u8; 6],
    freq: Option<u32>,
    center_freq1: Option<u32>,
    channel_width: Option<Nl80211ChanWidth>,
}

impl DeviceInfo {
    pub fn new(
        card: Card,
        iftype: Nl80211Iftype,
        wdev: u64,
        mac: [u8; 6],
        freq: Option<u32>,
        center_freq1: Option<u32>,
        channel_width: Option<Nl80211ChanWidth>,
    ) -> Self {
        DeviceInfo {
            card,
            iftype,
            wdev,
            mac,
            freq,
            center_freq1,
            channel_width,
        }
    }
}

/// Outcome of a get-wiphy operation.
#[derive(Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct WiphyInfo {
    wiphy: u32,
    generation: u32,
    retry_short: u8,
    retry_long: u8,
    frag_threshold: Threshold,
    rts_threshold: Threshold,
    coverage_class: u8,
    max_scan_ssids: u8,
    /// Frequencies (MHz) recovered from the wiphy-bands raw-byte scan;
    /// see `DESIGN.md` for why this is a caller-supplied-candidate scan
    /// rather than a structural decode.
    frequencies: Vec<u32>,
    iftypes: Vec<Nl80211Iftype>,
    software_iftypes: Vec<Nl80211Iftype>,
    commands: Vec<Nl80211Cmd>,
    cipher_suites: Vec<Nl80211CipherSuite>,
}

impl WiphyInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wiphy: u32,
        generation: u32,
        retry_short: u8,
        retry_long: u8,
        frag_threshold: Threshold,
        rts_threshold: Threshold,
        coverage_class: u8,
        max_scan_ssids: u8,
        frequencies: Vec<u32>,
        iftypes: Vec<Nl80211Iftype>,
        software_iftypes: Vec<Nl80211Iftype>,
        commands: Vec<Nl80211Cmd>,
        cipher_suites: Vec<Nl80211CipherSuite>,
    ) -> Self {
        WiphyInfo {
            wiphy,
            generation,
            retry_short,
            retry_long,
            frag_threshold,
            rts_threshold,
            coverage_class,
            max_scan_ssids,
            frequencies,
            iftypes,
            software_iftypes,
            commands,
            cipher_suites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_at_or_above_sentinel_normalizes_to_off() {
        assert_eq!(Threshold::from_raw(THRESHOLD_DISABLE_SENTINEL), Threshold::Off);
        assert_eq!(Threshold::from_raw(u32::MAX - 1), Threshold::Value(u32::MAX - 1));
    }
}
