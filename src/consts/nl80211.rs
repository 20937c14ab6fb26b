//! The nl80211 family's own command, attribute, and enumeration
//! tables.
//!
//! Unlike [`crate::consts::nl`] and [`crate::consts::genl`], none of
//! these values come from `libc` — nl80211 is not part of the glibc
//! netlink headers, so the numeric values below are carried directly
//! from the kernel's `linux/nl80211.h` ABI (stable since they are
//! append-only enums; a kernel never renumbers an existing entry).
//! Only the subset this crate's operation layer actually uses is
//! represented; an unsupported command or attribute still round-trips
//! through `UnrecognizedVariant` rather than failing to decode.

use crate::macros::nl_enum;

nl_enum!(
    /// Commands carried in the generic-netlink header's `cmd` field
    /// when the family is nl80211.
    Nl80211Cmd, u8,
    Unspecified => 0,
    GetWiphy => 1,
    SetWiphy => 2,
    NewWiphy => 3,
    DelWiphy => 4,
    GetInterface => 5,
    SetInterface => 6,
    NewInterface => 7,
    DelInterface => 8,
    GetKey => 9,
    SetKey => 10,
    NewKey => 11,
    DelKey => 12,
    GetBeacon => 13,
    SetBeacon => 14,
    StartAp => 15,
    StopAp => 16,
    GetStation => 17,
    SetStation => 18,
    NewStation => 19,
    DelStation => 20,
    GetMpath => 21,
    SetMpath => 22,
    NewMpath => 23,
    DelMpath => 24,
    SetBss => 25,
    SetReg => 26,
    ReqSetReg => 27,
    GetMeshConfig => 28,
    SetMeshConfig => 29,
    SetMgmtExtraIe => 30,
    GetReg => 31,
    GetScan => 32,
    TriggerScan => 33,
    NewScanResults => 34,
    ScanAborted => 35,
    RegChange => 36,
    Authenticate => 37,
    Associate => 38,
    Deauthenticate => 39,
    Disassociate => 40,
    MichaelMicFailure => 41,
    RegBeaconHint => 42,
    JoinIbss => 43,
    LeaveIbss => 44,
    Testmode => 45,
    Connect => 46,
    Roam => 47,
    Disconnect => 48,
    SetWiphyNetns => 49,
    GetSurvey => 50,
    NewSurveyResults => 51,
    SetPmksa => 52,
    DelPmksa => 53,
    FlushPmksa => 54,
    RemainOnChannel => 55,
    CancelRemainOnChannel => 56,
    SetTxBitrateMask => 57,
    RegisterFrame => 58,
    Frame => 59,
    FrameTxStatus => 60,
    SetPowerSave => 61,
    GetPowerSave => 62,
    SetCqm => 63,
    NotifyCqm => 64,
    SetChannel => 65,
    SetWdsPeer => 66,
    FrameWaitCancel => 67,
    JoinMesh => 68,
    LeaveMesh => 69,
);

nl_enum!(
    /// Attributes used by the command set in [`Nl80211Cmd`].
    ///
    /// Each attribute's declared wire kind is available through
    /// [`crate::consts::nl80211::attribute_kind`], a direct port of the
    /// kernel's `nla_policy` table for the attributes this crate uses.
    Nl80211Attr, u16,
    Unspec => 0,
    Wiphy => 1,
    WiphyName => 2,
    Ifindex => 3,
    Ifname => 4,
    Iftype => 5,
    Mac => 6,
    KeyData => 7,
    KeyIdx => 8,
    KeyCipher => 9,
    KeySeq => 10,
    KeyDefault => 11,
    BeaconInterval => 12,
    DtimPeriod => 13,
    BeaconHead => 14,
    BeaconTail => 15,
    StaAid => 16,
    StaFlags => 17,
    StaListenInterval => 18,
    StaSupportedRates => 19,
    StaVlan => 20,
    StaInfo => 21,
    WiphyBands => 22,
    MntrFlags => 23,
    MeshId => 24,
    StaPlinkAction => 25,
    MpathNextHop => 26,
    MpathInfo => 27,
    BssCtsProt => 28,
    BssShortPreamble => 29,
    BssShortSlotTime => 30,
    HtCapability => 31,
    SupportedIftypes => 32,
    RegAlpha2 => 33,
    RegRules => 34,
    MeshConfig => 35,
    BssBasicRates => 36,
    WiphyTxqParams => 37,
    WiphyFreq => 38,
    WiphyChannelType => 39,
    KeyDefaultMgmt => 40,
    MgmtSubtype => 41,
    Ie => 42,
    MaxNumScanSsids => 43,
    ScanFrequencies => 44,
    ScanSsids => 45,
    Generation => 46,
    Bss => 47,
    RegInitiator => 48,
    RegType => 49,
    SupportedCommands => 50,
    Frame => 51,
    Ssid => 52,
    AuthType => 53,
    ReasonCode => 54,
    KeyType => 55,
    MaxScanIeLen => 56,
    CipherSuites => 57,
    FreqBefore => 58,
    FreqAfter => 59,
    FreqFixed => 60,
    WiphyRetryShort => 61,
    WiphyRetryLong => 62,
    WiphyFragThreshold => 63,
    WiphyRtsThreshold => 64,
    TimedOut => 65,
    UseMfp => 66,
    StaFlags2 => 67,
    ControlPort => 68,
    Testdata => 69,
    Privacy => 70,
    DisconnectedByAp => 71,
    StatusCode => 72,
    CipherSuitesPairwise => 73,
    CipherSuiteGroup => 74,
    WpaVersions => 75,
    AkmSuites => 76,
    ReqIe => 77,
    RespIe => 78,
    PrevBssid => 79,
    Key => 80,
    Keys => 81,
    Pid => 82,
    FourAddr => 83,
    SurveyInfo => 84,
    Pmkid => 85,
    MaxNumPmkids => 86,
    Duration => 87,
    Cookie => 88,
    WiphyCoverageClass => 89,
    TxRates => 90,
    FrameMatch => 91,
    Ack => 92,
    PsState => 93,
    Cqm => 94,
    LocalStateChange => 95,
    ApIsolate => 96,
    WiphyTxPowerSetting => 97,
    WiphyTxPowerLevel => 98,
    SupportedIftypesExt => 121,
    ChannelWidth => 159,
    CenterFreq1 => 160,
    Wdev => 153,
);

nl_enum!(
    /// Virtual interface type (`NL80211_IFTYPE_*`).
    Nl80211Iftype, u32,
    Unspecified => 0,
    Adhoc => 1,
    Station => 2,
    Ap => 3,
    ApVlan => 4,
    Wds => 5,
    Monitor => 6,
    MeshPoint => 7,
    P2pClient => 8,
    P2pGo => 9,
    P2pDevice => 10,
    Ocb => 11,
    Nan => 12,
);

nl_enum!(
    /// Legacy channel type, used when setting a channel via
    /// [`Nl80211Attr::WiphyChannelType`] (`NL80211_CHAN_*`).
    Nl80211ChannelType, u32,
    NoHt => 0,
    Ht20 => 1,
    Ht40Minus => 2,
    Ht40Plus => 3,
);

nl_enum!(
    /// Channel width as reported in [`Nl80211Attr::ChannelWidth`]
    /// (`NL80211_CHAN_WIDTH_*`).
    Nl80211ChanWidth, u32,
    Width20NoHt => 0,
    Width20 => 1,
    Width40 => 2,
    Width80 => 3,
    Width80P80 => 4,
    Width160 => 5,
    Width5 => 6,
    Width10 => 7,
);

nl_enum!(
    /// Monitor-mode capture flags (`NL80211_MNTR_FLAG_*`).
    ///
    /// Encoded on the wire as repeated top-level
    /// [`Nl80211Attr::MntrFlags`] attributes, one per flag — see
    /// `DESIGN.md` for why this crate does not nest them.
    Nl80211MntrFlag, u32,
    FcsFail => 1,
    PlcpFail => 2,
    Control => 3,
    OtherBss => 4,
    CookFrames => 5,
    Active => 6,
);

nl_enum!(
    /// Power-save state (`NL80211_PS_*`).
    Nl80211PsState, u32,
    Disabled => 0,
    Enabled => 1,
);

nl_enum!(
    /// Tx power setting mode (`NL80211_TX_POWER_*`).
    Nl80211TxPowerSetting, u32,
    Automatic => 0,
    Limited => 1,
    Fixed => 2,
);

nl_enum!(
    /// Cipher suite selector, reported in
    /// [`Nl80211Attr::CipherSuites`] as a 32-bit OUI+suite-type value
    /// (`WLAN_CIPHER_SUITE_*`), the same selectors PyRIC resolves by
    /// name in `wlan.WLAN_CIPHER_SUITE_SELECTORS`.
    Nl80211CipherSuite, u32,
    Wep40 => 0x000f_ac01,
    Tkip => 0x000f_ac02,
    Ccmp => 0x000f_ac04,
    Wep104 => 0x000f_ac05,
    AesCmac => 0x000f_ac06,
    Gcmp => 0x000f_ac08,
    Gcmp256 => 0x000f_ac09,
    Ccmp256 => 0x000f_ac0a,
    BipGmac128 => 0x000f_ac0b,
    BipGmac256 => 0x000f_ac0c,
    BipCmac256 => 0x000f_ac0d,
    Sms4 => 0x0014_7201,
);

/// Declared wire kind of an attribute's payload, the local analogue of
/// the kernel's `nla_policy` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    U8,
    U16,
    U32,
    U64,
    String,
    Flag,
    /// Opaque payload whose structure is caller-interpreted (binary
    /// blobs, nested attribute streams that this crate scans by hand).
    Unspec,
    /// A stream of further attributes.
    Nested,
}

/// Look up the declared kind of an attribute this crate's operation
/// layer sends or decodes.
///
/// Ported from PyRIC's `nl80211_policy` dict (`nl80211_c.py`), itself a
/// direct transcription of the kernel's `nl80211_policy[]` array,
/// restricted to the attributes this crate's schema covers.
pub fn attribute_kind(attr: Nl80211Attr) -> AttributeKind {
    use Nl80211Attr::*;
    match attr {
        Wiphy | Ifindex | WiphyFreq | WiphyChannelType | ChannelWidth | CenterFreq1
        | WiphyRetryShort | WiphyRetryLong | WiphyFragThreshold | WiphyRtsThreshold
        | WiphyCoverageClass | Generation | RegInitiator | RegType | Pid => AttributeKind::U32,
        Iftype | MntrFlags | PsState | WiphyTxPowerSetting | WiphyTxPowerLevel => {
            AttributeKind::U32
        }
        Wdev => AttributeKind::U64,
        MaxNumScanSsids => AttributeKind::U8,
        WiphyName | Ifname | RegAlpha2 => AttributeKind::String,
        Mac => AttributeKind::Unspec,
        WiphyBands | SupportedIftypes | SupportedIftypesExt | SupportedCommands
        | CipherSuites | Bss | SurveyInfo | StaInfo => AttributeKind::Nested,
        Privacy | FourAddr | Ack => AttributeKind::Flag,
        _ => AttributeKind::Unspec,
    }
}
