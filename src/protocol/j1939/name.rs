//! J1939 NAME (64 bits), the unique identity a node claims its address with.
//!
//! # Bit layout
//!
//! ```text
//! Bits  0-20  (21 bits) : Identity number
//! Bits 21-31  (11 bits) : Manufacturer code
//! Bits 32-34  ( 3 bits) : ECU instance
//! Bits 35-39  ( 5 bits) : Function instance
//! Bits 40-47  ( 8 bits) : Function
//! Bit  48     ( 1 bit ) : Reserved
//! Bits 49-55  ( 7 bits) : Vehicle system
//! Bits 56-59  ( 4 bits) : Vehicle system instance
//! Bits 60-62  ( 3 bits) : Industry group
//! Bit  63     ( 1 bit ) : Arbitrary address capable
//! ```
//!
//! On the wire the NAME is the 8-byte payload of an address claim, least
//! significant byte first.
//! This is not byte-compatible with the legacy Arduino J1939 encoding, which
//! sends the NAME big-endian with the identity number in the top bits.
use core::fmt;

/// Wrapper around the raw 64-bit NAME.
///
/// ```
/// use canny::protocol::j1939::Name;
///
/// let name = Name::builder()
///     .identity_number(0x1234)
///     .manufacturer_code(0x2AB)
///     .function(130)
///     .industry_group(2)
///     .arbitrary_address_capable(true)
///     .build();
///
/// assert_eq!(name.identity_number(), 0x1234);
/// assert_eq!(name.manufacturer_code(), 0x2AB);
/// assert!(name.is_arbitrary_address_capable());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Name(u64);

impl Name {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn builder() -> NameBuilder {
        NameBuilder::new()
    }

    /// Decode the payload of an address claim.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Encode as the payload of an address claim.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Identity number (bits 0-20), unique within the manufacturer.
    #[inline]
    pub const fn identity_number(&self) -> u32 {
        (self.0 & 0x1F_FFFF) as u32
    }

    /// Manufacturer code (bits 21-31).
    #[inline]
    pub const fn manufacturer_code(&self) -> u16 {
        ((self.0 >> 21) & 0x7FF) as u16
    }

    /// ECU instance (bits 32-34).
    #[inline]
    pub const fn ecu_instance(&self) -> u8 {
        ((self.0 >> 32) & 0x07) as u8
    }

    /// Function instance (bits 35-39).
    #[inline]
    pub const fn function_instance(&self) -> u8 {
        ((self.0 >> 35) & 0x1F) as u8
    }

    /// Function (bits 40-47).
    #[inline]
    pub const fn function(&self) -> u8 {
        ((self.0 >> 40) & 0xFF) as u8
    }

    /// Reserved bit (bit 48).
    #[inline]
    pub const fn reserved(&self) -> bool {
        ((self.0 >> 48) & 0x01) != 0
    }

    /// Vehicle system (bits 49-55).
    #[inline]
    pub const fn vehicle_system(&self) -> u8 {
        ((self.0 >> 49) & 0x7F) as u8
    }

    /// Vehicle system instance (bits 56-59).
    #[inline]
    pub const fn vehicle_system_instance(&self) -> u8 {
        ((self.0 >> 56) & 0x0F) as u8
    }

    /// Industry group (bits 60-62).
    #[inline]
    pub const fn industry_group(&self) -> u8 {
        ((self.0 >> 60) & 0x07) as u8
    }

    /// Arbitrary address capable (bit 63): the node may pick another
    /// address when it loses a claim.
    #[inline]
    pub const fn is_arbitrary_address_capable(&self) -> bool {
        ((self.0 >> 63) & 0x01) != 0
    }
}

impl From<u64> for Name {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Name> for u64 {
    #[inline]
    fn from(name: Name) -> Self {
        name.raw()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name {{ id: {}, mfg: {}, func: {}, system: {}, ecu: {}, aac: {} }}",
            self.identity_number(),
            self.manufacturer_code(),
            self.function(),
            self.vehicle_system(),
            self.ecu_instance(),
            self.is_arbitrary_address_capable()
        )
    }
}

/// Fluent builder for a [`Name`]. Values wider than their field are
/// truncated to the field width.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameBuilder {
    raw: u64,
}

impl NameBuilder {
    #[inline]
    pub const fn new() -> Self {
        Self { raw: 0 }
    }

    #[inline]
    const fn field(mut self, shift: u32, mask: u64, value: u64) -> Self {
        self.raw = (self.raw & !(mask << shift)) | ((value & mask) << shift);
        self
    }

    #[inline]
    pub const fn identity_number(self, value: u32) -> Self {
        self.field(0, 0x1F_FFFF, value as u64)
    }

    #[inline]
    pub const fn manufacturer_code(self, value: u16) -> Self {
        self.field(21, 0x7FF, value as u64)
    }

    #[inline]
    pub const fn ecu_instance(self, value: u8) -> Self {
        self.field(32, 0x07, value as u64)
    }

    #[inline]
    pub const fn function_instance(self, value: u8) -> Self {
        self.field(35, 0x1F, value as u64)
    }

    #[inline]
    pub const fn function(self, value: u8) -> Self {
        self.field(40, 0xFF, value as u64)
    }

    #[inline]
    pub const fn reserved(self, value: bool) -> Self {
        self.field(48, 0x01, value as u64)
    }

    #[inline]
    pub const fn vehicle_system(self, value: u8) -> Self {
        self.field(49, 0x7F, value as u64)
    }

    #[inline]
    pub const fn vehicle_system_instance(self, value: u8) -> Self {
        self.field(56, 0x0F, value as u64)
    }

    #[inline]
    pub const fn industry_group(self, value: u8) -> Self {
        self.field(60, 0x07, value as u64)
    }

    #[inline]
    pub const fn arbitrary_address_capable(self, value: bool) -> Self {
        self.field(63, 0x01, value as u64)
    }

    #[inline]
    pub const fn build(self) -> Name {
        Name(self.raw)
    }
}
