//! Bit fields of a 29-bit J1939 identifier.
//!
//! ```text
//! bits 26-28  priority
//! bit  25     reserved (extended data page)
//! bit  24     data page
//! bits 16-23  PDU format (PF)
//! bits  8-15  PDU specific (PS): destination (PF < 240) or group extension
//! bits  0-7   source address
//! ```
//!
//! Every field is described once by a shift and a mask; getters and
//! setters go through the same pair.
use crate::error::IdBuildError;

const PRIORITY: (u32, u32) = (26, 0x07);
const RESERVED: (u32, u32) = (25, 0x01);
const DATA_PAGE: (u32, u32) = (24, 0x01);
const PDU_FORMAT: (u32, u32) = (16, 0xFF);
const PDU_SPECIFIC: (u32, u32) = (8, 0xFF);
const SOURCE: (u32, u32) = (0, 0xFF);

/// PDU formats below this value are peer-to-peer (PDU1).
pub const PDU2_THRESHOLD: u8 = 240;

/// `true` when `pgn` is peer-to-peer: its PS byte is a destination address.
#[inline]
pub const fn is_pdu1(pgn: u32) -> bool {
    (((pgn >> 8) & 0xFF) as u8) < PDU2_THRESHOLD
}

//==================================================================================J1939_ID
/// Extended CAN identifier viewed through the J1939 addressing scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct J1939Id(pub u32);

impl J1939Id {
    /// Start building an identifier for `pgn` sent by `source_address`.
    pub fn builder(pgn: u32, source_address: u8) -> J1939IdBuilder {
        J1939IdBuilder::new(pgn, source_address)
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    #[inline]
    const fn get(&self, (shift, mask): (u32, u32)) -> u32 {
        (self.0 >> shift) & mask
    }

    #[inline]
    fn set(&mut self, (shift, mask): (u32, u32), value: u32) {
        self.0 = (self.0 & !(mask << shift)) | ((value & mask) << shift);
    }

    /// Priority, 0 (highest) to 7.
    pub const fn priority(&self) -> u8 {
        self.get(PRIORITY) as u8
    }

    /// Only the three low bits are used.
    pub fn set_priority(&mut self, priority: u8) {
        self.set(PRIORITY, priority as u32);
    }

    pub const fn reserved(&self) -> bool {
        self.get(RESERVED) != 0
    }

    pub fn set_reserved(&mut self, reserved: bool) {
        self.set(RESERVED, reserved as u32);
    }

    pub const fn data_page(&self) -> bool {
        self.get(DATA_PAGE) != 0
    }

    pub fn set_data_page(&mut self, data_page: bool) {
        self.set(DATA_PAGE, data_page as u32);
    }

    /// PDU format. Below 240 the message is addressed (PDU1).
    pub const fn pdu_format(&self) -> u8 {
        self.get(PDU_FORMAT) as u8
    }

    pub fn set_pdu_format(&mut self, pf: u8) {
        self.set(PDU_FORMAT, pf as u32);
    }

    /// PDU specific: destination address or group extension.
    pub const fn pdu_specific(&self) -> u8 {
        self.get(PDU_SPECIFIC) as u8
    }

    pub fn set_pdu_specific(&mut self, ps: u8) {
        self.set(PDU_SPECIFIC, ps as u32);
    }

    pub const fn source_address(&self) -> u8 {
        self.get(SOURCE) as u8
    }

    pub fn set_source_address(&mut self, sa: u8) {
        self.set(SOURCE, sa as u32);
    }

    #[inline]
    pub const fn is_pdu1(&self) -> bool {
        self.pdu_format() < PDU2_THRESHOLD
    }

    /// Destination address of a PDU1 message, `None` for PDU2.
    pub const fn destination(&self) -> Option<u8> {
        if self.is_pdu1() {
            Some(self.pdu_specific())
        } else {
            None
        }
    }

    /// 18-bit PGN: reserved at bit 17, data page at bit 16, PF and PS below.
    /// The PS byte is zero for PDU1 since it holds the destination.
    pub const fn pgn(&self) -> u32 {
        let ps = if self.is_pdu1() { 0 } else { self.pdu_specific() as u32 };
        ((self.reserved() as u32) << 17)
            | ((self.data_page() as u32) << 16)
            | ((self.pdu_format() as u32) << 8)
            | ps
    }

    /// Set reserved, data page and PF from `pgn`. PS is only taken from a
    /// PDU2 PGN; a PDU1 message keeps its destination.
    pub fn set_pgn(&mut self, pgn: u32) {
        self.set_reserved((pgn >> 17) & 0x01 != 0);
        self.set_data_page((pgn >> 16) & 0x01 != 0);
        self.set_pdu_format((pgn >> 8) as u8);
        if !is_pdu1(pgn) {
            self.set_pdu_specific(pgn as u8);
        }
    }
}

impl From<u32> for J1939Id {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<J1939Id> for u32 {
    fn from(id: J1939Id) -> Self {
        id.0
    }
}

//==================================================================================J1939_ID_BUILDER
/// Fluent builder that enforces the PDU1/PDU2 rules.
#[derive(Debug, Clone, Copy)]
pub struct J1939IdBuilder {
    priority: u8,
    pgn: u32,
    source_address: u8,
    destination: Option<u8>,
}

impl J1939IdBuilder {
    /// Builder for `pgn` sent by `source_address`, default priority 6.
    pub fn new(pgn: u32, source_address: u8) -> Self {
        Self {
            priority: 6,
            pgn,
            source_address,
            destination: None,
        }
    }

    /// Only the three low bits are used.
    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = priority & 0x07;
        self
    }

    /// Address the message (PDU1 only).
    pub fn destination(mut self, destination: u8) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Build the identifier:
    /// - without destination the PGN must be PDU2 (PF >= 240)
    /// - with a destination the PGN must be PDU1 with a zero PS byte
    pub fn build(self) -> Result<J1939Id, IdBuildError> {
        let pf = ((self.pgn >> 8) & 0xFF) as u8;
        let ps = (self.pgn & 0xFF) as u8;
        let mut id = J1939Id(0);
        id.set_priority(self.priority);
        id.set_source_address(self.source_address);

        match self.destination {
            None => {
                if pf < PDU2_THRESHOLD {
                    return Err(IdBuildError::InvalidForBroadcast);
                }
                id.set_pgn(self.pgn);
            }
            Some(da) => {
                if pf >= PDU2_THRESHOLD {
                    return Err(IdBuildError::InvalidForAddressed { pf });
                }
                if ps != 0 {
                    return Err(IdBuildError::PsAddressedMustBeNull);
                }
                id.set_pgn(self.pgn);
                id.set_pdu_specific(da);
            }
        }
        Ok(id)
    }
}
