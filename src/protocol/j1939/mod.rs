//! J1939 view over extended CAN frames.
//!
//! A [`J1939Message`] is a frame with a 29-bit identifier and at most eight
//! payload bytes. Its identifier is interpreted through [`J1939Id`]; the
//! payload of an address claim is a [`Name`].
use core::fmt;

use crate::infra::frame::{Frame, CAN20_CAPACITY};

mod id;
mod name;

pub use id::{is_pdu1, J1939Id, J1939IdBuilder, PDU2_THRESHOLD};
pub use name::{Name, NameBuilder};

/// Source address of a node that has not claimed an address yet.
pub const NULL_ADDRESS: u8 = 254;
/// Destination address reaching every node.
pub const BROADCAST_ADDRESS: u8 = 255;

/// Byte used to fill unused payload positions.
pub const PAD_BYTE: u8 = 0xFF;

/// Identifier of an empty message: priority 7, PGN 0, source address 0xFF.
const DEFAULT_ID: u32 = 0x1C00_00FF;

/// Frame interpreted as a J1939 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct J1939Message {
    frame: Frame<'static>,
}

impl Default for J1939Message {
    fn default() -> Self {
        Self::empty()
    }
}

impl J1939Message {
    /// Message with no payload, priority 7, PGN 0 and source address 0xFF.
    pub fn empty() -> Self {
        Self {
            frame: Frame::with_header(DEFAULT_ID, true, 0, CAN20_CAPACITY, PAD_BYTE),
        }
    }

    /// Message for `pgn` from `sa`. `da` only applies to PDU1 PGNs and
    /// only the three low bits of `priority` are used.
    pub fn new(pgn: u32, sa: u8, da: u8, priority: u8) -> Self {
        let mut message = Self::empty();
        let mut id = J1939Id(0);
        id.set_priority(priority);
        id.set_pgn(pgn);
        if is_pdu1(pgn) {
            id.set_pdu_specific(da);
        }
        id.set_source_address(sa);
        message.frame.set_raw_id(id.raw());
        message
    }

    /// Copy of `frame` interpreted as a J1939 message. See [`J1939Message::valid`].
    pub fn from_frame(frame: &Frame<'_>) -> Self {
        let mut message = Self::empty();
        message.frame.copy_from(frame);
        message
    }

    pub fn frame(&self) -> &Frame<'static> {
        &self.frame
    }

    /// Mutable frame, e.g. to read from a connection into the message.
    pub fn frame_mut(&mut self) -> &mut Frame<'static> {
        &mut self.frame
    }

    pub fn into_frame(self) -> Frame<'static> {
        self.frame
    }

    /// Identifier fields.
    #[inline]
    pub fn j1939_id(&self) -> J1939Id {
        J1939Id(self.frame.id())
    }

    #[inline]
    fn update_id(&mut self, update: impl FnOnce(&mut J1939Id)) {
        let mut id = self.j1939_id();
        update(&mut id);
        self.frame.set_raw_id(id.raw());
    }

    pub fn data(&self) -> &[u8] {
        self.frame.data()
    }

    /// Replace the payload. Messages carry at most eight bytes; longer data
    /// makes the message invalid.
    pub fn set_data(&mut self, data: &[u8]) {
        self.frame.set_data(data);
    }

    //==============================================================================NAME
    /// Payload as a NAME, or `None` when it is shorter than eight bytes.
    pub fn name(&self) -> Option<Name> {
        let bytes: [u8; 8] = self.frame.data().get(..8)?.try_into().ok()?;
        Some(Name::from_bytes(bytes))
    }

    /// Set the payload to `name`.
    pub fn set_name(&mut self, name: Name) {
        self.frame.resize(8, PAD_BYTE);
        self.frame.data_mut()[..8].copy_from_slice(&name.to_bytes());
    }

    //==============================================================================FIELDS
    pub fn priority(&self) -> u8 {
        self.j1939_id().priority()
    }

    /// Only the three low bits are used.
    pub fn set_priority(&mut self, priority: u8) {
        self.update_id(|id| id.set_priority(priority));
    }

    pub fn reserved(&self) -> bool {
        self.j1939_id().reserved()
    }

    pub fn set_reserved(&mut self, reserved: bool) {
        self.update_id(|id| id.set_reserved(reserved));
    }

    pub fn data_page(&self) -> bool {
        self.j1939_id().data_page()
    }

    pub fn set_data_page(&mut self, data_page: bool) {
        self.update_id(|id| id.set_data_page(data_page));
    }

    pub fn pdu_format(&self) -> u8 {
        self.j1939_id().pdu_format()
    }

    pub fn set_pdu_format(&mut self, pf: u8) {
        self.update_id(|id| id.set_pdu_format(pf));
    }

    pub fn pdu_specific(&self) -> u8 {
        self.j1939_id().pdu_specific()
    }

    pub fn set_pdu_specific(&mut self, ps: u8) {
        self.update_id(|id| id.set_pdu_specific(ps));
    }

    /// Group extension of a PDU2 message, `0` for PDU1.
    pub fn group_extension(&self) -> u8 {
        let id = self.j1939_id();
        if id.is_pdu1() {
            0x00
        } else {
            id.pdu_specific()
        }
    }

    /// No effect on a PDU1 message.
    pub fn set_group_extension(&mut self, ge: u8) {
        if !self.j1939_id().is_pdu1() {
            self.set_pdu_specific(ge);
        }
    }

    /// Destination of a PDU1 message, [`BROADCAST_ADDRESS`] for PDU2.
    pub fn dest_address(&self) -> u8 {
        self.j1939_id().destination().unwrap_or(BROADCAST_ADDRESS)
    }

    /// No effect on a PDU2 message.
    pub fn set_dest_address(&mut self, da: u8) {
        if self.j1939_id().is_pdu1() {
            self.set_pdu_specific(da);
        }
    }

    pub fn source_address(&self) -> u8 {
        self.j1939_id().source_address()
    }

    pub fn set_source_address(&mut self, sa: u8) {
        self.update_id(|id| id.set_source_address(sa));
    }

    /// 18-bit PGN. The PS byte is zero for PDU1 messages.
    pub fn pgn(&self) -> u32 {
        self.j1939_id().pgn()
    }

    /// Set reserved, data page and PF, plus PS for a PDU2 PGN. A PDU1 PGN
    /// leaves the destination untouched.
    pub fn set_pgn(&mut self, pgn: u32) {
        self.update_id(|id| id.set_pgn(pgn));
    }

    /// `true` for PDU2 messages and PDU1 messages sent to [`BROADCAST_ADDRESS`].
    pub fn broadcast(&self) -> bool {
        let id = self.j1939_id();
        !id.is_pdu1() || id.pdu_specific() == BROADCAST_ADDRESS
    }

    /// `true` for extended frames carrying at most eight bytes.
    pub fn valid(&self) -> bool {
        self.frame.ext() && self.frame.size() <= CAN20_CAPACITY
    }
}

impl From<Frame<'_>> for J1939Message {
    fn from(frame: Frame<'_>) -> Self {
        Self::from_frame(&frame)
    }
}

impl From<J1939Message> for Frame<'static> {
    fn from(message: J1939Message) -> Self {
        message.frame
    }
}

impl fmt::Display for J1939Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.frame, f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for J1939Message {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.frame)
    }
}
