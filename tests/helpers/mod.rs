/// Test doubles simulating a CAN bus, a serial link and a timer during
/// integration tests.
use canny::error::{Error, Result};
use canny::infra::frame::Frame;
use canny::protocol::connection::polling::PollTimer;
use canny::protocol::connection::Connection;
use canny::protocol::controller::{
    check_read_capacity, check_write_size, Bitrate, BitrateSupport, Controller, Mode,
};
use canny::protocol::realdash::SerialStream;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::rc::Rc;
use tokio::time::{sleep, Duration};

type Wire<T> = Rc<RefCell<VecDeque<T>>>;

//==================================================================================BUS
/// In-memory bus controller negotiating its bitrate through `T`.
#[allow(dead_code)]
pub struct MockController<T> {
    tx: Wire<Frame<'static>>,
    rx: Wire<Frame<'static>>,
    tx_capacity: usize,
    state: Option<Bitrate>,
    _support: PhantomData<T>,
}

#[allow(dead_code)]
impl<T: BitrateSupport> MockController<T> {
    /// Construct two controllers attached to the same bus (DUT ↔ host).
    /// Each direction holds at most `tx_capacity` frames in flight.
    pub fn create_pair(tx_capacity: usize) -> (Self, Self) {
        let a_to_b: Wire<Frame<'static>> = Rc::default();
        let b_to_a: Wire<Frame<'static>> = Rc::default();
        let dut = Self {
            tx: a_to_b.clone(),
            rx: b_to_a.clone(),
            tx_capacity,
            state: None,
            _support: PhantomData,
        };
        let host = Self {
            tx: b_to_a,
            rx: a_to_b,
            tx_capacity,
            state: None,
            _support: PhantomData,
        };
        (dut, host)
    }

    /// Frames sent by this controller and not yet read by its peer.
    pub fn in_flight(&self) -> usize {
        self.tx.borrow().len()
    }
}

impl<T: BitrateSupport> Controller for MockController<T> {
    fn begin(&mut self, bitrate: Bitrate) -> bool {
        self.state = Some(T::nearest_supported(bitrate));
        true
    }

    fn mode(&self) -> Mode {
        self.bitrate().mode()
    }

    fn bitrate(&self) -> Bitrate {
        self.state.unwrap_or(Bitrate::Can20_250K)
    }
}

impl<T: BitrateSupport> Connection for MockController<T> {
    fn read(&mut self, frame: &mut Frame<'_>) -> Result {
        if self.state.is_none() {
            return Err(Error::NotReady);
        }
        check_read_capacity(self.mode(), frame)?;
        let next = self.rx.borrow_mut().pop_front().ok_or(Error::Fifo)?;
        frame.copy_from(&next);
        Ok(())
    }

    fn write(&mut self, frame: &Frame<'_>) -> Result {
        if self.state.is_none() {
            return Err(Error::NotReady);
        }
        check_write_size(self.mode(), frame)?;
        let mut tx = self.tx.borrow_mut();
        if tx.len() >= self.tx_capacity {
            return Err(Error::Fifo);
        }
        tx.push_back(frame.to_static());
        Ok(())
    }
}

//==================================================================================SERIAL
/// One end of an in-memory serial link.
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockSerial {
    tx: Wire<u8>,
    rx: Wire<u8>,
}

#[allow(dead_code)]
impl MockSerial {
    /// Construct both ends of a serial cable (device ↔ dashboard).
    pub fn create_pair() -> (Self, Self) {
        let a_to_b: Wire<u8> = Rc::default();
        let b_to_a: Wire<u8> = Rc::default();
        (
            Self {
                tx: a_to_b.clone(),
                rx: b_to_a.clone(),
            },
            Self {
                tx: b_to_a,
                rx: a_to_b,
            },
        )
    }

    /// Bytes waiting on the peer side.
    pub fn sent(&self) -> Vec<u8> {
        self.tx.borrow().iter().copied().collect()
    }

    /// Inject raw bytes as if the peer had sent them.
    pub fn inject(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }
}

impl SerialStream for MockSerial {
    fn available(&self) -> usize {
        self.rx.borrow().len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.borrow_mut().pop_front()
    }

    fn write(&mut self, bytes: &[u8]) -> Result {
        self.tx.borrow_mut().extend(bytes.iter().copied());
        Ok(())
    }

    fn flush(&mut self) -> Result {
        Ok(())
    }
}

//==================================================================================TIMER
#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct MockTimer;

impl PollTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}
