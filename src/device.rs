use std::borrow::BorrowMut;
use std::marker::PhantomData;

use crate::control_data::verify_data;
use crate::identity::{identify_controller, IDENTITY_POINTER, IDENTITY_SIZE};
use crate::prelude::*;

/// Register pointer of the control data.
const CONTROL_DATA_POINTER: u8 = 0x00;

/// Where a session stands with the controller on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Nothing identified, or the session was reset.
    Disconnected,
    /// An acceptable controller was identified but no control data was accepted yet.
    Identifying,
    /// A controller answered, but not the kind this session expects.
    IdentityMismatch,
    /// Identified and seeded with valid control data.
    Connected,
}

/// The bus and what is known about the controller on it.
///
/// Owned by an [`ExtensionController`], or kept by the caller and lent to several
/// controllers in turn with [`ExtensionController::with_data`].
#[derive(Debug)]
pub struct ExtensionData<P> {
    port: P,
    connected_id: ControllerType,
    control_data: ControlData,
}

impl<P: ExtensionPort> ExtensionData<P> {
    pub const fn new(port: P) -> Self {
        Self {
            port,
            connected_id: ControllerType::NoController,
            control_data: ControlData::new(),
        }
    }

    /// Returns the controller found by the last identification.
    #[must_use]
    pub const fn connected_id(&self) -> ControllerType {
        self.connected_id
    }

    #[must_use]
    pub const fn control_data(&self) -> &ControlData {
        &self.control_data
    }

    /// Gives back the port.
    pub fn release(self) -> P {
        self.port
    }
}

/// A session with the controller on one bus.
///
/// The session reads the identification of the controller, decides whether it is the
/// expected one and keeps the last valid control data. Polling is left to the caller;
/// nothing is retried automatically.
#[derive(Debug)]
pub struct ExtensionController<P, D = ExtensionData<P>> {
    data: D,
    controller_id: ControllerType,
    data_size: usize,
    enforce_id: bool,
    state: ConnectionState,
    _port: PhantomData<P>,
}

impl<P: ExtensionPort> ExtensionController<P> {
    /// Creates a session accepting any controller.
    pub fn new(port: P) -> Self {
        Self::from_data(
            ExtensionData::new(port),
            ControllerType::UnknownController,
            false,
        )
    }

    /// Creates a session that only accepts controllers of type `controller_id`.
    pub fn for_controller(port: P, controller_id: ControllerType) -> Self {
        Self::from_data(ExtensionData::new(port), controller_id, true)
    }

    /// Gives back the port.
    pub fn release(self) -> P {
        self.data.release()
    }
}

impl<'a, P: ExtensionPort> ExtensionController<P, &'a mut ExtensionData<P>> {
    /// Creates a session accepting any controller on borrowed bus data.
    pub fn with_data(data: &'a mut ExtensionData<P>) -> Self {
        Self::from_data(data, ControllerType::UnknownController, false)
    }

    /// Creates a session for `controller_id` on borrowed bus data.
    pub fn with_data_for_controller(
        data: &'a mut ExtensionData<P>,
        controller_id: ControllerType,
    ) -> Self {
        Self::from_data(data, controller_id, true)
    }
}

impl<P, D> ExtensionController<P, D>
where
    P: ExtensionPort,
    D: BorrowMut<ExtensionData<P>>,
{
    fn from_data(data: D, controller_id: ControllerType, enforce_id: bool) -> Self {
        let mut controller = Self {
            data,
            controller_id,
            data_size: CONTROL_DATA_MAX,
            enforce_id,
            state: ConnectionState::Disconnected,
            _port: PhantomData,
        };
        controller.state = controller.identified_state();
        controller
    }

    /// Initializes the controller, identifies it and, if it is acceptable, reads the
    /// first control data.
    ///
    /// # Errors
    ///
    /// This function will return an error if the bus failed, the controller is not the
    /// expected one or its first control data was invalid.
    pub fn connect(&mut self) -> ExtensionResult<()> {
        if let Err(error) = self.data.borrow_mut().port.initialize() {
            log::warn!("Failed to initialize controller: {error}");
            self.data.borrow_mut().connected_id = ControllerType::NoController;
            self.state = ConnectionState::Disconnected;
            return Err(error.into());
        }

        self.identify();
        self.check_controller_id()?;

        self.poll()?;
        self.state = ConnectionState::Connected;
        log::debug!("Connected to {}", self.connected_id());
        Ok(())
    }

    /// Forgets the current controller and connects again.
    ///
    /// # Errors
    ///
    /// Same as [`ExtensionController::connect`].
    pub fn reconnect(&mut self) -> ExtensionResult<()> {
        self.reset();
        self.connect()
    }

    /// Reads new control data from the controller.
    ///
    /// The control data is only replaced by a complete and plausible payload, on any
    /// error the previous values are kept.
    ///
    /// # Errors
    ///
    /// This function will return an error if the connected controller is not accepted
    /// by this session, the read failed or the payload was all zeros or all ones.
    pub fn poll(&mut self) -> ExtensionResult<()> {
        self.check_controller_id()?;

        let mut buffer = [0u8; CONTROL_DATA_MAX];
        let payload = &mut buffer[..self.data_size];

        let data = self.data.borrow_mut();
        if let Err(error) = data.port.read_data(CONTROL_DATA_POINTER, payload) {
            log::warn!("Failed to read control data: {error}");
            return Err(error.into());
        }
        log::trace!("Control data: {payload:02X?}");

        if let Err(fault) = verify_data(payload) {
            log::warn!("Rejected control data {payload:02X?}: {fault}");
            return Err(fault.into());
        }

        data.control_data.replace(payload);
        Ok(())
    }

    /// Reads the identification bytes and records which controller is connected.
    pub fn identify(&mut self) -> ControllerType {
        self.state = ConnectionState::Identifying;

        let connected_id = match self.request_identity() {
            Ok(id) => identify_controller(&id),
            Err(_) => ControllerType::NoController,
        };
        log::debug!("Identified {connected_id}");

        self.data.borrow_mut().connected_id = connected_id;
        self.state = self.identified_state();
        connected_id
    }

    /// Reads the raw identification bytes.
    ///
    /// # Errors
    ///
    /// This function will return an error if the controller did not answer.
    pub fn request_identity(&mut self) -> ExtensionResult<[u8; IDENTITY_SIZE]> {
        let mut id = [0u8; IDENTITY_SIZE];
        self.data
            .borrow_mut()
            .port
            .read_data(IDENTITY_POINTER, &mut id)?;
        log::trace!("Identity: {id:02X?}");
        Ok(id)
    }

    /// Forgets the connected controller and clears the control data.
    pub fn reset(&mut self) {
        let data = self.data.borrow_mut();
        data.connected_id = ControllerType::NoController;
        data.control_data.clear();
        self.state = ConnectionState::Disconnected;
    }

    #[must_use]
    pub fn connected_id(&self) -> ControllerType {
        self.data.borrow().connected_id
    }

    /// Returns the controller type this session expects.
    #[must_use]
    pub const fn controller_id(&self) -> ControllerType {
        self.controller_id
    }

    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub const fn enforce_id(&self) -> bool {
        self.enforce_id
    }

    /// When enforced, only the expected controller type is accepted. Otherwise any
    /// controller that answers is.
    ///
    /// A connected session stays connected only while its controller is still accepted.
    pub fn set_enforce_id(&mut self, enforce: bool) {
        self.enforce_id = enforce;
        if self.state != ConnectionState::Connected || !self.controller_id_matches() {
            self.state = self.identified_state();
        }
    }

    /// Number of control data bytes read per poll.
    #[must_use]
    pub const fn data_size(&self) -> usize {
        self.data_size
    }

    /// Changes how many control data bytes are read per poll, clamped to
    /// `1..=CONTROL_DATA_MAX`. Bytes past it keep their last value.
    pub fn set_data_size(&mut self, size: usize) {
        self.data_size = size.clamp(1, CONTROL_DATA_MAX);
    }

    #[must_use]
    pub fn control_data(&self) -> &ControlData {
        &self.data.borrow().control_data
    }

    /// Mutable access to the control data, for emulating a controller.
    pub fn control_data_mut(&mut self) -> &mut ControlData {
        &mut self.data.borrow_mut().control_data
    }

    /// Returns the byte at `index` of the control data.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn control_byte(&self, index: u8) -> u8 {
        self.control_data().byte(index)
    }

    /// Returns whether the active-low bit `bit` of byte `index` is pressed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn control_bit(&self, index: u8, bit: u8) -> bool {
        self.control_data().raw_bit(index, bit)
    }

    pub fn into_data(self) -> D {
        self.data
    }

    fn controller_id_matches(&self) -> bool {
        let connected_id = self.connected_id();
        connected_id == self.controller_id || (!self.enforce_id && connected_id.is_connected())
    }

    fn check_controller_id(&self) -> ExtensionResult<()> {
        if self.controller_id_matches() {
            Ok(())
        } else {
            Err(ExtensionError::IdentityMismatch {
                expected: self.controller_id,
                found: self.connected_id(),
            })
        }
    }

    fn identified_state(&self) -> ConnectionState {
        if !self.connected_id().is_connected() {
            ConnectionState::Disconnected
        } else if self.controller_id_matches() {
            ConnectionState::Identifying
        } else {
            ConnectionState::IdentityMismatch
        }
    }
}

impl<P, D: BorrowMut<ExtensionData<P>>> AsRef<ControlData> for ExtensionController<P, D> {
    fn as_ref(&self) -> &ControlData {
        &self.data.borrow().control_data
    }
}

impl<P, D: BorrowMut<ExtensionData<P>>> AsMut<ControlData> for ExtensionController<P, D> {
    fn as_mut(&mut self) -> &mut ControlData {
        &mut self.data.borrow_mut().control_data
    }
}
