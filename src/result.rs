use crate::control_data::PayloadFault;
use crate::identity::ControllerType;
use crate::port::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionError {
    /// The bus could not be initialized or the controller did not acknowledge.
    TransportUnavailable(TransportError),
    /// The connected controller is absent or not the one this session expects.
    IdentityMismatch {
        expected: ControllerType,
        found: ControllerType,
    },
    /// The polled payload was degenerate; the previous control data is kept.
    InvalidPayload(PayloadFault),
}

impl From<TransportError> for ExtensionError {
    fn from(e: TransportError) -> Self {
        Self::TransportUnavailable(e)
    }
}

impl From<PayloadFault> for ExtensionError {
    fn from(e: PayloadFault) -> Self {
        Self::InvalidPayload(e)
    }
}

impl std::fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransportUnavailable(e) => write!(f, "transport unavailable: {e}"),
            Self::IdentityMismatch { expected, found } => {
                write!(f, "expected {expected} but found {found}")
            }
            Self::InvalidPayload(fault) => write!(f, "invalid payload: {fault}"),
        }
    }
}

impl std::error::Error for ExtensionError {}

pub type ExtensionResult<T> = Result<T, ExtensionError>;
