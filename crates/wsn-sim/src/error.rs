use thiserror::Error;
use wsn_core::WsnError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] WsnError),

    #[error("failed to start driver thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("simulation driver has shut down")]
    DriverDisconnected,

    #[error("simulation driver thread panicked")]
    DriverPanicked,
}

pub type SimResult<T> = Result<T, SimError>;
