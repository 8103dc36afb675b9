//! Backend commands queued from UI to backend worker.

use shared::Passenger;

use crate::controller::reducer::RequestToken;

pub enum BackendCommand {
    Predict {
        token: RequestToken,
        passenger: Passenger,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
