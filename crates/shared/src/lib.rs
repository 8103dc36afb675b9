pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{Embarked, Passenger, PassengerClass, PassengerField, Sex};
pub use error::FieldError;
pub use protocol::Prediction;
