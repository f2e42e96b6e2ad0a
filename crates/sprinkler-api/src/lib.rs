// sprinkler-api: Async Rust client for the sprinkler controller's HTTP JSON API

pub mod error;
pub mod invoker;
pub mod load_test;
pub mod models;
pub mod transport;

pub use error::Error;
pub use invoker::{ApiInvoker, Resolution};
pub use load_test::{FileReport, LoadTestEvent, LoadTestReport, UI_FILES, UiLoadTester};
pub use models::{DeviceResponse, DeviceStatus, StatusEnvelope, ZoneCommand, ZoneId};
pub use transport::TransportConfig;
