#![allow(dead_code)]
mod app;
mod math;

pub use app::{spawn_storefront, TestStorefront, EMAIL, PASSWORD};
pub use math::assert_on_decimal;

use lazy_static::lazy_static;

use rare_beauty::telemetry::{generate_subscriber, init_subscriber};

lazy_static! {
    /// To ensure logs are only outputted in tests when required, by default
    /// tests run with no logs being captured
    ///
    /// In order to set logs to be captured during tests run them with:
    /// `TEST_LOG=true cargo test | bunyan`
    pub static ref TRACING: () = {
        let filter = String::from("debug");
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(generate_subscriber("test".into(), filter, std::io::stdout));
        } else {
            init_subscriber(generate_subscriber("test".into(), filter, std::io::sink));
        }
    };
}
