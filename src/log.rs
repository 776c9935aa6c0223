//! Serial logging, compiled out unless the `esp32-log` feature is enabled.

#[cfg(feature = "esp32-log")]
macro_rules! serial_log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! serial_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub(crate) use serial_log;
