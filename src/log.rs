//! Console Logging
//!
//! Browser console logging, compiled out off-wasm so the engines stay
//! runnable under native `cargo test`.

pub fn console_log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
