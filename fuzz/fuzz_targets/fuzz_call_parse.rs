#![no_main]

use libfuzzer_sys::fuzz_target;

use makefle_staking::{PublicCall, ReadOnlyCall, Value};

// Fuzz argument-literal parsing and call decoding. Must never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = text.split(' ');
    let function = parts.next().unwrap_or_default();
    let args: Vec<Value> = parts.filter_map(|p| p.parse().ok()).collect();

    let _ = PublicCall::parse(function, &args);
    let _ = ReadOnlyCall::parse(function, &args);
    for arg in &args {
        let _ = arg.to_string().parse::<Value>();
    }
});
